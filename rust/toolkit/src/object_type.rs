// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The fixed enumeration of extractable object categories.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Object category a toolkit can extract from a loaded model.
///
/// Declaration order is the processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Spaces,
    Surfaces,
    Subsurfaces,
}

impl ObjectType {
    /// Every supported category, in processing order.
    pub const ALL: [ObjectType; 3] = [
        ObjectType::Spaces,
        ObjectType::Surfaces,
        ObjectType::Subsurfaces,
    ];

    /// Wire name used in query strings, JSON keys and toolkit commands.
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectType::Spaces => "spaces",
            ObjectType::Surfaces => "surfaces",
            ObjectType::Subsurfaces => "subsurfaces",
        }
    }

    /// Position in [`ObjectType::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Comma-separated list of valid names, for error messages.
    pub fn valid_names() -> String {
        Self::ALL.map(ObjectType::as_str).join(", ")
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::UnknownObjectType(s.to_string()))
    }
}
