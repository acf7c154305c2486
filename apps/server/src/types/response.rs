// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types for the API.

use osm_toolkit::{ObjectType, Record};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Outcome of one object category.
///
/// Serialized as `null`, `[]`, the record list, or `{"error": "..."}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CategoryResult {
    /// Not requested.
    #[default]
    Absent,
    /// Requested, extractor found nothing.
    Empty,
    Records(Vec<Record>),
    /// Requested, extraction failed.
    Failed(String),
}

impl CategoryResult {
    /// Collapse "no result object" and "empty list" into [`CategoryResult::Empty`].
    pub fn from_extracted(records: Option<Vec<Record>>) -> Self {
        match records {
            Some(records) if !records.is_empty() => CategoryResult::Records(records),
            _ => CategoryResult::Empty,
        }
    }
}

impl Serialize for CategoryResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CategoryResult::Absent => serializer.serialize_none(),
            CategoryResult::Empty => serializer.collect_seq(std::iter::empty::<Record>()),
            CategoryResult::Records(records) => records.serialize(serializer),
            CategoryResult::Failed(message) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", message)?;
                map.end()
            }
        }
    }
}

/// Parse response: one slot per category, always all three.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseResponse {
    pub spaces: CategoryResult,
    pub surfaces: CategoryResult,
    pub subsurfaces: CategoryResult,
}

impl ParseResponse {
    pub fn set(&mut self, object_type: ObjectType, result: CategoryResult) {
        let slot = match object_type {
            ObjectType::Spaces => &mut self.spaces,
            ObjectType::Surfaces => &mut self.surfaces,
            ObjectType::Subsurfaces => &mut self.subsurfaces,
        };
        *slot = result;
    }
}
