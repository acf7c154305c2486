// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model handle and record types shared by loaders and extractors.

use std::path::{Path, PathBuf};

/// One extracted object, as the toolkit reports it.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// A successfully loaded model.
///
/// Opaque to the service: extractors receive it read-only and it never
/// outlives the request that loaded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelHandle {
    source: PathBuf,
    version: Option<String>,
}

impl ModelHandle {
    pub fn new(source: impl AsRef<Path>) -> Self {
        Self {
            source: source.as_ref().to_path_buf(),
            version: None,
        }
    }

    /// Attach the model version reported by the toolkit.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Path of the staged file the model was loaded from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}
