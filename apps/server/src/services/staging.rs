// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-request staging of uploads on the local filesystem.
//!
//! The toolkit opens models by path, so every upload is written into its own
//! freshly created directory. The returned [`StagedUpload`] guard hands that
//! directory to the cleanup worker when it is dropped.

use super::cleanup::CleanupQueue;
use crate::error::ApiError;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Filename assumed when the client does not send one.
pub const DEFAULT_FILENAME: &str = "model.osm";

const DEFAULT_EXTENSION: &str = ".osm";
const STAGED_FILE_STEM: &str = "uploaded_model";
const STAGING_DIR_PREFIX: &str = "osm-upload-";

/// Creates and releases staging directories under a root directory.
#[derive(Debug, Clone)]
pub struct TempStorage {
    root: PathBuf,
    cleanup: CleanupQueue,
}

impl TempStorage {
    /// Create storage in the specified root directory.
    pub async fn new(root: impl Into<PathBuf>, cleanup: CleanupQueue) -> Self {
        let root = root.into();

        // Create root directory if it doesn't exist
        if let Err(e) = tokio::fs::create_dir_all(&root).await {
            tracing::warn!(
                error = %e,
                path = %root.display(),
                "Failed to create staging root"
            );
        }

        Self { root, cleanup }
    }

    /// Write `bytes` to `uploaded_model<ext>` inside a new unique directory.
    ///
    /// If the write fails the directory is removed before returning.
    pub async fn stage(
        &self,
        bytes: &[u8],
        original_filename: &str,
    ) -> Result<StagedUpload, ApiError> {
        let dir = self
            .root
            .join(format!("{STAGING_DIR_PREFIX}{}", Uuid::new_v4().simple()));
        tokio::fs::create_dir(&dir).await.map_err(ApiError::Storage)?;

        let path = dir.join(format!(
            "{STAGED_FILE_STEM}{}",
            upload_extension(original_filename)
        ));

        write_staged(&dir, &path, bytes).await?;
        tracing::info!(path = %path.display(), size = bytes.len(), "Temporary file saved");

        Ok(StagedUpload {
            path,
            cleanup: Some(self.cleanup.clone()),
        })
    }
}

/// Write the upload into `dir`, removing `dir` again if the write fails.
async fn write_staged(dir: &Path, path: &Path, bytes: &[u8]) -> Result<(), ApiError> {
    if let Err(e) = tokio::fs::write(path, bytes).await {
        tracing::error!(error = %e, path = %path.display(), "Error saving temp file");
        if let Err(rm) = tokio::fs::remove_dir_all(dir).await {
            tracing::warn!(error = %rm, dir = %dir.display(), "Failed to remove staging directory");
        }
        return Err(ApiError::Storage(e));
    }
    Ok(())
}

/// A staged upload. Dropping it schedules release of its directory, once.
#[derive(Debug)]
pub struct StagedUpload {
    path: PathBuf,
    cleanup: Option<CleanupQueue>,
}

impl StagedUpload {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagedUpload {
    fn drop(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup.schedule(std::mem::take(&mut self.path));
        }
    }
}

/// Extension of the client filename including the dot, `.osm` when absent.
///
/// Only the last path component is considered.
pub fn upload_extension(original_filename: &str) -> String {
    Path::new(original_filename)
        .extension()
        .map(|ext| ext.to_string_lossy())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
}

/// Delete the directory containing `path`. Missing paths and deletion
/// failures are logged, never returned.
pub async fn release(path: &Path) {
    let Some(dir) = staging_dir_of(path) else {
        return;
    };

    match tokio::fs::try_exists(path).await {
        Ok(true) => {}
        _ => {
            tracing::warn!(path = %path.display(), "Temporary file/directory not found for cleanup");
            return;
        }
    }

    match tokio::fs::remove_dir_all(dir).await {
        Ok(()) => tracing::info!(dir = %dir.display(), "Cleaned up temporary directory"),
        Err(e) => tracing::error!(
            error = %e,
            dir = %dir.display(),
            "Error cleaning up temp directory"
        ),
    }
}

/// Synchronous [`release`] for when no runtime worker is available.
pub fn release_blocking(path: &Path) {
    let Some(dir) = staging_dir_of(path) else {
        return;
    };

    if !path.exists() {
        tracing::warn!(path = %path.display(), "Temporary file/directory not found for cleanup");
        return;
    }

    match std::fs::remove_dir_all(dir) {
        Ok(()) => tracing::info!(dir = %dir.display(), "Cleaned up temporary directory"),
        Err(e) => tracing::error!(
            error = %e,
            dir = %dir.display(),
            "Error cleaning up temp directory"
        ),
    }
}

fn staging_dir_of(path: &Path) -> Option<&Path> {
    let dir = path.parent().filter(|dir| !dir.as_os_str().is_empty());
    if dir.is_none() {
        tracing::warn!(path = %path.display(), "Refusing cleanup of path without a directory");
    }
    dir
}
