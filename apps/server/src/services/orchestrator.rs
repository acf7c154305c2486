// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Load a staged model and run the selected extractors.

use super::staging::StagedUpload;
use crate::error::ApiError;
use crate::types::{CategoryResult, ObjectTypeSelection, ParseResponse};
use osm_toolkit::{ModelHandle, ObjectType, Toolkit};
use std::sync::Arc;
use tokio::task::JoinError;

/// Load the staged model and extract every selected category.
///
/// Loader problems fail the whole request. Extractor problems are confined
/// to their own category slot. Each blocking toolkit call holds its own
/// reference to `staged`, so the staging directory outlives it even when the
/// request is cancelled mid-call.
pub async fn parse_staged(
    toolkit: &Toolkit,
    staged: Arc<StagedUpload>,
    selection: ObjectTypeSelection,
) -> Result<ParseResponse, ApiError> {
    let loader = toolkit
        .loader()
        .cloned()
        .ok_or(ApiError::LoaderUnavailable)?;

    let load_guard = staged.clone();
    let model = tokio::task::spawn_blocking(move || loader.load(load_guard.path()))
        .await?
        .map_err(|e| ApiError::LoadFailed(e.to_string()))?;
    tracing::info!(version = ?model.version(), "OpenStudio model loaded successfully");

    let model = Arc::new(model);
    let mut response = ParseResponse::default();
    for object_type in selection.iter() {
        let result = extract_category(toolkit, object_type, model.clone(), staged.clone()).await;
        response.set(object_type, result);
    }

    Ok(response)
}

async fn extract_category(
    toolkit: &Toolkit,
    object_type: ObjectType,
    model: Arc<ModelHandle>,
    staged: Arc<StagedUpload>,
) -> CategoryResult {
    let Some(extractor) = toolkit.extractor(object_type).cloned() else {
        tracing::warn!(%object_type, "Extractor not available");
        return CategoryResult::Failed(format!(
            "Parsing function for {object_type} not available: no {object_type} extractor is wired up"
        ));
    };

    tracing::debug!(%object_type, "Processing object type");
    let task = tokio::task::spawn_blocking(move || {
        let _staged = staged;
        extractor.extract(&model)
    });
    match task.await {
        Ok(Ok(records)) => {
            let result = CategoryResult::from_extracted(records);
            if let CategoryResult::Records(records) = &result {
                tracing::debug!(%object_type, count = records.len(), "Extracted objects");
            }
            result
        }
        Ok(Err(e)) => {
            tracing::warn!(%object_type, error = %e, "Error parsing object type");
            CategoryResult::Failed(format!("Error processing {object_type}: {e}"))
        }
        Err(e) => {
            let message = join_failure(e);
            tracing::error!(%object_type, error = %message, "Extractor task failed");
            CategoryResult::Failed(format!("Error processing {object_type}: {message}"))
        }
    }
}

fn join_failure(err: JoinError) -> String {
    if !err.is_panic() {
        return "extractor task was cancelled".to_string();
    }
    let payload = err.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("extractor panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("extractor panicked: {message}")
    } else {
        "extractor panicked".to_string()
    }
}
