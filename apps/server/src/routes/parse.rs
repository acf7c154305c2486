// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parse endpoint for OSM file processing.

use crate::error::ApiError;
use crate::services::{parse_staged, DEFAULT_FILENAME};
use crate::types::{ObjectTypeSelection, ParseQuery, ParseResponse};
use crate::AppState;
use axum::{
    extract::{
        multipart::MultipartRejection, rejection::QueryRejection, Multipart, Query, State,
    },
    Json,
};
use bytes::Bytes;
use std::sync::Arc;

/// The `file` field of a multipart upload.
struct Upload {
    file_name: Option<String>,
    bytes: Bytes,
}

/// Extract the uploaded file from a multipart request.
async fn extract_upload(multipart: &mut Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default();
        tracing::debug!(field_name = %field_name, "Processing multipart field");

        if field_name == "file" {
            let file_name = field
                .file_name()
                .filter(|name| !name.is_empty())
                .map(str::to_string);
            let bytes = field.bytes().await?;
            tracing::debug!(size = bytes.len(), file_name = ?file_name, "Extracted file from multipart");
            return Ok(Upload { file_name, bytes });
        }
    }

    tracing::warn!("No 'file' field found in multipart request");
    Err(ApiError::MissingFile)
}

/// POST /parse - Parse an uploaded OSM file.
///
/// The staged copy of the upload is released by the cleanup worker once the
/// response value has been produced and no toolkit call still holds it.
/// Extractor rejections are mapped into [`ApiError`] so every error is JSON.
pub async fn parse_osm(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ParseResponse>, ApiError> {
    let Query(pairs) = query?;
    let query = ParseQuery::from(pairs);
    let mut multipart = multipart?;
    let upload = extract_upload(&mut multipart).await?;

    if upload.bytes.is_empty() {
        return Err(ApiError::EmptyUpload);
    }
    if upload.bytes.len() > state.config.max_file_size_bytes() {
        return Err(ApiError::FileTooLarge {
            max_mb: state.config.max_file_size_mb,
        });
    }

    let staged = Arc::new(
        state
            .storage
            .stage(
                &upload.bytes,
                upload.file_name.as_deref().unwrap_or(DEFAULT_FILENAME),
            )
            .await?,
    );

    let selection = ObjectTypeSelection::resolve(&query.object_types)?;
    tracing::info!(
        object_types = ?selection.iter().collect::<Vec<_>>(),
        "Object types selected for parsing"
    );

    let response = parse_staged(&state.toolkit, staged, selection).await?;
    Ok(Json(response))
}
