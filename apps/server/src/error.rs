// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types and handling for the server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use osm_toolkit::ObjectType;
use serde::Serialize;
use thiserror::Error;

/// Whole-request failures. Per-category extraction failures never end up
/// here; they are embedded in the parse response instead.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Uploaded file is empty.")]
    EmptyUpload,

    #[error("Missing 'file' field in multipart request.")]
    MissingFile,

    #[error("File too large: maximum size is {max_mb} MB")]
    FileTooLarge { max_mb: usize },

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("Invalid multipart request: {0}")]
    MultipartRejection(#[from] axum::extract::multipart::MultipartRejection),

    #[error("Invalid query string: {0}")]
    InvalidQuery(#[from] axum::extract::rejection::QueryRejection),

    #[error(
        "Invalid object type(s) requested: {}. Valid types for this version are: {}",
        .invalid.join(", "),
        ObjectType::valid_names()
    )]
    InvalidObjectTypes { invalid: Vec<String> },

    #[error("Model loading utility from toolkit is not available.")]
    LoaderUnavailable,

    #[error("Failed to load/translate OpenStudio model: {0}")]
    LoadFailed(String),

    #[error("Could not save uploaded file: {0}")]
    Storage(#[source] std::io::Error),

    #[error("Request timed out after {secs} s")]
    Timeout { secs: u64 },

    #[error("An unexpected server error occurred: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub code: &'static str,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::EmptyUpload => (StatusCode::BAD_REQUEST, "EMPTY_UPLOAD"),
            ApiError::MissingFile => (StatusCode::BAD_REQUEST, "MISSING_FILE"),
            ApiError::FileTooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, "FILE_TOO_LARGE"),
            ApiError::Multipart(e) => (e.status(), "MULTIPART_ERROR"),
            ApiError::MultipartRejection(_) => (StatusCode::BAD_REQUEST, "MULTIPART_ERROR"),
            ApiError::InvalidQuery(_) => (StatusCode::BAD_REQUEST, "INVALID_QUERY"),
            ApiError::InvalidObjectTypes { .. } => {
                (StatusCode::BAD_REQUEST, "INVALID_OBJECT_TYPE")
            }
            ApiError::LoaderUnavailable => (StatusCode::NOT_IMPLEMENTED, "LOADER_UNAVAILABLE"),
            ApiError::LoadFailed(_) => (StatusCode::BAD_REQUEST, "LOAD_FAILED"),
            ApiError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            ApiError::Timeout { .. } => (StatusCode::REQUEST_TIMEOUT, "REQUEST_TIMEOUT"),
            ApiError::Join(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(error = %self, code, "Request failed");
        } else {
            tracing::warn!(error = %self, code, "Request rejected");
        }

        let body = ErrorResponse {
            detail: self.to_string(),
            code,
        };

        (status, Json(body)).into_response()
    }
}
