// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP routes.

pub mod health;
pub mod parse;

use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;

/// Build the application router with body limit and request timeout.
pub fn router(state: AppState) -> Router {
    let body_limit = state.config.max_file_size_bytes();
    let timeout_secs = state.config.request_timeout_secs;

    Router::new()
        // Root endpoint - API information
        .route("/", get(health::info))
        // Health check
        .route("/health", get(health::check))
        // Parse endpoint
        .route("/parse", post(parse::parse_osm))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(timeout_secs),
        ))
        // The timeout layer answers with an empty body
        .layer(middleware::map_response(move |response: Response| async move {
            timeout_as_json(response, timeout_secs)
        }))
        .with_state(state)
}

fn timeout_as_json(response: Response, timeout_secs: u64) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return ApiError::Timeout {
            secs: timeout_secs,
        }
        .into_response();
    }
    response
}
