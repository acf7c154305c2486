// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Health check and API information endpoints.

use crate::AppState;
use axum::{extract::State, Json};
use osm_toolkit::Capabilities;
use serde::Serialize;

const SERVICE: &str = "osm-parser-server";

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub service: &'static str,
    /// Which toolkit collaborators are wired up.
    pub capabilities: Capabilities,
}

/// API information response.
#[derive(Debug, Serialize)]
pub struct ApiInfoResponse {
    pub service: &'static str,
    pub title: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: Vec<EndpointInfo>,
}

/// Endpoint information.
#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

/// GET /health - Health check endpoint.
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        service: SERVICE,
        capabilities: state.toolkit.capabilities(),
    })
}

/// GET / - API information endpoint.
pub async fn info() -> Json<ApiInfoResponse> {
    Json(ApiInfoResponse {
        service: SERVICE,
        title: "OpenStudio OSM Parser API",
        version: env!("CARGO_PKG_VERSION"),
        description: "API to parse OpenStudio (OSM) files and extract building model information.",
        endpoints: vec![
            EndpointInfo {
                method: "GET",
                path: "/health",
                description: "Health check with toolkit capabilities",
            },
            EndpointInfo {
                method: "POST",
                path: "/parse",
                description: "Parse an OSM file; optional repeated `object_types` query \
                              (spaces, surfaces, subsurfaces)",
            },
        ],
    })
}
