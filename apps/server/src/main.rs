// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! OSM Parser Server - parses uploaded OpenStudio models through an
//! external toolkit.
//!
//! Each upload is staged into its own temporary directory, loaded by the
//! toolkit, and queried for the requested object categories. Failures of a
//! single category are reported inside the response; the staged directory is
//! released by a background worker after the response is produced.
//!
//! # Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Health check with toolkit capabilities
//! - `POST /parse` - Parse an OSM file (`?object_types=spaces&object_types=surfaces`)

use anyhow::Context;
use axum::http::HeaderValue;
use osm_toolkit::{CommandToolkit, Toolkit};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

mod config;
mod error;
mod routes;
mod services;
mod types;

use config::Config;
use services::{CleanupQueue, TempStorage};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<TempStorage>,
    pub toolkit: Arc<Toolkit>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_logging(&config);

    tracing::info!(
        port = config.port,
        staging_dir = %config.staging_dir.display(),
        max_file_size_mb = config.max_file_size_mb,
        toolkit_bin = ?config.toolkit_bin,
        "Starting OSM Parser Server"
    );

    let toolkit = load_toolkit(&config).await?;
    let capabilities = toolkit.capabilities();
    if !capabilities.loader {
        tracing::error!("Model loading utility is not available; /parse will answer 501");
    }
    tracing::info!(?capabilities, "Toolkit capabilities");

    let (cleanup, _cleanup_worker) = CleanupQueue::spawn();
    let storage = TempStorage::new(&config.staging_dir, cleanup).await;

    let state = AppState {
        storage: Arc::new(storage),
        toolkit: Arc::new(toolkit),
        config: Arc::new(config.clone()),
    };

    let app = routes::router(state)
        // Middleware
        .layer(CompressionLayer::new()) // Compress responses (gzip)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

fn init_logging(config: &Config) {
    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info,tower_http=debug,osm_parser_server=debug".into());

    if config.json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .pretty()
            .init();
    }
}

/// Probe the external toolkit once; without one, nothing is wired.
async fn load_toolkit(config: &Config) -> anyhow::Result<Toolkit> {
    let Some(bin) = config.toolkit_bin.clone() else {
        tracing::warn!("OSM_TOOLKIT_BIN not set; no toolkit capabilities available");
        return Ok(Toolkit::default());
    };

    let launcher = CommandToolkit::new(bin).with_args(config.toolkit_args.clone());
    tokio::task::spawn_blocking(move || launcher.into_toolkit())
        .await
        .context("toolkit probe task failed")
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}
