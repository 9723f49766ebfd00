//! HTTP surface for UI collaborators.
//!
//! - `GET /ping` answers a liveness check.
//! - `POST /extract` takes `{html, url?, layout?}` and answers with an
//!   `ExtractionResult`. Extraction outcomes, including timeouts, are always
//!   reported in the body; only malformed requests get an error status.

use std::time::Duration;

use axum::extract::{DefaultBodyLimit, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use slant_core::{ExtractionResult, Extractor, SlantError, StaticLayout};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub extractor: Extractor,
    pub timeout: Duration,
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub html: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub layout: Option<StaticLayout>,
}

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub fn router(extractor: Extractor, config: &ServerConfig) -> Router {
    let state = AppState { extractor, timeout: config.timeout };

    Router::new()
        .route("/ping", get(ping))
        .route("/extract", post(extract))
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn ping() -> Json<PingResponse> {
    Json(PingResponse { status: "ok", version: env!("CARGO_PKG_VERSION") })
}

async fn extract(State(state): State<AppState>, Json(request): Json<ExtractRequest>) -> Json<ExtractionResult> {
    let ExtractRequest { html, url, layout } = request;
    let source = url.clone().unwrap_or_default();

    let extractor = match layout {
        Some(layout) => state.extractor.with_layout(layout),
        None => state.extractor,
    };

    debug!(bytes = html.len(), url = %source, "extraction requested");

    let task = tokio::task::spawn_blocking(move || match url.as_deref() {
        Some(url) => extractor.extract_with_url(&html, url),
        None => extractor.extract(&html),
    });

    let result = match tokio::time::timeout(state.timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => {
            error!(error = %join_error, "extraction task failed");
            ExtractionResult::failure(source, &SlantError::ExtractionFault(join_error.to_string()))
        }
        Err(_) => {
            warn!(timeout_secs = state.timeout.as_secs(), url = %source, "extraction timed out");
            let fault = format!("timed out after {} seconds", state.timeout.as_secs());
            ExtractionResult::failure(source, &SlantError::ExtractionFault(fault))
        }
    };

    Json(result)
}
