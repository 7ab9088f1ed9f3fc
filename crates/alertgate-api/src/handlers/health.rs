//! Health check handlers for service monitoring.
//!
//! The bridge holds no stateful dependencies, so health reduces to "is the
//! process serving requests"; both probes exist so orchestration configs
//! can keep their usual liveness/health split.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, instrument};

/// Health check response structure.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service health status.
    pub status: &'static str,
    /// Service version information.
    pub version: &'static str,
}

/// Health check endpoint handler.
///
/// Designed to be called frequently by orchestration systems and load
/// balancers; performs no expensive work.
#[instrument(name = "health_check")]
pub async fn health_check() -> Response {
    debug!("Performing health check");

    let response = HealthResponse { status: "healthy", version: env!("CARGO_PKG_VERSION") };

    (StatusCode::OK, Json(response)).into_response()
}

/// Liveness check endpoint for Kubernetes probes.
///
/// Returns a minimal response indicating the service process is alive.
#[instrument(name = "liveness_check")]
pub async fn liveness_check() -> Response {
    let response = serde_json::json!({
        "status": "alive",
        "service": "alertgate-api"
    });

    (StatusCode::OK, Json(response)).into_response()
}
