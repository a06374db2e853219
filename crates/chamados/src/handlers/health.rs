//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - liveness probe (immediate 200, no checks)
//! - `/readyz` - readiness probe (one storage round trip)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /livez - Basic liveness probe.
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /readyz - Readiness probe.
///
/// Returns 200 if the store answers a priority listing, 503 otherwise.
pub async fn readyz(State(state): State<AppState>) -> Response {
    match state.priority_repo.list_priorities().await {
        Ok(_) => (
            StatusCode::OK,
            Json(HealthStatus {
                healthy: true,
                error: None,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthStatus {
                    healthy: false,
                    error: Some(e.to_string()),
                }),
            )
                .into_response()
        }
    }
}
