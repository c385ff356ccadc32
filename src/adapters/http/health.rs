//! Health probe.

use axum::Json;
use chrono::Utc;
use serde::Serialize;

/// Health probe response body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

/// Service identity and liveness
///
/// GET /
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "online",
        service: "Scam Detection API",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now().to_rfc3339(),
    })
}
