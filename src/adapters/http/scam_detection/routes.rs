//! Route definitions for the scam-detection endpoint

use axum::routing::post;
use axum::Router;

use super::handlers::{scam_detection, ScamDetectionAppState};

/// Create the scam-detection router
///
/// # Endpoints
///
/// - `POST /api/scam-detection` - Classify, engage and extract
pub fn routes() -> Router<ScamDetectionAppState> {
    Router::new().route("/api/scam-detection", post(scam_detection))
}
