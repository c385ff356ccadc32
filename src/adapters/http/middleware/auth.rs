//! API key middleware for axum.
//!
//! Callers authenticate with a shared key in the `x-api-key` header. The
//! comparison runs in constant time so the key cannot be probed byte by
//! byte through response timing. Missing or mismatched keys get the fixed
//! 401 error body; nothing else about the request is inspected here.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use subtle::ConstantTimeEq;

use crate::config::AuthConfig;

/// Auth middleware state - the configured inbound key.
pub type ApiKeyState = Arc<AuthConfig>;

/// Validates the `x-api-key` header against the configured key.
pub async fn api_key_middleware(
    State(config): State<ApiKeyState>,
    request: Request,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get("x-api-key")
        .and_then(|h| h.to_str().ok());

    match presented {
        Some(key) if keys_match(key, config.api_key()) => next.run(request).await,
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "status": "error",
                "message": "Invalid API key"
            })),
        )
            .into_response(),
    }
}

/// Constant-time key comparison. Differing lengths compare unequal without
/// shortcutting.
fn keys_match(presented: &str, expected: &str) -> bool {
    presented.as_bytes().ct_eq(expected.as_bytes()).into()
}
