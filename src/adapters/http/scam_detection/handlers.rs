//! HTTP handlers for the scam-detection endpoint.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::ScamPipeline;

use super::dto::{ErrorBody, ScamDetectionRequest, ScamDetectionResponse};

/// Shared application state for the endpoint
#[derive(Clone)]
pub struct ScamDetectionAppState {
    pub pipeline: Arc<ScamPipeline>,
}

impl ScamDetectionAppState {
    pub fn new(pipeline: Arc<ScamPipeline>) -> Self {
        Self { pipeline }
    }
}

/// Classify a message, engage if it is a scam, extract intelligence
///
/// POST /api/scam-detection
///
/// Shape violations are the only error outcome; once the body validates,
/// the pipeline guarantees a success response.
pub async fn scam_detection(
    State(state): State<ScamDetectionAppState>,
    payload: Result<Json<ScamDetectionRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            tracing::warn!(%rejection, "rejected malformed request body");
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorBody::invalid_request()),
            )
                .into_response();
        }
    };

    if request.message.text.trim().is_empty() {
        tracing::warn!("rejected request with empty message text");
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorBody::invalid_request()),
        )
            .into_response();
    }

    let (message, history, metadata) = request.into_domain();
    let verdict = state.pipeline.handle(message, history, metadata).await;

    (StatusCode::OK, Json(ScamDetectionResponse::from(verdict))).into_response()
}
