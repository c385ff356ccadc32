//! HTTP adapters - the REST surface of the service.

pub mod health;
pub mod middleware;
pub mod scam_detection;

pub use scam_detection::ScamDetectionAppState;

use std::sync::Arc;

use axum::http::Request;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;

use crate::application::ScamPipeline;
use crate::config::AuthConfig;

use self::middleware::api_key_middleware;

/// Assigns a fresh UUID to each request for log correlation.
#[derive(Clone, Copy, Default)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        http::HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Assembles the full application router.
///
/// The health probe is unauthenticated; the API routes sit behind the
/// x-api-key middleware. CORS is permissive - callers integrate from
/// arbitrary origins.
pub fn app_router(pipeline: Arc<ScamPipeline>, auth: Arc<AuthConfig>) -> Router {
    let api = scam_detection::routes()
        .with_state(ScamDetectionAppState::new(pipeline))
        .layer(axum::middleware::from_fn_with_state(
            auth,
            api_key_middleware,
        ));

    Router::new()
        .route("/", get(health::health))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
