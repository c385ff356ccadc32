//! HTTP adapter for the scam-detection endpoint.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ScamDetectionAppState;
pub use routes::routes;
