//! ScamBait service entry point.

use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use scambait::adapters::ai::{GroqConfig, GroqProvider};
use scambait::adapters::http::app_router;
use scambait::adapters::index::FileTranscriptIndex;
use scambait::adapters::session::InMemorySessionStore;
use scambait::application::{ModelGateway, ScamPipeline};
use scambait::config::AppConfig;

#[tokio::main]
async fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {}", err);
            std::process::exit(1);
        }
    };
    if let Err(err) = config.validate() {
        eprintln!("configuration invalid: {}", err);
        std::process::exit(1);
    }

    init_tracing(&config);

    let provider = Arc::new(GroqProvider::new(
        GroqConfig::new(config.ai.groq_api_key())
            .with_model(config.ai.model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.timeout())
            .with_max_retries(config.ai.max_retries),
    ));
    let gateway = Arc::new(ModelGateway::new(provider));
    let sessions = Arc::new(InMemorySessionStore::new());
    let index = Arc::new(FileTranscriptIndex::new(config.storage.persist_path()));
    let pipeline = Arc::new(ScamPipeline::new(
        gateway,
        sessions,
        index,
        &config.pipeline,
    ));

    let app = app_router(pipeline, Arc::new(config.auth.clone()));

    let addr = config.server.socket_addr();
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        model = %config.ai.model,
        "scambait listening"
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");
    axum::serve(listener, app).await.expect("Server error");
}

/// Structured logs in production, human-readable output elsewhere. The
/// debug flag overrides the configured filter entirely.
fn init_tracing(config: &AppConfig) {
    let filter = if config.server.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.server.log_level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    };

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }
}
