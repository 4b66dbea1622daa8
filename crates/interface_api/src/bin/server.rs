//! Claim Assessor - API Server Binary
//!
//! Starts the HTTP server exposing the insurance query pipeline.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin claim-assessor-api
//!
//! # Run with environment variables
//! OPENAI_API_KEY=sk-... API_PORT=3000 API_LOG_FORMAT=json cargo run --bin claim-assessor-api
//! ```
//!
//! # Environment Variables
//!
//! * `OPENAI_API_KEY` - Completion service key (overrides `API_COMPLETION__API_KEY`)
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! * `API_COMPLETION__BASE_URL` - Chat-completions base URL (default: https://api.openai.com/v1)
//! * `API_COMPLETION__MODEL` - Model name (default: gpt-4o-mini)
//! * `API_COMPLETION__TEMPERATURE` - Sampling temperature (default: 0.2)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_assessment::AssessmentPipeline;
use infra_llm::OpenAiCompletionAdapter;
use interface_api::config::{ApiConfig, LogFormat};
use interface_api::create_router;

/// Main entry point for the API server.
///
/// A missing completion key is not fatal: the server starts, logs a
/// warning, and answers insurance queries with a configuration error.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("invalid API configuration")?;

    init_tracing(&config.log_level, config.log_format);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        model = %config.completion.model,
        "Starting Claim Assessor API Server"
    );

    let credential = config.completion.credential();
    if !credential.is_usable() {
        tracing::warn!("Completion service API key is not configured; insurance queries will fail");
    }

    let adapter = OpenAiCompletionAdapter::new(config.completion.adapter_config())
        .context("failed to build completion client")?;
    let pipeline = Arc::new(AssessmentPipeline::new(Arc::new(adapter), credential));

    let app = create_router(pipeline);

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init(),
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
