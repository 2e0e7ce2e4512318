//! Emotion analyzer service: binary entrypoint.
//! Boots the axum HTTP server with the analyzer in shared state.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use emotion_analyzer::api::{self, AppState};
use emotion_analyzer::config::{LogFormat, ServerConfig};

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("emotion=info,warn"));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Compact => registry.with(fmt::layer().compact()).init(),
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when the file is absent.
    let _ = dotenvy::dotenv();

    let cfg = ServerConfig::from_env().context("reading server config")?;
    init_tracing(cfg.log_format);

    let state = AppState::from_env().context("loading emotion lexicon")?;
    let app = api::router(state, &cfg);

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr)
        .await
        .with_context(|| format!("binding {}", cfg.bind_addr))?;
    info!(
        target: "emotion",
        addr = %cfg.bind_addr,
        metrics = cfg.metrics_enabled,
        debug_routes = cfg.debug_routes,
        "listening"
    );

    axum::serve(listener, app).await.context("http server")?;
    Ok(())
}
