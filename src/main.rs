//! Authenticity Analyzer — Binary Entrypoint
//! Boots the Axum HTTP server, wiring the verification engine, shared state,
//! and middleware.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use authenticity_analyzer::analyze::HotReloadPolicy;
use authenticity_analyzer::api::{create_router, AppState};
use authenticity_analyzer::config::EngineConfig;
use authenticity_analyzer::engine::VerificationEngine;
use authenticity_analyzer::history::History;
use authenticity_analyzer::metrics::Metrics;
use authenticity_analyzer::{presence, vision};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments. This enables
    // OPENAI_API_KEY / SERPAPI_KEY for the "ENV" config indirection.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = EngineConfig::load_from_file("config/engine.json")
        .context("Failed to load config/engine.json")?;
    tracing::info!(
        vision_provider = %cfg.vision.provider,
        vision_enabled = cfg.vision.enabled,
        search_enabled = cfg.search.enabled,
        "engine config loaded"
    );

    let probe_budget = Duration::from_secs(cfg.search.timeout_secs);
    let metrics = Metrics::init(probe_budget.as_millis() as u64);

    let engine = VerificationEngine::new(
        vision::build_extractor(&cfg.vision),
        presence::build_prober(&cfg.search),
        Arc::new(HotReloadPolicy::new(None)),
    )
    .with_probe_budget(probe_budget);

    let state = AppState {
        engine: Arc::new(engine),
        history: Arc::new(History::with_capacity(cfg.history_capacity)),
    };
    let router = create_router(state).merge(metrics.router());

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, "authenticity analyzer listening");
    axum::serve(listener, router).await?;
    Ok(())
}
