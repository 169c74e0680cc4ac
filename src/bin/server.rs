//! persona-quiz HTTP server binary.
//!
//! Loads the registries (built-in data plus any YAML overrides), validates
//! them once and serves the classification API.
//!
//! # Environment Variables
//!
//! - `PORT` — HTTP port (default: 8080)
//! - `PERSONA_QUIZ_HOST` — bind address (default: 0.0.0.0)
//! - `PERSONA_QUIZ_REGISTRY_DIR` — directory of YAML registry overrides
//! - `PERSONA_QUIZ_PUBLIC_URL` — base URL for result and share links
//! - `RUST_LOG` — Tracing filter (default: "info,persona_quiz=debug")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin server
//! # with overrides:
//! PERSONA_QUIZ_REGISTRY_DIR=./registry cargo run --bin server
//! ```

use anyhow::Context;
use persona_quiz::config::{ServerConfig, DEFAULT_LOG_FILTER};
use persona_quiz::registry::load_engine;
use persona_quiz::server::{app_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    let (engine, report) =
        load_engine(config.registry_dir.as_deref()).context("Failed to load quiz registries")?;

    for path in &report.overridden {
        tracing::info!("Registry override: {}", path.display());
    }
    tracing::info!(
        questions = engine.questions().len(),
        personas = engine.personas().len(),
        sign_patterns = engine.candidate_table().len(),
        "Registries validated"
    );

    let bind_addr = config.bind_addr();
    let app = app_router(AppState::with_engine(engine, config));

    tracing::info!("persona-quiz server starting on {}", bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health          — liveness probe");
    tracing::info!("  GET  /questions       — question registry");
    tracing::info!("  GET  /personas[/:slug] — persona profiles");
    tracing::info!("  POST /classify        — classify 16 answers");
    tracing::info!("  POST /share           — share links for a result");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    axum::serve(listener, app).await.context("Server failed")?;
    Ok(())
}
