mod config;
mod errors;
mod extraction;
mod routes;
mod skills;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::DocumentExtractor;
use crate::routes::build_router;
use crate::skills::catalog::SkillCatalog;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Skill Gap API v{}", env!("CARGO_PKG_VERSION"));

    // Compile the skill catalog once; it is read-only from here on
    let catalog = SkillCatalog::builtin().context("Built-in skill catalog is invalid")?;
    info!(
        "Skill catalog loaded: {} skills, {} roles",
        catalog.skills().len(),
        catalog.roles().len()
    );
    info!(
        "Analyzer: scoring={:?} scope={:?} strict_roles={}",
        config.scoring_mode, config.extraction_scope, config.strict_roles
    );

    let extractor = DocumentExtractor::new().context("Failed to build text extractor")?;

    let state = AppState {
        config: config.clone(),
        catalog: Arc::new(catalog),
        extractor: Arc::new(extractor),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
