mod analysis;
mod applications;
mod auth;
mod config;
mod content_client;
mod errors;
mod forms;
mod listings;
mod llm_client;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::content_client::ContentClient;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Fails fast when the completion API key is missing
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Hireloom API v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(
        config.completion_api_key.clone(),
        config.completion_base_url.clone(),
        config.completion_model.clone(),
    )?;
    info!("LLM client initialized (model: {})", llm.model());

    let content = ContentClient::new(config.content_api_url.clone())?;
    info!("Content API client initialized ({})", content.base_url());

    let state = AppState {
        completion: Arc::new(llm),
        content,
        config: config.clone(),
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
