mod api;
mod error;
mod routes;
mod telemetry;

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

// Internal imports
use relay_core::{Agent, Settings, ToolClient};

// 1. Define Application State
// Settings (read-only config) and the Agent (rules + pooled tool client)
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub agent: Arc<Agent>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 2. Settings, once
    let settings = Settings::from_env().context("invalid configuration")?;

    // 3. Logging Setup
    telemetry::init(&settings);
    info!("{} initializing...", settings.app_name);

    // 4. The outbound client, shared across requests
    let client = ToolClient::new(&settings.tools_base_url, settings.tool_timeout)?;
    info!(
        "Tools at {} (timeout {:?}, served locally: {}), request timeout {:?}",
        client.base_url(),
        settings.tool_timeout,
        settings.serve_tools,
        settings.request_timeout
    );

    // 5. Bundle State
    let bind_addr = settings.bind_addr;
    let state = AppState {
        settings: Arc::new(settings),
        agent: Arc::new(Agent::new(client)?),
    };

    // 6. Define Routes
    let app = routes::build_router(state);

    // 7. Start Server
    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!("Gateway listening on {}...", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
