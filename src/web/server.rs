//! Web server for the dashboard API.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::Result;

use super::router::{create_health_router, create_router};
use super::AppState;

/// Run the web server until it is shut down.
pub async fn serve(config: &Config, app_state: Arc<AppState>) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| {
            crate::PitchdeskError::Config(format!(
                "invalid server address {}:{}: {}",
                config.server.host, config.server.port, e
            ))
        })?;

    let router =
        create_router(app_state, &config.web.cors_origins).merge(create_health_router());

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Dashboard API listening on {}", addr);

    axum::serve(listener, router).await?;
    Ok(())
}
