//! Application bootstrap: binding, serving and the one-shot page load.

use std::net::{IpAddr, SocketAddr};

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::api::{create_router, AppState};
use crate::client::{ApiClient, MessageView};
use crate::config::Config;
use crate::error::AppError;
use crate::metrics;
use crate::utils::shutdown_signal;

/// Parse the configured bind host.
pub fn host(config: &Config) -> Result<IpAddr, AppError> {
    config
        .host
        .parse()
        .map_err(|e| AppError::InvalidConfig(format!("HOST is not a valid IP address: {}", e)))
}

/// Install the exporter when enabled, then register metric descriptions.
///
/// Descriptions only reach a recorder installed before they are emitted.
pub fn start_metrics(config: &Config) -> Result<(), AppError> {
    if config.metrics_enabled {
        metrics::install_exporter(SocketAddr::new(host(config)?, config.metrics_port))?;
    }
    metrics::init_metrics();
    Ok(())
}

/// Bind the HTTP listener for the configured host and port.
pub async fn bind(config: &Config) -> Result<TcpListener, AppError> {
    let addr = SocketAddr::new(host(config)?, config.port);
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", listener.local_addr()?);
    Ok(listener)
}

/// Serve the API on `listener` until a shutdown signal arrives.
pub async fn serve(listener: TcpListener, config: &Config) -> Result<(), AppError> {
    let state = AppState::from_config(config);
    if state.auth.is_enforcing() {
        info!("Bearer authorization enforced on data endpoint");
    } else if config.secret().is_some() {
        warn!("API_SECRET_KEY is set but ENFORCE_AUTH is off; tokens are not checked");
    } else {
        info!("Authorization not enforced");
    }

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

/// Mount a fresh page view against the configured API.
pub async fn load_page(config: &Config) -> Result<MessageView, AppError> {
    let client = ApiClient::from_config(config)?;
    let mut view = MessageView::new();
    view.mount(&client).await;
    Ok(view)
}
