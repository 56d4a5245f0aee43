//! Release webhook pipeline and its HTTP surface.

mod handler;
mod routes;

use anyhow::{Context, Result};
use log::{info, warn};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::catalog::CatalogStore;
use crate::config::Config;
use crate::http::HttpClient;
use crate::package::PackageInspector;
use crate::runtime::{RealRuntime, Runtime};

pub use handler::{Outcome, ReleaseHandler, WebhookError};
pub use routes::{AppState, IGNORED_MESSAGE, UPDATE_PATH, UPDATED_MESSAGE, router};

/// Wires the production pipeline from `config`.
pub fn build_state(config: &Config) -> Result<Arc<AppState<PackageInspector, RealRuntime>>> {
    let http = HttpClient::new(config.http_client()?);
    let inspector = PackageInspector::new(http, config.app.info_plist_path());

    if !RealRuntime.exists(&config.catalog_path) {
        warn!(
            "Catalog file {:?} does not exist yet; updates will fail until it is created",
            config.catalog_path
        );
    }
    let catalog = CatalogStore::new(RealRuntime, &config.catalog_path);

    let handler = ReleaseHandler::new(
        config.secret.clone(),
        config.app.clone(),
        inspector,
        catalog,
    );

    Ok(Arc::new(AppState {
        handler,
        redirect_url: config.redirect_url.clone(),
    }))
}

/// Serves the webhook routes until Ctrl-C.
pub async fn serve(config: Config) -> Result<()> {
    let state = build_state(&config)?;

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    info!("Listening on {}", config.listen_addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
