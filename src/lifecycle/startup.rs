//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the registry, sync loop, assembler and HTTP server from config
//! - Run the initial scan before the listener starts
//! - Run until a signal arrives, then shut everything down in order

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::assembler::{ContentAssembler, FetchError, RemoteFetcher};
use crate::config::{ServerConfig, SourceKind};
use crate::http::response::encode_title;
use crate::http::server::{HttpServer, InvalidHeaderValue};
use crate::lifecycle::{signals, Shutdown};
use crate::registry::ContentRegistry;
use crate::sync::{DirectorySync, SyncError};

/// Fatal errors while starting or running the server.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("source location is not set")]
    MissingLocation,

    #[error("failed to create file provider: {0}")]
    Sync(#[from] SyncError),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] FetchError),

    #[error("invalid profile header value: {0}")]
    Header(#[from] InvalidHeaderValue),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Run the server with a validated configuration until a shutdown signal.
pub async fn run(config: ServerConfig) -> Result<(), StartupError> {
    let location = config
        .source
        .location
        .clone()
        .ok_or(StartupError::MissingLocation)?;

    log_settings(&config);

    let registry = Arc::new(ContentRegistry::new());
    let mut sync = match config.source.kind {
        SourceKind::Filesystem => DirectorySync::new(location, registry.clone()),
    };
    sync.start()?;

    let assembler = ContentAssembler::new(RemoteFetcher::new()?);
    let server = HttpServer::new(&config, registry, assembler)?;

    let address = config.listener.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;
    tracing::info!(address = %address, "Starting server");

    let shutdown = Shutdown::new();
    let sync_task = tokio::spawn(sync.run(shutdown.subscribe()));

    let serve = server.run(listener, shutdown.subscribe());
    tokio::pin!(serve);

    let served = tokio::select! {
        result = &mut serve => {
            tracing::error!("HTTP server exited unexpectedly");
            result
        }
        _ = signals::shutdown_signal() => {
            tracing::info!("Shutting down server...");
            shutdown.trigger();
            serve.await
        }
    };
    shutdown.trigger();

    match sync_task.await {
        Ok(Ok(())) | Ok(Err(SyncError::Cancelled)) => tracing::info!("Directory sync stopped"),
        Ok(Err(err)) => tracing::error!(error = %err, "Directory sync failed"),
        Err(err) => tracing::error!(error = %err, "Directory sync task panicked"),
    }

    served.map_err(StartupError::Serve)?;
    tracing::info!("Shutdown complete");
    Ok(())
}

fn log_settings(config: &ServerConfig) {
    if !config.observability.debug {
        return;
    }
    tracing::debug!("Debug mode enabled");
    tracing::debug!(source = %config.source.kind, "Source type");
    if let Some(location) = &config.source.location {
        tracing::debug!(path = %location.display(), "Path");
    }
    tracing::debug!("Response headers configured:");
    tracing::debug!("  profile-title: {}", encode_title(&config.profile.title));
    tracing::debug!("  profile-update-interval: {}", config.profile.update_interval);
    tracing::debug!("  profile-web-page-url: {}", config.profile.web_page_url);
    tracing::debug!("  support-url: {}", config.profile.support_url);
}
