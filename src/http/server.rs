//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the dispatch handler
//! - Wire up middleware (request ID, tracing)
//! - Serve on a bound listener
//! - Graceful shutdown with a bounded drain period

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request, routing::any, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::assembler::ContentAssembler;
use crate::config::ServerConfig;
use crate::http::dispatch::{dispatch_handler, RequestDispatcher};
use crate::http::request::{RequestUuid, X_REQUEST_ID};
use crate::http::response::ProfileHeaders;
use crate::registry::ContentRegistry;

pub use axum::http::header::InvalidHeaderValue;

/// HTTP front end for the content registry.
pub struct HttpServer {
    router: Router,
    grace: Duration,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(
        config: &ServerConfig,
        registry: Arc<ContentRegistry>,
        assembler: ContentAssembler,
    ) -> Result<Self, InvalidHeaderValue> {
        let headers = ProfileHeaders::from_config(&config.profile)?;
        let dispatcher = Arc::new(RequestDispatcher::new(
            registry,
            assembler,
            headers,
            config.observability.debug,
        ));

        Ok(Self {
            router: Self::build_router(dispatcher),
            grace: Duration::from_secs(config.lifecycle.shutdown_grace_secs),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(dispatcher: Arc<RequestDispatcher>) -> Router {
        Router::new()
            .route("/", any(dispatch_handler))
            .route("/{*path}", any(dispatch_handler))
            .with_state(dispatcher)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(RequestUuid))
                    .layer(TraceLayer::new_for_http().make_span_with(request_span))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// The fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until `shutdown` fires, then give in-flight requests the grace
    /// period to finish.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let mut drain_started = shutdown.resubscribe();
        let serve = axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining connections");
            })
            .into_future();
        tokio::pin!(serve);

        tokio::select! {
            result = &mut serve => result?,
            _ = drain_started.recv() => {
                match tokio::time::timeout(self.grace, &mut serve).await {
                    Ok(result) => result?,
                    Err(_) => tracing::warn!(
                        grace_secs = self.grace.as_secs(),
                        "Grace period elapsed, dropping remaining connections"
                    ),
                }
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn request_span(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}
