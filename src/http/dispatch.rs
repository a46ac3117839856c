//! Request dispatch: path → endpoint → registry → assembler → response.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::assembler::ContentAssembler;
use crate::http::index::render_index;
use crate::http::request::resolve_endpoint;
use crate::http::response::ProfileHeaders;
use crate::registry::ContentRegistry;

/// Serves registry documents over HTTP.
#[derive(Debug)]
pub struct RequestDispatcher {
    registry: Arc<ContentRegistry>,
    assembler: ContentAssembler,
    headers: ProfileHeaders,
    diagnostics: bool,
}

impl RequestDispatcher {
    pub fn new(
        registry: Arc<ContentRegistry>,
        assembler: ContentAssembler,
        headers: ProfileHeaders,
        diagnostics: bool,
    ) -> Self {
        Self {
            registry,
            assembler,
            headers,
            diagnostics,
        }
    }

    /// Build the response for a request path.
    pub async fn dispatch(&self, path: &str) -> Response {
        let Some(endpoint) = resolve_endpoint(path) else {
            return not_found();
        };

        if endpoint.is_empty() {
            return if self.diagnostics {
                self.index()
            } else {
                not_found()
            };
        }

        // Hold the content, not the lock, across the assembly
        let Some(content) = self.registry.get(&endpoint) else {
            return not_found();
        };

        match self.assembler.assemble(&content).await {
            Ok(payload) => {
                let mut response = (StatusCode::OK, payload).into_response();
                let headers = response.headers_mut();
                headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
                self.headers.apply(headers);
                response
            }
            Err(err) => {
                tracing::error!(endpoint = %endpoint, error = %err, "Error processing content");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }

    fn index(&self) -> Response {
        let mut endpoints = self.registry.list_endpoints();
        endpoints.sort();

        let mut response = (StatusCode::OK, render_index(&endpoints, &self.headers)).into_response();
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/html"));
        response
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "404 page not found").into_response()
}

/// Axum handler for every path and method.
pub async fn dispatch_handler(
    State(dispatcher): State<Arc<RequestDispatcher>>,
    uri: Uri,
) -> Response {
    dispatcher.dispatch(uri.path()).await
}
