//! Request handling helpers.
//!
//! # Responsibilities
//! - Generate a request ID (UUID v4) unless the client sent one
//! - Resolve the request path to a registry endpoint

use axum::http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestUuid;

impl MakeRequestId for RequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Endpoint named by a request path.
///
/// Strips one leading `/` and percent-decodes the rest. Returns `None` when
/// the decoded path is not UTF-8. An empty string means the index was requested.
pub fn resolve_endpoint(path: &str) -> Option<String> {
    let raw = path.strip_prefix('/').unwrap_or(path);
    urlencoding::decode(raw).ok().map(|decoded| decoded.into_owned())
}
