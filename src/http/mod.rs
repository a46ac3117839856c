//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing)
//!     → dispatch.rs (path → endpoint, registry lookup)
//!         "" with debug on → index.rs (HTML listing)
//!         known endpoint   → assembler → response.rs (profile headers)
//!         otherwise        → 404
//!     → Send to client
//! ```

pub mod dispatch;
pub mod index;
pub mod request;
pub mod response;
pub mod server;

pub use dispatch::RequestDispatcher;
pub use request::{resolve_endpoint, RequestUuid, X_REQUEST_ID};
pub use response::ProfileHeaders;
pub use server::HttpServer;
