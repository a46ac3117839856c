//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! registry / sync / assembler / http
//!     → tracing macros with structured fields
//!     → logging.rs (EnvFilter + fmt layer)
//!     → stdout
//!
//! http requests
//!     → TraceLayer span carrying method, path and request ID
//! ```
//!
//! # Design Decisions
//! - Debug mode raises the default level so every file change is logged
//! - Fetch and sync failures are warnings or errors, never panics

pub mod logging;

pub use logging::init_logging;
