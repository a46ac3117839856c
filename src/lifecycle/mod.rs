//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validated config → registry → watcher + initial scan → listener → serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast → sync loop stops, server drains → exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: sync is populated before the listener accepts traffic
//! - Any startup error is fatal
//! - Draining has a deadline: remaining connections are dropped after it

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{run, StartupError};
