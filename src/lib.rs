//! Subscription document server.
//!
//! Serves every file of a watched directory as a base64 subscription payload.
//!
//! # Architecture Overview
//!
//! ```text
//!   source directory                                   client
//!         │                                              ▲
//!         ▼                                              │
//!   ┌────────────┐  upsert/evict  ┌──────────┐   get   ┌──┴─────────┐
//!   │    sync    │───────────────▶│ registry │◀────────│    http    │
//!   │scan + watch│                └──────────┘         │ dispatcher │
//!   └────────────┘                                     └──┬─────────┘
//!                                                         │ raw bytes
//!                                                         ▼
//!                                                   ┌───────────┐   GET   remote
//!                                                   │ assembler │────────▶ lists
//!                                                   └───────────┘
//!
//!   config ─ observability ─ lifecycle (startup, signals, shutdown)
//! ```

// Core subsystems
pub mod assembler;
pub mod http;
pub mod registry;
pub mod sync;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use assembler::ContentAssembler;
pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use registry::ContentRegistry;
pub use sync::DirectorySync;
