//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → cli.rs (flags and env vars override file values)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → passed by reference to constructors at startup
//! ```
//!
//! # Design Decisions
//! - Config is read once; nothing is reloaded at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde/clap) from semantic checks

pub mod cli;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::Cli;
pub use loader::{load_config, ConfigError};
pub use schema::{
    LifecycleConfig, ListenerConfig, ObservabilityConfig, ProfileConfig, ServerConfig,
    SourceConfig, SourceKind,
};
