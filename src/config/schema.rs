//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Root configuration for the subscription server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Where subscription documents come from.
    pub source: SourceConfig,

    /// Listener configuration (bind host and port).
    pub listener: ListenerConfig,

    /// Headers attached to every document response.
    pub profile: ProfileConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Startup and shutdown settings.
    pub lifecycle: LifecycleConfig,
}

/// Kinds of document source. Only the filesystem is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Filesystem,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Filesystem => write!(f, "filesystem"),
        }
    }
}

/// Document source configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SourceConfig {
    /// Source type.
    pub kind: SourceKind,

    /// Directory holding the documents.
    pub location: Option<PathBuf>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Host to bind (e.g., "0.0.0.0").
    pub host: String,

    /// Port to bind.
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port` string accepted by `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 2115,
        }
    }
}

/// Profile values sent as response headers.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Profile title (sent base64 encoded).
    pub title: String,

    /// Profile update interval in hours.
    pub update_interval: String,

    /// Profile web page URL.
    pub web_page_url: String,

    /// Support URL.
    pub support_url: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            title: "Subs-Server".to_string(),
            update_interval: "12".to_string(),
            web_page_url: "https://github.com/kutovoys/subs-server".to_string(),
            support_url: "https://github.com/kutovoys/subs-server".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Verbose logging and the endpoint listing on `/`.
    pub debug: bool,
}

/// Lifecycle configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Time in-flight requests get to finish after a shutdown signal.
    pub shutdown_grace_secs: u64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            shutdown_grace_secs: 10,
        }
    }
}
