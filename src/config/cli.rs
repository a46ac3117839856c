//! Command-line and environment configuration.
//!
//! Every flag also reads an environment variable. Flags left unset keep the
//! value from the config file, or the schema default when there is no file.

use std::path::PathBuf;

use clap::Parser;

use crate::config::schema::{ServerConfig, SourceKind};

#[derive(Debug, Parser)]
#[command(name = "subs-server")]
#[command(version, about = "Subs Server: A server for managing subscriptions", long_about = None)]
pub struct Cli {
    /// Optional TOML config file; flags and env override its values
    #[arg(short, long, env = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Source type for files [default: filesystem]
    #[arg(short, long, env = "SOURCE", value_enum)]
    pub source: Option<SourceKind>,

    /// Path to files (directory for filesystem source)
    #[arg(short, long, env = "LOCATION")]
    pub location: Option<PathBuf>,

    /// Port to listen on [default: 2115]
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Host to listen on [default: 0.0.0.0]
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Enable debug mode (verbose logging and endpoint listing)
    #[arg(short, long, env = "DEBUG")]
    pub debug: bool,

    /// Profile title (will be base64 encoded) [default: Subs-Server]
    #[arg(long, env = "PROFILE_TITLE")]
    pub profile_title: Option<String>,

    /// Profile update interval in hours [default: 12]
    #[arg(long, env = "PROFILE_UPDATE_INTERVAL")]
    pub profile_update_interval: Option<String>,

    /// Profile web page URL
    #[arg(long, env = "PROFILE_WEB_PAGE_URL")]
    pub profile_web_page_url: Option<String>,

    /// Support URL
    #[arg(long, env = "SUPPORT_URL")]
    pub support_url: Option<String>,
}

impl Cli {
    /// Overlay the values given on the command line onto `config`.
    pub fn apply_to(self, config: &mut ServerConfig) {
        if let Some(kind) = self.source {
            config.source.kind = kind;
        }
        if let Some(location) = self.location {
            config.source.location = Some(location);
        }
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(host) = self.host {
            config.listener.host = host;
        }
        if self.debug {
            config.observability.debug = true;
        }
        if let Some(title) = self.profile_title {
            config.profile.title = title;
        }
        if let Some(interval) = self.profile_update_interval {
            config.profile.update_interval = interval;
        }
        if let Some(url) = self.profile_web_page_url {
            config.profile.web_page_url = url;
        }
        if let Some(url) = self.support_url {
            config.profile.support_url = url;
        }
    }
}
