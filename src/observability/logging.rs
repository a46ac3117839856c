//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Pick the default level from debug mode; `RUST_LOG` overrides it

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "subs_server=debug,tower_http=debug"
    } else {
        "subs_server=info,tower_http=info"
    }
}

/// Install the global subscriber.
pub fn init_logging(debug: bool) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(debug).into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        for debug in [false, true] {
            assert!(EnvFilter::try_new(default_filter(debug)).is_ok());
        }
        assert!(default_filter(true).contains("subs_server=debug"));
    }
}
