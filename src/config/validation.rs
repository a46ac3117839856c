//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde and clap handle syntactic)
//! - Check the source directory exists and is a directory
//! - Check profile values can be sent as HTTP header values
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::path::PathBuf;

use axum::http::HeaderValue;
use thiserror::Error;

use crate::config::schema::ServerConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("source location is required (--location or LOCATION)")]
    MissingLocation,

    #[error("directory {0} does not exist")]
    LocationNotFound(PathBuf),

    #[error("{0} is not a directory")]
    LocationNotDirectory(PathBuf),

    #[error("port must be non-zero")]
    InvalidPort,

    #[error("{field} is not a valid header value: {value:?}")]
    InvalidHeaderValue { field: &'static str, value: String },

    #[error("shutdown grace period must be non-zero")]
    InvalidGracePeriod,
}

/// Validate a fully merged configuration.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match &config.source.location {
        None => errors.push(ValidationError::MissingLocation),
        Some(path) if !path.exists() => {
            errors.push(ValidationError::LocationNotFound(path.clone()))
        }
        Some(path) if !path.is_dir() => {
            errors.push(ValidationError::LocationNotDirectory(path.clone()))
        }
        Some(_) => {}
    }

    if config.listener.port == 0 {
        errors.push(ValidationError::InvalidPort);
    }

    // The title is base64 encoded before sending, so it is always valid.
    let headers = [
        ("profile-update-interval", &config.profile.update_interval),
        ("profile-web-page-url", &config.profile.web_page_url),
        ("support-url", &config.profile.support_url),
    ];
    for (field, value) in headers {
        if HeaderValue::from_str(value).is_err() {
            errors.push(ValidationError::InvalidHeaderValue {
                field,
                value: value.clone(),
            });
        }
    }

    if config.lifecycle.shutdown_grace_secs == 0 {
        errors.push(ValidationError::InvalidGracePeriod);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
