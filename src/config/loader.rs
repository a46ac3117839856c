//! Configuration loading from disk and the command line.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::cli::Cli;
use crate::config::schema::ServerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML config file without validating it.
pub fn load_file(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Build the final configuration: file (if any), then flags and env, then validation.
pub fn load_config(cli: Cli) -> Result<ServerConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_file(path)?,
        None => ServerConfig::default(),
    };
    cli.apply_to(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("subs.toml");
        fs::write(
            &file,
            format!(
                "[source]\nlocation = {:?}\n\n[profile]\ntitle = \"From file\"\nupdate_interval = \"6\"\n",
                dir.path().display().to_string()
            ),
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "subs-server",
            "--config",
            file.to_str().unwrap(),
            "--profile-update-interval",
            "24",
        ])
        .unwrap();
        let config = load_config(cli).unwrap();

        assert_eq!(config.source.location.as_deref(), Some(dir.path()));
        assert_eq!(config.profile.title, "From file");
        assert_eq!(config.profile.update_interval, "24");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_validation_errors_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let cli = Cli::try_parse_from(["subs-server", "-l", missing.to_str().unwrap()]).unwrap();
        let err = load_config(cli).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("does not exist"));
    }
}
