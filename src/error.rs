//! Error types for loading flow data.
//!
//! Only ingestion is fallible: configuration files and localization tables.
//! The runtime engine absorbs every failure into a safe default instead of
//! returning errors (missing screens are no-ops, missing text is `[key]`).

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading a [`crate::config::FlowConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

/// Errors that can occur when loading a [`crate::localization::Localizer`].
#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("Failed to read localization file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Localization table has no header row")]
    Empty,
}
