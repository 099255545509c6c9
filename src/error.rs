//! # Error Handling
//!
//! This module defines the centralized error type for `stubmerge`. It uses
//! `thiserror` to build an `Error` enum covering every failure the library
//! can report, each with enough context to tell the user which path or
//! command was involved.
//!
//! ## Key Components
//!
//! - **`Error`**: All failure modes of the fetch and consolidation pipeline:
//!   missing inputs, filesystem failures, fetcher failures and configuration
//!   problems.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Nothing in the library recovers from an error. Every variant aborts the
//! run and is reported by the binary with a non-zero exit status.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for stubmerge operations
#[derive(Error, Debug)]
pub enum Error {
    /// An input the layout requires is not where it should be.
    ///
    /// `what` describes the role of the path (e.g. "helper directory").
    #[error("Missing {what}: {}", path.display())]
    MissingPath { path: PathBuf, what: String },

    /// A filesystem operation failed.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// The package fetcher could not be started or exited unsuccessfully.
    #[error("Fetch failed ({command}): {message}")]
    Fetch { command: String, message: String },

    /// The configuration file or a package specifier is invalid.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a `MissingPath` error for `path`.
    pub fn missing(path: impl Into<PathBuf>, what: &str) -> Self {
        Error::MissingPath {
            path: path.into(),
            what: what.to_string(),
        }
    }
}
