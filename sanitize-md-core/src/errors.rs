//! errors.rs - Custom error types for the sanitize-md-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use std::path::PathBuf;
use thiserror::Error;

/// This enum represents all possible error types in the `sanitize-md-core` library.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SanitizeError {
    #[error("Failed to compile substitution rule '{0}': {1}")]
    RuleCompilation(String, regex::Error),

    #[error("Rule '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Docs root '{}' does not exist or is not a directory", .0.display())]
    RootNotFound(PathBuf),

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk docs tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}

impl SanitizeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SanitizeError::Io {
            path: path.into(),
            source,
        }
    }
}
