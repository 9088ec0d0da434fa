//! Error types for the `life` binary.
//!
//! [`CliError`] is the top-level error type that wraps every failure mode of
//! argument handling, configuration, and grid I/O. All of them end the
//! process with exit code 1.

use std::path::PathBuf;

/// Top-level error for the `life` binary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Wrong number of arguments or an invalid iteration count.
    #[error("{message}")]
    Usage {
        /// What the user got wrong.
        message: String,
    },

    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: crate::config::ConfigError,
    },

    /// Loading, converting, or saving a grid failed.
    #[error("grid error: {source}")]
    Grid {
        /// The underlying grid error.
        #[from]
        source: life_grid::GridError,
    },

    /// The output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        /// Directory that was being created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Writing to stdout failed.
    #[error("failed to write output: {source}")]
    Stdout {
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl CliError {
    /// Build a [`CliError::Usage`].
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }
}
