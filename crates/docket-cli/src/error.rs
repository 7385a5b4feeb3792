//! Error types for docket-cli

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for docket-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in docket-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from a Docket library crate
    #[error(transparent)]
    Core(#[from] docket_core::Error),

    /// Configuration problem
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O failure
    #[error("I/O error at {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON on the command line
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config(message.into())
    }

    /// Creates an I/O error tagged with the file involved.
    pub fn io_with_path(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// HTTP-style status of the failure, as reported to the user.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Core(e) => e.status_code(),
            Error::Json(_) => 400,
            Error::Config(_) | Error::Io { .. } => 500,
        }
    }
}
