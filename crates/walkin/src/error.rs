//! Error types for walkin.
//!
//! This module defines the error type shared by storage, configuration and the
//! web server. Validation and login failures are not errors: they are ordinary
//! outcomes shown to the person at the desk (see [`crate::intake`] and
//! [`crate::session`]).

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for walkin operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Reading or writing a collection file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path of the file being accessed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Server Errors ===
    /// The web server could not bind or stopped unexpectedly.
    #[error("server error: {0}")]
    Server(String),
}

/// A specialized Result type for walkin operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Wrap an I/O error with the path it happened on.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a new server error.
    #[must_use]
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server(message.into())
    }

    /// Check if this error came from touching the data files.
    ///
    /// Storage failures are worth retrying from the UI; configuration and
    /// server failures are not.
    #[must_use]
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            Self::Io { .. } | Self::DirectoryCreate { .. } | Self::Json(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::server("address in use");
        assert_eq!(err.to_string(), "server error: address in use");
    }

    #[test]
    fn test_io_error_display_includes_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::io("/data/live_queue.json", io_err);
        let msg = err.to_string();
        assert!(msg.contains("/data/live_queue.json"));
        assert!(msg.contains("access denied"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "password must not be empty".to_string(),
        };
        assert!(err.to_string().contains("password must not be empty"));
    }

    #[test]
    fn test_is_storage_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert!(Error::io("customers.json", io_err).is_storage_error());
        assert!(!Error::server("bind failed").is_storage_error());
        assert!(!Error::ConfigValidation {
            message: "x".to_string()
        }
        .is_storage_error());
    }
}
