//! Domain error types
//!
//! This module defines the error hierarchy for filmo-batch.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main filmo-batch error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum FilmoError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Database-related errors (connection, pool, statement)
    #[error("Database error: {0}")]
    Database(String),

    /// The eligible film set could not be enumerated
    #[error("Source read failed: {0}")]
    SourceRead(String),

    /// A sink rejected a record
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    /// The export file's parent directory could not be created
    #[error("Failed to create export directory {path}: {message}")]
    DirectoryCreation { path: String, message: String },

    /// Another run holds the run-level lock
    #[error("Another export run is in progress: {0}")]
    RunLocked(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Sink-specific errors
///
/// Raised by the file and marker sinks while writing a single record.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Appending a line to the export file failed
    #[error("Failed to append line for film {film_id}: {message}")]
    Append { film_id: i64, message: String },

    /// Flushing the export file at a chunk boundary failed
    #[error("Failed to flush export file: {0}")]
    Flush(String),

    /// Inserting an export marker failed
    #[error("Failed to insert export marker for film {film_id}: {message}")]
    MarkerInsert { film_id: i64, message: String },
}

// Conversion from std::io::Error
impl From<std::io::Error> for FilmoError {
    fn from(err: std::io::Error) -> Self {
        FilmoError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for FilmoError {
    fn from(err: serde_json::Error) -> Self {
        FilmoError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for FilmoError {
    fn from(err: toml::de::Error) -> Self {
        FilmoError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filmo_error_display() {
        let err = FilmoError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_sink_error_conversion() {
        let sink_err = SinkError::MarkerInsert {
            film_id: 7,
            message: "connection reset".to_string(),
        };
        let err: FilmoError = sink_err.into();
        assert!(matches!(err, FilmoError::Sink(_)));
        assert!(err.to_string().contains("film 7"));
    }

    #[test]
    fn test_directory_creation_display() {
        let err = FilmoError::DirectoryCreation {
            path: "/readonly/exports".to_string(),
            message: "Permission denied".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to create export directory /readonly/exports: Permission denied"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: FilmoError = io_err.into();
        assert!(matches!(err, FilmoError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: FilmoError = json_err.into();
        assert!(matches!(err, FilmoError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: FilmoError = toml_err.into();
        assert!(matches!(err, FilmoError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }
}
