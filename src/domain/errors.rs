//! Domain error types
//!
//! This module defines the error hierarchy for coursegraph. Errors raised by
//! the content store and the object store are kept in their own enums so the
//! CLI can tell a missing course apart from a failed upload.

use thiserror::Error;

/// Main coursegraph error type
///
/// Every fallible operation in the library returns this type (see
/// [`crate::domain::Result`]). The CLI turns it into a human-readable
/// message and an exit code.
#[derive(Debug, Error)]
pub enum CourseGraphError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Content store (modulestore) errors
    #[error("Modulestore error: {0}")]
    ModuleStore(#[from] ModuleStoreError),

    /// Object storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// CSV writing errors
    #[error("CSV error: {0}")]
    Csv(String),

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

/// Content store errors
///
/// Raised by [`crate::adapters::modulestore::ContentStore`] implementations.
#[derive(Debug, Error)]
pub enum ModuleStoreError {
    /// The requested course does not exist in the store
    #[error("Course not found: {0}")]
    CourseNotFound(String),

    /// A course document could not be parsed
    #[error("Invalid course document {path}: {message}")]
    InvalidDocument { path: String, message: String },

    /// The store location could not be read
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Object storage errors
///
/// Raised by [`crate::adapters::storage::ObjectStore`] implementations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to reach the storage endpoint
    #[error("Failed to connect to object storage: {0}")]
    ConnectionFailed(String),

    /// The endpoint rejected the credentials
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Upload was rejected by the endpoint
    #[error("Upload of {key} failed: {status} - {message}")]
    UploadFailed {
        key: String,
        status: u16,
        message: String,
    },

    /// Listing the bucket failed
    #[error("Failed to list bucket: {0}")]
    ListFailed(String),

    /// Object key is not usable
    #[error("Invalid object key: {0}")]
    InvalidKey(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for CourseGraphError {
    fn from(err: std::io::Error) -> Self {
        CourseGraphError::Io(err.to_string())
    }
}

// Conversion from csv::Error
impl From<csv::Error> for CourseGraphError {
    fn from(err: csv::Error) -> Self {
        CourseGraphError::Csv(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CourseGraphError {
    fn from(err: serde_json::Error) -> Self {
        CourseGraphError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CourseGraphError {
    fn from(err: toml::de::Error) -> Self {
        CourseGraphError::Configuration(format!("TOML parse error: {err}"))
    }
}
