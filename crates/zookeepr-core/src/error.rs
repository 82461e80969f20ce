//! Error types for Zookeepr core operations.
//!
//! This module defines well-structured error types using `thiserror` for
//! library-level errors, while the server binary uses `anyhow` for
//! convenient error handling at the top level.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using ZookeeprError
pub type Result<T> = std::result::Result<T, ZookeeprError>;

/// Message returned to clients when a candidate animal fails validation.
pub const INVALID_ANIMAL_MESSAGE: &str = "The animal is not properly formatted.";

/// Core error types for Zookeepr operations.
///
/// The HTTP surface maps these onto status codes: validation failures are
/// client errors, a missing record is a not-found, everything touching the
/// backing store is a server error.
#[derive(Error, Debug)]
pub enum ZookeeprError {
    // === Record Errors ===
    /// A candidate record failed shape validation
    #[error("{}", INVALID_ANIMAL_MESSAGE)]
    InvalidAnimal,

    /// No record with the requested id exists
    #[error("animal not found: {id}")]
    AnimalNotFound { id: String },

    // === Storage Errors ===
    /// The data file exists but could not be parsed
    #[error("store is corrupted at {path}: {reason}")]
    StoreCorrupted { path: PathBuf, reason: String },

    /// Writing the data file failed
    #[error("storage error: {operation} failed: {reason}")]
    StorageFailed { operation: String, reason: String },

    // === Configuration Errors ===
    /// Configuration file parsing failed
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    // === I/O Errors ===
    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// Serialization/deserialization failed
    #[error("serialization error: {0}")]
    Serialization(String),

    // === Internal Errors ===
    /// Internal error that should not happen
    #[error("internal error: {0}")]
    Internal(String),
}

impl ZookeeprError {
    /// Returns true if this error came from reading or writing the backing store
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            ZookeeprError::StoreCorrupted { .. }
                | ZookeeprError::StorageFailed { .. }
                | ZookeeprError::Io(_)
                | ZookeeprError::Serialization(_)
        )
    }

    /// Create a not-found error for the given id
    pub fn not_found(id: impl Into<String>) -> Self {
        ZookeeprError::AnimalNotFound { id: id.into() }
    }

    /// Create a storage error
    pub fn storage(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        ZookeeprError::StorageFailed {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ZookeeprError {
    fn from(err: serde_json::Error) -> Self {
        ZookeeprError::Serialization(err.to_string())
    }
}
