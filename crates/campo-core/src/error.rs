//! Core error types for campo-core.
//!
//! This module defines the error hierarchy using thiserror. Only energy and
//! task construction validate input; everything downstream of a validated
//! value is total.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for campo-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Lookup of a task id that is not stored
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// Lookup of a work field that does not exist
    #[error("Work field not found: {0}")]
    FieldNotFound(String),

    /// Integration-related errors
    #[error("Integration error for '{service}': {message}")]
    Integration {
        service: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Any failure while producing a recommendation, wrapped with context
    #[error("Failed to generate sacred recommendation: {0}")]
    Recommendation(#[source] Box<CoreError>),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing database
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// A stored value could not be decoded
    #[error("Corrupt value under key '{key}': {message}")]
    Corrupt { key: String, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Energy outside the 1-10 scale
    #[error("Energy level must be between 1 and 10, got {value}")]
    EnergyOutOfRange { value: f64 },

    /// Energy string that is not a number
    #[error("Invalid energy level string: '{0}'")]
    InvalidEnergy(String),

    /// Integer field outside its allowed range
    #[error("Invalid value for '{field}': {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    /// Check that `value` lies in `min..=max`.
    pub fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<(), Self> {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min,
                max,
            })
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, _msg) => {
                if inner.code == rusqlite::ErrorCode::DatabaseBusy
                    || inner.code == rusqlite::ErrorCode::DatabaseLocked
                {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Storage(err.into())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(err: reqwest::Error) -> Self {
        CoreError::Integration {
            service: "aladhan".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl CoreError {
    /// Wrap an error raised while producing a recommendation.
    pub fn recommendation(err: CoreError) -> Self {
        CoreError::Recommendation(Box::new(err))
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
