//! Custom error types for the cashbook engine
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for cashbook backup/restore operations
#[derive(Error, Debug)]
pub enum CashbookError {
    /// Storage (SQLite) errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models and restore documents
    #[error("Validation error: {0}")]
    Validation(String),

    /// Export rendering errors (CSV/SQL/JSON assembly)
    #[error("Export error: {0}")]
    Export(String),

    /// Distribution sink errors (reported separately from export success)
    #[error("Delivery error: {0}")]
    Delivery(String),

    /// A restore stopped mid-stream; the committed batches remain in place
    #[error("Restore interrupted after {committed} rows: {message}")]
    PartialRestore { committed: usize, message: String },

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl CashbookError {
    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a delivery error
    pub fn is_delivery(&self) -> bool {
        matches!(self, Self::Delivery(_))
    }

    /// Rows already committed when a restore was interrupted, if applicable
    pub fn committed_rows(&self) -> Option<usize> {
        match self {
            Self::PartialRestore { committed, .. } => Some(*committed),
            _ => None,
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for CashbookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CashbookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<rusqlite::Error> for CashbookError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<csv::Error> for CashbookError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for cashbook operations
pub type CashbookResult<T> = Result<T, CashbookError>;
