//! Error types for nestframe-datafusion.
//!
//! This module provides error types specific to the DataFusion integration,
//! while re-exporting core error types from nestframe-core.

use thiserror::Error;

// Re-export core error types
pub use nestframe_core::error::{NameCollisionError, SchemaError};
pub use nestframe_core::Error as CoreError;

/// Main error type for nestframe-datafusion operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Unsupported or pathological nested type, depth limit exceeded
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Two distinct paths generate the same flat column name
    #[error(transparent)]
    NameCollision(#[from] NameCollisionError),

    /// Requested path absent from a table's cached field map
    #[error("field '{path}' not found in nested structure (available: {available:?})")]
    FieldNotFound {
        path: String,
        available: Vec<String>,
    },

    /// Unknown registry name or join alias
    #[error("table '{name}' not found (available: {available:?})")]
    NotFound {
        name: String,
        available: Vec<String>,
    },

    /// Join across handlers built from incompatible engine sessions
    #[error("cannot join across sessions: '{left}' and '{right}' belong to different contexts")]
    SessionMismatch { left: String, right: String },

    /// Malformed join specification
    #[error("invalid join: {0}")]
    InvalidJoin(String),

    /// DataFusion error
    #[error("Query engine error: {0}")]
    Engine(String),
}

impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Schema(e) => Error::Schema(e),
            CoreError::NameCollision(e) => Error::NameCollision(e),
        }
    }
}

impl From<datafusion::error::DataFusionError> for Error {
    fn from(err: datafusion::error::DataFusionError) -> Self {
        Error::Engine(err.to_string())
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
