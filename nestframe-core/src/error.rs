//! Error types for nestframe-core.

use thiserror::Error;

/// Main error type for nestframe-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Error analyzing a table schema
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Two distinct paths generated the same flat column name
    #[error("Name collision: {0}")]
    NameCollision(#[from] NameCollisionError),
}

/// Errors raised while analyzing nested schemas.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Nesting deeper than the configured guard
    #[error("nesting at '{path}' exceeds the maximum depth of {max_depth}")]
    DepthExceeded { path: String, max_depth: usize },

    /// Column type the walker cannot represent
    #[error("unsupported type at '{path}': {reason}")]
    UnsupportedType { path: String, reason: String },
}

/// Two distinct nested paths flatten to the same column name.
///
/// Raised at schema-introspection time, never lazily at extraction time:
/// downstream join-key resolution relies on flat names being unique.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("paths '{first}' and '{second}' both flatten to column '{column}'")]
pub struct NameCollisionError {
    /// The flat column name both paths generated
    pub column: String,
    /// Dotted form of the first offending path
    pub first: String,
    /// Dotted form of the second offending path
    pub second: String,
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
