//! # nestframe-core
//!
//! Engine-agnostic vocabulary for working with nested columnar schemas.
//!
//! This crate provides the building blocks for nestframe without any SQL
//! engine dependency. It can be used standalone for path and qualifier
//! handling or as the foundation for engine integrations (DataFusion).
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                        nestframe-core                               |
//! +---------------------------------------------------------------------+
//! |  path       - NestedPath, dotted-path parsing and display           |
//! |  naming     - NamePolicy trait, flat-name generation, collisions    |
//! |  qualifier  - Qualifier variants, lineage composition               |
//! |  error      - Error types                                           |
//! +---------------------------------------------------------------------+
//! ```

pub mod error;
pub mod naming;
pub mod path;
pub mod qualifier;

// Re-export commonly used types at crate root for convenience
pub use error::{Error, NameCollisionError, Result, SchemaError};
pub use naming::{assign_flat_names, NamePolicy, UnderscorePolicy};
pub use path::NestedPath;
pub use qualifier::{format_lineage, Qualifier, UNNAMED};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
