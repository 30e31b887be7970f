//! # nestframe-datafusion
//!
//! Flat, SQL-joinable views over nested columnar tables, backed by
//! DataFusion's deferred query engine.
//!
//! This crate discovers the nested field paths inside a table's schema,
//! generates deterministic collision-safe flat names for them, extracts flat
//! projections without caching data, and manages many named tables at once —
//! tracking each one's storage provenance and preparing joins on nested
//! paths before delegating execution to DataFusion.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nestframe_datafusion::{HandlerRegistry, JoinKind, JoinSpec};
//!
//! let mut registry = HandlerRegistry::new();
//! registry.add("customers", customers_df, Some("db.sales.customers"))?;
//! registry.add("orders", orders_df, Some("db.sales.orders"))?;
//!
//! let joined = registry.join(
//!     &JoinSpec::new(JoinKind::Inner)
//!         .table("c", "customers")
//!         .table("o", "orders")
//!         .on("c", "profile.contact.email", "o", "customer_email"),
//! )?;
//! assert_eq!(
//!     joined.qualifier(),
//!     Some("joined(db.sales.customers⋈db.sales.orders)"),
//! );
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                      nestframe-datafusion                           |
//! +---------------------------------------------------------------------+
//! |  schema/     - schema walker, FieldMap (path -> flat column)        |
//! |  extract     - functional flat-projection extraction                |
//! |  handler     - TableHandler: table + cached metadata + qualifier    |
//! |  registry    - HandlerRegistry, JoinSpec, join preparation          |
//! |  error       - DataFusion-specific error types                      |
//! +---------------------------------------------------------------------+
//!                              |
//!                              v
//! +---------------------------------------------------------------------+
//! |                        nestframe-core                               |
//! +---------------------------------------------------------------------+
//! |  Nested paths, naming policy, qualifiers, core errors               |
//! +---------------------------------------------------------------------+
//! ```
//!
//! Schema metadata is computed once per handler and immutable thereafter;
//! extraction and join preparation re-derive fresh table expressions on
//! every call and never cache live data.

pub mod error;
pub mod extract;
pub mod handler;
pub mod registry;
pub mod schema;

// Re-export core for convenience
pub use nestframe_core;

// Re-export commonly used types
pub use error::{Error, Result};
pub use extract::extract;
pub use handler::TableHandler;
pub use nestframe_core::{
    format_lineage, NamePolicy, NestedPath, Qualifier, UnderscorePolicy, UNNAMED,
};
pub use registry::{HandlerRegistry, JoinKey, JoinKind, JoinRecord, JoinSpec};
pub use schema::{walk_fields, ExtractedField, FieldMap, WalkOptions, DEFAULT_MAX_DEPTH};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
