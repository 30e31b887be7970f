//! Nested-schema introspection.
//!
//! One walk over a table's Arrow fields produces a [`FieldMap`]: the ordered,
//! collision-checked mapping from dotted nested paths to flat column names
//! that everything downstream (extraction, join-key resolution) relies on.

mod field_map;
mod walk;

pub use field_map::{ExtractedField, FieldMap};
pub use walk::{walk_fields, WalkOptions, DEFAULT_MAX_DEPTH};
