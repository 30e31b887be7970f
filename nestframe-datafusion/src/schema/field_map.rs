//! Cached mapping from nested paths to flat column names.

use std::collections::HashMap;
use std::fmt::Write as _;

use arrow::datatypes::{DataType, Fields};
use nestframe_core::{assign_flat_names, NamePolicy, NestedPath};

use crate::error::Result;
use crate::schema::walk::{walk_fields, WalkOptions};

/// One discovered leaf: its dotted path, generated flat column name, and
/// leaf type.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedField {
    /// Path from the top-level column to the leaf.
    pub path: NestedPath,
    /// Flat column name generated by the naming policy.
    pub column: String,
    /// Arrow type of the leaf value.
    pub data_type: DataType,
}

/// The result of one schema walk plus one naming pass.
///
/// A `FieldMap` is a pure function of (schema, policy): identical schemas
/// always yield identical maps, and all flat names are mutually distinct or
/// construction fails. Entries cover every leaf, including depth-1 top-level
/// columns (whose flat name equals the column name) — that is what makes a
/// collision between a leaf column `a_b` and a nested path `a.b` detectable,
/// and lets join keys name plain columns.
///
/// Computed once per table and immutable thereafter; safe to read from any
/// number of threads without synchronization.
#[derive(Debug, Clone)]
pub struct FieldMap {
    entries: Vec<ExtractedField>,
    by_path: HashMap<String, usize>,
    nested_count: usize,
}

impl FieldMap {
    /// Walk the given fields and assign flat names.
    ///
    /// Fails with `SchemaError` on pathological nesting or
    /// `NameCollisionError` if two paths flatten to the same column.
    pub fn from_fields(
        fields: &Fields,
        policy: &dyn NamePolicy,
        options: WalkOptions,
    ) -> Result<Self> {
        let leaves = walk_fields(fields, options)?;
        let paths: Vec<NestedPath> = leaves.iter().map(|(path, _)| path.clone()).collect();
        let names = assign_flat_names(&paths, policy)
            .map_err(nestframe_core::Error::NameCollision)?;

        let mut entries = Vec::with_capacity(leaves.len());
        let mut by_path = HashMap::with_capacity(leaves.len());
        let mut nested_count = 0;

        for ((path, data_type), column) in leaves.into_iter().zip(names) {
            if path.is_nested() {
                nested_count += 1;
            }
            by_path.insert(path.to_string(), entries.len());
            entries.push(ExtractedField {
                path,
                column,
                data_type,
            });
        }

        Ok(Self {
            entries,
            by_path,
            nested_count,
        })
    }

    /// Look up an entry by its dotted path.
    pub fn get(&self, path: &str) -> Option<&ExtractedField> {
        self.by_path.get(path).map(|&idx| &self.entries[idx])
    }

    /// Whether the given dotted path is a known leaf.
    pub fn contains(&self, path: &str) -> bool {
        self.by_path.contains_key(path)
    }

    /// All entries in walk order (depth-first, left-to-right).
    pub fn iter(&self) -> impl Iterator<Item = &ExtractedField> {
        self.entries.iter()
    }

    /// Depth-1 entries: plain top-level columns.
    pub fn top_level(&self) -> impl Iterator<Item = &ExtractedField> {
        self.entries.iter().filter(|e| !e.path.is_nested())
    }

    /// Entries with depth above one: struct members needing extraction.
    pub fn nested(&self) -> impl Iterator<Item = &ExtractedField> {
        self.entries.iter().filter(|e| e.path.is_nested())
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the walk found no leaves at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any entry descends into a struct.
    pub fn has_nested(&self) -> bool {
        self.nested_count > 0
    }

    /// All dotted paths, in walk order.
    pub fn paths(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.path.to_string()).collect()
    }

    /// All flat column names, in walk order.
    pub fn columns(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.column.as_str()).collect()
    }

    /// Human-readable structure listing.
    pub fn format_summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} leaf fields ({} nested)",
            self.entries.len(),
            self.nested_count
        );
        for entry in &self.entries {
            let _ = writeln!(
                out,
                "  {} -> {} ({:?})",
                entry.path, entry.column, entry.data_type
            );
        }
        out
    }
}

impl PartialEq for FieldMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}
