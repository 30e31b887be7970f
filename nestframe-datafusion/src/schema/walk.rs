//! Recursive nested-schema discovery.
//!
//! The walker descends a table's Arrow fields depth-first in declared order,
//! recording one dotted path per leaf. Only `Struct` columns are descended
//! into: list, map, and other container types are leaves, since their element
//! structure is not a fixed schema. Recursion is bounded by a configurable
//! depth guard so pathological input fails predictably instead of recursing
//! without limit.

use arrow::datatypes::{DataType, Fields};
use nestframe_core::{NestedPath, SchemaError};

use crate::error::Result;

/// Default nesting depth guard. Generous; real schemas stay in single digits.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options controlling a schema walk.
#[derive(Debug, Clone, Copy)]
pub struct WalkOptions {
    /// Maximum path depth before the walk fails with
    /// [`SchemaError::DepthExceeded`].
    pub max_depth: usize,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl WalkOptions {
    /// Options with a custom depth guard.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

/// Walk top-level fields depth-first, collecting one `(path, leaf type)`
/// pair per leaf.
///
/// Output order is deterministic: depth-first, left-to-right over declared
/// field order. Depth-1 entries are plain top-level columns; struct columns
/// contribute one entry per (transitive) member instead of one for the
/// struct itself.
pub fn walk_fields(fields: &Fields, options: WalkOptions) -> Result<Vec<(NestedPath, DataType)>> {
    let mut leaves = Vec::new();
    for field in fields {
        let path = NestedPath::new(field.name());
        descend(&path, field.data_type(), options.max_depth, &mut leaves)?;
    }
    Ok(leaves)
}

fn descend(
    path: &NestedPath,
    data_type: &DataType,
    max_depth: usize,
    out: &mut Vec<(NestedPath, DataType)>,
) -> Result<()> {
    if path.depth() > max_depth {
        return Err(SchemaError::DepthExceeded {
            path: path.to_string(),
            max_depth,
        }
        .into());
    }

    match data_type {
        DataType::Struct(children) => {
            for child in children {
                let child_path = path.child(child.name());
                descend(&child_path, child.data_type(), max_depth, out)?;
            }
        }
        leaf => out.push((path.clone(), leaf.clone())),
    }

    Ok(())
}
