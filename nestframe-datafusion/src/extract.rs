//! Functional flat-projection extraction.
//!
//! Extraction re-derives a fresh DataFusion projection from the original
//! table expression on every call. It reads only the cached [`FieldMap`],
//! materializes nothing, and mutates nothing: repeated calls with the same
//! inputs are safe to run concurrently and each yields an independent,
//! equally valid result.

use datafusion::dataframe::DataFrame;
use datafusion::functions::core::expr_ext::FieldAccessor;
use datafusion::logical_expr::Expr;
use datafusion::prelude::ident;

use crate::error::{Error, Result};
use crate::schema::{ExtractedField, FieldMap};

/// Project selected nested paths of `table` as top-level columns.
///
/// With `subset = None` every leaf in the map becomes an output column, in
/// map order. If the map has no nested entries the table is already flat and
/// is returned unchanged (a documented no-op, not an error).
///
/// With `subset = Some(paths)` every requested path must resolve in the map,
/// else the call fails with [`Error::FieldNotFound`] before any projection is
/// built. The output keeps all plain top-level columns in declared order and
/// appends one flat column per requested nested path in request order;
/// requested paths that already are top-level columns add nothing, and
/// duplicates are ignored.
pub fn extract(table: &DataFrame, fields: &FieldMap, subset: Option<&[&str]>) -> Result<DataFrame> {
    let exprs = match subset {
        None => {
            if !fields.has_nested() {
                // Already flat: nothing to extract.
                return Ok(table.clone());
            }
            fields.iter().map(projection_expr).collect::<Vec<_>>()
        }
        Some(paths) => {
            let mut requested: Vec<&ExtractedField> = Vec::with_capacity(paths.len());
            for path in paths {
                let field = fields.get(path).ok_or_else(|| Error::FieldNotFound {
                    path: (*path).to_string(),
                    available: fields.paths(),
                })?;
                if field.path.is_nested() && !requested.iter().any(|f| f.column == field.column) {
                    requested.push(field);
                }
            }

            let mut exprs: Vec<Expr> = fields.top_level().map(projection_expr).collect();
            exprs.extend(requested.into_iter().map(projection_expr));
            exprs
        }
    };

    Ok(table.clone().select(exprs)?)
}

/// Build the projection expression for one leaf.
///
/// Depth-1 leaves pass through under their own name; nested leaves become a
/// chain of struct field accesses aliased to the generated flat name.
fn projection_expr(field: &ExtractedField) -> Expr {
    let mut expr = ident(field.path.root());
    for segment in field.path.segments().iter().skip(1) {
        expr = expr.field(segment.as_str());
    }
    if field.path.is_nested() {
        expr = expr.alias(&field.column);
    }
    expr
}
