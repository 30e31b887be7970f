//! Table qualifiers: storage references and derivation lineage.
//!
//! A qualifier is an inert provenance string attached to a table. It either
//! points at backing storage (`project.dataset.table`, `dataset.table`, or a
//! bare `table`) or records how the table was derived (`joined(a⋈b)`).
//! Qualifiers carry no behavior; parsing is best-effort and never fails.

use std::fmt;

/// Placeholder used in lineage strings for an operand with no qualifier.
pub const UNNAMED: &str = "<unnamed>";

/// Separator between operands in a lineage string.
const JOIN_SYMBOL: char = '⋈';

/// Parsed form of a qualifier string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Qualifier {
    /// Structured storage reference: up to three dotted identifier parts.
    Table {
        project: Option<String>,
        dataset: Option<String>,
        table: String,
    },

    /// Lineage string synthesized by composing operand qualifiers.
    Lineage { raw: String },

    /// Anything else; the raw string is preserved untouched.
    Custom { raw: String },
}

impl Qualifier {
    /// Best-effort parse of a qualifier string. Never fails: input that
    /// matches no known shape degrades to [`Qualifier::Custom`].
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("joined(") && raw.ends_with(')') {
            return Qualifier::Lineage {
                raw: raw.to_string(),
            };
        }

        let parts: Vec<&str> = raw.split('.').collect();
        if (1..=3).contains(&parts.len()) && parts.iter().all(|p| is_identifier(p)) {
            let mut parts = parts.into_iter().rev();
            // Reverse order: the table name is always the last part.
            let table = parts.next().map(str::to_string);
            let dataset = parts.next().map(str::to_string);
            let project = parts.next().map(str::to_string);
            if let Some(table) = table {
                return Qualifier::Table {
                    project,
                    dataset,
                    table,
                };
            }
        }

        Qualifier::Custom {
            raw: raw.to_string(),
        }
    }

    /// Short tag describing the variant, for display and diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Qualifier::Table { .. } => "table",
            Qualifier::Lineage { .. } => "lineage",
            Qualifier::Custom { .. } => "custom",
        }
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Qualifier::Table {
                project,
                dataset,
                table,
            } => {
                if let Some(project) = project {
                    write!(f, "{project}.")?;
                }
                if let Some(dataset) = dataset {
                    write!(f, "{dataset}.")?;
                }
                write!(f, "{table}")
            }
            Qualifier::Lineage { raw } | Qualifier::Custom { raw } => write!(f, "{raw}"),
        }
    }
}

/// Compose two operand qualifiers into a lineage string.
///
/// Deterministic: `joined(<left>⋈<right>)`, with [`UNNAMED`] substituted for
/// a missing operand. Multi-way joins chain left-to-right, the accumulated
/// lineage becoming the left operand of the next composition. The result is
/// a human-readable trace, not a normalized canonical form.
pub fn format_lineage(left: Option<&str>, right: Option<&str>) -> String {
    format!(
        "joined({}{}{})",
        left.unwrap_or(UNNAMED),
        JOIN_SYMBOL,
        right.unwrap_or(UNNAMED)
    )
}

/// A dotted-reference part: non-empty, word characters and dashes only.
fn is_identifier(part: &str) -> bool {
    !part.is_empty()
        && part
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}
