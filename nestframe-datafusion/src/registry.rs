//! Handler registry and multi-table join preparation.
//!
//! The registry maps caller-chosen names to [`TableHandler`]s and coordinates
//! operations across them. It owns no table data and no engine session: it is
//! purely an index, plus the join-preparation protocol that resolves dotted
//! nested paths to physical join keys before delegating execution to
//! DataFusion.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use datafusion::dataframe::DataFrame;
use datafusion::logical_expr::{JoinType, LogicalPlanBuilder};
use parking_lot::Mutex;
use tracing::debug;

use nestframe_core::{format_lineage, NamePolicy, UnderscorePolicy};

use crate::error::{Error, Result};
use crate::handler::TableHandler;
use crate::schema::WalkOptions;

/// Join kind requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Outer,
    Cross,
}

impl JoinKind {
    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinKind::Inner => "inner",
            JoinKind::Left => "left",
            JoinKind::Right => "right",
            JoinKind::Outer => "outer",
            JoinKind::Cross => "cross",
        }
    }

    fn to_join_type(self) -> JoinType {
        match self {
            JoinKind::Inner | JoinKind::Cross => JoinType::Inner,
            JoinKind::Left => JoinType::Left,
            JoinKind::Right => JoinType::Right,
            JoinKind::Outer => JoinType::Full,
        }
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JoinKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "inner" => Ok(JoinKind::Inner),
            "left" => Ok(JoinKind::Left),
            "right" => Ok(JoinKind::Right),
            "outer" | "full" => Ok(JoinKind::Outer),
            "cross" => Ok(JoinKind::Cross),
            other => Err(Error::InvalidJoin(format!("unknown join kind '{other}'"))),
        }
    }
}

/// One equality condition between two aliased tables.
///
/// Paths are dotted nested paths; they are resolved against each table's
/// cached field map before any engine call is made.
#[derive(Debug, Clone)]
pub struct JoinKey {
    pub left_alias: String,
    pub left_path: String,
    pub right_alias: String,
    pub right_path: String,
}

/// Transient description of one multi-table join.
///
/// Tables join left-to-right in insertion order; each key applies when the
/// chain reaches the key's right alias.
#[derive(Debug, Clone)]
pub struct JoinSpec {
    tables: Vec<(String, String)>,
    keys: Vec<JoinKey>,
    kind: JoinKind,
}

impl JoinSpec {
    /// Start a spec with the given join kind.
    pub fn new(kind: JoinKind) -> Self {
        Self {
            tables: Vec::new(),
            keys: Vec::new(),
            kind,
        }
    }

    /// Add an aliased table reference (a registered name).
    pub fn table(mut self, alias: impl Into<String>, name: impl Into<String>) -> Self {
        self.tables.push((alias.into(), name.into()));
        self
    }

    /// Add an equality condition between two aliased tables. Dotted nested
    /// paths are accepted on either side.
    pub fn on(
        mut self,
        left_alias: impl Into<String>,
        left_path: impl Into<String>,
        right_alias: impl Into<String>,
        right_path: impl Into<String>,
    ) -> Self {
        self.keys.push(JoinKey {
            left_alias: left_alias.into(),
            left_path: left_path.into(),
            right_alias: right_alias.into(),
            right_path: right_path.into(),
        });
        self
    }

    /// Aliased table references, in join order.
    pub fn tables(&self) -> &[(String, String)] {
        &self.tables
    }

    /// Join conditions, in declaration order.
    pub fn keys(&self) -> &[JoinKey] {
        &self.keys
    }

    /// The requested join kind.
    pub fn kind(&self) -> JoinKind {
        self.kind
    }
}

/// Record of one completed join, kept for lineage inspection.
#[derive(Debug, Clone)]
pub struct JoinRecord {
    /// Registered names of the operands, in join order.
    pub tables: Vec<String>,
    /// The join kind used.
    pub kind: JoinKind,
    /// Lineage qualifier assigned to the result.
    pub qualifier: Option<String>,
}

/// A join key with both paths resolved to flat column names.
struct ResolvedKey {
    left_column: String,
    right_alias: String,
    right_column: String,
}

/// Orchestrator mapping caller-chosen names to table handlers.
pub struct HandlerRegistry {
    handlers: HashMap<String, TableHandler>,
    policy: Arc<dyn NamePolicy>,
    options: WalkOptions,
    history: Mutex<Vec<JoinRecord>>,
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HandlerRegistry {
    /// Empty registry with the default naming policy and walk options.
    pub fn new() -> Self {
        Self::with_options(Arc::new(UnderscorePolicy), WalkOptions::default())
    }

    /// Empty registry with a custom naming policy and walk options, applied
    /// to every handler it builds.
    pub fn with_options(policy: Arc<dyn NamePolicy>, options: WalkOptions) -> Self {
        Self {
            handlers: HashMap::new(),
            policy,
            options,
            history: Mutex::new(Vec::new()),
        }
    }

    /// Register a table under `name`, replacing any existing entry.
    ///
    /// Builds a [`TableHandler`], which runs the schema walk once; errors
    /// from the walk propagate and leave the registry unchanged.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        table: DataFrame,
        qualifier: Option<&str>,
    ) -> Result<&TableHandler> {
        let name = name.into();
        let handler = TableHandler::with_options(table, qualifier, &*self.policy, self.options)?;
        debug!(
            table = %name,
            leaves = handler.extracted_fields().len(),
            backed = handler.has_backing(),
            "registered table"
        );
        self.handlers.insert(name.clone(), handler);
        Ok(&self.handlers[name.as_str()])
    }

    /// Look up a handler by name.
    pub fn get(&self, name: &str) -> Result<&TableHandler> {
        self.handlers.get(name).ok_or_else(|| Error::NotFound {
            name: name.to_string(),
            available: self.names(),
        })
    }

    /// Mutable handler lookup, e.g. for `set_qualifier`.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut TableHandler> {
        let available = self.names();
        self.handlers.get_mut(name).ok_or_else(|| Error::NotFound {
            name: name.to_string(),
            available,
        })
    }

    /// Drop and return the handler registered under `name`.
    pub fn remove(&mut self, name: &str) -> Result<TableHandler> {
        let removed = self.handlers.remove(name).ok_or_else(|| Error::NotFound {
            name: name.to_string(),
            available: self.names(),
        })?;
        debug!(table = %name, "removed table");
        Ok(removed)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered tables.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True if no tables are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Whether a table is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Backing status of every registered table: `(name, qualifier)` pairs,
    /// sorted by name. A `None` qualifier means in-memory data.
    pub fn backing_status(&self) -> Vec<(&str, Option<&str>)> {
        let mut status: Vec<(&str, Option<&str>)> = self
            .handlers
            .iter()
            .map(|(name, handler)| (name.as_str(), handler.qualifier()))
            .collect();
        status.sort_by_key(|(name, _)| *name);
        status
    }

    /// Records of past joins, oldest first.
    pub fn join_history(&self) -> Vec<JoinRecord> {
        self.history.lock().clone()
    }

    /// Extract nested fields of a registered table into a new handler.
    ///
    /// `fields = None` extracts every discovered path; otherwise exactly the
    /// requested paths (plus the plain top-level columns). The new handler
    /// inherits the source qualifier unchanged: extraction is a view of the
    /// same backing data, not new provenance.
    pub fn prepare(&self, name: &str, fields: Option<&[&str]>) -> Result<TableHandler> {
        let handler = self.get(name)?;
        let table = handler.extract(fields)?;
        debug!(table = %name, all_fields = fields.is_none(), "prepared flat view");
        TableHandler::with_options(table, handler.qualifier(), &*self.policy, self.options)
    }

    /// Join registered tables on (possibly nested) key paths.
    ///
    /// The full protocol runs before any engine call: alias resolution,
    /// session compatibility, and key-path resolution all fail fast with no
    /// partial side effects. Each operand is then reduced to its minimal
    /// flat projection (plain columns plus its join-key paths) and the chain
    /// is delegated to DataFusion's join primitive, left-to-right in table
    /// order. The result handler carries a lineage qualifier composed from
    /// the operands' qualifiers and is returned unregistered; `add` it back
    /// to chain further operations.
    pub fn join(&self, spec: &JoinSpec) -> Result<TableHandler> {
        if spec.tables().is_empty() {
            return Err(Error::InvalidJoin(
                "at least one table is required".to_string(),
            ));
        }
        if spec.keys().is_empty() && spec.kind() != JoinKind::Cross {
            return Err(Error::InvalidJoin(format!(
                "'{}' join requires at least one key; use JoinKind::Cross for a cartesian product",
                spec.kind()
            )));
        }

        // Resolve aliases to registered handlers before touching the engine.
        let mut operands: Vec<(&str, &TableHandler)> = Vec::with_capacity(spec.tables().len());
        for (alias, name) in spec.tables() {
            operands.push((alias.as_str(), self.get(name)?));
        }

        // Every operand must belong to one engine session.
        let first_session = operands[0].1.session_id();
        for (_, handler) in &operands[1..] {
            if handler.session_id() != first_session {
                return Err(Error::SessionMismatch {
                    left: first_session.to_string(),
                    right: handler.session_id().to_string(),
                });
            }
        }

        // Resolve every key path to its flat column. Any unresolved path
        // fails here, before extraction or any engine call.
        let mut resolved: Vec<ResolvedKey> = Vec::with_capacity(spec.keys().len());
        for key in spec.keys() {
            let left = lookup_alias(&operands, &key.left_alias)?;
            let right = lookup_alias(&operands, &key.right_alias)?;
            resolved.push(ResolvedKey {
                left_column: resolve_path(left, &key.left_path)?,
                right_alias: key.right_alias.clone(),
                right_column: resolve_path(right, &key.right_path)?,
            });
        }

        // Minimal extraction subset per alias: only its join-key paths.
        let mut subsets: HashMap<&str, Vec<&str>> = HashMap::new();
        for key in spec.keys() {
            subsets
                .entry(key.left_alias.as_str())
                .or_default()
                .push(key.left_path.as_str());
            subsets
                .entry(key.right_alias.as_str())
                .or_default()
                .push(key.right_path.as_str());
        }

        // Operands without keys (cross joins) flatten fully instead.
        let mut prepared: Vec<DataFrame> = Vec::with_capacity(operands.len());
        for (alias, handler) in &operands {
            let subset = subsets.get(alias).map(Vec::as_slice);
            prepared.push(handler.extract(subset)?);
        }

        // Chain joins left-to-right in table order, composing lineage as we go.
        let mut result = prepared[0].clone();
        let mut qualifier = operands[0].1.qualifier().map(str::to_string);
        for (idx, right) in prepared.iter().enumerate().skip(1) {
            let (alias, handler) = operands[idx];
            let keys: Vec<&ResolvedKey> = resolved
                .iter()
                .filter(|key| key.right_alias == alias)
                .collect();

            result = if keys.is_empty() {
                cross_join(result, right.clone())?
            } else {
                let left_columns: Vec<&str> =
                    keys.iter().map(|key| key.left_column.as_str()).collect();
                let right_columns: Vec<&str> =
                    keys.iter().map(|key| key.right_column.as_str()).collect();
                result.join(
                    right.clone(),
                    spec.kind().to_join_type(),
                    &left_columns,
                    &right_columns,
                    None,
                )?
            };

            qualifier = Some(format_lineage(qualifier.as_deref(), handler.qualifier()));
            debug!(alias, how = %spec.kind(), keys = keys.len(), "joined operand");
        }

        self.history.lock().push(JoinRecord {
            tables: spec.tables().iter().map(|(_, name)| name.clone()).collect(),
            kind: spec.kind(),
            qualifier: qualifier.clone(),
        });

        TableHandler::with_options(result, qualifier.as_deref(), &*self.policy, self.options)
    }
}

/// Cartesian product of two table expressions.
///
/// The DataFrame API has no cross-join method, so this drops down to the
/// plan builder and rewraps the result with the left side's session state.
fn cross_join(left: DataFrame, right: DataFrame) -> Result<DataFrame> {
    let (state, left_plan) = left.into_parts();
    let (_, right_plan) = right.into_parts();
    let plan = LogicalPlanBuilder::from(left_plan)
        .cross_join(right_plan)?
        .build()?;
    Ok(DataFrame::new(state, plan))
}

fn lookup_alias<'a>(
    operands: &[(&str, &'a TableHandler)],
    alias: &str,
) -> Result<&'a TableHandler> {
    operands
        .iter()
        .find(|(a, _)| *a == alias)
        .map(|(_, handler)| *handler)
        .ok_or_else(|| Error::NotFound {
            name: alias.to_string(),
            available: operands.iter().map(|(a, _)| a.to_string()).collect(),
        })
}

fn resolve_path(handler: &TableHandler, path: &str) -> Result<String> {
    handler
        .extracted_fields()
        .get(path)
        .map(|field| field.column.clone())
        .ok_or_else(|| Error::FieldNotFound {
            path: path.to_string(),
            available: handler.extracted_fields().paths(),
        })
}
