//! Table handlers: one table expression plus its cached schema metadata.

use datafusion::dataframe::DataFrame;
use nestframe_core::{NamePolicy, Qualifier, UnderscorePolicy};

use crate::error::Result;
use crate::extract;
use crate::schema::{FieldMap, WalkOptions};

/// Owning wrapper around one table expression.
///
/// A handler pairs an opaque DataFusion [`DataFrame`] with the [`FieldMap`]
/// computed from its schema, plus an optional qualifier tracking where the
/// data is backed (or how it was derived). The field map is computed exactly
/// once at construction and immutable thereafter; the qualifier is the only
/// mutable state. Sharing a handler across concurrent readers needs no
/// synchronization, but concurrent `set_qualifier` calls are last-writer-wins
/// and synchronizing them is the caller's responsibility.
#[derive(Debug, Clone)]
pub struct TableHandler {
    table: DataFrame,
    fields: FieldMap,
    source_columns: Vec<String>,
    qualifier: Option<String>,
    session_id: String,
}

impl TableHandler {
    /// Create a handler with the default naming policy and walk options.
    ///
    /// Runs exactly one schema walk; fails with `SchemaError` or
    /// `NameCollisionError` if the table's schema cannot be flattened.
    pub fn new(table: DataFrame, qualifier: Option<&str>) -> Result<Self> {
        Self::with_options(table, qualifier, &UnderscorePolicy, WalkOptions::default())
    }

    /// Create a handler with a custom naming policy and walk options.
    pub fn with_options(
        table: DataFrame,
        qualifier: Option<&str>,
        policy: &dyn NamePolicy,
        options: WalkOptions,
    ) -> Result<Self> {
        let (fields, source_columns) = {
            let schema = table.schema();
            let fields = FieldMap::from_fields(schema.fields(), policy, options)?;
            let columns = schema.fields().iter().map(|f| f.name().clone()).collect();
            (fields, columns)
        };
        let session_id = session_id_of(&table);

        Ok(Self {
            table,
            fields,
            source_columns,
            qualifier: qualifier.map(str::to_string),
            session_id,
        })
    }

    /// The underlying table expression.
    pub fn table(&self) -> &DataFrame {
        &self.table
    }

    /// Consume the handler, returning the underlying table expression.
    pub fn into_table(self) -> DataFrame {
        self.table
    }

    /// Current qualifier, or `None` for purely in-memory data.
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    /// Replace the qualifier.
    ///
    /// `None` marks the table as in-memory with no backing storage. This is
    /// pure metadata mutation: the table expression and the cached field map
    /// are untouched, and no other operation ever changes the qualifier.
    pub fn set_qualifier(&mut self, qualifier: Option<&str>) {
        self.qualifier = qualifier.map(str::to_string);
    }

    /// Whether a backing-storage qualifier is set.
    pub fn has_backing(&self) -> bool {
        self.qualifier.is_some()
    }

    /// Best-effort structured parse of the qualifier.
    ///
    /// Never fails: unparseable input degrades to [`Qualifier::Custom`] with
    /// the raw string preserved. Returns `None` when no qualifier is set.
    pub fn backing_info(&self) -> Option<Qualifier> {
        self.qualifier.as_deref().map(Qualifier::parse)
    }

    /// The cached path-to-flat-name mapping.
    pub fn extracted_fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Top-level column names as declared in the source schema.
    pub fn source_columns(&self) -> &[String] {
        &self.source_columns
    }

    /// Identity of the engine session this handler's table belongs to.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Extract selected nested paths as flat top-level columns.
    ///
    /// Returns a new table expression; the handler itself is not modified.
    /// See [`extract::extract`] for subset semantics.
    pub fn extract(&self, subset: Option<&[&str]>) -> Result<DataFrame> {
        extract::extract(&self.table, &self.fields, subset)
    }
}

/// Session identity of a DataFrame, read from its embedded session state.
pub(crate) fn session_id_of(table: &DataFrame) -> String {
    let (state, _plan) = table.clone().into_parts();
    state.session_id().to_string()
}
