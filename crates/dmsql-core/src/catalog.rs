//! Catalog metadata: which tables exist and which columns they have.
//!
//! Driver crates implement [`Introspect`] against their catalog views. The
//! [`Catalog`] wraps an introspector and caches both lists for the lifetime
//! of the connection. Entries are never invalidated; a schema change during
//! the connection's lifetime is not picked up.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::error::{Error, Result};

/// Metadata of one table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column name.
    pub name: String,
    /// Declared data type.
    pub data_type: String,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Default value expression, if any.
    pub default_value: Option<String>,
    /// Whether the column is (part of) the primary key.
    pub is_primary_key: bool,
    /// Whether the column is filled automatically.
    pub is_auto_increment: bool,
}

impl ColumnInfo {
    /// Creates a nullable column without default.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: true,
            default_value: None,
            is_primary_key: false,
            is_auto_increment: false,
        }
    }

    /// Marks the column as primary key.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    /// Marks the column as NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

/// Reads catalog metadata from a live connection.
///
/// Implementations live in driver crates (e.g. dmsql-driver).
pub trait Introspect {
    /// Error type for introspection failures.
    type Error: std::error::Error;

    /// Lists every table visible to the connection.
    fn list_tables(&self) -> std::result::Result<Vec<String>, Self::Error>;

    /// Lists the columns of `table`, in declaration order.
    fn list_columns(&self, table: &str) -> std::result::Result<Vec<ColumnInfo>, Self::Error>;
}

/// Strips alias text, schema qualification and quotes from a table
/// reference: `"orders o"` and `"app"."orders"` both become `orders`.
#[must_use]
pub fn normalize_table_name(table: &str) -> &str {
    let name = table.split_whitespace().next().unwrap_or("");
    let name = name.rsplit('.').next().unwrap_or(name);
    name.trim_matches(|c| c == '"' || c == '`')
}

type ColumnCell = Arc<OnceCell<Arc<[ColumnInfo]>>>;

/// Per-connection cache in front of an [`Introspect`] source.
///
/// Population is single-flight: when several threads ask for the same list
/// before it is cached, one of them queries the source and the others wait
/// for its result. A failed population is not cached.
pub struct Catalog<I> {
    source: I,
    tables: OnceCell<Arc<HashSet<String>>>,
    columns: Mutex<HashMap<String, ColumnCell>>,
}

impl<I: Introspect> Catalog<I> {
    /// Creates an empty catalog over `source`.
    pub fn new(source: I) -> Self {
        Self {
            source,
            tables: OnceCell::new(),
            columns: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the introspection source.
    pub const fn source(&self) -> &I {
        &self.source
    }

    /// Returns every table name visible to the connection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Infrastructure`] when the catalog query fails.
    pub fn tables(&self) -> Result<Arc<HashSet<String>>> {
        self.tables
            .get_or_try_init(|| -> Result<Arc<HashSet<String>>> {
                let tables: HashSet<String> = self
                    .source
                    .list_tables()
                    .map_err(|e| Error::Infrastructure(e.to_string()))?
                    .into_iter()
                    .collect();
                debug!(tables = tables.len(), "Loaded table catalog");
                Ok(Arc::new(tables))
            })
            .cloned()
    }

    /// Returns whether `name` is a real table (as opposed to an alias).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Infrastructure`] when the catalog query fails.
    pub fn has_table(&self, name: &str) -> Result<bool> {
        Ok(self.tables()?.contains(name))
    }

    /// Returns the columns of `table`. Alias text after the table name is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Infrastructure`] when the catalog query fails.
    pub fn columns(&self, table: &str) -> Result<Arc<[ColumnInfo]>> {
        let name = normalize_table_name(table);
        let cell = {
            let mut cells = self.columns.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(cells.entry(String::from(name)).or_default())
        };
        cell.get_or_try_init(|| -> Result<Arc<[ColumnInfo]>> {
            let columns = self
                .source
                .list_columns(name)
                .map_err(|e| Error::Infrastructure(e.to_string()))?;
            debug!(table = %name, columns = columns.len(), "Loaded column catalog");
            Ok(Arc::from(columns))
        })
        .cloned()
    }

    /// Returns the column names of `table`, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Infrastructure`] when the catalog query fails.
    pub fn column_names(&self, table: &str) -> Result<Vec<String>> {
        Ok(self
            .columns(table)?
            .iter()
            .map(|column| column.name.clone())
            .collect())
    }
}

impl<I> std::fmt::Debug for Catalog<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("tables_loaded", &self.tables.get().is_some())
            .finish_non_exhaustive()
    }
}
