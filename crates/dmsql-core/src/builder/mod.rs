//! Clause builder.
//!
//! The host framework calls one `build_*` method per clause it assembles and
//! concatenates the returned fragments. Each call either produces the whole
//! fragment or fails; bound parameters are appended to
//! [`QueryContext::bind`] in the order their placeholders are emitted.
//!
//! # Example
//!
//! ```rust
//! use dmsql_core::{Builder, BuilderOptions, ColumnInfo, DataValue, GenericDialect, Introspect, QueryContext};
//! use indexmap::IndexMap;
//!
//! struct Schema;
//!
//! impl Introspect for Schema {
//!     type Error = std::io::Error;
//!
//!     fn list_tables(&self) -> Result<Vec<String>, Self::Error> {
//!         Ok(vec![String::from("players")])
//!     }
//!
//!     fn list_columns(&self, _table: &str) -> Result<Vec<ColumnInfo>, Self::Error> {
//!         Ok(vec![ColumnInfo::new("score", "INT")])
//!     }
//! }
//!
//! let builder = Builder::new(GenericDialect::new(), BuilderOptions::default(), Schema);
//! let mut query = QueryContext::new("players");
//! let mut data = IndexMap::new();
//! data.insert(String::from("score"), DataValue::Inc(5.0));
//!
//! let assignments = builder.build_data(&mut query, &data).unwrap();
//! assert_eq!(assignments[r#""score""#], r#""score" + 5"#);
//! ```

mod condition;
mod data;
mod field;
mod order;
mod table;
mod union;

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::catalog::{normalize_table_name, Catalog, Introspect};
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::json::{path_literal, split_json_path};
use crate::query::{QueryContext, Raw};
use crate::quote::{is_complex, quote_fields, rename_functions};
use crate::resolve::Resolver;
use crate::value::SqlValue;

/// Connection-level settings the builder needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderOptions {
    /// Schema (database) name real tables are qualified with. Empty
    /// disables qualification.
    pub schema: String,
    /// Table name prefix.
    pub prefix: String,
    /// Bind scalar values as parameters instead of inlining them.
    pub auto_bind: bool,
    /// Reject data for columns the table does not have.
    pub strict_fields: bool,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            schema: String::new(),
            prefix: String::new(),
            auto_bind: true,
            strict_fields: true,
        }
    }
}

/// Translates query descriptions into SQL fragments for one connection.
///
/// The builder owns the connection's [`Catalog`], so table and column lists
/// are fetched at most once for its lifetime.
#[derive(Debug)]
pub struct Builder<D, I> {
    dialect: D,
    options: BuilderOptions,
    catalog: Catalog<I>,
}

impl<D: Dialect, I: Introspect> Builder<D, I> {
    /// Creates a builder over an introspection source.
    pub fn new(dialect: D, options: BuilderOptions, source: I) -> Self {
        Self {
            dialect,
            options,
            catalog: Catalog::new(source),
        }
    }

    /// Returns the dialect.
    pub const fn dialect(&self) -> &D {
        &self.dialect
    }

    /// Returns the connection settings.
    pub const fn options(&self) -> &BuilderOptions {
        &self.options
    }

    /// Returns the catalog cache.
    pub const fn catalog(&self) -> &Catalog<I> {
        &self.catalog
    }

    /// Returns a table/alias resolver for this connection.
    pub fn resolver(&self) -> Resolver<'_, D> {
        Resolver::new(&self.dialect, &self.options.schema, &self.options.prefix)
    }

    /// Quotes every known column occurring in `sql`.
    pub fn quote_identifier_list<S: AsRef<str>>(&self, sql: &str, known_columns: &[S]) -> String {
        quote_fields(sql, known_columns, self.dialect.identifier_quote())
    }

    /// Returns the column names of the query's table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Infrastructure`] when the table's columns cannot be loaded.
    pub fn table_fields(&self, query: &QueryContext) -> Result<Vec<String>> {
        match query.table.as_deref() {
            Some(table) => self.catalog.column_names(table),
            None => Ok(Vec::new()),
        }
    }

    /// Resolves a field key into quoted SQL.
    ///
    /// Handles integer keys, JSON paths, `alias.column` / `alias.*`
    /// qualification (including the `__TABLE__` placeholder and registered
    /// aliases), and expressions, whose known columns are quoted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Infrastructure`] when the table's columns cannot be loaded.
    pub fn parse_key(&self, query: &QueryContext, key: &str) -> Result<String> {
        let key = key.trim();
        if key.parse::<i64>().is_ok() {
            return Ok(String::from(key));
        }
        if split_json_path(key).is_some() {
            return self.parse_json(query, key);
        }

        let quote = self.dialect.identifier_quote();
        let qualified = key
            .split_once('.')
            .filter(|(table, _)| !is_complex(table.trim_matches(quote)));
        let Some((table, column)) = qualified else {
            return self.quote_column(query, key);
        };

        let mut table = table.trim_matches(quote);
        if table == "__TABLE__" {
            table = query.table.as_deref().map_or("", normalize_table_name);
        }
        if let Some(alias) = query.aliases.get(table) {
            table = alias.as_str();
        }
        let column = self.quote_column(query, column.trim_matches(quote))?;
        Ok(format!("{}.{column}", self.dialect.quote_identifier(table)))
    }

    /// Rewrites a JSON path expression (`column->path`, `column->>path`)
    /// into the dialect's extraction call.
    ///
    /// The column part is resolved like any other key, so qualifiers go
    /// through the alias map and `__TABLE__`. `->>` also unquotes the
    /// extracted value. Expressions without a path operator are resolved as
    /// plain keys.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Infrastructure`] when the table's columns cannot be loaded.
    pub fn parse_json(&self, query: &QueryContext, expr: &str) -> Result<String> {
        let Some((column, path, unquote)) = split_json_path(expr) else {
            return self.parse_key(query, expr);
        };
        let column = self.parse_key(query, column)?;
        Ok(self.dialect.json_extract(&column, &path_literal(path), unquote))
    }

    fn quote_column(&self, query: &QueryContext, column: &str) -> Result<String> {
        if column == "*" {
            Ok(String::from(column))
        } else if is_complex(column) {
            let fields = self.table_fields(query)?;
            Ok(quote_fields(column, &fields, self.dialect.identifier_quote()))
        } else {
            Ok(self.dialect.quote_identifier(column))
        }
    }

    /// Translates a raw expression: quotes the table's columns (unless the
    /// fragment already carries quotes), renames dialect functions and
    /// appends the fragment's parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Infrastructure`] when the table's columns cannot be loaded.
    pub fn parse_raw(&self, query: &mut QueryContext, raw: &Raw) -> Result<String> {
        let quote = self.dialect.identifier_quote();
        let sql = if raw.sql.contains(quote) {
            raw.sql.clone()
        } else {
            quote_fields(&raw.sql, &self.table_fields(query)?, quote)
        };
        let sql = rename_functions(&sql, quote, |name| self.dialect.function_alias(name));
        query.bind.extend(raw.bind.iter().cloned());
        trace!(sql = %sql, params = raw.bind.len(), "Parsed raw expression");
        Ok(sql)
    }

    /// Quotes an output or table alias.
    pub(crate) fn quote_alias(&self, alias: &str) -> String {
        self.dialect.quote_identifier(alias.trim())
    }

    /// Binds `value` as a parameter and returns its placeholder.
    pub(crate) fn bind_param(&self, query: &mut QueryContext, value: SqlValue) -> String {
        query.bind.push(value);
        String::from(self.dialect.parameter_placeholder())
    }

    /// Binds `value` when auto-binding is on, inlines it otherwise.
    pub(crate) fn bind_value(&self, query: &mut QueryContext, value: SqlValue) -> String {
        if self.options.auto_bind {
            self.bind_param(query, value)
        } else {
            value.to_sql_inline()
        }
    }

    pub(crate) fn is_strict(&self, query: &QueryContext) -> bool {
        query.strict.unwrap_or(self.options.strict_fields)
    }

    /// Requests `REPLACE INTO` semantics.
    ///
    /// # Errors
    ///
    /// Always returns [`Error::UnsupportedOperation`] unless the dialect
    /// supports `REPLACE INTO`.
    pub fn replace(&self) -> Result<()> {
        if self.dialect.supports_replace() {
            return Ok(());
        }
        warn!(dialect = self.dialect.name(), "REPLACE INTO rejected");
        Err(Error::UnsupportedOperation(format!(
            "{} does not support REPLACE INTO",
            self.dialect.name()
        )))
    }

    /// Requests `ON DUPLICATE KEY UPDATE` for the given columns.
    ///
    /// # Errors
    ///
    /// Always returns [`Error::UnsupportedOperation`] unless the dialect
    /// supports `ON DUPLICATE KEY UPDATE`.
    pub fn duplicate<S: AsRef<str>>(&self, columns: &[S]) -> Result<()> {
        if self.dialect.supports_duplicate_key() {
            return Ok(());
        }
        warn!(
            dialect = self.dialect.name(),
            columns = columns.len(),
            "ON DUPLICATE KEY rejected"
        );
        Err(Error::UnsupportedOperation(format!(
            "{} does not support ON DUPLICATE KEY",
            self.dialect.name()
        )))
    }
}
