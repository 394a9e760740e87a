//! The host connection seam.

use std::collections::HashMap;

use dmsql_core::{SqlValue, ToSqlValue};

use crate::error::DriverError;

/// A live connection supplied by the host framework.
///
/// Only catalog queries go through it; statements built from the clause
/// fragments are executed by the host itself.
pub trait Connection {
    /// Runs `sql` with positional `params` and returns every result row.
    fn execute_query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, DriverError>;
}

impl<C: Connection + ?Sized> Connection for &C {
    fn execute_query(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, DriverError> {
        (**self).execute_query(sql, params)
    }
}

/// One result row. Column names are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: HashMap<String, SqlValue>,
}

impl Row {
    /// Creates an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column value.
    #[must_use]
    pub fn with<T: ToSqlValue>(mut self, column: &str, value: T) -> Self {
        self.values
            .insert(column.to_lowercase(), value.to_sql_value());
        self
    }

    /// Returns a column value.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.values.get(&column.to_lowercase())
    }

    /// Returns a column value as text. NULL reads as `None`.
    #[must_use]
    pub fn get_text(&self, column: &str) -> Option<String> {
        self.get(column).and_then(SqlValue::as_text)
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: AsRef<str>, V: ToSqlValue> FromIterator<(K, V)> for Row {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::new(), |row, (column, value)| row.with(column.as_ref(), value))
    }
}
