//! Catalog introspection against the Dm system views.

use dmsql_core::{ColumnInfo, Introspect, SqlValue};
use tracing::debug;

use crate::connection::{Connection, Row};
use crate::error::DriverError;

const TABLES_SQL: &str = "select table_name from all_tables";
const COLUMNS_SQL: &str = "select * from user_tab_columns where table_name = ?";

/// Reads table and column lists through a host [`Connection`].
#[derive(Debug)]
pub struct DmIntrospector<C> {
    conn: C,
}

impl<C: Connection> DmIntrospector<C> {
    /// Wraps a host connection.
    pub const fn new(conn: C) -> Self {
        Self { conn }
    }

    /// Returns the wrapped connection.
    pub const fn connection(&self) -> &C {
        &self.conn
    }
}

impl<C: Connection> Introspect for DmIntrospector<C> {
    type Error = DriverError;

    fn list_tables(&self) -> Result<Vec<String>, Self::Error> {
        debug!(sql = TABLES_SQL, "Querying table catalog");
        let rows = self.conn.execute_query(TABLES_SQL, &[])?;
        Ok(rows
            .iter()
            .filter_map(|row| row.get_text("table_name"))
            .collect())
    }

    fn list_columns(&self, table: &str) -> Result<Vec<ColumnInfo>, Self::Error> {
        debug!(sql = COLUMNS_SQL, table = %table, "Querying column catalog");
        let params = [SqlValue::Text(String::from(table))];
        let rows = self.conn.execute_query(COLUMNS_SQL, &params)?;
        Ok(rows.iter().filter_map(column_from_row).collect())
    }
}

/// Maps a `user_tab_columns` row.
fn column_from_row(row: &Row) -> Option<ColumnInfo> {
    let name = row.get_text("column_name")?;
    Some(ColumnInfo {
        data_type: row.get_text("data_type").unwrap_or_default(),
        nullable: row.get_text("nullable").is_some_and(|flag| flag == "Y"),
        default_value: row.get_text("data_default"),
        is_primary_key: name == "id",
        is_auto_increment: false,
        name,
    })
}
