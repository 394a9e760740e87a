//! ORDER BY clause.

use crate::catalog::Introspect;
use crate::dialect::Dialect;
use crate::error::Result;
use crate::query::{Direction, OrderItem, QueryContext};
use crate::value::SqlValue;

use super::Builder;

impl<D: Dialect, I: Introspect> Builder<D, I> {
    /// Builds `ORDER BY ...` from the entries, comma-joined. No entries
    /// yields an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Infrastructure`](crate::Error::Infrastructure)
    /// when the table's columns cannot be loaded.
    pub fn build_order(&self, query: &mut QueryContext, items: &[OrderItem]) -> Result<String> {
        let mut parts = Vec::with_capacity(items.len());
        for item in items {
            let part = match item {
                OrderItem::Raw(raw) => {
                    query.bind.extend(raw.bind.iter().cloned());
                    raw.sql.clone()
                }
                OrderItem::Random => String::from(self.dialect.random_order()),
                OrderItem::Field(entry) => self.parse_order_field(query, entry)?,
                OrderItem::Values {
                    field,
                    values,
                    direction,
                } => self.parse_order_values(query, field, values, *direction)?,
            };
            parts.push(part);
        }
        if parts.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("ORDER BY {}", parts.join(",")))
    }

    fn parse_order_field(&self, query: &QueryContext, entry: &str) -> Result<String> {
        let entry = entry.trim();
        if entry == OrderItem::RANDOM_MARKER {
            return Ok(String::from(self.dialect.random_order()));
        }
        let (field, direction) = match entry.split_once(' ') {
            Some((field, direction)) => (field, Direction::parse(direction.trim())),
            None => (entry, None),
        };
        let key = self.parse_key(query, field)?;
        Ok(with_direction(key, direction))
    }

    /// Orders by the position of the field's value in `values`; values not
    /// in the list sort last.
    fn parse_order_values(
        &self,
        query: &mut QueryContext,
        field: &str,
        values: &[SqlValue],
        direction: Option<Direction>,
    ) -> Result<String> {
        let key = self.parse_key(query, field)?;
        let mut sql = format!("CASE {key}");
        for (position, value) in values.iter().enumerate() {
            let value = self.bind_value(query, value.clone());
            sql.push_str(&format!(" WHEN {value} THEN {position}"));
        }
        sql.push_str(&format!(" ELSE {} END", values.len()));
        Ok(with_direction(sql, direction))
    }
}

fn with_direction(sql: String, direction: Option<Direction>) -> String {
    match direction {
        Some(direction) => format!("{sql} {}", direction.as_sql()),
        None => sql,
    }
}
