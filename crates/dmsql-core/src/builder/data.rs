//! Column/value assignments for INSERT and UPDATE.

use indexmap::IndexMap;
use tracing::debug;

use crate::catalog::Introspect;
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::json::split_json_path;
use crate::query::{DataValue, QueryContext};
use crate::value::SqlValue;

use super::Builder;

enum Assignment {
    Value(SqlValue),
    Step { op: char, step: f64 },
}

impl<D: Dialect, I: Introspect> Builder<D, I> {
    /// Translates a column/value map into quoted column keys and SQL value
    /// expressions, preserving the input order.
    ///
    /// Keys are checked against the query's allowed field list, or the
    /// table's columns when none is set. An unknown plain key fails with
    /// [`Error::FieldNotFound`] in strict mode and is dropped otherwise.
    /// Qualified keys (`t.col`) and JSON paths (`col->path`) bypass the
    /// check.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldNotFound`] for an unknown key in strict mode,
    /// [`Error::InvalidValue`] for a non-finite increment or decrement and
    /// [`Error::Infrastructure`] when the catalog query fails.
    pub fn build_data(
        &self,
        query: &mut QueryContext,
        data: &IndexMap<String, DataValue>,
    ) -> Result<IndexMap<String, String>> {
        let known = if query.allowed_fields.is_empty() {
            self.table_fields(query)?
        } else {
            query.allowed_fields.clone()
        };

        let mut result = IndexMap::with_capacity(data.len());
        for (key, value) in data {
            let assignment = match value {
                DataValue::Raw(raw) => {
                    let column = self.parse_key(query, key)?;
                    let sql = self.parse_raw(query, raw)?;
                    result.insert(column, sql);
                    continue;
                }
                DataValue::Json(json) => Assignment::Value(SqlValue::Text(json.to_string())),
                DataValue::Value(value) => Assignment::Value(value.clone()),
                DataValue::Inc(step) => Assignment::Step { op: '+', step: *step },
                DataValue::Dec(step) => Assignment::Step { op: '-', step: *step },
            };
            if let Assignment::Step { step, .. } = &assignment {
                if !step.is_finite() {
                    return Err(Error::InvalidValue {
                        field: String::from(key.trim()),
                        reason: format!("step {step} is not finite"),
                    });
                }
            }

            if let Some((column, path, _)) = split_json_path(key) {
                let column_sql = self.parse_key(query, column)?;
                let value_sql = match assignment {
                    Assignment::Value(value) => self.bind_param(query, value),
                    Assignment::Step { op, step } => {
                        let current = self.dialect.json_extract(&column_sql, &format!("'$.{path}'"), false);
                        format!("{current} {op} {step}")
                    }
                };
                let sql = self.dialect.json_set(&column_sql, path, &value_sql);
                result.insert(column_sql, sql);
                continue;
            }

            let key = key.trim();
            if !key.contains('.') && !known.iter().any(|field| field == key) {
                if self.is_strict(query) {
                    return Err(Error::FieldNotFound(String::from(key)));
                }
                debug!(field = %key, "Dropped unknown field");
                continue;
            }

            let item = self.parse_key(query, key)?;
            let sql = match assignment {
                Assignment::Value(SqlValue::Null) => String::from("NULL"),
                Assignment::Value(value) => self.bind_value(query, value),
                Assignment::Step { op, step } => format!("{item} {op} {step}"),
            };
            result.insert(item, sql);
        }
        Ok(result)
    }
}
