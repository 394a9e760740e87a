//! Field list (SELECT columns).

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::Introspect;
use crate::dialect::Dialect;
use crate::error::Result;
use crate::json::has_json_path;
use crate::query::{Field, QueryContext, Raw};

use super::Builder;

static AS_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+as\s+").expect("valid AS pattern"));

/// Splits `expr AS alias` at the first `AS`.
pub(crate) fn split_as(expr: &str) -> Option<(&str, &str)> {
    let found = AS_SEPARATOR.find(expr)?;
    Some((expr[..found.start()].trim(), expr[found.end()..].trim()))
}

impl<D: Dialect, I: Introspect> Builder<D, I> {
    /// Builds the comma-separated field list. No fields selects `*`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Infrastructure`](crate::Error::Infrastructure)
    /// when the table's columns cannot be loaded.
    pub fn build_fields(&self, query: &mut QueryContext) -> Result<String> {
        if query.fields.is_empty() {
            return Ok(String::from("*"));
        }
        let fields = query.fields.clone();
        let parts = fields
            .iter()
            .map(|field| self.parse_field(query, field))
            .collect::<Result<Vec<_>>>()?;
        Ok(parts.join(","))
    }

    fn parse_field(&self, query: &mut QueryContext, field: &Field) -> Result<String> {
        match field {
            Field::Name(name) => match split_as(name) {
                Some((expr, alias)) => self.aliased_key(query, expr, alias),
                None => self.parse_key(query, name),
            },
            Field::Aliased { expr, alias } => self.aliased_key(query, expr, alias),
            Field::Raw(raw) => match split_as(&raw.sql) {
                Some((expr, alias)) => {
                    let expr = if has_json_path(expr) {
                        query.bind.extend(raw.bind.iter().cloned());
                        self.parse_json(query, expr)?
                    } else {
                        let inner = Raw {
                            sql: String::from(expr),
                            bind: raw.bind.clone(),
                        };
                        self.parse_raw(query, &inner)?
                    };
                    Ok(format!("{expr} AS {}", self.quote_alias(alias)))
                }
                None => self.parse_raw(query, raw),
            },
        }
    }

    fn aliased_key(&self, query: &QueryContext, expr: &str, alias: &str) -> Result<String> {
        Ok(format!(
            "{} AS {}",
            self.parse_key(query, expr)?,
            self.quote_alias(alias)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::split_as;
    use crate::builder::tests::builder;
    use crate::query::{Field, QueryContext, Raw};

    #[test]
    fn test_split_as() {
        assert_eq!(split_as("count(*) AS total"), Some(("count(*)", "total")));
        assert_eq!(split_as("name as n"), Some(("name", "n")));
        assert_eq!(split_as("assets"), None);
    }

    #[test]
    fn test_no_fields_selects_all() {
        let mut query = QueryContext::new("users");
        assert_eq!(builder().build_fields(&mut query).unwrap(), "*");
    }

    #[test]
    fn test_qualified_and_plain_fields() {
        let mut query = QueryContext::new("users")
            .field("u.name")
            .field("o.*")
            .field("score");
        assert_eq!(
            builder().build_fields(&mut query).unwrap(),
            r#""u"."name","o".*,"score""#
        );
    }

    #[test]
    fn test_aliased_fields() {
        let mut query = QueryContext::new("users")
            .field("name AS n")
            .field(Field::Aliased {
                expr: String::from("count(id)"),
                alias: String::from("total"),
            });
        assert_eq!(
            builder().build_fields(&mut query).unwrap(),
            r#""name" AS "n",count("id") AS "total""#
        );
    }

    #[test]
    fn test_raw_field_with_json_path() {
        let mut query = QueryContext::new("users").field(Raw::new("data->>name AS label"));
        assert_eq!(
            builder().build_fields(&mut query).unwrap(),
            r#"JSON_UNQUOTE(JSON_EXTRACT("data", 'name')) AS "label""#
        );
    }

    #[test]
    fn test_qualified_json_fields_use_alias() {
        let mut query = QueryContext::new("users")
            .alias("users", "u")
            .field("users.data->name")
            .field(Raw::new("users.data->>name AS label"));
        assert_eq!(
            builder().build_fields(&mut query).unwrap(),
            r#"JSON_EXTRACT("u"."data", 'name'),JSON_UNQUOTE(JSON_EXTRACT("u"."data", 'name')) AS "label""#
        );
    }

    #[test]
    fn test_raw_field_without_alias() {
        let mut query = QueryContext::new("users").field(Raw::new("max(score)"));
        assert_eq!(
            builder().build_fields(&mut query).unwrap(),
            r#"max("score")"#
        );
    }
}
