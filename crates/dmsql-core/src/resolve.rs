//! Table and alias resolution.
//!
//! Table references arrive as plain names, `"name alias"` strings, subquery
//! text, raw expressions or explicit `table => alias` mappings. The
//! [`Resolver`] turns them into a (schema-qualified) table expression and an
//! alias. Whether a bare token is a table or an alias is decided elsewhere,
//! by catalog membership; that is a heuristic, not a guarantee.

use crate::dialect::Dialect;
use crate::query::{JoinTable, JoinTarget};

/// Extracts the alias that follows a subquery: the text after the last
/// `)`, without a leading `AS`.
///
/// Returns an empty string when there is no `)` or nothing follows it. The
/// alias is located textually; an alias-like tail inside a nested subquery
/// is not distinguished from the outer one.
#[must_use]
pub fn alias_from_table(table: &str) -> &str {
    split_subquery(table).1
}

/// Splits subquery text into the part up to the last `)` and its alias.
#[must_use]
pub fn split_subquery(text: &str) -> (&str, &str) {
    let text = text.trim();
    let Some(close) = text.rfind(')') else {
        return (text, "");
    };
    let (subquery, rest) = text.split_at(close + 1);
    (subquery.trim(), strip_as(rest))
}

/// Splits `"name alias"` / `"name AS alias"` on the first whitespace.
#[must_use]
pub fn split_name_alias(text: &str) -> (&str, Option<&str>) {
    let text = text.trim();
    match text.split_once(char::is_whitespace) {
        Some((name, rest)) => {
            let alias = strip_as(rest);
            (name, (!alias.is_empty()).then_some(alias))
        }
        None => (text, None),
    }
}

fn strip_as(text: &str) -> &str {
    let text = text.trim();
    match text.get(..3) {
        Some(head) if head.eq_ignore_ascii_case("as ") => text[3..].trim(),
        _ => text,
    }
}

/// Converts `UserOrder` to `user_order`. Already snake-cased names are
/// returned unchanged.
#[must_use]
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.extend(c.to_lowercase());
            prev_lower = false;
        } else {
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
            out.push(c);
        }
    }
    out
}

/// Resolves table references for one connection configuration.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a, D: ?Sized> {
    dialect: &'a D,
    schema: &'a str,
    prefix: &'a str,
}

impl<'a, D: Dialect + ?Sized> Resolver<'a, D> {
    /// Creates a resolver. Empty `schema` or `prefix` disable qualification
    /// and prefixing.
    #[must_use]
    pub const fn new(dialect: &'a D, schema: &'a str, prefix: &'a str) -> Self {
        Self {
            dialect,
            schema,
            prefix,
        }
    }

    /// Returns the full table name for a model name: prefix plus the
    /// snake-cased name. All-uppercase names are kept as they are.
    #[must_use]
    pub fn table_name(&self, name: &str) -> String {
        let is_upper = name
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(char::is_uppercase);
        if is_upper {
            format!("{}{name}", self.prefix)
        } else {
            format!("{}{}", self.prefix, snake_case(name))
        }
    }

    /// Applies the prefix to a bare table name that lacks it.
    fn with_prefix(&self, table: &str) -> String {
        if !self.prefix.is_empty() && !table.contains('.') && !table.starts_with(self.prefix) {
            self.table_name(table)
        } else {
            String::from(table)
        }
    }

    /// Qualifies `table` with the schema unless it is already qualified.
    #[must_use]
    pub fn qualify(&self, table: &str) -> String {
        if self.schema.is_empty() || table.contains('.') {
            String::from(table)
        } else {
            format!("{}.{table}", self.schema)
        }
    }

    /// Renders a table expression with every dotted part quoted.
    /// Subqueries and expressions with whitespace are left as they are.
    #[must_use]
    pub fn render(&self, table: &str) -> String {
        if table.contains(['(', ' ']) {
            return String::from(table);
        }
        table
            .split('.')
            .map(|part| self.dialect.quote_identifier(part))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Qualifies and renders a real table.
    #[must_use]
    pub fn render_qualified(&self, table: &str) -> String {
        self.render(&self.qualify(table))
    }

    /// Resolves a JOIN target into its table expression and alias.
    ///
    /// - `"users"` resolves to `users` aliased as itself
    /// - `"users u"` resolves to `users` aliased `u`
    /// - `"(select 1) as t"` resolves to `(select 1)` aliased `t`
    ///
    /// Plain names get the prefix and the schema. Subqueries, raw
    /// expressions and explicit mappings are passed through.
    #[must_use]
    pub fn resolve_join_target(&self, target: &JoinTarget) -> JoinTable {
        let (table, alias) = match target {
            JoinTarget::Raw(raw) => return JoinTable::Raw(raw.clone()),
            JoinTarget::Mapped { table, alias } => {
                return JoinTable::Aliased {
                    table: table.clone(),
                    alias: alias.clone(),
                }
            }
            JoinTarget::Name(text) if text.contains('(') => {
                let (subquery, alias) = split_subquery(text);
                (String::from(subquery), String::from(alias))
            }
            JoinTarget::Name(text) => {
                let (name, alias) = split_name_alias(text);
                let alias = match alias {
                    Some(alias) => String::from(alias),
                    None if !name.contains('.') => String::from(name),
                    None => String::new(),
                };
                (self.qualify(&self.with_prefix(name)), alias)
            }
        };
        if alias.is_empty() || alias == table {
            JoinTable::Table(table)
        } else {
            JoinTable::Aliased { table, alias }
        }
    }

    /// Returns the alias a join target is referred to by.
    #[must_use]
    pub fn resolve_alias(&self, text: &str) -> String {
        let resolved = self.resolve_join_target(&JoinTarget::Name(String::from(text)));
        resolved.alias().map(String::from).unwrap_or_default()
    }
}
