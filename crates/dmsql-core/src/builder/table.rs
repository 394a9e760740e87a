//! FROM and JOIN clauses.

use crate::catalog::Introspect;
use crate::dialect::Dialect;
use crate::error::Result;
use crate::query::{JoinTable, JoinTarget, QueryContext, TableEntry};
use crate::quote::quote_qualifiers;
use crate::resolve::{split_name_alias, split_subquery};
use crate::value::SqlValue;

use super::Builder;

impl<D: Dialect, I: Introspect> Builder<D, I> {
    /// Builds the comma-separated table list of a FROM clause.
    ///
    /// Names found in the table catalog are schema-qualified; anything else
    /// is taken to be an alias and only quoted. Subqueries keep their text
    /// and get their trailing alias quoted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Infrastructure`](crate::Error::Infrastructure)
    /// when the catalog query fails.
    pub fn build_table(&self, query: &mut QueryContext, tables: &[TableEntry]) -> Result<String> {
        let parts = tables
            .iter()
            .map(|entry| self.parse_table(query, entry))
            .collect::<Result<Vec<_>>>()?;
        Ok(parts.join(","))
    }

    pub(crate) fn parse_table(&self, query: &mut QueryContext, entry: &TableEntry) -> Result<String> {
        match entry {
            TableEntry::Raw(raw) => self.parse_raw(query, raw),
            TableEntry::Aliased { table, alias } => Ok(format!(
                "{} {}",
                self.table_expr(table.trim())?,
                self.quote_alias(alias)
            )),
            TableEntry::Name(text) if text.contains(')') => {
                let (subquery, alias) = split_subquery(text);
                let alias = if alias.is_empty() {
                    query.aliases.get(subquery).map(String::as_str)
                } else {
                    Some(alias)
                };
                Ok(match alias {
                    Some(alias) => format!("{subquery} {}", self.quote_alias(alias)),
                    None => String::from(subquery),
                })
            }
            TableEntry::Name(text) => {
                let (name, alias) = split_name_alias(text);
                let alias = alias
                    .or_else(|| query.aliases.get(name).map(String::as_str))
                    .filter(|alias| *alias != name);
                let table = self.table_expr(name)?;
                Ok(match alias {
                    Some(alias) => format!("{table} {}", self.quote_alias(alias)),
                    None => table,
                })
            }
        }
    }

    /// Renders a table name: qualified when it is a real table, quoted as
    /// it stands otherwise.
    fn table_expr(&self, name: &str) -> Result<String> {
        let resolver = self.resolver();
        let bare = name.trim_matches(self.dialect.identifier_quote());
        if self.catalog.has_table(bare)? {
            Ok(resolver.render_qualified(bare))
        } else {
            Ok(resolver.render(name))
        }
    }

    /// Builds one `<KIND> JOIN <table> [<alias>] ON <condition>` clause.
    ///
    /// The target's alias is registered on the query, `bind` is appended to
    /// the query's parameters, and every known alias qualifying a column in
    /// the condition is quoted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Infrastructure`](crate::Error::Infrastructure)
    /// when a raw target's columns cannot be loaded.
    pub fn build_join(
        &self,
        query: &mut QueryContext,
        target: &JoinTarget,
        condition: &str,
        kind: &str,
        bind: &[SqlValue],
    ) -> Result<String> {
        let resolver = self.resolver();
        let resolved = resolver.resolve_join_target(target);
        let table = match &resolved {
            JoinTable::Raw(raw) => self.parse_raw(query, raw)?,
            JoinTable::Table(table) => resolver.render(table),
            JoinTable::Aliased { table, alias } => {
                query.aliases.insert(table.clone(), alias.clone());
                format!("{} {}", resolver.render(table), self.quote_alias(alias))
            }
        };
        query.bind.extend_from_slice(bind);

        let mut names: Vec<&str> = query.aliases.values().map(String::as_str).collect();
        names.extend(resolved.alias());
        let condition = quote_qualifiers(condition.trim(), &names, self.dialect.identifier_quote());

        let kind = kind.trim().to_uppercase();
        if condition.is_empty() {
            Ok(format!("{kind} JOIN {table}"))
        } else {
            Ok(format!("{kind} JOIN {table} ON {condition}"))
        }
    }
}
