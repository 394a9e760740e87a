//! UNION / UNION ALL.

use crate::catalog::Introspect;
use crate::dialect::Dialect;
use crate::error::Result;
use crate::query::{QueryContext, Raw, TableEntry, Union, UnionBranch};
use crate::quote::rewrite_identifiers;

use super::Builder;

/// Byte range of the table name following the first `FROM` keyword.
///
/// String literals and quoted identifiers are skipped, so a `from` inside
/// them is never taken for the keyword.
fn from_table(sql: &str, quote: char) -> Option<(usize, usize)> {
    let mut found = None;
    rewrite_identifiers(sql, quote, |ident, tail| {
        if found.is_none() && ident.eq_ignore_ascii_case("from") {
            let name = tail.trim_start();
            let len = name
                .find(|c: char| c.is_whitespace() || matches!(c, ',' | '(' | ')'))
                .unwrap_or(name.len());
            if len > 0 {
                let start = sql.len() - name.len();
                found = Some((start, start + len));
            }
        }
        None
    });
    found
}

impl<D: Dialect, I: Introspect> Builder<D, I> {
    /// Builds the UNION suffix of a query, one `UNION ( ... )` group per
    /// branch.
    ///
    /// Textual branches have their first FROM table resolved like a FROM
    /// clause entry. Pre-built queries are used as given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Infrastructure`](crate::Error::Infrastructure)
    /// when the catalog query fails.
    pub fn build_union(&self, query: &mut QueryContext, union: &Union) -> Result<String> {
        let operator = union.operator();
        let mut parts = Vec::with_capacity(union.branches.len());
        for branch in &union.branches {
            let sql = match branch {
                UnionBranch::Sql(sql) => self.union_branch(query, sql)?,
                UnionBranch::Query(sql) => String::from(sql.trim()),
            };
            parts.push(format!("{operator} ( {sql} )"));
        }
        Ok(parts.join(" "))
    }

    fn union_branch(&self, query: &mut QueryContext, sql: &str) -> Result<String> {
        let sql = self.parse_raw(query, &Raw::new(sql.trim()))?;
        let Some((start, end)) = from_table(&sql, self.dialect.identifier_quote()) else {
            return Ok(sql);
        };
        let rendered = self.parse_table(query, &TableEntry::Name(String::from(&sql[start..end])))?;
        Ok(format!("{}{rendered}{}", &sql[..start], &sql[end..]))
    }
}
