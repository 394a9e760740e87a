//! WHERE and HAVING clauses.

use crate::catalog::Introspect;
use crate::dialect::Dialect;
use crate::error::Result;
use crate::query::{Condition, QueryContext};
use crate::quote::{leading_qualifier, quote_qualifiers};

use super::Builder;

impl<D: Dialect, I: Introspect> Builder<D, I> {
    /// Builds the WHERE clause from condition text flattened by the host
    /// framework. Returns an empty string for an empty condition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Infrastructure`](crate::Error::Infrastructure)
    /// when the table's columns cannot be loaded.
    pub fn build_where(&self, query: &mut QueryContext, condition: &Condition) -> Result<String> {
        self.build_condition("WHERE", query, condition)
    }

    /// Builds the HAVING clause. Raw conditions go through
    /// [`Builder::parse_raw`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Infrastructure`](crate::Error::Infrastructure)
    /// when the table's columns cannot be loaded.
    pub fn build_having(&self, query: &mut QueryContext, condition: &Condition) -> Result<String> {
        self.build_condition("HAVING", query, condition)
    }

    fn build_condition(
        &self,
        keyword: &str,
        query: &mut QueryContext,
        condition: &Condition,
    ) -> Result<String> {
        let text = match condition {
            Condition::Text(text) => self.requalify_alias(text),
            Condition::Raw(raw) => self.parse_raw(query, raw)?,
        };
        let text = text.trim();
        if text.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("{keyword} {text}"))
    }

    /// Quotes the alias of an `alias.column` condition.
    ///
    /// Only conditions with a `.` and without `)` qualify; the identifier in
    /// front of the first `.` is taken as the alias and quoted wherever it
    /// qualifies a column.
    pub fn requalify_alias(&self, text: &str) -> String {
        if !text.contains('.') || text.contains(')') {
            return String::from(text);
        }
        match leading_qualifier(text) {
            Some(alias) => quote_qualifiers(text, &[alias], self.dialect.identifier_quote()),
            None => String::from(text),
        }
    }
}
