//! SQL Dialect support.
//!
//! The clause builder is one generic pipeline; everything that differs
//! between database products (quoting, qualification, JSON access, function
//! names, unsupported statements) is asked of a [`Dialect`].

mod generic;

pub use generic::GenericDialect;

/// Trait for SQL dialect-specific behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character.
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Returns the parameter placeholder style.
    fn parameter_placeholder(&self) -> &'static str {
        "?"
    }

    /// Returns whether `REPLACE INTO` can be emitted.
    fn supports_replace(&self) -> bool {
        false
    }

    /// Returns whether `ON DUPLICATE KEY UPDATE` can be emitted.
    fn supports_duplicate_key(&self) -> bool {
        false
    }

    /// Returns whether the connection supports savepoints.
    fn supports_savepoint(&self) -> bool {
        false
    }

    /// Returns whether `EXPLAIN` output can be analysed.
    fn supports_explain(&self) -> bool {
        true
    }

    /// Returns the expression used for random ordering.
    fn random_order(&self) -> &'static str {
        "RANDOM()"
    }

    /// Maps a function name (lowercase) to the dialect's equivalent, if it
    /// has a different name.
    fn function_alias(&self, _name: &str) -> Option<&'static str> {
        None
    }

    /// Quotes an identifier. Already quoted identifiers and `*` are
    /// returned unchanged.
    fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        if name == "*" || (name.len() >= 2 && name.starts_with(quote) && name.ends_with(quote)) {
            return String::from(name);
        }
        format!("{quote}{name}{quote}")
    }

    /// Renders a JSON extraction. `unquote` selects the `->>` form.
    fn json_extract(&self, column: &str, path: &str, unquote: bool) -> String {
        if unquote {
            format!("JSON_UNQUOTE(JSON_EXTRACT({column}, {path}))")
        } else {
            format!("JSON_EXTRACT({column}, {path})")
        }
    }

    /// Renders a JSON merge assigning `value` at `path` inside `column`.
    fn json_set(&self, column: &str, path: &str, value: &str) -> String {
        format!("json_set({column}, '$.{path}', {value})")
    }
}
