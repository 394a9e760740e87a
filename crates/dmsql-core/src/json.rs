//! JSON path expressions (`column->key`, `column->>key`).

/// Returns whether `expr` contains a JSON path operator.
#[must_use]
pub fn has_json_path(expr: &str) -> bool {
    expr.contains("->")
}

/// Splits `column->path` / `column->>path` into
/// `(column, path, unquote)`.
#[must_use]
pub fn split_json_path(expr: &str) -> Option<(&str, &str, bool)> {
    if let Some((column, path)) = expr.split_once("->>") {
        return Some((column.trim(), path.trim(), true));
    }
    expr.split_once("->")
        .map(|(column, path)| (column.trim(), path.trim(), false))
}

/// Renders the path part of a JSON expression as a SQL string literal.
///
/// Paths already carrying quotes are taken as written.
///
/// ```rust
/// use dmsql_core::json::path_literal;
///
/// assert_eq!(path_literal("name"), "'name'");
/// assert_eq!(path_literal("'$.a.b'"), "'$.a.b'");
/// ```
#[must_use]
pub fn path_literal(path: &str) -> String {
    if path.contains('\'') {
        String::from(path)
    } else {
        format!("'{path}'")
    }
}
