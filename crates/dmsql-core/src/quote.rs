//! Identifier quoting inside free-form SQL fragments.
//!
//! There is no SQL grammar here. A fragment is scanned once, left to right,
//! as a sequence of identifier runs (alphanumerics and `_`), delimited spans
//! (string literals and already-quoted identifiers) and everything else.
//! Only whole identifier runs are ever rewritten, and each run is looked at
//! exactly once, so the result does not depend on the order of the known
//! column list and a column never matches inside a longer identifier.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static COMPLEX_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[,'"*().\s]"#).expect("valid complex key pattern"));

/// Returns whether a key is an expression rather than a single identifier.
///
/// Keys containing any of `, ' " * ( ) .` or whitespace go through
/// [`quote_fields`] instead of being wrapped whole.
#[must_use]
pub fn is_complex(key: &str) -> bool {
    COMPLEX_KEY.is_match(key)
}

fn is_identifier_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Length in bytes of the delimited span at the start of `text`.
///
/// A doubled delimiter inside the span is an escape. An unterminated span
/// runs to the end of the text.
fn delimited_len(text: &str, delim: char) -> usize {
    let width = delim.len_utf8();
    let mut pos = width;
    while let Some(offset) = text[pos..].find(delim) {
        let close = pos + offset + width;
        if text[close..].starts_with(delim) {
            pos = close + width;
        } else {
            return close;
        }
    }
    text.len()
}

/// Scans `sql` and lets `rewrite` replace identifier runs.
///
/// `rewrite` receives the identifier and the text that follows it; returning
/// `None` keeps the identifier. String literals and spans delimited by
/// `quote` are copied through untouched.
pub fn rewrite_identifiers<F>(sql: &str, quote: char, mut rewrite: F) -> String
where
    F: FnMut(&str, &str) -> Option<String>,
{
    let mut out = String::with_capacity(sql.len() + 8);
    let mut rest = sql;
    while let Some(c) = rest.chars().next() {
        if c == '\'' || c == quote {
            let end = delimited_len(rest, c);
            out.push_str(&rest[..end]);
            rest = &rest[end..];
        } else if is_identifier_char(c) {
            let end = rest
                .find(|ch: char| !is_identifier_char(ch))
                .unwrap_or(rest.len());
            let (ident, tail) = rest.split_at(end);
            match rewrite(ident, tail) {
                Some(replacement) => out.push_str(&replacement),
                None => out.push_str(ident),
            }
            rest = tail;
        } else {
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    out
}

/// Quotes every standalone occurrence of a known column in `sql`.
///
/// A fragment that already contains the quote character is considered safe
/// and returned unchanged.
///
/// ```rust
/// use dmsql_core::quote::quote_fields;
///
/// let sql = quote_fields("count(id) + user_id", &["id", "user_id"], '"');
/// assert_eq!(sql, r#"count("id") + "user_id""#);
/// ```
#[must_use]
pub fn quote_fields<S: AsRef<str>>(sql: &str, fields: &[S], quote: char) -> String {
    if sql.contains(quote) {
        return String::from(sql);
    }
    let known: HashSet<&str> = fields.iter().map(AsRef::as_ref).collect();
    rewrite_identifiers(sql, quote, |ident, _| {
        known
            .contains(ident)
            .then(|| format!("{quote}{ident}{quote}"))
    })
}

/// Quotes the given names where they qualify a column (`name.`).
///
/// Unlike [`quote_fields`] this pass works on fragments that already carry
/// quoted parts; quoted spans are simply skipped.
#[must_use]
pub fn quote_qualifiers<S: AsRef<str>>(sql: &str, names: &[S], quote: char) -> String {
    let known: HashSet<&str> = names.iter().map(AsRef::as_ref).collect();
    rewrite_identifiers(sql, quote, |ident, tail| {
        (tail.starts_with('.') && known.contains(ident)).then(|| format!("{quote}{ident}{quote}"))
    })
}

/// Renames function calls (`name(`) through `alias`, which receives the
/// lowercase function name.
#[must_use]
pub fn rename_functions<F>(sql: &str, quote: char, alias: F) -> String
where
    F: Fn(&str) -> Option<&'static str>,
{
    rewrite_identifiers(sql, quote, |ident, tail| {
        if tail.trim_start().starts_with('(') {
            alias(&ident.to_ascii_lowercase()).map(String::from)
        } else {
            None
        }
    })
}

/// Returns the identifier directly in front of the first `.` in `text`.
#[must_use]
pub fn leading_qualifier(text: &str) -> Option<&str> {
    let dot = text.find('.')?;
    let head = &text[..dot];
    let start = head
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_identifier_char(*c))
        .last()
        .map(|(i, _)| i)?;
    let qualifier = &head[start..];
    if qualifier.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some(qualifier)
}
