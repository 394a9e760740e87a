//! Dm dialect implementation.

use dmsql_core::Dialect;

/// Dm (Dameng) dialect.
///
/// Identifiers are double-quoted; Dm folds unquoted identifiers to upper
/// case, so generated SQL always quotes them.
#[derive(Debug, Default, Clone, Copy)]
pub struct DmDialect;

impl DmDialect {
    /// Creates a new Dm dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Qualifies a stored procedure name with the database, unless it is
    /// already qualified.
    #[must_use]
    pub fn procedure_name(&self, database: &str, name: &str) -> String {
        if name.contains('.') || database.is_empty() {
            return String::from(name);
        }
        format!(
            "{}.{}",
            self.quote_identifier(database),
            self.quote_identifier(name)
        )
    }
}

impl Dialect for DmDialect {
    fn name(&self) -> &'static str {
        "dm"
    }

    fn supports_savepoint(&self) -> bool {
        true
    }

    fn supports_explain(&self) -> bool {
        false
    }

    fn random_order(&self) -> &'static str {
        "RAND()"
    }

    fn function_alias(&self, name: &str) -> Option<&'static str> {
        match name {
            "group_concat" => Some("wm_concat"),
            _ => None,
        }
    }
}
