//! The query description handed over by the host framework.
//!
//! Everything here is transient: built for one clause-build call and thrown
//! away once the SQL text has been returned.

use std::collections::HashMap;

use crate::value::{SqlValue, ToSqlValue};

/// An opaque SQL fragment supplied by the caller, with its own bound
/// parameters.
///
/// Raw fragments bypass key resolution. Bare column names inside them are
/// still quoted unless the fragment already contains the quote character.
#[derive(Debug, Clone, PartialEq)]
pub struct Raw {
    /// The SQL text.
    pub sql: String,
    /// Parameters bound by the fragment, in placeholder order.
    pub bind: Vec<SqlValue>,
}

impl Raw {
    /// Creates a raw fragment without parameters.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            bind: Vec::new(),
        }
    }

    /// Adds a bound parameter.
    #[must_use]
    pub fn bind<T: ToSqlValue>(mut self, value: T) -> Self {
        self.bind.push(value.to_sql_value());
        self
    }
}

/// Read-only view of the query being translated.
///
/// The only thing the builder writes back is [`QueryContext::bind`], which
/// collects the parameters behind every `?` it emits.
#[derive(Debug, Clone, Default)]
pub struct QueryContext {
    /// Target table name, with prefix applied.
    pub table: Option<String>,
    /// Aliases keyed by the table (or subquery) they stand for.
    pub aliases: HashMap<String, String>,
    /// Selected fields, in output order.
    pub fields: Vec<Field>,
    /// Columns allowed in data assignments. Empty means "the table's
    /// catalog columns".
    pub allowed_fields: Vec<String>,
    /// Per-query override of strict fields mode.
    pub strict: Option<bool>,
    /// Bound parameters accumulated so far.
    pub bind: Vec<SqlValue>,
}

impl QueryContext {
    /// Creates a context targeting `table`.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            ..Self::default()
        }
    }

    /// Registers `alias` for `table`.
    #[must_use]
    pub fn alias(mut self, table: impl Into<String>, alias: impl Into<String>) -> Self {
        self.aliases.insert(table.into(), alias.into());
        self
    }

    /// Adds a selected field.
    #[must_use]
    pub fn field(mut self, field: impl Into<Field>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Overrides strict fields mode for this query.
    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }
}

/// A selected field.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// A column name, `alias.column`, `alias.*`, a JSON path
    /// (`column->key`, `column->>key`), optionally followed by `AS alias`.
    Name(String),
    /// An expression with an explicit output alias.
    Aliased {
        /// The selected expression.
        expr: String,
        /// The output alias.
        alias: String,
    },
    /// A raw expression, optionally followed by `AS alias`.
    Raw(Raw),
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Self::Name(String::from(name))
    }
}

impl From<Raw> for Field {
    fn from(raw: Raw) -> Self {
        Self::Raw(raw)
    }
}

/// A WHERE or HAVING condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Condition text already flattened by the host framework.
    Text(String),
    /// A raw condition.
    Raw(Raw),
}

impl From<&str> for Condition {
    fn from(text: &str) -> Self {
        Self::Text(String::from(text))
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl Direction {
    /// Parses `ASC`/`DESC`, ignoring case.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if token.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }

    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One ORDER BY entry.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderItem {
    /// `field` or `field ASC|DESC`.
    Field(String),
    /// Random order.
    Random,
    /// A raw expression, emitted verbatim.
    Raw(Raw),
    /// Order by the position of the field's value in an explicit list.
    Values {
        /// The field to order by.
        field: String,
        /// Values in the wanted order.
        values: Vec<SqlValue>,
        /// Optional direction.
        direction: Option<Direction>,
    },
}

impl OrderItem {
    /// The marker that requests random order.
    pub const RANDOM_MARKER: &'static str = "[rand]";
}

impl From<&str> for OrderItem {
    fn from(entry: &str) -> Self {
        if entry.trim() == Self::RANDOM_MARKER {
            Self::Random
        } else {
            Self::Field(String::from(entry))
        }
    }
}

/// One entry of the FROM clause.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEntry {
    /// A table name, `"table alias"`, or `"(subquery) alias"`.
    Name(String),
    /// A table with an explicit alias.
    Aliased {
        /// The table name.
        table: String,
        /// The alias.
        alias: String,
    },
    /// A raw table expression.
    Raw(Raw),
}

impl From<&str> for TableEntry {
    fn from(name: &str) -> Self {
        Self::Name(String::from(name))
    }
}

/// A JOIN target as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinTarget {
    /// A table name, `"table alias"`, or subquery text.
    Name(String),
    /// A single `table => alias` mapping.
    Mapped {
        /// The table (or subquery) text.
        table: String,
        /// The alias.
        alias: String,
    },
    /// A raw table expression.
    Raw(Raw),
}

impl From<&str> for JoinTarget {
    fn from(name: &str) -> Self {
        Self::Name(String::from(name))
    }
}

/// A resolved JOIN target.
///
/// When the alias would equal the table text it is dropped and the target
/// is a bare [`JoinTable::Table`].
#[derive(Debug, Clone, PartialEq)]
pub enum JoinTable {
    /// A table expression that serves as its own alias.
    Table(String),
    /// A table expression with a distinct alias.
    Aliased {
        /// The (possibly schema-qualified) table expression.
        table: String,
        /// The alias.
        alias: String,
    },
    /// A raw table expression.
    Raw(Raw),
}

impl JoinTable {
    /// Returns the table expression.
    #[must_use]
    pub fn table(&self) -> &str {
        match self {
            Self::Table(table) | Self::Aliased { table, .. } => table.as_str(),
            Self::Raw(raw) => raw.sql.as_str(),
        }
    }

    /// Returns the name the joined table is referred to by, if it has one.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        match self {
            Self::Aliased { alias, .. } => Some(alias.as_str()),
            Self::Table(table) if !table.contains(['.', '(']) => Some(table.as_str()),
            Self::Table(_) | Self::Raw(_) => None,
        }
    }
}

/// A UNION clause.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Union {
    /// `UNION ALL` instead of `UNION`.
    pub all: bool,
    /// The unioned queries.
    pub branches: Vec<UnionBranch>,
}

impl Union {
    /// Returns the SQL operator.
    #[must_use]
    pub const fn operator(&self) -> &'static str {
        if self.all {
            "UNION ALL"
        } else {
            "UNION"
        }
    }
}

/// One branch of a UNION.
#[derive(Debug, Clone, PartialEq)]
pub enum UnionBranch {
    /// Raw SQL whose `FROM` table still needs qualifying.
    Sql(String),
    /// A nested query already built by the host framework.
    Query(String),
}

/// The value side of a data assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// A scalar (or NULL).
    Value(SqlValue),
    /// A raw expression.
    Raw(Raw),
    /// A structured value, stored as JSON text.
    Json(serde_json::Value),
    /// `column + step`.
    Inc(f64),
    /// `column - step`.
    Dec(f64),
}

impl DataValue {
    /// Wraps a scalar value.
    #[must_use]
    pub fn value<T: ToSqlValue>(value: T) -> Self {
        Self::Value(value.to_sql_value())
    }

    /// Builds an increment or decrement from an `(op, step)` pair.
    ///
    /// Returns `None` when `op` is neither `INC` nor `DEC`, or when `step`
    /// is not finite.
    #[must_use]
    pub fn step(op: &str, step: f64) -> Option<Self> {
        if !step.is_finite() {
            None
        } else if op.eq_ignore_ascii_case("inc") {
            Some(Self::Inc(step))
        } else if op.eq_ignore_ascii_case("dec") {
            Some(Self::Dec(step))
        } else {
            None
        }
    }
}

impl From<SqlValue> for DataValue {
    fn from(value: SqlValue) -> Self {
        Self::Value(value)
    }
}

impl From<Raw> for DataValue {
    fn from(raw: Raw) -> Self {
        Self::Raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_item_from_marker() {
        assert_eq!(OrderItem::from("[rand]"), OrderItem::Random);
        assert_eq!(
            OrderItem::from("id desc"),
            OrderItem::Field(String::from("id desc"))
        );
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!(Direction::parse("desc"), Some(Direction::Desc));
        assert_eq!(Direction::parse("ASC"), Some(Direction::Asc));
        assert_eq!(Direction::parse("sideways"), None);
    }

    #[test]
    fn test_join_table_alias() {
        assert_eq!(JoinTable::Table(String::from("users")).alias(), Some("users"));
        assert_eq!(JoinTable::Table(String::from("app.users")).alias(), None);
        let aliased = JoinTable::Aliased {
            table: String::from("users"),
            alias: String::from("u"),
        };
        assert_eq!(aliased.table(), "users");
        assert_eq!(aliased.alias(), Some("u"));
    }

    #[test]
    fn test_data_value_step() {
        assert_eq!(DataValue::step("INC", 5.0), Some(DataValue::Inc(5.0)));
        assert_eq!(DataValue::step("dec", 1.5), Some(DataValue::Dec(1.5)));
        assert_eq!(DataValue::step("mul", 2.0), None);
        assert_eq!(DataValue::step("inc", f64::NAN), None);
        assert_eq!(DataValue::step("dec", f64::INFINITY), None);
    }

    #[test]
    fn test_query_context_builder() {
        let query = QueryContext::new("orders").alias("orders", "o").strict(false);
        assert_eq!(query.table.as_deref(), Some("orders"));
        assert_eq!(query.aliases.get("orders").map(String::as_str), Some("o"));
        assert_eq!(query.strict, Some(false));
    }
}
