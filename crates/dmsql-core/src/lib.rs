//! # dmsql-core
//!
//! Dialect-agnostic translation of query descriptions into SQL text.
//!
//! A host query framework hands this crate a [`QueryContext`] and calls one
//! entry point per clause it is assembling. The crate answers with SQL
//! fragments whose identifiers are quoted, whose table references are
//! schema-qualified and whose dialect-specific functions are rewritten.
//!
//! It is built from three cooperating parts:
//! - the identifier quoter ([`quote`]), a small tokenizer that wraps known
//!   column names in the dialect's quote character
//! - the table/alias resolver ([`resolve`]), which splits table references
//!   into a real table and an alias
//! - the clause [`Builder`], which composes field, where, having, order,
//!   table, join, union and data clauses on top of the other two
//!
//! Dialect behaviour is supplied through the [`Dialect`] trait and catalog
//! metadata through the [`Introspect`] trait, cached per connection by
//! [`Catalog`].
//!
//! ## Example
//!
//! ```rust
//! use dmsql_core::{Builder, BuilderOptions, ColumnInfo, GenericDialect, Introspect, QueryContext};
//!
//! struct Schema;
//!
//! impl Introspect for Schema {
//!     type Error = std::io::Error;
//!
//!     fn list_tables(&self) -> Result<Vec<String>, Self::Error> {
//!         Ok(vec![String::from("users")])
//!     }
//!
//!     fn list_columns(&self, _table: &str) -> Result<Vec<ColumnInfo>, Self::Error> {
//!         Ok(vec![ColumnInfo::new("id", "INT"), ColumnInfo::new("name", "VARCHAR")])
//!     }
//! }
//!
//! let builder = Builder::new(GenericDialect::new(), BuilderOptions::default(), Schema);
//! let mut query = QueryContext::new("users");
//! let order = builder.build_order(&mut query, &["id desc".into()]).unwrap();
//! assert_eq!(order, r#"ORDER BY "id" DESC"#);
//! ```

pub mod builder;
pub mod catalog;
pub mod dialect;
pub mod error;
pub mod json;
pub mod query;
pub mod quote;
pub mod resolve;
pub mod value;

pub use builder::{Builder, BuilderOptions};
pub use catalog::{Catalog, ColumnInfo, Introspect};
pub use dialect::{Dialect, GenericDialect};
pub use error::{Error, Result};
pub use query::{
    Condition, DataValue, Direction, Field, JoinTable, JoinTarget, OrderItem, QueryContext, Raw,
    TableEntry, Union, UnionBranch,
};
pub use value::{SqlValue, ToSqlValue};
