//! # dmsql-driver
//!
//! Dm (Dameng) support for `dmsql-core`.
//!
//! # How Dm differs from the generic dialect
//!
//! - **Identifier case**: unquoted identifiers fold to upper case, so
//!   every known column is emitted double-quoted.
//! - **Catalog views**: tables come from `all_tables`, columns from
//!   `user_tab_columns`.
//! - **Functions**: `group_concat(...)` is spelled `wm_concat(...)`;
//!   random ordering is `RAND()`.
//! - **No MySQL extensions**: `REPLACE INTO` and
//!   `ON DUPLICATE KEY UPDATE` are rejected with
//!   [`dmsql_core::Error::UnsupportedOperation`].
//! - **Savepoints** are supported; `EXPLAIN` output is not analysed.
//!
//! ## Example
//!
//! ```rust
//! use dmsql_core::{QueryContext, SqlValue};
//! use dmsql_driver::{builder, Connection, DmConfig, DriverError, Row};
//!
//! struct Host;
//!
//! impl Connection for Host {
//!     fn execute_query(&self, sql: &str, _params: &[SqlValue]) -> Result<Vec<Row>, DriverError> {
//!         if sql.contains("all_tables") {
//!             return Ok(vec![Row::new().with("TABLE_NAME", "users")]);
//!         }
//!         Ok(vec![Row::new().with("COLUMN_NAME", "id").with("DATA_TYPE", "INT")])
//!     }
//! }
//!
//! let config = DmConfig::from_json(r#"{"database": "SHOP"}"#).unwrap();
//! let builder = builder(&config, Host);
//! let mut query = QueryContext::new("users");
//!
//! assert_eq!(builder.build_table(&mut query, &["users".into()]).unwrap(), r#""SHOP"."users""#);
//! assert_eq!(
//!     builder.build_order(&mut query, &["id desc".into(), "[rand]".into()]).unwrap(),
//!     r#"ORDER BY "id" DESC,RAND()"#
//! );
//! ```

mod config;
mod connection;
mod dialect;
mod error;
mod introspect;

use dmsql_core::Builder;

pub use config::DmConfig;
pub use connection::{Connection, Row};
pub use dialect::DmDialect;
pub use error::DriverError;
pub use introspect::DmIntrospector;

/// Clause builder for a Dm connection.
pub type DmBuilder<C> = Builder<DmDialect, DmIntrospector<C>>;

/// Creates the clause builder for one Dm connection.
#[must_use]
pub fn builder<C: Connection>(config: &DmConfig, conn: C) -> DmBuilder<C> {
    Builder::new(
        DmDialect::new(),
        config.builder_options(),
        DmIntrospector::new(conn),
    )
}
