//! Error types for clause translation.

use thiserror::Error;

/// Errors raised while translating a clause.
///
/// A clause-build call either returns the complete fragment or one of these;
/// nothing is retried at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Strict fields mode rejected a column the table does not have.
    #[error("fields not exists:[{0}]")]
    FieldNotFound(String),

    /// The dialect cannot express the requested operation.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A data value cannot be rendered as SQL.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    /// Catalog lookup or the underlying driver failed.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

/// Result type alias for translation operations.
pub type Result<T> = std::result::Result<T, Error>;
