//! Errors reported by the host connection.

use thiserror::Error;

/// A failure reported by the Dm client library.
///
/// The message is kept as the raw bytes the client produced, which are not
/// necessarily UTF-8 (the server may answer in GBK). Formatting decodes them
/// lossily, so the text is always valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    /// The server rejected a statement.
    #[error("[{code}] {}", String::from_utf8_lossy(.message))]
    Server { code: i32, message: Vec<u8> },

    /// The connection failed before the server answered.
    #[error("connection error: {}", String::from_utf8_lossy(.0))]
    Connection(Vec<u8>),
}

impl DriverError {
    /// Creates a server error.
    #[must_use]
    pub fn server(code: i32, message: impl Into<Vec<u8>>) -> Self {
        Self::Server {
            code,
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<Vec<u8>>) -> Self {
        Self::Connection(message.into())
    }

    /// Returns the vendor error code, if the server produced one.
    #[must_use]
    pub const fn code(&self) -> Option<i32> {
        match self {
            Self::Server { code, .. } => Some(*code),
            Self::Connection(_) => None,
        }
    }
}
