//! Connection configuration.

use dmsql_core::BuilderOptions;
use serde::{Deserialize, Serialize};

/// Dm connection settings, as the host framework's configuration carries
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DmConfig {
    /// Server address.
    pub hostname: String,
    /// Port; empty uses the server default.
    pub hostport: String,
    /// Database (schema) name real tables are qualified with.
    pub database: String,
    /// Login user.
    pub username: String,
    /// Login password.
    pub password: String,
    /// Table name prefix.
    pub prefix: String,
    /// Connection character set.
    pub charset: String,
    /// Bind values as parameters instead of inlining them.
    pub auto_bind: bool,
    /// Reject data for unknown columns instead of dropping it.
    pub fields_strict: bool,
}

impl Default for DmConfig {
    fn default() -> Self {
        Self {
            hostname: String::from("127.0.0.1"),
            hostport: String::new(),
            database: String::new(),
            username: String::new(),
            password: String::new(),
            prefix: String::new(),
            charset: String::from("utf8"),
            auto_bind: true,
            fields_strict: true,
        }
    }
}

impl DmConfig {
    /// Parses a configuration from JSON. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed JSON or mistyped values.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Returns the PDO-style data source name, `dm:host=<host>[:<port>]`.
    #[must_use]
    pub fn dsn(&self) -> String {
        if self.hostport.is_empty() {
            format!("dm:host={}", self.hostname)
        } else {
            format!("dm:host={}:{}", self.hostname, self.hostport)
        }
    }

    /// Returns the settings the clause builder needs.
    #[must_use]
    pub fn builder_options(&self) -> BuilderOptions {
        BuilderOptions {
            schema: self.database.clone(),
            prefix: self.prefix.clone(),
            auto_bind: self.auto_bind,
            strict_fields: self.fields_strict,
        }
    }
}
