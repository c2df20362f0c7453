//! Document store configuration.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

/// Characters escaped in the userinfo part of a connection URI: everything
/// except RFC 3986 unreserved characters.
const USERINFO: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Which collection accessor backend to connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local in-memory store.
    #[default]
    Memory,
    /// MongoDB server.
    Mongodb,
}

/// Document store connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend to connect.
    #[serde(default)]
    pub backend: StoreBackend,
    /// Store host name.
    #[serde(default = "default_host")]
    pub host: String,
    /// Store port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Username for authentication.
    #[serde(default)]
    pub username: String,
    /// Password for authentication.
    #[serde(default)]
    pub password: String,
    /// Database the provisioning step works against.
    #[serde(default = "default_database")]
    pub database: String,
    /// Connection and server selection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Collections created at startup when missing.
    #[serde(default = "default_collections")]
    pub collections: Vec<String>,
}

impl StoreConfig {
    /// Build the connection URI from host, port and credentials.
    ///
    /// Credentials are percent-encoded so reserved characters such as `@`
    /// or `:` survive parsing.
    pub fn uri(&self) -> String {
        if self.username.is_empty() {
            format!("mongodb://{}:{}", self.host, self.port)
        } else {
            format!(
                "mongodb://{}:{}@{}:{}",
                utf8_percent_encode(&self.username, USERINFO),
                utf8_percent_encode(&self.password, USERINFO),
                self.host,
                self.port
            )
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            host: default_host(),
            port: default_port(),
            username: String::new(),
            password: String::new(),
            database: default_database(),
            connect_timeout_seconds: default_connect_timeout(),
            collections: default_collections(),
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    27017
}

fn default_database() -> String {
    "docrepo".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_collections() -> Vec<String> {
    vec!["dummy".to_string()]
}
