//! Server configuration

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Which store the repositories run against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Store backing the repositories
    pub storage: StorageBackend,
}

impl ServerConfig {
    /// Load the server configuration
    ///
    /// # Environment Variables
    /// - `MENTORLINK_HOST`: Interface to bind (default: "0.0.0.0")
    /// - `MENTORLINK_PORT`: Port to listen on (default: 8000)
    /// - `MENTORLINK_STORAGE`: `postgres` or `memory` (default: "postgres")
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8000)?
            .set_default("storage", "postgres")?
            .add_source(Environment::with_prefix("MENTORLINK"))
            .build()?
            .try_deserialize()
    }

    /// Address to hand to the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
