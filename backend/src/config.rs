//! Store configuration loaded via OrthoConfig.
//!
//! Values are layered: defaults, then an optional configuration file, then
//! `FORKAST_*` environment variables, then command-line flags.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_DATABASE_PATH: &str = "forkast.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 1;
const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 30;

/// Settings for opening the local store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FORKAST")]
pub struct StoreSettings {
    /// Path of the SQLite database file.
    pub database_path: Option<PathBuf>,
    /// Upper bound on pooled connections.
    #[ortho_config(default = 1)]
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection.
    pub connection_timeout_secs: Option<u64>,
}

impl StoreSettings {
    /// Settings pointing at `path` with every other value defaulted.
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: Some(path.into()),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connection_timeout_secs: None,
        }
    }

    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH))
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections
    }

    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(
            self.connection_timeout_secs
                .unwrap_or(DEFAULT_CONNECTION_TIMEOUT_SECS),
        )
    }
}
