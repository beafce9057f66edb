//! Async connection pool for Diesel SQLite connections.
//!
//! SQLite has no async driver, so each connection is a
//! `SyncConnectionWrapper<SqliteConnection>`: `diesel-async` runs the blocking
//! calls on Tokio's blocking pool and `bb8` hands the wrapped connections out.
//!
//! SQLite serialises writers, so the default pool holds a single connection
//! and never expires it.
//!
//! Diesel turns `foreign_keys` on when it opens a SQLite connection. Each
//! pooled connection switches it back off: `food_ratings.userId` is declared
//! as a reference to `users` but not enforced.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use diesel::sqlite::SqliteConnection;
use diesel::{ConnectionError, ConnectionResult};
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, ManagerConfig};
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_async::{AsyncConnection, SimpleAsyncConnection};

use crate::config::StoreSettings;

/// Async wrapper around a blocking SQLite connection.
pub type SqliteAsyncConnection = SyncConnectionWrapper<SqliteConnection>;

/// Errors that can occur during pool operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Configuration for the SQLite connection pool.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use forkast::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("dining.db")
///     .with_max_size(2)
///     .with_connection_timeout(Duration::from_secs(5));
/// assert_eq!(config.database_path(), "dining.db");
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_path: String,
    max_size: u32,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Defaults: one connection, 30 second checkout timeout.
    pub fn new(database_path: impl Into<String>) -> Self {
        Self {
            database_path: database_path.into(),
            max_size: 1,
            connection_timeout: Duration::from_secs(30),
        }
    }

    /// Build a pool configuration from layered store settings.
    pub fn from_settings(settings: &StoreSettings) -> Self {
        Self::new(settings.database_path().to_string_lossy())
            .with_max_size(settings.max_connections())
            .with_connection_timeout(settings.connection_timeout())
    }

    /// Set the maximum number of connections. Zero is raised to one.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size.max(1);
        self
    }

    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    pub fn database_path(&self) -> &str {
        &self.database_path
    }
}

type EstablishFuture<'a> =
    Pin<Box<dyn Future<Output = ConnectionResult<SqliteAsyncConnection>> + Send + 'a>>;

/// Open a connection with foreign key enforcement disabled.
fn establish_connection(database_path: &str) -> EstablishFuture<'_> {
    Box::pin(async move {
        let mut conn = SqliteAsyncConnection::establish(database_path).await?;
        conn.batch_execute("PRAGMA foreign_keys = OFF")
            .await
            .map_err(ConnectionError::CouldntSetupConfiguration)?;
        Ok(conn)
    })
}

/// Pool of SQLite connections shared by the repositories.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<SqliteAsyncConnection>,
}

impl DbPool {
    /// Build the pool. The database file is created on first connect.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] when the first connection cannot be
    /// opened, for example because the parent directory does not exist.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let mut manager_config = ManagerConfig::<SqliteAsyncConnection>::default();
        manager_config.custom_setup = Box::new(establish_connection);
        let manager = AsyncDieselConnectionManager::<SqliteAsyncConnection>::new_with_config(
            config.database_path,
            manager_config,
        );

        let pool = Pool::builder()
            .max_size(config.max_size)
            .min_idle(Some(1))
            .idle_timeout(None)
            .max_lifetime(None)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner: pool })
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] if no connection frees up within the
    /// configured timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, SqliteAsyncConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_config_default_values() {
        let config = PoolConfig::new("forkast.db");

        assert_eq!(config.database_path(), "forkast.db");
        assert_eq!(config.max_size, 1);
        assert_eq!(config.connection_timeout, Duration::from_secs(30));
    }

    #[rstest]
    fn zero_connections_are_raised_to_one() {
        let config = PoolConfig::new("forkast.db").with_max_size(0);
        assert_eq!(config.max_size, 1);
    }

    #[rstest]
    fn pool_error_display() {
        let checkout_err = PoolError::checkout("timed out");
        let build_err = PoolError::build("unable to open database file");

        assert!(checkout_err.to_string().contains("timed out"));
        assert!(build_err.to_string().contains("unable to open database file"));
    }

    #[rstest]
    #[tokio::test]
    async fn pool_opens_a_fresh_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("pool.db");
        let pool = DbPool::new(PoolConfig::new(path.to_string_lossy()))
            .await
            .expect("pool builds");

        pool.get().await.expect("connection checks out");
        assert!(path.exists());
    }

    #[rstest]
    #[tokio::test]
    async fn missing_parent_directory_fails_to_build() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing").join("pool.db");
        let result = DbPool::new(
            PoolConfig::new(path.to_string_lossy())
                .with_connection_timeout(Duration::from_secs(1)),
        )
        .await;

        assert!(matches!(result, Err(PoolError::Build { .. })));
    }
}
