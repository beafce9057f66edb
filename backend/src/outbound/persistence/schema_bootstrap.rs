//! Idempotent creation of the store's tables and indexes.
//!
//! The store has no migration history: every statement uses `IF NOT EXISTS`
//! so running the bootstrap against an existing file is a no-op.

use diesel_async::SimpleAsyncConnection;
use tracing::{debug, info};

use super::diesel_error_mapping::map_pool_error;
use super::pool::{DbPool, PoolError};

/// DDL for the users, ratings and menu tables.
pub(crate) const SCHEMA_SQL: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT UNIQUE NOT NULL,
    password TEXT NOT NULL,
    role TEXT NOT NULL CHECK (role IN ('admin', 'student')),
    studentId TEXT
);

CREATE TABLE IF NOT EXISTS food_ratings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    userId INTEGER NOT NULL REFERENCES users (id),
    mealName TEXT NOT NULL,
    tasteRating INTEGER NOT NULL CHECK (tasteRating BETWEEN 1 AND 5),
    portionRating INTEGER NOT NULL CHECK (portionRating BETWEEN 1 AND 5),
    varietyRating INTEGER NOT NULL CHECK (varietyRating BETWEEN 1 AND 5),
    overallRating INTEGER NOT NULL CHECK (overallRating BETWEEN 1 AND 5),
    comment TEXT,
    createdAt TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS menu_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    weekStartDate TEXT NOT NULL,
    isActive BOOLEAN NOT NULL DEFAULT 1,
    createdAt TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_food_ratings_user_created
    ON food_ratings (userId, createdAt);
CREATE INDEX IF NOT EXISTS idx_food_ratings_created
    ON food_ratings (createdAt);
CREATE INDEX IF NOT EXISTS idx_menu_items_week
    ON menu_items (weekStartDate);
";

/// Errors raised while bootstrapping the schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaBootstrapError {
    /// No connection could be obtained.
    #[error("schema bootstrap could not connect: {message}")]
    Connection { message: String },
    /// A DDL statement failed.
    #[error("schema bootstrap failed: {message}")]
    Statement { message: String },
}

impl From<PoolError> for SchemaBootstrapError {
    fn from(error: PoolError) -> Self {
        Self::Connection {
            message: map_pool_error(error),
        }
    }
}

/// Create any missing tables and indexes.
pub async fn ensure_schema(pool: &DbPool) -> Result<(), SchemaBootstrapError> {
    let mut conn = pool.get().await?;
    conn.batch_execute(SCHEMA_SQL).await.map_err(|error| {
        debug!(%error, "schema bootstrap statement failed");
        SchemaBootstrapError::Statement {
            message: error.to_string(),
        }
    })?;
    info!("store schema ready");
    Ok(())
}
