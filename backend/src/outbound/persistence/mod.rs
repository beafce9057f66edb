//! SQLite persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by a
//! single SQLite file, accessed through `diesel-async`'s
//! `SyncConnectionWrapper` and pooled with `bb8`.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories translate between Diesel rows and
//!   domain types. Rows that fail domain validation are reported as corrupt
//!   records rather than silently repaired.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Create if missing**: [`ensure_schema`] replaces migrations.
//!
//! # Example
//!
//! ```no_run
//! use forkast::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig, ensure_schema};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("forkast.db")).await?;
//! ensure_schema(&pool).await?;
//! let users = DieselUserRepository::new(pool);
//! # let _ = users;
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_menu_repository;
mod diesel_rating_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;
mod schema_bootstrap;

pub use diesel_menu_repository::DieselMenuRepository;
pub use diesel_rating_repository::DieselRatingRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError, SqliteAsyncConnection};
pub use schema_bootstrap::{SchemaBootstrapError, ensure_schema};
