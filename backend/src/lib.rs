//! Local persistence for the Forkast campus dining feedback app.
//!
//! Accounts, meal ratings and weekly menus live in one SQLite file managed
//! by [`LocalStore`].

pub mod config;
pub mod domain;
pub mod maintenance;
pub mod outbound;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::StoreSettings;
pub use store::LocalStore;
