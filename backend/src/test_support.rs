//! Test utilities for the store crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for tests and when the `test-support` feature is enabled.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

/// Clock whose current instant is set by the test.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Jump to `now`.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock_clock() = now;
    }

    pub fn advance_days(&self, days: i64) {
        *self.lock_clock() += TimeDelta::days(days);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

#[cfg(feature = "test-support")]
pub use self::temp_store::TempStore;

#[cfg(feature = "test-support")]
mod temp_store {
    //! Initialised stores backed by throwaway SQLite files.

    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use chrono::{DateTime, Utc};
    use tempfile::TempDir;

    use super::MutableClock;
    use crate::config::StoreSettings;
    use crate::store::LocalStore;

    /// A store in a temporary directory, removed on drop.
    pub struct TempStore {
        pub store: LocalStore,
        pub clock: Arc<MutableClock>,
        path: PathBuf,
        _dir: TempDir,
    }

    impl TempStore {
        /// Open and initialise a fresh store whose clock reads `now`.
        pub async fn start(now: DateTime<Utc>) -> Self {
            let dir = match tempfile::tempdir() {
                Ok(dir) => dir,
                Err(error) => panic!("temp dir: {error}"),
            };
            let path = dir.path().join("forkast.db");
            let clock = Arc::new(MutableClock::new(now));
            let store = match LocalStore::open_with_clock(
                &StoreSettings::for_path(&path),
                Arc::clone(&clock) as Arc<dyn mockable::Clock>,
            )
            .await
            {
                Ok(store) => store,
                Err(error) => panic!("open store: {error}"),
            };
            if let Err(error) = store.initialize().await {
                panic!("initialise store: {error}");
            }
            Self {
                store,
                clock,
                path,
                _dir: dir,
            }
        }

        /// Location of the database file.
        pub fn path(&self) -> &Path {
            &self.path
        }
    }
}
