//! The reset flow as the `reset-database` binary runs it: load the layered
//! settings, then delete the configured file.

use std::ffi::OsString;

use env_lock::lock_env;
use forkast::StoreSettings;
use forkast::maintenance::{ResetOutcome, reset_database_file};
use ortho_config::OrthoConfig;
use rstest::rstest;

fn load_without_flags() -> StoreSettings {
    StoreSettings::load_from_iter([OsString::from("reset-database")]).expect("settings load")
}

#[rstest]
fn settings_load_with_no_sources_and_name_the_default_file() {
    let _guard = lock_env([
        ("FORKAST_DATABASE_PATH", None::<String>),
        ("FORKAST_MAX_CONNECTIONS", None::<String>),
        ("FORKAST_CONNECTION_TIMEOUT_SECS", None::<String>),
    ]);

    let settings = load_without_flags();

    assert_eq!(settings.database_path().as_os_str(), "forkast.db");
}

#[rstest]
fn configured_database_is_deleted() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("campus.db");
    std::fs::write(&path, b"sqlite").expect("seed database file");
    let _guard = lock_env([
        (
            "FORKAST_DATABASE_PATH",
            Some(path.to_string_lossy().into_owned()),
        ),
        ("FORKAST_MAX_CONNECTIONS", None::<String>),
        ("FORKAST_CONNECTION_TIMEOUT_SECS", None::<String>),
    ]);

    let settings = load_without_flags();
    let outcome = reset_database_file(&settings.database_path()).expect("reset succeeds");

    assert_eq!(outcome, ResetOutcome::Deleted);
    assert!(!path.exists());
}
