//! Delete the local Forkast database so the next start begins empty.
//!
//! The database location comes from `StoreSettings`: `--database-path`,
//! `FORKAST_DATABASE_PATH` or a configuration file. The reset is
//! unconditional.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use color_eyre::eyre::{Context, Result};
use forkast::StoreSettings;
use forkast::maintenance::{ResetOutcome, reset_database_file};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %error, "tracing init failed");
    }

    let settings = StoreSettings::load().wrap_err("failed to load store settings")?;
    let path = settings.database_path();
    let outcome = reset_database_file(&path)
        .wrap_err_with(|| format!("failed to reset {}", path.display()))?;

    match outcome {
        ResetOutcome::Deleted => println!("Deleted {}", path.display()),
        ResetOutcome::Missing => println!("Missing {}: nothing to delete", path.display()),
    }
    Ok(())
}
