//! Destructive maintenance: deleting the store file.
//!
//! Removes the database file together with the SQLite side files
//! (`-journal`, `-wal`, `-shm`) so the next `initialize` starts from an
//! empty schema. There is no confirmation step and no partial reset.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use thiserror::Error;
use tracing::{debug, info};

/// Suffixes SQLite appends to the database file name for its side files.
pub const SIDE_FILE_SUFFIXES: [&str; 3] = ["-journal", "-wal", "-shm"];

/// Result of a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// The database file existed and was removed.
    Deleted,
    /// There was no database file to remove.
    Missing,
}

/// Errors returned while resetting the store.
#[derive(Debug, Error)]
pub enum ResetError {
    /// The path has no file name component.
    #[error("database path {path} does not name a file")]
    InvalidPath { path: PathBuf },
    /// The containing directory could not be opened.
    #[error("failed to open directory {path}: {source}")]
    OpenDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A file could not be removed.
    #[error("failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn remove_if_present(dir: &Dir, parent: &Path, name: &Path) -> Result<bool, ResetError> {
    match dir.remove_file(name) {
        Ok(()) => Ok(true),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(ResetError::Remove {
            path: parent.join(name),
            source,
        }),
    }
}

/// Delete the database at `path` and its side files.
///
/// # Examples
///
/// ```
/// use forkast::maintenance::{ResetOutcome, reset_database_file};
///
/// let dir = tempfile::tempdir()?;
/// let path = dir.path().join("forkast.db");
/// assert_eq!(reset_database_file(&path)?, ResetOutcome::Missing);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn reset_database_file(path: &Path) -> Result<ResetOutcome, ResetError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| ResetError::InvalidPath {
            path: path.to_path_buf(),
        })?
        .to_os_string();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|source| {
        ResetError::OpenDirectory {
            path: parent.to_path_buf(),
            source,
        }
    })?;

    let deleted = remove_if_present(&dir, parent, Path::new(&file_name))?;
    for suffix in SIDE_FILE_SUFFIXES {
        let mut side = OsString::from(&file_name);
        side.push(suffix);
        if remove_if_present(&dir, parent, Path::new(&side))? {
            debug!(file = %parent.join(&side).display(), "removed side file");
        }
    }

    let outcome = if deleted {
        ResetOutcome::Deleted
    } else {
        ResetOutcome::Missing
    };
    info!(path = %path.display(), ?outcome, "database reset");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    //! Unit tests for the database reset.

    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn workspace() -> TempDir {
        tempfile::tempdir().expect("temp dir")
    }

    fn touch(dir: &TempDir, name: &str) {
        let handle = Dir::open_ambient_dir(dir.path(), ambient_authority()).expect("open dir");
        handle.write(name, b"sqlite").expect("write file");
    }

    fn exists(dir: &TempDir, name: &str) -> bool {
        let handle = Dir::open_ambient_dir(dir.path(), ambient_authority()).expect("open dir");
        handle.exists(name)
    }

    #[rstest]
    fn deletes_database_and_side_files(workspace: TempDir) {
        touch(&workspace, "forkast.db");
        touch(&workspace, "forkast.db-wal");
        touch(&workspace, "forkast.db-shm");
        touch(&workspace, "other.db");

        let outcome =
            reset_database_file(&workspace.path().join("forkast.db")).expect("reset succeeds");

        assert_eq!(outcome, ResetOutcome::Deleted);
        assert!(!exists(&workspace, "forkast.db"));
        assert!(!exists(&workspace, "forkast.db-wal"));
        assert!(!exists(&workspace, "forkast.db-shm"));
        assert!(exists(&workspace, "other.db"));
    }

    #[rstest]
    fn missing_database_is_reported(workspace: TempDir) {
        let outcome =
            reset_database_file(&workspace.path().join("forkast.db")).expect("reset succeeds");
        assert_eq!(outcome, ResetOutcome::Missing);
    }

    #[rstest]
    fn stray_journal_is_cleaned_even_without_database(workspace: TempDir) {
        touch(&workspace, "forkast.db-journal");

        let outcome =
            reset_database_file(&workspace.path().join("forkast.db")).expect("reset succeeds");

        assert_eq!(outcome, ResetOutcome::Missing);
        assert!(!exists(&workspace, "forkast.db-journal"));
    }

    #[rstest]
    fn missing_directory_is_an_error(workspace: TempDir) {
        let path = workspace.path().join("absent").join("forkast.db");
        let err = reset_database_file(&path).expect_err("directory is missing");
        assert!(matches!(err, ResetError::OpenDirectory { .. }));
    }
}
