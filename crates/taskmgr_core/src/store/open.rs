//! Data directory bootstrap.
//!
//! # Responsibility
//! - Create (if needed) the directory that holds credential and task files.
//! - Resolve file paths inside it.
//!
//! # Invariants
//! - A returned `DataDir` points at an existing directory.

use super::{StoreError, StoreResult};
use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// File name of the credential store inside the data directory.
pub const CREDENTIALS_FILE_NAME: &str = "users.json";

/// Handle to a prepared data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    /// Path of the shared credential file.
    pub fn credentials_path(&self) -> PathBuf {
        self.root.join(CREDENTIALS_FILE_NAME)
    }

    /// Path of a file directly inside the data directory.
    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }
}

/// Opens the data directory at `path`, creating it when missing.
///
/// # Side effects
/// - May create the directory (and parents).
/// - Emits `data_dir_open` logging events with duration and status.
pub fn open_data_dir(path: impl AsRef<Path>) -> StoreResult<DataDir> {
    let started_at = Instant::now();
    let path = path.as_ref();
    info!("event=data_dir_open module=store status=start");

    if let Err(err) = fs::create_dir_all(path) {
        error!(
            "event=data_dir_open module=store status=error duration_ms={} error_code=create_dir_failed error={}",
            started_at.elapsed().as_millis(),
            err
        );
        return Err(StoreError::io(path, err));
    }

    info!(
        "event=data_dir_open module=store status=ok duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(DataDir {
        root: path.to_path_buf(),
    })
}
