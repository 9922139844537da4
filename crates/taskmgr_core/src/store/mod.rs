//! JSON file storage bootstrap and whole-file read/write helpers.
//!
//! # Responsibility
//! - Resolve and prepare the data directory holding all persisted files.
//! - Read and overwrite JSON array files for the repositories.
//!
//! # Invariants
//! - A missing file reads as an empty array, never as an error.
//! - Writes always replace the whole file; there is no append path and no
//!   protection against concurrent writers.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

mod json_file;
mod open;

pub use json_file::{read_json_array, write_json_array};
pub use open::{open_data_dir, DataDir, CREDENTIALS_FILE_NAME};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Path of the file or directory the failed operation touched.
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Json { path, .. } => path,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "`{}`: {source}", path.display()),
            Self::Json { path, source } => {
                write!(f, "`{}` is not a valid JSON array: {source}", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}
