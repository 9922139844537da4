//! Runtime configuration for the CLI.
//!
//! There are no flags or environment variables: everything is resolved from
//! the working directory, which is where credential and task files live.

use std::io;
use std::path::PathBuf;
use taskmgr_core::default_log_level;

const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding `users.json` and the per-account task files.
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: &'static str,
}

impl AppConfig {
    /// Resolves the configuration for the current process.
    pub fn resolve() -> io::Result<Self> {
        Ok(Self::with_data_dir(std::env::current_dir()?))
    }

    /// Builds the standard layout rooted at `data_dir`.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            log_dir: data_dir.join(LOG_DIR_NAME),
            data_dir,
            log_level: default_log_level(),
        }
    }
}
