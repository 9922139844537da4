//! Repository layer abstractions and JSON file implementations.
//!
//! # Responsibility
//! - Define load/save contracts for the credential and task stores.
//! - Isolate file layout and serialization from service orchestration.
//!
//! # Invariants
//! - Read paths reject invalid persisted records instead of masking them.
//! - Save paths overwrite the full collection.

use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod account_repo;
pub mod task_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by account and task persistence.
#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
