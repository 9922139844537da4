//! Task domain model.
//!
//! # Responsibility
//! - Define the per-account task record and its completion lifecycle.
//!
//! # Invariants
//! - `id` is positive. It is unique within one list at a point in time only;
//!   ids are assigned as `len + 1` and can repeat after deletions.
//! - `completed` only ever moves from `false` to `true`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Per-account task identifier.
pub type TaskId = u32;

/// One entry in an account's ordered task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Display title; empty titles are accepted as-is.
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Validation errors for persisted task records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    ZeroId,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroId => write!(f, "task id must be positive"),
        }
    }
}

impl Error for TaskValidationError {}

impl Task {
    /// Creates a pending task.
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
        }
    }

    /// Marks the task done. Completing twice is a no-op.
    pub fn complete(&mut self) {
        self.completed = true;
    }

    pub fn is_pending(&self) -> bool {
        !self.completed
    }

    /// Checks invariants of a record read back from storage.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id == 0 {
            return Err(TaskValidationError::ZeroId);
        }
        Ok(())
    }
}
