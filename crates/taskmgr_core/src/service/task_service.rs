//! Task use-case service for one account.
//!
//! # Responsibility
//! - Apply add/delete/complete to a caller-held task list.
//! - Persist the full list after every successful mutation.
//!
//! # Invariants
//! - New ids are `len + 1`, so an id freed by a delete can be handed out
//!   again (and can then duplicate a surviving task's id).
//! - Operations that report `NotFound` never touch the list or the file.
//! - Lookups act on the first task with a matching id.

use crate::model::task::{Task, TaskId};
use crate::repo::task_repo::TaskRepository;
use crate::repo::{RepoError, RepoResult};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for task use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    /// No task with this id in the list.
    NotFound(TaskId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Task store scoped to one account identifier.
pub struct TaskService<R: TaskRepository> {
    repo: R,
    owner: String,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service for the tasks owned by `owner`.
    pub fn new(repo: R, owner: impl Into<String>) -> Self {
        Self {
            repo,
            owner: owner.into(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Loads the owner's ordered task list; empty when nothing is stored.
    pub fn load(&self) -> RepoResult<Vec<Task>> {
        self.repo.load_tasks(&self.owner)
    }

    /// Overwrites the owner's task file with `tasks`.
    pub fn save(&self, tasks: &[Task]) -> RepoResult<()> {
        self.repo.save_tasks(&self.owner, tasks)
    }

    /// Appends a pending task titled `title` and persists the list.
    pub fn add(&self, tasks: &mut Vec<Task>, title: impl Into<String>) -> RepoResult<Task> {
        let task = Task::new(next_task_id(tasks), title);
        tasks.push(task.clone());
        self.save(tasks)?;
        info!("event=task_add module=service status=ok task_id={}", task.id);
        Ok(task)
    }

    /// Removes the first task with `id` and persists the list.
    ///
    /// Returns the removed task.
    pub fn delete(&self, tasks: &mut Vec<Task>, id: TaskId) -> Result<Task, TaskServiceError> {
        let index = task_position(tasks, id).inspect_err(|_| {
            warn!("event=task_delete module=service status=not_found task_id={id}");
        })?;

        let removed = tasks.remove(index);
        self.save(tasks)?;
        info!("event=task_delete module=service status=ok task_id={id}");
        Ok(removed)
    }

    /// Marks the first task with `id` completed and persists the list.
    ///
    /// Returns the updated task.
    pub fn mark_complete(&self, tasks: &mut [Task], id: TaskId) -> Result<Task, TaskServiceError> {
        let index = task_position(tasks, id).inspect_err(|_| {
            warn!("event=task_complete module=service status=not_found task_id={id}");
        })?;

        tasks[index].complete();
        self.save(tasks)?;
        info!("event=task_complete module=service status=ok task_id={id}");
        Ok(tasks[index].clone())
    }
}

/// Returns the first task with `id`.
pub fn find_task(tasks: &[Task], id: TaskId) -> Result<&Task, TaskServiceError> {
    task_position(tasks, id).map(|index| &tasks[index])
}

/// Index of the first task with `id`; every by-id operation goes through here.
fn task_position(tasks: &[Task], id: TaskId) -> Result<usize, TaskServiceError> {
    tasks
        .iter()
        .position(|task| task.id == id)
        .ok_or(TaskServiceError::NotFound(id))
}

/// Id the next added task receives: current length plus one.
pub fn next_task_id(tasks: &[Task]) -> TaskId {
    TaskId::try_from(tasks.len())
        .unwrap_or(TaskId::MAX)
        .saturating_add(1)
}
