//! Task repository contract and JSON file implementation.
//!
//! # Responsibility
//! - Map an account identifier to its task file.
//! - Load and overwrite one account's ordered task list.
//!
//! # Invariants
//! - Task order on disk is insertion order and is preserved by load/save.
//! - Duplicate task ids are tolerated on load (ids can repeat after deletes).
//! - Two identifiers that differ only in `@` vs `.` placement share a file.

use crate::model::task::Task;
use crate::repo::{RepoError, RepoResult};
use crate::store::{read_json_array, write_json_array, DataDir};
use log::{debug, error};

const TASK_FILE_PREFIX: &str = "tasks_";
const TASK_FILE_FILLER: &str = "_";

/// Repository interface for per-account task lists.
pub trait TaskRepository {
    fn load_tasks(&self, owner: &str) -> RepoResult<Vec<Task>>;
    fn save_tasks(&self, owner: &str, tasks: &[Task]) -> RepoResult<()>;
}

/// Task store writing one `tasks_<owner>.json` file per account.
pub struct JsonTaskRepository<'dir> {
    dir: &'dir DataDir,
}

impl<'dir> JsonTaskRepository<'dir> {
    pub fn new(dir: &'dir DataDir) -> Self {
        Self { dir }
    }
}

impl TaskRepository for JsonTaskRepository<'_> {
    fn load_tasks(&self, owner: &str) -> RepoResult<Vec<Task>> {
        let path = self.dir.file_path(&task_file_name(owner));
        let tasks = read_json_array::<Task>(&path).inspect_err(|err| {
            error!("event=tasks_load module=repo status=error error_code=read_failed error={err}");
        })?;

        for task in &tasks {
            task.validate()
                .map_err(|err| RepoError::InvalidData(format!("{err} in `{}`", path.display())))?;
        }

        debug!(
            "event=tasks_load module=repo status=ok count={}",
            tasks.len()
        );
        Ok(tasks)
    }

    fn save_tasks(&self, owner: &str, tasks: &[Task]) -> RepoResult<()> {
        let path = self.dir.file_path(&task_file_name(owner));
        write_json_array(&path, tasks).inspect_err(|err| {
            error!(
                "event=tasks_save module=repo status=error error_code=write_failed error={err}"
            );
        })?;
        debug!(
            "event=tasks_save module=repo status=ok count={}",
            tasks.len()
        );
        Ok(())
    }
}

/// Derives the task file name for an account identifier.
///
/// `@` and `.` become `_`, e.g. `u@test.com` -> `tasks_u_test_com.json`.
pub fn task_file_name(owner: &str) -> String {
    format!(
        "{TASK_FILE_PREFIX}{}.json",
        owner.replace(['@', '.'], TASK_FILE_FILLER)
    )
}

#[cfg(test)]
mod tests {
    use super::task_file_name;

    #[test]
    fn task_file_name_replaces_at_and_dot() {
        assert_eq!(task_file_name("u@test.com"), "tasks_u_test_com.json");
        assert_eq!(task_file_name("plain"), "tasks_plain.json");
        assert_eq!(task_file_name(""), "tasks_.json");
    }

    #[test]
    fn distinct_identifiers_can_share_a_file() {
        assert_eq!(task_file_name("a.b@c"), task_file_name("a@b.c"));
    }
}
