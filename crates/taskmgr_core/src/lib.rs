//! Core domain logic for the task manager.
//! Accounts, per-account task lists and their JSON file persistence live here;
//! the CLI crate only drives these APIs.

pub mod digest;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use digest::digest;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::account::{normalize_identifier, Account, AccountValidationError};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use repo::account_repo::{AccountRepository, JsonAccountRepository};
pub use repo::task_repo::{task_file_name, JsonTaskRepository, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use service::account_service::{AccountService, AccountServiceError};
pub use service::task_service::{find_task, next_task_id, TaskService, TaskServiceError};
pub use store::{open_data_dir, DataDir, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
