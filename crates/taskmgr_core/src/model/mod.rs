//! Domain model for accounts and their tasks.
//!
//! # Responsibility
//! - Define the records persisted by the credential and task stores.
//! - Keep normalization and validation rules next to the data they guard.
//!
//! # Invariants
//! - Account identifiers are stored in normalized form (trimmed, lowercase).
//! - Task ids are positive and scoped to one account's list.

pub mod account;
pub mod task;
