//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into account and task use-cases.
//! - Keep the CLI decoupled from file layout and serialization.

pub mod account_service;
pub mod task_service;
