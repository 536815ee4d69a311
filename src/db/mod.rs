//! File-backed persistence for the task list.
//!
//! - [`store`]: atomic JSON save, load with validation and backup recovery
//! - [`backups`]: timestamped backup naming, listing and retention
//! - [`tasks`]: the in-memory repository the commands work against

pub mod backups;
pub mod store;
pub mod tasks;
