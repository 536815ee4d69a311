//! Core library modules for the taskvault application.
//!
//! ## Features
//!
//! - **Task Model**: Record type, schema validation, ID conflict resolution
//! - **Core Infrastructure**: Configuration, data storage paths, messaging, logging
//! - **Error Handling**: Typed store errors and the session error log
//! - **User Interface**: Table rendering and file export
//!
//! ## Usage
//!
//! ```rust
//! use taskvault::libs::task::{next_id, Task};
//!
//! let tasks = vec![Task::new(1, "Write report"), Task::new(4, "Review code")];
//! assert_eq!(next_id(&tasks), 5);
//! ```

pub mod config;
pub mod data_storage;
pub mod error;
pub mod error_log;
pub mod export;
pub mod logging;
pub mod messages;
pub mod task;
pub mod view;
