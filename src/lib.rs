//! # Taskvault - a crash-safe command-line to-do manager
//!
//! Keeps a task list in a JSON file and guards it against partial writes and
//! damaged files.
//!
//! ## Features
//!
//! - **Atomic Saves**: Temp file, fsync and rename, so the data file is never half written
//! - **Rotating Backups**: Timestamped copy of the previous version on every save
//! - **Recovery**: Damaged data files are restored from the newest usable backup
//! - **Validation**: Malformed records are skipped and logged, never fatal
//! - **Import/Export**: Conflict-free merges with ID renumbering, JSON and CSV export
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskvault::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
