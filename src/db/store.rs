//! JSON file store for the task list.
//!
//! The data file is a pretty-printed JSON array of tasks. Writes go through a
//! sibling temp file that is fsynced and renamed over the target, so the file
//! under its canonical name is always either the old or the new version. Each
//! save first copies the previous version into a timestamped backup, and loads
//! fall back to those backups when the primary file is unreadable as a task
//! list.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskvault::db::store::TaskStore;
//! use taskvault::libs::task::Task;
//!
//! let mut store = TaskStore::new("tasks.json", 5);
//! store.save(&[Task::new(1, "Write report")])?;
//! let loaded = store.load();
//! assert_eq!(loaded.tasks.len(), 1);
//! # Ok::<(), taskvault::libs::error::StoreError>(())
//! ```

use super::backups::{self, BackupOutcome};
use crate::libs::error::StoreError;
use crate::libs::error_log::{ErrorKind, ErrorLog};
use crate::libs::task::Task;
use serde_json::Value;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const TEMP_SUFFIX: &str = ".tmp";

/// How a load went. The task list is always usable regardless of the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// The file was read; `skipped` malformed records were dropped.
    Loaded { skipped: usize },
    /// No data file exists yet.
    FreshStart,
    /// The primary file was damaged and the list came from this backup.
    Recovered { backup: PathBuf },
    /// The primary file was damaged and no backup could be used.
    Corrupted,
    /// The file exists but could not be read at all.
    Unreadable { reason: String },
}

#[derive(Debug, Clone)]
pub struct Loaded {
    pub tasks: Vec<Task>,
    pub status: LoadStatus,
}

impl Loaded {
    fn empty(status: LoadStatus) -> Self {
        Loaded { tasks: Vec::new(), status }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub saved: usize,
    pub backup: Option<PathBuf>,
    /// Set when the backup step failed but the save itself went through.
    pub backup_warning: Option<String>,
}

/// Result of parsing a file's content as a task list.
enum Parsed {
    Tasks { tasks: Vec<Task>, skipped: usize },
    Corrupt(StoreError),
}

pub struct TaskStore {
    path: PathBuf,
    max_backups: usize,
    errors: ErrorLog,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>, max_backups: usize) -> Self {
        TaskStore {
            path: path.into(),
            max_backups,
            errors: ErrorLog::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn max_backups(&self) -> usize {
        self.max_backups
    }

    pub fn errors(&self) -> &ErrorLog {
        &self.errors
    }

    pub fn errors_mut(&mut self) -> &mut ErrorLog {
        &mut self.errors
    }

    /// Validates and writes `tasks`, backing up the previous file first.
    ///
    /// # Errors
    ///
    /// Fails without touching the disk when a task breaks the schema. File
    /// system failures are logged and returned; a failed backup is not an
    /// error and is reported through [`SaveReport::backup_warning`].
    pub fn save(&mut self, tasks: &[Task]) -> Result<SaveReport, StoreError> {
        for (index, task) in tasks.iter().enumerate() {
            if let Err(source) = task.validate() {
                self.errors.record(ErrorKind::Validation, format!("Task {}: {}", index, source));
                return Err(StoreError::Validation { index, source });
            }
        }

        let (backup, backup_warning) = match backups::create_backup(&self.path, self.max_backups, &mut self.errors) {
            Ok(BackupOutcome::Created { path, .. }) => (Some(path), None),
            Ok(BackupOutcome::NothingToBackup) => (None, None),
            Err(e) => (None, Some(e.to_string())),
        };

        self.write_atomic(tasks)?;
        tracing::info!(count = tasks.len(), path = %self.path.display(), "tasks saved");

        Ok(SaveReport {
            saved: tasks.len(),
            backup,
            backup_warning,
        })
    }

    /// Writes `tasks` through a temp file renamed over the data file.
    fn write_atomic(&mut self, tasks: &[Task]) -> Result<(), StoreError> {
        let temp_path = temp_path(&self.path);
        let result = write_and_rename(&self.path, &temp_path, tasks);

        if result.is_err() && temp_path.exists() {
            if let Err(e) = fs::remove_file(&temp_path) {
                self.errors.record(ErrorKind::Io, format!("Temp cleanup failed: {}", e));
            }
        }
        if let Err(e) = &result {
            self.errors.record(e.kind(), format!("Saving tasks failed: {}", e));
        }
        result
    }

    /// Reads the data file, recovering from backups when it is damaged.
    ///
    /// Never fails: every problem is reflected in [`Loaded::status`] and the
    /// session error log, with an empty list as the last resort.
    pub fn load(&mut self) -> Loaded {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                let err = StoreError::io(&self.path, e);
                self.errors.record(err.kind(), err.to_string());
                return match err {
                    StoreError::NotFound(_) => Loaded::empty(LoadStatus::FreshStart),
                    other => Loaded::empty(LoadStatus::Unreadable {
                        reason: other.to_string(),
                    }),
                };
            }
        };

        let path = self.path.clone();
        match self.parse(&path, &content, ErrorKind::Validation) {
            Parsed::Tasks { tasks, skipped } if !(tasks.is_empty() && skipped > 0) => Loaded {
                tasks,
                status: LoadStatus::Loaded { skipped },
            },
            Parsed::Tasks { .. } => {
                self.errors.record(
                    ErrorKind::Corruption,
                    format!("No valid tasks in {}", self.path.display()),
                );
                self.load_from_backup()
            }
            Parsed::Corrupt(err) => {
                self.errors.record(err.kind(), err.to_string());
                self.load_from_backup()
            }
        }
    }

    fn load_from_backup(&mut self) -> Loaded {
        match self.recover_from_backup() {
            Some((tasks, backup)) => {
                // Replace the damaged primary without backing it up, so it
                // cannot push a good backup out of the retention window.
                if let Err(e) = self.write_atomic(&tasks) {
                    tracing::warn!(error = %e, "could not normalize recovered tasks");
                }
                Loaded {
                    tasks,
                    status: LoadStatus::Recovered { backup },
                }
            }
            None => Loaded::empty(LoadStatus::Corrupted),
        }
    }

    /// Returns the tasks of the newest backup holding at least one valid task.
    pub fn recover_from_backup(&mut self) -> Option<(Vec<Task>, PathBuf)> {
        let candidates = match backups::list_backups(&self.path) {
            Ok(candidates) => candidates,
            Err(e) => {
                self.errors.record(ErrorKind::Recovery, format!("Backup recovery failed: {}", e));
                return None;
            }
        };

        for backup in candidates {
            let content = match fs::read_to_string(&backup) {
                Ok(content) => content,
                Err(e) => {
                    self.errors.record(
                        ErrorKind::Recovery,
                        format!("Failed to recover from {}: {}", backup.display(), e),
                    );
                    continue;
                }
            };

            match self.parse(&backup, &content, ErrorKind::Recovery) {
                Parsed::Tasks { tasks, .. } if !tasks.is_empty() => {
                    tracing::info!(count = tasks.len(), backup = %backup.display(), "tasks recovered");
                    return Some((tasks, backup));
                }
                Parsed::Tasks { .. } => self.errors.record(
                    ErrorKind::Recovery,
                    format!("No valid tasks found in backup {}", backup.display()),
                ),
                Parsed::Corrupt(err) => self.errors.record(
                    ErrorKind::Recovery,
                    format!("Failed to recover from {}: {}", backup.display(), err),
                ),
            }
        }

        None
    }

    /// Reads an external file for import. Unlike [`TaskStore::load`] there is
    /// no recovery: a missing or damaged file is an error.
    pub fn read_import(&mut self, path: &Path) -> Result<Vec<Task>, StoreError> {
        let result = fs::read_to_string(path)
            .map_err(|e| StoreError::io(path, e))
            .and_then(|content| match self.parse(path, &content, ErrorKind::Import) {
                Parsed::Tasks { tasks, .. } => Ok(tasks),
                Parsed::Corrupt(err) => Err(err),
            });

        if let Err(e) = &result {
            self.errors.record(ErrorKind::Import, e.to_string());
        }
        result
    }

    /// Lists this store's backups, newest first.
    pub fn backups(&self) -> Result<Vec<PathBuf>, StoreError> {
        backups::list_backups(&self.path)
    }

    /// Takes a backup of the current data file outside of a save.
    pub fn backup_now(&mut self) -> Result<BackupOutcome, StoreError> {
        backups::create_backup(&self.path, self.max_backups, &mut self.errors)
    }

    /// Parses a task array, dropping and logging invalid records under `kind`.
    fn parse(&mut self, source: &Path, content: &str, kind: ErrorKind) -> Parsed {
        let value: Value = match serde_json::from_str(content) {
            Ok(value) => value,
            Err(e) => {
                return Parsed::Corrupt(StoreError::Corrupt {
                    path: source.to_path_buf(),
                    source: e,
                })
            }
        };

        let Value::Array(records) = value else {
            return Parsed::Corrupt(StoreError::NotAList(source.to_path_buf()));
        };

        let mut tasks = Vec::with_capacity(records.len());
        let mut skipped = 0;
        for (index, record) in records.iter().enumerate() {
            match Task::from_value(record) {
                Ok(task) => tasks.push(task),
                Err(e) => {
                    skipped += 1;
                    self.errors.record(
                        kind,
                        format!("Skipping invalid task {} in {}: {}", index, source.display(), e),
                    );
                }
            }
        }

        Parsed::Tasks { tasks, skipped }
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}

fn write_and_rename(path: &Path, temp_path: &Path, tasks: &[Task]) -> Result<(), StoreError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
    }

    let json = serde_json::to_string_pretty(tasks)?;

    let mut file = File::create(temp_path).map_err(|e| StoreError::io(temp_path, e))?;
    file.write_all(json.as_bytes())
        .and_then(|_| file.write_all(b"\n"))
        .and_then(|_| file.flush())
        .and_then(|_| file.sync_all())
        .map_err(|e| StoreError::io(temp_path, e))?;
    drop(file);

    fs::rename(temp_path, path).map_err(|e| StoreError::io(path, e))?;

    if let Err(e) = sync_parent_dir(path) {
        tracing::debug!(error = %e, "parent directory fsync skipped");
    }
    Ok(())
}

#[cfg(unix)]
fn sync_parent_dir(path: &Path) -> io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) -> io::Result<()> {
    Ok(())
}
