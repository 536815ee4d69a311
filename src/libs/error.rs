//! Typed failures of the task store and repository.

use super::error_log::ErrorKind;
use super::task::ValidationError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation failed for task {index}: {source}")]
    Validation {
        index: usize,
        #[source]
        source: ValidationError,
    },

    #[error("file {0} not found")]
    NotFound(PathBuf),

    #[error("cannot read tasks from directory {0} (need a file)")]
    IsADirectory(PathBuf),

    #[error("permission denied accessing {0}")]
    PermissionDenied(PathBuf),

    #[error("invalid JSON in {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0} must contain a list of tasks")]
    NotAList(PathBuf),

    #[error("no backup of {0} contains valid tasks")]
    NoUsableBackup(PathBuf),

    #[error("every task ID is already in use")]
    IdsExhausted,

    #[error("task with ID {0} not found")]
    TaskNotFound(u32),

    #[error("task title must be 1-{max} characters", max = super::task::TITLE_MAX_LEN)]
    InvalidTitle,

    #[error("file system error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode tasks: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// Wraps an I/O error, promoting the kinds callers report differently.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound(path),
            io::ErrorKind::PermissionDenied => StoreError::PermissionDenied(path),
            _ if path.is_dir() => StoreError::IsADirectory(path),
            _ => StoreError::Io { path, source },
        }
    }

    /// The error-log category this failure is recorded under.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Validation { .. } | StoreError::InvalidTitle | StoreError::IdsExhausted => {
                ErrorKind::Validation
            }
            StoreError::NotFound(_) => ErrorKind::FileNotFound,
            StoreError::PermissionDenied(_) => ErrorKind::Permission,
            StoreError::Corrupt { .. } | StoreError::NotAList(_) => ErrorKind::Corruption,
            StoreError::NoUsableBackup(_) => ErrorKind::Recovery,
            StoreError::TaskNotFound(_) => ErrorKind::TaskNotFound,
            StoreError::IsADirectory(_) | StoreError::Io { .. } | StoreError::Json(_) => ErrorKind::Io,
        }
    }
}
