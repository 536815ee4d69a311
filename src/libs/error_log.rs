//! Session error accumulator.
//!
//! Every recoverable problem the store and the menu handle (a skipped record, a
//! failed backup, a bad menu choice) is written here so the statistics screen
//! can show what went wrong during the session. Entries are mirrored to
//! `tracing` at warn level.

use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::fmt;

/// Category of a logged problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKind {
    Input,
    Validation,
    FileNotFound,
    Permission,
    Corruption,
    Io,
    Backup,
    Recovery,
    Import,
    Export,
    TaskNotFound,
    Unexpected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Input => "InputError",
            ErrorKind::Validation => "ValidationError",
            ErrorKind::FileNotFound => "FileNotFoundError",
            ErrorKind::Permission => "PermissionError",
            ErrorKind::Corruption => "CorruptionError",
            ErrorKind::Io => "IoError",
            ErrorKind::Backup => "BackupError",
            ErrorKind::Recovery => "RecoveryError",
            ErrorKind::Import => "ImportError",
            ErrorKind::Export => "ExportError",
            ErrorKind::TaskNotFound => "TaskNotFound",
            ErrorKind::Unexpected => "UnexpectedError",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct ErrorEntry {
    pub kind: ErrorKind,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Default, Clone)]
pub struct ErrorLog {
    entries: Vec<ErrorEntry>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: ErrorKind, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(kind = %kind, "{}", message);
        self.entries.push(ErrorEntry {
            kind,
            message,
            timestamp: Local::now(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ErrorEntry] {
        &self.entries
    }

    /// Number of entries per kind, in a stable order.
    pub fn counts(&self) -> BTreeMap<ErrorKind, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.kind).or_insert(0) += 1;
        }
        counts
    }

    /// The last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> &[ErrorEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn count_of(&self, kind: ErrorKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
