//! Timestamped backup rotation for the data file.
//!
//! Backups live next to the data file and are named
//! `<file name>.backup.<YYYYmmdd_HHMMSS>`. Because the timestamp is fixed-width
//! and most-significant first, sorting names lexicographically sorts backups
//! chronologically.

use crate::libs::error::StoreError;
use crate::libs::error_log::{ErrorKind, ErrorLog};
use chrono::{Local, NaiveDateTime};
use std::fs;
use std::path::{Path, PathBuf};

pub const BACKUP_INFIX: &str = ".backup.";
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
pub const DEFAULT_MAX_BACKUPS: usize = 5;

/// Result of a backup attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
    Created { path: PathBuf, pruned: usize },
    /// There was no data file to copy yet.
    NothingToBackup,
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn backup_prefix(path: &Path) -> String {
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    format!("{}{}", name, BACKUP_INFIX)
}

/// Path of the backup of `path` taken at `at`.
pub fn backup_path(path: &Path, at: NaiveDateTime) -> PathBuf {
    parent_dir(path).join(format!("{}{}", backup_prefix(path), at.format(BACKUP_TIMESTAMP_FORMAT)))
}

/// Lists the backups of `path`, newest first.
///
/// Only names of the form `<file name>.backup.<timestamp>` for this exact data
/// file are returned. A missing directory yields an empty list.
pub fn list_backups(path: &Path) -> Result<Vec<PathBuf>, StoreError> {
    let dir = parent_dir(path);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let prefix = backup_prefix(path);
    let mut names: Vec<String> = fs::read_dir(&dir)
        .map_err(|e| StoreError::io(&dir, e))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| {
            name.strip_prefix(&prefix)
                .map(|stamp| NaiveDateTime::parse_from_str(stamp, BACKUP_TIMESTAMP_FORMAT).is_ok())
                .unwrap_or(false)
        })
        .collect();

    names.sort_unstable_by(|a, b| b.cmp(a));
    Ok(names.into_iter().map(|name| dir.join(name)).collect())
}

/// Copies the current data file to a new backup stamped with local time.
pub fn create_backup(path: &Path, max_backups: usize, log: &mut ErrorLog) -> Result<BackupOutcome, StoreError> {
    create_backup_at(path, Local::now().naive_local(), max_backups, log)
}

/// Copies the current data file to a backup stamped `at`, then prunes.
///
/// A backup taken in the same second as an existing one replaces it. Failing
/// to delete an old backup is logged and does not fail the call.
pub fn create_backup_at(
    path: &Path,
    at: NaiveDateTime,
    max_backups: usize,
    log: &mut ErrorLog,
) -> Result<BackupOutcome, StoreError> {
    if !path.is_file() {
        return Ok(BackupOutcome::NothingToBackup);
    }

    let target = backup_path(path, at);
    if let Err(e) = fs::copy(path, &target) {
        log.record(ErrorKind::Backup, format!("Backup creation failed: {}", e));
        return Err(StoreError::io(&target, e));
    }
    tracing::debug!(backup = %target.display(), "backup created");

    let pruned = prune_backups(path, max_backups.max(1), log)?;
    Ok(BackupOutcome::Created { path: target, pruned })
}

/// Deletes the oldest backups so at most `max_backups` remain.
///
/// Returns how many were removed.
pub fn prune_backups(path: &Path, max_backups: usize, log: &mut ErrorLog) -> Result<usize, StoreError> {
    let backups = list_backups(path)?;
    let mut removed = 0;

    for old in backups.iter().skip(max_backups) {
        match fs::remove_file(old) {
            Ok(()) => removed += 1,
            Err(e) => log.record(
                ErrorKind::Backup,
                format!("Failed to remove old backup {}: {}", old.display(), e),
            ),
        }
    }

    Ok(removed)
}
