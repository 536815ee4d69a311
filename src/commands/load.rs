//! Bringing tasks in from other files.
//!
//! `load` reads a file with the same recovery rules as the main data file and
//! either merges or replaces; `import` is strict and always merges.

use super::{report_load, report_persisted};
use crate::{
    db::{store::LoadStatus, tasks::Tasks},
    libs::{messages::Message, task::MergeReport},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct LoadArgs {
    /// File to read tasks from
    pub file: PathBuf,

    /// Replace the current tasks instead of merging
    #[arg(short, long)]
    pub replace: bool,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// JSON file holding a list of tasks
    pub file: PathBuf,
}

/// Loads `path` and merges it, or replaces the list when `replace` is set.
///
/// Reloading the data file itself always replaces; merging it would
/// duplicate every task.
pub fn load(tasks: &mut Tasks, path: &Path, replace: bool) -> Result<()> {
    let replace = replace || tasks.is_primary(path);
    let loaded = tasks.load_from(path);
    if !matches!(loaded.status, LoadStatus::Loaded { skipped: 0 }) {
        report_load(&loaded.status, loaded.tasks.len(), path);
    }

    if loaded.tasks.is_empty() {
        msg_info!(Message::NoTasksLoaded(path.display().to_string()));
        return Ok(());
    }
    msg_success!(Message::TasksLoaded(loaded.tasks.len(), path.display().to_string()));

    if replace {
        let count = loaded.tasks.len();
        let persisted = tasks.replace(loaded.tasks);
        msg_success!(Message::TasksReplaced(count));
        report_persisted(persisted)
    } else {
        let (report, persisted) = tasks.merge(loaded.tasks);
        report_merge(&report);
        report_persisted(persisted)
    }
}

pub fn import(tasks: &mut Tasks, path: &Path) -> Result<()> {
    let (report, persisted) = match tasks.import_from(path) {
        Ok(imported) => imported,
        Err(e) => {
            let message = Message::ImportFailed(e.to_string()).to_string();
            return Err(anyhow::Error::new(e).context(message));
        }
    };

    if report.added == 0 {
        msg_info!(Message::NoTasksLoaded(path.display().to_string()));
        return Ok(());
    }
    report_merge(&report);
    report_persisted(persisted)
}

fn report_merge(report: &MergeReport) {
    for (old, new) in &report.reassigned {
        msg_info!(Message::TaskRenumbered(*old, *new));
    }
    msg_success!(Message::TasksMerged(report.added, report.reassigned.len()));
}
