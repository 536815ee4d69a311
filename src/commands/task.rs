//! Task editing commands: add, list, toggle, edit, delete and clear.
//!
//! The handlers take an open [`Tasks`] repository so the interactive menu can
//! call them after collecting its input.

use super::report_persisted;
use crate::{
    db::tasks::Tasks,
    libs::{
        messages::Message,
        task::TaskFilter,
        view::View,
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Task title, 1-200 characters
    #[arg(required = true)]
    pub title: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Which tasks to show
    #[arg(long, value_enum, default_value_t = TaskFilter::All)]
    pub filter: TaskFilter,
}

#[derive(Debug, Args)]
pub struct ToggleArgs {
    /// ID of the task to toggle
    pub id: u32,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// ID of the task to rename
    pub id: u32,

    /// New title, 1-200 characters
    pub title: String,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// ID of the task to delete
    pub id: u32,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

pub fn add(tasks: &mut Tasks, title: &str) -> Result<()> {
    let (task, persisted) = tasks.insert(title)?;
    msg_success!(Message::TaskAdded(task.id, task.title));
    report_persisted(persisted)
}

pub fn list(tasks: &Tasks, filter: TaskFilter) -> Result<()> {
    if tasks.is_empty() {
        msg_info!(Message::NoTasks);
        return Ok(());
    }

    let selected = tasks.fetch(filter);
    if !selected.is_empty() {
        View::tasks(&selected);
    }

    let stats = tasks.stats();
    msg_print!(
        Message::TaskSummary {
            total: stats.total,
            completed: stats.completed,
            pending: stats.pending,
        },
        true
    );
    Ok(())
}

pub fn toggle(tasks: &mut Tasks, id: u32) -> Result<()> {
    let (task, persisted) = tasks.toggle(id)?;
    msg_success!(Message::TaskToggled(task.id, task.done));
    report_persisted(persisted)
}

pub fn edit(tasks: &mut Tasks, id: u32, title: &str) -> Result<()> {
    let (task, persisted) = tasks.update_title(id, title)?;
    msg_success!(Message::TaskTitleUpdated(task.id, task.title));
    report_persisted(persisted)
}

/// Deletes a task, asking first unless `confirmed` is set.
pub fn delete(tasks: &mut Tasks, id: u32, confirmed: bool) -> Result<()> {
    let title = tasks.require(id)?.title.clone();

    if !confirmed && !confirm(Message::ConfirmDeleteTask(title))? {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    let (task, persisted) = tasks.delete(id)?;
    msg_success!(Message::TaskDeleted(task.id, task.title));
    report_persisted(persisted)
}

/// Removes every task after backing up the data file.
pub fn clear(tasks: &mut Tasks, confirmed: bool) -> Result<()> {
    if tasks.is_empty() {
        msg_info!(Message::NoTasksForAction("clear".to_string()));
        return Ok(());
    }

    if !confirmed && !confirm(Message::ConfirmClearTasks(tasks.len()))? {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    let (count, persisted) = tasks.clear();
    msg_success!(Message::TasksCleared(count));
    report_persisted(persisted)
}

pub(super) fn confirm(prompt: Message) -> Result<bool> {
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .default(false)
        .interact()?;
    Ok(confirmed)
}
