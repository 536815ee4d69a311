use super::{report_persisted, task::confirm};
use crate::{
    db::{backups::BackupOutcome, tasks::Tasks},
    libs::{error::StoreError, messages::Message, view::View},
    msg_info, msg_print, msg_success,
};
use anyhow::{Context, Result};
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct BackupArgs {
    #[command(subcommand)]
    command: Option<BackupCommand>,
}

#[derive(Debug, Subcommand)]
enum BackupCommand {
    /// List backups, newest first
    List,
    /// Back up the tasks file now
    Create,
    /// Replace the tasks with the newest usable backup
    Recover {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(tasks: &mut Tasks, args: BackupArgs) -> Result<()> {
    match args.command {
        Some(BackupCommand::List) | None => list(tasks),
        Some(BackupCommand::Create) => create(tasks),
        Some(BackupCommand::Recover { yes }) => recover(tasks, yes),
    }
}

pub fn list(tasks: &Tasks) -> Result<()> {
    let backups = tasks.store().backups()?;

    if backups.is_empty() {
        msg_info!(Message::NoBackupsFound);
        return Ok(());
    }

    msg_print!(Message::BackupsHeader(backups.len()), true);
    View::backups(&backups);
    Ok(())
}

pub fn create(tasks: &mut Tasks) -> Result<()> {
    match tasks.store_mut().backup_now()? {
        BackupOutcome::Created { path, .. } => msg_success!(Message::BackupCreated(path.display().to_string())),
        BackupOutcome::NothingToBackup => msg_info!(Message::NothingToBackup),
    }
    Ok(())
}

/// Replaces the current list with the newest backup holding valid tasks.
///
/// Asks first when there are tasks to lose, unless `confirmed` is set.
pub fn recover(tasks: &mut Tasks, confirmed: bool) -> Result<()> {
    let (recovered, backup) = tasks
        .store_mut()
        .recover_from_backup()
        .ok_or_else(|| StoreError::NoUsableBackup(tasks.store().path().to_path_buf()))
        .context(Message::RecoveryFailed.to_string())?;

    if !confirmed && !tasks.is_empty() && !confirm(Message::ConfirmReplaceWithRecovered(recovered.len()))? {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    let count = recovered.len();
    let persisted = tasks.replace(recovered);
    msg_success!(Message::RecoveredFromBackup(count, backup.display().to_string()));
    report_persisted(persisted)
}
