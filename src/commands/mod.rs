//! Command-line interface and the shared plumbing of its subcommands.
//!
//! Every subcommand opens the configured task list (or the one given with
//! `--file`), reports how it loaded, runs, and saves. One-shot commands always
//! save after a change; only the interactive menu honors the `auto_save`
//! setting. Running without a subcommand starts the menu.

pub mod backup;
pub mod export;
pub mod init;
pub mod load;
pub mod menu;
pub mod stats;
pub mod task;

use crate::{
    db::{
        store::LoadStatus,
        tasks::{Persisted, Tasks},
    },
    libs::{config::Config, messages::Message},
    msg_debug, msg_info, msg_success, msg_warning,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Add a task")]
    Add(task::AddArgs),
    #[command(about = "List tasks")]
    List(task::ListArgs),
    #[command(about = "Toggle a task between done and pending")]
    Toggle(task::ToggleArgs),
    #[command(about = "Change the title of a task")]
    Edit(task::EditArgs),
    #[command(about = "Delete a task")]
    Delete(task::DeleteArgs),
    #[command(about = "Delete all tasks (a backup is taken first)")]
    Clear(task::ClearArgs),
    #[command(about = "Load tasks from another file and merge them in")]
    Load(load::LoadArgs),
    #[command(about = "Import tasks from a file, renumbering conflicting IDs")]
    Import(load::ImportArgs),
    #[command(about = "Export tasks to JSON or CSV")]
    Export(export::ExportArgs),
    #[command(about = "List, create or recover from backups")]
    Backup(backup::BackupArgs),
    #[command(about = "Show task and session statistics")]
    Stats,
    #[command(about = "Start the interactive menu")]
    Menu,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Task list to use instead of the configured one
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        let file = cli.file.as_deref();

        match cli.command {
            Some(Commands::Init(args)) => init::cmd(args),
            Some(Commands::Add(args)) => task::add(&mut Session::open(file, true)?.tasks, &args.title),
            Some(Commands::List(args)) => task::list(&Session::open(file, true)?.tasks, args.filter),
            Some(Commands::Toggle(args)) => task::toggle(&mut Session::open(file, true)?.tasks, args.id),
            Some(Commands::Edit(args)) => task::edit(&mut Session::open(file, true)?.tasks, args.id, &args.title),
            Some(Commands::Delete(args)) => task::delete(&mut Session::open(file, true)?.tasks, args.id, args.yes),
            Some(Commands::Clear(args)) => task::clear(&mut Session::open(file, true)?.tasks, args.yes),
            Some(Commands::Load(args)) => load::load(&mut Session::open(file, true)?.tasks, &args.file, args.replace),
            Some(Commands::Import(args)) => load::import(&mut Session::open(file, true)?.tasks, &args.file),
            Some(Commands::Export(args)) => export::cmd(&Session::open(file, true)?, args),
            Some(Commands::Backup(args)) => backup::cmd(&mut Session::open(file, true)?.tasks, args),
            Some(Commands::Stats) => stats::cmd(&Session::open(file, true)?.tasks),
            Some(Commands::Menu) | None => menu::cmd(file),
        }
    }
}

/// Configuration plus the task list it points at.
pub struct Session {
    pub config: Config,
    pub tasks: Tasks,
}

impl Session {
    /// Reads the configuration and opens the task list.
    ///
    /// `force_auto_save` overrides the configured setting; one-shot commands
    /// exit right away, so a change they do not save would be lost.
    pub fn open(file: Option<&Path>, force_auto_save: bool) -> Result<Self> {
        let config = Config::read().unwrap_or_else(|e| {
            msg_warning!(Message::ConfigLoadFailed(e.to_string()));
            Config::default()
        });

        let path = match file {
            Some(path) => path.to_path_buf(),
            None => config.tasks_path().context("resolving the tasks file location")?,
        };

        let auto_save = force_auto_save || config.auto_save;
        let (tasks, status) = Tasks::open(&path, config.max_backups, auto_save);
        report_load(&status, tasks.len(), &path);

        Ok(Session { config, tasks })
    }
}

/// Tells the user how a load went. A clean load is only mentioned in debug
/// output; every fallback gets a warning.
pub fn report_load(status: &LoadStatus, count: usize, path: &Path) {
    let shown = path.display().to_string();
    match status {
        LoadStatus::Loaded { skipped } => {
            msg_debug!(Message::TasksLoaded(count, shown));
            if *skipped > 0 {
                msg_warning!(Message::TasksSkipped(*skipped));
            }
        }
        LoadStatus::FreshStart => msg_info!(Message::FreshStart(shown)),
        LoadStatus::Recovered { backup } => {
            msg_warning!(Message::RecoveredFromBackup(count, backup.display().to_string()))
        }
        LoadStatus::Corrupted => msg_warning!(Message::TasksFileCorrupted(shown)),
        LoadStatus::Unreadable { reason } => msg_warning!(Message::TasksFileUnreadable(reason.clone())),
    }
}

/// Reports what happened to the data file after a change.
///
/// # Errors
///
/// Returns the save failure. The change itself stays applied in memory.
pub fn report_persisted(persisted: Persisted) -> Result<()> {
    match persisted {
        Persisted::Saved(report) => {
            if let Some(warning) = report.backup_warning {
                msg_warning!(Message::BackupWarning(warning));
            }
            msg_debug!(Message::AutoSaved);
            Ok(())
        }
        Persisted::Deferred => {
            msg_info!(Message::ChangesNotSaved);
            Ok(())
        }
        Persisted::Failed(e) => {
            let message = Message::AutoSaveFailed(e.to_string()).to_string();
            Err(anyhow::Error::new(e).context(message))
        }
    }
}

/// Saves unconditionally and reports where the list went.
pub fn save_now(tasks: &mut Tasks) -> Result<()> {
    match tasks.save() {
        Ok(report) => {
            if let Some(warning) = report.backup_warning {
                msg_warning!(Message::BackupWarning(warning));
            }
            msg_success!(Message::TasksSaved(report.saved, tasks.store().path().display().to_string()));
            Ok(())
        }
        Err(e) => {
            let message = Message::SaveFailed(e.to_string()).to_string();
            Err(anyhow::Error::new(e).context(message))
        }
    }
}
