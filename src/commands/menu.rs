//! Interactive menu.
//!
//! The menu keeps one task list open for the whole session and honors the
//! configured `auto_save` setting. A failing action is reported and the loop
//! continues; Ctrl-C or end of input at any prompt ends the session with the
//! usual farewell.

use super::{backup, export, load, save_now, stats, task, Session};
use crate::{
    db::tasks::Tasks,
    libs::{
        error::StoreError,
        error_log::ErrorKind,
        messages::Message,
        task::{normalize_title, TaskFilter, TITLE_MAX_LEN},
    },
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy)]
enum MainAction {
    Add,
    List,
    Toggle,
    Edit,
    Delete,
    Clear,
    SaveLoad,
    ImportExport,
    StatsRecovery,
    Quit,
}

const MAIN_ACTIONS: [MainAction; 10] = [
    MainAction::Add,
    MainAction::List,
    MainAction::Toggle,
    MainAction::Edit,
    MainAction::Delete,
    MainAction::Clear,
    MainAction::SaveLoad,
    MainAction::ImportExport,
    MainAction::StatsRecovery,
    MainAction::Quit,
];

impl MainAction {
    fn label(self) -> Message {
        match self {
            MainAction::Add => Message::MenuAddTask,
            MainAction::List => Message::MenuListTasks,
            MainAction::Toggle => Message::MenuToggleTask,
            MainAction::Edit => Message::MenuEditTask,
            MainAction::Delete => Message::MenuDeleteTask,
            MainAction::Clear => Message::MenuClearTasks,
            MainAction::SaveLoad => Message::MenuSaveLoad,
            MainAction::ImportExport => Message::MenuImportExport,
            MainAction::StatsRecovery => Message::MenuStatsRecovery,
            MainAction::Quit => Message::MenuQuit,
        }
    }
}

pub fn cmd(file: Option<&Path>) -> Result<()> {
    let mut session = Session::open(file, false)?;

    msg_print!(Message::Welcome, true);
    if !session.tasks.is_empty() {
        msg_success!(Message::TasksLoaded(
            session.tasks.len(),
            session.tasks.store().path().display().to_string()
        ));
    }

    match run(&mut session) {
        Ok(()) => {}
        Err(e) if is_interrupted(&e) => println!(),
        Err(e) => return Err(e),
    }

    msg_print!(Message::SessionSummary(
        session.tasks.len(),
        session.tasks.store().errors().len()
    ));
    msg_print!(Message::Farewell);
    Ok(())
}

fn run(session: &mut Session) -> Result<()> {
    let labels: Vec<String> = MAIN_ACTIONS.iter().map(|a| a.label().to_string()).collect();

    loop {
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::MenuTitle.to_string())
            .items(&labels)
            .default(0)
            .interact()?;

        let action = MAIN_ACTIONS[selection];
        let result = match action {
            MainAction::Add => add(session),
            MainAction::List => task::list(&session.tasks, TaskFilter::All),
            MainAction::Toggle => with_task_id(session, "toggle", task::toggle),
            MainAction::Edit => edit(session),
            MainAction::Delete => with_task_id(session, "delete", |tasks, id| task::delete(tasks, id, false)),
            MainAction::Clear => task::clear(&mut session.tasks, false),
            MainAction::SaveLoad => save_load(session),
            MainAction::ImportExport => import_export(session),
            MainAction::StatsRecovery => stats_recovery(session),
            MainAction::Quit => return offer_save(session),
        };

        if let Err(e) = result {
            report_failure(session, e)?;
        }
    }
}

/// Reports a failed action. Terminal errors are passed on and end the menu.
fn report_failure(session: &mut Session, err: anyhow::Error) -> Result<()> {
    if err.downcast_ref::<dialoguer::Error>().is_some() {
        return Err(err);
    }

    if err.downcast_ref::<StoreError>().is_some() {
        // The store has logged it already.
        msg_error!(err);
    } else {
        let text = format!("{:#}", err);
        session.tasks.store_mut().errors_mut().record(ErrorKind::Unexpected, text.clone());
        msg_error!(Message::UnexpectedError(text));
    }
    Ok(())
}

fn is_interrupted(err: &anyhow::Error) -> bool {
    match err.downcast_ref::<dialoguer::Error>() {
        Some(dialoguer::Error::IO(e)) => {
            matches!(e.kind(), io::ErrorKind::Interrupted | io::ErrorKind::UnexpectedEof)
        }
        None => false,
    }
}

fn add(session: &mut Session) -> Result<()> {
    let title = prompt_title(session, Message::PromptTaskTitle, None)?;
    task::add(&mut session.tasks, &title)
}

fn edit(session: &mut Session) -> Result<()> {
    if session.tasks.is_empty() {
        msg_info!(Message::NoTasksForAction("edit".to_string()));
        return Ok(());
    }

    task::list(&session.tasks, TaskFilter::All)?;
    let id = prompt_id(session, "edit")?;
    let current = session.tasks.require(id)?.title.clone();
    let title = prompt_title(session, Message::PromptNewTitle, Some(&current))?;
    task::edit(&mut session.tasks, id, &title)
}

/// Asks for a task ID and runs `action` on it. Prints a notice instead when
/// the list is empty.
fn with_task_id<F>(session: &mut Session, verb: &str, action: F) -> Result<()>
where
    F: FnOnce(&mut Tasks, u32) -> Result<()>,
{
    if session.tasks.is_empty() {
        msg_info!(Message::NoTasksForAction(verb.to_string()));
        return Ok(());
    }

    task::list(&session.tasks, TaskFilter::All)?;
    let id = prompt_id(session, verb)?;
    action(&mut session.tasks, id)
}

fn prompt_id(session: &mut Session, verb: &str) -> Result<u32> {
    let errors = session.tasks.store_mut().errors_mut();
    let raw: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptTaskId(verb.to_string()).to_string())
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            match input.trim().parse::<u32>() {
                Ok(id) if id >= 1 => Ok(()),
                _ => {
                    let message = Message::ValueBelowMinimum(1).to_string();
                    errors.record(ErrorKind::Input, format!("Invalid task ID '{}'", input.trim()));
                    Err(message)
                }
            }
        })
        .interact_text()?;

    Ok(raw.trim().parse()?)
}

fn prompt_title(session: &mut Session, prompt: Message, initial: Option<&str>) -> Result<String> {
    let theme = ColorfulTheme::default();
    let errors = session.tasks.store_mut().errors_mut();
    let mut input = Input::<String>::with_theme(&theme).with_prompt(prompt.to_string());
    if let Some(initial) = initial {
        input = input.with_initial_text(initial);
    }

    let title = input
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            if normalize_title(input).is_some() {
                Ok(())
            } else {
                errors.record(ErrorKind::Input, format!("Invalid task title ({} characters)", input.chars().count()));
                Err(Message::InvalidTitle(TITLE_MAX_LEN).to_string())
            }
        })
        .interact_text()?;
    Ok(title)
}

fn save_load(session: &mut Session) -> Result<()> {
    let items = [
        Message::MenuSaveNow.to_string(),
        Message::MenuLoadFile.to_string(),
        Message::MenuToggleAutoSave(session.tasks.auto_save()).to_string(),
        Message::MenuBack.to_string(),
    ];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::MenuSaveLoad.to_string())
        .items(&items)
        .default(0)
        .interact()?;

    match selection {
        0 => save_now(&mut session.tasks),
        1 => {
            let raw: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptLoadFile.to_string())
                .allow_empty(true)
                .interact_text()?;
            let path = match raw.trim() {
                "" => session.tasks.store().path().to_path_buf(),
                other => PathBuf::from(other),
            };

            let merge = !session.tasks.is_empty()
                && !session.tasks.is_primary(&path)
                && prompt_confirm(Message::PromptMergeWithCurrent, true)?;
            load::load(&mut session.tasks, &path, !merge)
        }
        2 => {
            let enabled = !session.tasks.auto_save();
            session.tasks.set_auto_save(enabled);
            msg_success!(Message::AutoSaveToggled(enabled));
            Ok(())
        }
        _ => Ok(()),
    }
}

fn import_export(session: &mut Session) -> Result<()> {
    let items = [
        Message::MenuExportAll.to_string(),
        Message::MenuExportCompleted.to_string(),
        Message::MenuExportPending.to_string(),
        Message::MenuImport.to_string(),
        Message::MenuBack.to_string(),
    ];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::MenuImportExport.to_string())
        .items(&items)
        .default(0)
        .interact()?;

    match selection {
        0 => export::to_export_dir(session, TaskFilter::All),
        1 => export::to_export_dir(session, TaskFilter::Done),
        2 => export::to_export_dir(session, TaskFilter::Pending),
        3 => {
            let raw: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptImportFile.to_string())
                .validate_with(|input: &String| -> std::result::Result<(), String> {
                    if input.trim().is_empty() {
                        Err(Message::FilenameEmpty.to_string())
                    } else {
                        Ok(())
                    }
                })
                .interact_text()?;
            load::import(&mut session.tasks, Path::new(raw.trim()))
        }
        _ => Ok(()),
    }
}

fn stats_recovery(session: &mut Session) -> Result<()> {
    let items = [
        Message::MenuSessionStats.to_string(),
        Message::MenuListBackups.to_string(),
        Message::MenuRecover.to_string(),
        Message::MenuClearErrorLog.to_string(),
        Message::MenuBack.to_string(),
    ];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::MenuStatsRecovery.to_string())
        .items(&items)
        .default(0)
        .interact()?;

    match selection {
        0 => stats::cmd(&session.tasks),
        1 => backup::list(&session.tasks),
        2 => backup::recover(&mut session.tasks, false),
        3 => {
            session.tasks.store_mut().errors_mut().clear();
            msg_success!(Message::ErrorLogCleared);
            Ok(())
        }
        _ => Ok(()),
    }
}

/// With auto-save off there may be unsaved changes; offer to write them.
fn offer_save(session: &mut Session) -> Result<()> {
    if session.tasks.auto_save() || session.tasks.is_empty() {
        return Ok(());
    }

    if prompt_confirm(Message::PromptSaveBeforeQuit, true)? {
        save_now(&mut session.tasks)?;
    }
    Ok(())
}

fn prompt_confirm(prompt: Message, default: bool) -> Result<bool> {
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .default(default)
        .interact()?;
    Ok(confirmed)
}
