//! Display implementation for taskvault application messages.
//!
//! All user-facing text lives in this one match, so wording stays consistent
//! between the one-shot commands and the interactive menu.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TASK MESSAGES ===
            Message::TaskAdded(id, title) => format!("Added task #{}: {}", id, title),
            Message::TaskToggled(id, done) => {
                format!("Task #{} marked as {}", id, if *done { "completed" } else { "pending" })
            }
            Message::TaskTitleUpdated(id, title) => format!("Task #{} renamed to: {}", id, title),
            Message::TaskDeleted(id, title) => format!("Deleted task #{}: {}", id, title),
            Message::TasksCleared(count) => format!("Cleared {} tasks", count),
            Message::TaskNotFoundWithId(id) => format!("Task with ID {} not found", id),
            Message::NoTasks => "No tasks yet!".to_string(),
            Message::NoTasksForAction(action) => format!("No tasks to {}!", action),
            Message::TaskSummary { total, completed, pending } => {
                format!("Task Summary: {} total, {} completed, {} pending", total, completed, pending)
            }
            Message::InvalidTitle(max) => format!("Task title must be between 1 and {} characters", max),
            Message::ConfirmDeleteTask(title) => format!("Delete task '{}'?", title),
            Message::ConfirmClearTasks(count) => format!("Clear all {} tasks? This cannot be undone!", count),

            // === PERSISTENCE MESSAGES ===
            Message::TasksSaved(count, path) => format!("Saved {} tasks to {}", count, path),
            Message::AutoSaved => "💾 autosaved".to_string(),
            Message::AutoSaveFailed(error) => format!("Auto-save failed: {}", error),
            Message::ChangesNotSaved => "Auto-save is off, changes are not saved yet".to_string(),
            Message::SaveFailed(error) => format!("Saving tasks failed: {}", error),
            Message::BackupWarning(error) => format!("Backup failed, saving anyway: {}", error),
            Message::TasksLoaded(count, path) => format!("Loaded {} tasks from {}", count, path),
            Message::TasksSkipped(count) => format!("Skipped {} invalid tasks", count),
            Message::FreshStart(path) => format!("Tasks file {} not found, starting fresh", path),
            Message::RecoveredFromBackup(count, backup) => format!("Recovered {} tasks from {}", count, backup),
            Message::TasksFileCorrupted(path) => {
                format!("Tasks file {} is corrupted and no backup could be used, starting fresh", path)
            }
            Message::TasksFileUnreadable(reason) => format!("Could not read tasks: {}", reason),
            Message::NoTasksLoaded(path) => format!("No tasks found in {}", path),
            Message::TasksMerged(added, renumbered) => {
                format!("Merged {} tasks ({} renumbered to avoid ID conflicts)", added, renumbered)
            }
            Message::TaskRenumbered(old, new) => format!("Task #{} imported as #{}", old, new),
            Message::TasksReplaced(count) => format!("Replaced with {} tasks", count),
            Message::ImportFailed(error) => format!("Import failed: {}", error),

            // === EXPORT MESSAGES ===
            Message::ExportCompleted(count, path) => format!("Exported {} tasks to {}", count, path),
            Message::NothingToExport(filter) => format!("No {} tasks to export", filter),
            Message::ExportFailed(error) => format!("Export failed: {}", error),

            // === BACKUP MESSAGES ===
            Message::BackupsHeader(count) => format!("💾 Available backups ({}):", count),
            Message::NoBackupsFound => "No backup files found".to_string(),
            Message::BackupCreated(path) => format!("Backup created: {}", path),
            Message::NothingToBackup => "No existing file to backup".to_string(),
            Message::RecoveryFailed => "Recovery failed: no backup contains valid tasks".to_string(),
            Message::ConfirmReplaceWithRecovered(count) => {
                format!("Replace current tasks with {} recovered tasks?", count)
            }

            // === STATISTICS MESSAGES ===
            Message::SessionStatsHeader => "📊 Session Statistics".to_string(),
            Message::TotalErrorsLogged(count) => format!("Total errors logged: {}", count),
            Message::ErrorSummaryHeader => "Error Summary:".to_string(),
            Message::RecentErrorsHeader => "Recent Errors (last 3):".to_string(),
            Message::NoErrorsRecorded => "🎉 No errors recorded this session!".to_string(),
            Message::ErrorLogCleared => "Error log cleared".to_string(),
            Message::BackupCount(present, max) => format!("Backups on disk: {} (keeping at most {})", present, max),

            // === MENU MESSAGES ===
            Message::Welcome => "🎉 Welcome to taskvault! Your tasks are saved atomically and backed up.".to_string(),
            Message::Farewell => "👋 Goodbye!".to_string(),
            Message::SessionSummary(tasks, errors) => {
                format!("📊 Session summary: {} tasks, {} errors handled", tasks, errors)
            }
            Message::AutoSaveToggled(enabled) => {
                format!("Auto-save {}", if *enabled { "enabled" } else { "disabled" })
            }
            Message::UnexpectedError(error) => format!("Unexpected error: {}", error),
            Message::MenuTitle => "📝 taskvault".to_string(),
            Message::MenuAddTask => "Add task".to_string(),
            Message::MenuListTasks => "List tasks".to_string(),
            Message::MenuToggleTask => "Toggle done by ID".to_string(),
            Message::MenuEditTask => "Edit title by ID".to_string(),
            Message::MenuDeleteTask => "Delete by ID".to_string(),
            Message::MenuClearTasks => "Clear all tasks".to_string(),
            Message::MenuSaveLoad => "Save/Load operations".to_string(),
            Message::MenuImportExport => "Import/Export".to_string(),
            Message::MenuStatsRecovery => "Statistics & Recovery".to_string(),
            Message::MenuQuit => "Quit".to_string(),
            Message::MenuSaveNow => "Save tasks now".to_string(),
            Message::MenuLoadFile => "Load tasks from file".to_string(),
            Message::MenuToggleAutoSave(enabled) => {
                format!("Auto-save toggle (currently {})", if *enabled { "on" } else { "off" })
            }
            Message::MenuExportAll => "Export tasks to file".to_string(),
            Message::MenuExportCompleted => "Export completed tasks only".to_string(),
            Message::MenuExportPending => "Export pending tasks only".to_string(),
            Message::MenuImport => "Import tasks from file".to_string(),
            Message::MenuSessionStats => "View session statistics".to_string(),
            Message::MenuListBackups => "List backup files".to_string(),
            Message::MenuRecover => "Recover from backup".to_string(),
            Message::MenuClearErrorLog => "Clear error log".to_string(),
            Message::MenuBack => "Back to main menu".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigWizardHeader => "⚙️  taskvault configuration".to_string(),
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigLoadFailed(error) => format!("Could not read configuration, using defaults: {}", error),

            // === PROMPTS ===
            Message::PromptTaskTitle => "Enter your task title".to_string(),
            Message::PromptTaskId(action) => format!("Choose a task ID to {}", action),
            Message::PromptNewTitle => "New title".to_string(),
            Message::PromptLoadFile => "Enter filename to load from (empty for default)".to_string(),
            Message::PromptImportFile => "Enter filename to import from".to_string(),
            Message::PromptMergeWithCurrent => "Merge with current tasks? (No replaces them)".to_string(),
            Message::PromptSaveBeforeQuit => "💾 Save tasks before quitting?".to_string(),
            Message::PromptTasksFile => "Tasks file".to_string(),
            Message::PromptExportDir => "Export directory".to_string(),
            Message::PromptMaxBackups => "Number of backups to keep".to_string(),
            Message::PromptAutoSave => "Save automatically after every change?".to_string(),
            Message::ValueBelowMinimum(min) => format!("Value must be >= {}", min),
            Message::FilenameEmpty => "Filename cannot be empty".to_string(),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
        };

        write!(f, "{}", text)
    }
}
