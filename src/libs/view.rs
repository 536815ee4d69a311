use super::error_log::ErrorLog;
use super::task::Task;
use prettytable::{row, Table};
use std::path::PathBuf;

pub struct View {}

impl View {
    pub fn tasks(tasks: &[Task]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "STATUS", "TITLE"]);
        for task in tasks {
            let status = if task.done { "✅" } else { "⏳" };
            table.add_row(row![task.id, status, task.title]);
        }
        table.printstd();
    }

    pub fn backups(backups: &[PathBuf]) {
        let mut table = Table::new();

        table.add_row(row!["#", "BACKUP"]);
        for (index, backup) in backups.iter().enumerate() {
            let name = backup.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
            table.add_row(row![index + 1, name]);
        }
        table.printstd();
    }

    pub fn error_counts(log: &ErrorLog) {
        let mut table = Table::new();

        table.add_row(row!["KIND", "COUNT"]);
        for (kind, count) in log.counts() {
            table.add_row(row![kind, count]);
        }
        table.printstd();
    }

    /// The last `count` log entries, oldest first.
    pub fn recent_errors(log: &ErrorLog, count: usize) {
        let mut table = Table::new();

        table.add_row(row!["TIME", "KIND", "MESSAGE"]);
        for entry in log.recent(count) {
            table.add_row(row![entry.timestamp.format("%H:%M:%S"), entry.kind, entry.message]);
        }
        table.printstd();
    }
}
