//! Task export to standalone files.
//!
//! Exports write a snapshot of the task list, optionally narrowed to completed
//! or pending tasks, into the export directory. JSON exports use the data file
//! schema, so an export can be imported back; CSV exports are meant for
//! spreadsheets.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskvault::libs::export::{ExportFormat, Exporter};
//! use taskvault::libs::task::{Task, TaskFilter};
//! use std::path::Path;
//!
//! let tasks = vec![Task::new(1, "Write report")];
//! let exporter = Exporter::in_dir(Path::new("exports"), ExportFormat::Json, TaskFilter::Pending);
//! let written = exporter.export(&tasks)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::task::{Task, TaskFilter};
use anyhow::Result;
use chrono::Local;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Supported export output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    /// Pretty-printed JSON array, importable with `taskvault import`.
    #[default]
    Json,

    /// Comma-separated values with an `ID,Title,Done` header.
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

/// Writes a filtered task list to one output file.
pub struct Exporter {
    format: ExportFormat,
    filter: TaskFilter,
    output_path: PathBuf,
}

impl Exporter {
    pub fn new(format: ExportFormat, filter: TaskFilter, output_path: PathBuf) -> Self {
        Self {
            format,
            filter,
            output_path,
        }
    }

    /// Creates an exporter writing to the default file name inside `dir`.
    ///
    /// ## Default File Naming
    ///
    /// - all tasks: `tasks_export_YYYYMMDD_HHMMSS.<ext>`
    /// - completed tasks: `completed_tasks.<ext>`
    /// - pending tasks: `pending_tasks.<ext>`
    pub fn in_dir(dir: &Path, format: ExportFormat, filter: TaskFilter) -> Self {
        let stem = match filter {
            TaskFilter::All => format!("tasks_export_{}", Local::now().format("%Y%m%d_%H%M%S")),
            TaskFilter::Done => "completed_tasks".to_string(),
            TaskFilter::Pending => "pending_tasks".to_string(),
        };
        let output_path = dir.join(format!("{}.{}", stem, format.extension()));
        Self::new(format, filter, output_path)
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Writes the tasks matching the filter and returns how many were written.
    ///
    /// Nothing is written when no task matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be created or the file
    /// cannot be written.
    pub fn export(&self, tasks: &[Task]) -> Result<usize> {
        let selected: Vec<&Task> = tasks.iter().filter(|t| self.filter.matches(t)).collect();
        if selected.is_empty() {
            return Ok(0);
        }

        if let Some(dir) = self.output_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        match self.format {
            ExportFormat::Json => self.export_json(&selected)?,
            ExportFormat::Csv => self.export_csv(&selected)?,
        }

        tracing::info!(count = selected.len(), path = %self.output_path.display(), "tasks exported");
        Ok(selected.len())
    }

    fn export_json(&self, tasks: &[&Task]) -> Result<()> {
        let json = serde_json::to_string_pretty(tasks)?;
        let mut file = File::create(&self.output_path)?;
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }

    fn export_csv(&self, tasks: &[&Task]) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;
        wtr.write_record(["ID", "Title", "Done"])?;

        for task in tasks {
            wtr.write_record([task.id.to_string(), task.title.clone(), task.done.to_string()])?;
        }

        wtr.flush()?;
        Ok(())
    }
}
