//! Configuration management for the taskvault application.
//!
//! The configuration decides where the task list lives, where exports are
//! written, how many backups are retained and whether every change is saved
//! immediately. It is stored as JSON in the platform-specific application data
//! directory and every field has a default, so a missing or partial file is
//! never a problem.
//!
//! ## File Location
//!
//! - **Windows**: `%LOCALAPPDATA%\taskvault\taskvault\config.json`
//! - **macOS**: `~/Library/Application Support/taskvault/taskvault/config.json`
//! - **Linux**: `~/.local/share/taskvault/taskvault/config.json`
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use taskvault::libs::config::Config;
//!
//! // Load existing configuration or fall back to defaults
//! let config = Config::read()?;
//! println!("Tasks are stored in {}", config.tasks_path()?.display());
//!
//! // Run the interactive setup and persist the result
//! let updated = Config::init()?;
//! updated.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::db::backups::DEFAULT_MAX_BACKUPS;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::PathBuf;

/// Configuration file name used for storing application settings.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Data file name used when no explicit path is configured.
pub const DEFAULT_TASKS_FILE: &str = "tasks.json";

/// Export directory name used when no explicit path is configured.
pub const DEFAULT_EXPORT_DIR: &str = "exports";

/// Main configuration container.
///
/// ## Serialization Behavior
///
/// Optional paths are omitted from the JSON output when unset, and missing
/// keys are filled with defaults on read, so older configuration files keep
/// working as fields are added.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Location of the task list.
    ///
    /// When unset, `tasks.json` in the application data directory is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks_file: Option<PathBuf>,

    /// Directory that receives exported task files.
    ///
    /// When unset, `exports/` in the application data directory is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,

    /// Number of timestamped backups kept next to the task list.
    ///
    /// Every save copies the previous version of the file first; once more
    /// than this many copies exist the oldest are deleted.
    pub max_backups: usize,

    /// Whether every change made from the interactive menu is written at once.
    pub auto_save: bool,
}

impl Default for Config {
    /// Data under the application directory, five backups, auto-save on.
    fn default() -> Self {
        Config {
            tasks_file: None,
            export_dir: None,
            max_backups: DEFAULT_MAX_BACKUPS,
            auto_save: true,
        }
    }
}

impl Config {
    /// Reads configuration from the filesystem.
    ///
    /// ## Error Handling
    ///
    /// - **Missing file**: Returns default configuration (not an error)
    /// - **Corrupted file**: Returns parsing error
    /// - **Permission issues**: Returns filesystem error
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Saves the configuration as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the application data directory cannot be created
    /// or the configuration file cannot be written.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Resolved path of the task list.
    pub fn tasks_path(&self) -> Result<PathBuf> {
        match &self.tasks_file {
            Some(path) => Ok(path.clone()),
            None => Ok(DataStorage::new().get_path(DEFAULT_TASKS_FILE)?),
        }
    }

    /// Resolved export directory. It is created on first export, not here.
    pub fn export_path(&self) -> Result<PathBuf> {
        match &self.export_dir {
            Some(path) => Ok(path.clone()),
            None => Ok(DataStorage::new().get_path(DEFAULT_EXPORT_DIR)?),
        }
    }

    /// Runs an interactive configuration wizard.
    ///
    /// Current values (or defaults) are pre-filled so pressing enter keeps
    /// them. The retention count must be at least one.
    ///
    /// # Errors
    ///
    /// Returns an error if user input cannot be collected from the terminal.
    pub fn init() -> Result<Self> {
        let current = Self::read().unwrap_or_default();

        msg_print!(Message::ConfigWizardHeader, true);

        let tasks_file: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptTasksFile.to_string())
            .default(current.tasks_path()?.display().to_string())
            .interact_text()?;

        let export_dir: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptExportDir.to_string())
            .default(current.export_path()?.display().to_string())
            .interact_text()?;

        let max_backups: usize = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptMaxBackups.to_string())
            .default(current.max_backups)
            .validate_with(|value: &usize| -> std::result::Result<(), String> {
                if *value >= 1 {
                    Ok(())
                } else {
                    Err(Message::ValueBelowMinimum(1).to_string())
                }
            })
            .interact_text()?;

        let auto_save = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptAutoSave.to_string())
            .default(current.auto_save)
            .interact()?;

        Ok(Config {
            tasks_file: Some(PathBuf::from(tasks_file)),
            export_dir: Some(PathBuf::from(export_dir)),
            max_backups,
            auto_save,
        })
    }
}
