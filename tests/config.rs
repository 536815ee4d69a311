#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use taskvault::libs::config::{Config, DEFAULT_TASKS_FILE};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Test context to ensure a clean environment for each config test.
    /// It sets up a temporary directory to act as the user's home/appdata directory.
    struct ConfigTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            // Mock the home/appdata directory for cross-platform compatibility.
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext { _temp_dir: temp_dir }
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.tasks_file, None);
        assert_eq!(config.export_dir, None);
        assert_eq!(config.max_backups, 5);
        assert!(config.auto_save);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"max_backups": 2}"#).unwrap();
        assert_eq!(config.max_backups, 2);
        assert!(config.auto_save);
        assert_eq!(config.tasks_file, None);
    }

    #[test]
    fn test_unset_paths_are_not_serialized() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(!json.contains("tasks_file"));
        assert!(!json.contains("export_dir"));
        assert!(json.contains("\"max_backups\":5"));
    }

    #[test]
    fn test_explicit_paths_win() {
        let config = Config {
            tasks_file: Some(PathBuf::from("/tmp/mine.json")),
            export_dir: Some(PathBuf::from("/tmp/out")),
            ..Config::default()
        };
        assert_eq!(config.tasks_path().unwrap(), PathBuf::from("/tmp/mine.json"));
        assert_eq!(config.export_path().unwrap(), PathBuf::from("/tmp/out"));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_save_round_trip(_ctx: &mut ConfigTestContext) {
        // When no config file exists, read() returns the default config.
        assert_eq!(Config::read().unwrap(), Config::default());
        assert!(Config::default().tasks_path().unwrap().ends_with(DEFAULT_TASKS_FILE));

        let config = Config {
            tasks_file: Some(PathBuf::from("/data/tasks.json")),
            export_dir: None,
            max_backups: 9,
            auto_save: false,
        };
        config.save().unwrap();

        assert_eq!(Config::read().unwrap(), config);
    }
}
