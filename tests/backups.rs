#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use std::fs;
    use std::path::PathBuf;
    use taskvault::db::backups::{backup_path, create_backup_at, list_backups, prune_backups, BackupOutcome};
    use taskvault::db::store::TaskStore;
    use taskvault::libs::error_log::ErrorLog;
    use taskvault::libs::task::Task;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct BackupTestContext {
        _temp_dir: TempDir,
        dir: PathBuf,
        path: PathBuf,
        log: ErrorLog,
    }

    impl TestContext for BackupTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let dir = temp_dir.path().to_path_buf();
            let path = dir.join("tasks.json");
            fs::write(&path, "[]").unwrap();
            BackupTestContext {
                _temp_dir: temp_dir,
                dir,
                path,
                log: ErrorLog::new(),
            }
        }
    }

    fn at(day: u32, sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap().and_hms_opt(12, 0, sec).unwrap()
    }

    #[test]
    fn test_backup_path_format() {
        let stamp = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(3, 4, 5).unwrap();
        let path = backup_path(&PathBuf::from("data").join("tasks.json"), stamp);

        assert_eq!(path, PathBuf::from("data").join("tasks.json.backup.20240102_030405"));
    }

    #[test_context(BackupTestContext)]
    #[test]
    fn test_create_backup_copies_file(ctx: &mut BackupTestContext) {
        fs::write(&ctx.path, r#"[{"id": 1, "title": "A", "done": false}]"#).unwrap();

        let outcome = create_backup_at(&ctx.path, at(1, 0), 5, &mut ctx.log).unwrap();
        let expected = backup_path(&ctx.path, at(1, 0));

        assert_eq!(
            outcome,
            BackupOutcome::Created {
                path: expected.clone(),
                pruned: 0,
            }
        );
        assert_eq!(fs::read(&expected).unwrap(), fs::read(&ctx.path).unwrap());
    }

    #[test_context(BackupTestContext)]
    #[test]
    fn test_nothing_to_backup_without_data_file(ctx: &mut BackupTestContext) {
        let missing = ctx.dir.join("absent.json");
        let outcome = create_backup_at(&missing, at(1, 0), 5, &mut ctx.log).unwrap();

        assert_eq!(outcome, BackupOutcome::NothingToBackup);
        assert!(list_backups(&missing).unwrap().is_empty());
    }

    #[test_context(BackupTestContext)]
    #[test]
    fn test_list_backups_newest_first(ctx: &mut BackupTestContext) {
        for (day, sec) in [(3, 0), (1, 0), (2, 30), (2, 10)] {
            create_backup_at(&ctx.path, at(day, sec), 10, &mut ctx.log).unwrap();
        }

        let backups = list_backups(&ctx.path).unwrap();
        assert_eq!(
            backups,
            vec![
                backup_path(&ctx.path, at(3, 0)),
                backup_path(&ctx.path, at(2, 30)),
                backup_path(&ctx.path, at(2, 10)),
                backup_path(&ctx.path, at(1, 0)),
            ]
        );
    }

    #[test_context(BackupTestContext)]
    #[test]
    fn test_list_backups_ignores_unrelated_files(ctx: &mut BackupTestContext) {
        create_backup_at(&ctx.path, at(1, 0), 5, &mut ctx.log).unwrap();
        fs::write(ctx.dir.join("tasks.json.backup.garbage"), "[]").unwrap();
        fs::write(ctx.dir.join("tasks.json.tmp"), "[]").unwrap();
        fs::write(ctx.dir.join("other.json.backup.20240101_120000"), "[]").unwrap();
        fs::create_dir(ctx.dir.join("tasks.json.backup.20991231_235959")).unwrap();

        assert_eq!(list_backups(&ctx.path).unwrap(), vec![backup_path(&ctx.path, at(1, 0))]);
    }

    #[test_context(BackupTestContext)]
    #[test]
    fn test_retention_keeps_newest(ctx: &mut BackupTestContext) {
        let mut pruned_total = 0;
        for sec in 0..7 {
            if let BackupOutcome::Created { pruned, .. } = create_backup_at(&ctx.path, at(1, sec), 3, &mut ctx.log).unwrap() {
                pruned_total += pruned;
            }
        }

        let backups = list_backups(&ctx.path).unwrap();
        assert_eq!(
            backups,
            vec![
                backup_path(&ctx.path, at(1, 6)),
                backup_path(&ctx.path, at(1, 5)),
                backup_path(&ctx.path, at(1, 4)),
            ]
        );
        assert_eq!(pruned_total, 4);
        assert!(ctx.log.is_empty());
    }

    #[test_context(BackupTestContext)]
    #[test]
    fn test_zero_retention_still_keeps_one(ctx: &mut BackupTestContext) {
        create_backup_at(&ctx.path, at(1, 0), 0, &mut ctx.log).unwrap();
        create_backup_at(&ctx.path, at(1, 1), 0, &mut ctx.log).unwrap();

        assert_eq!(list_backups(&ctx.path).unwrap(), vec![backup_path(&ctx.path, at(1, 1))]);
    }

    #[test_context(BackupTestContext)]
    #[test]
    fn test_prune_backups_directly(ctx: &mut BackupTestContext) {
        for day in 1..=4 {
            create_backup_at(&ctx.path, at(day, 0), 10, &mut ctx.log).unwrap();
        }

        let removed = prune_backups(&ctx.path, 1, &mut ctx.log).unwrap();
        assert_eq!(removed, 3);
        assert_eq!(list_backups(&ctx.path).unwrap(), vec![backup_path(&ctx.path, at(4, 0))]);
    }

    #[test_context(BackupTestContext)]
    #[test]
    fn test_save_backs_up_previous_version(ctx: &mut BackupTestContext) {
        let mut store = TaskStore::new(&ctx.path, 5);
        // The context's "[]" file is the first version.
        let first = store.save(&[Task::new(1, "A")]).unwrap();
        let backup = first.backup.expect("previous version should be backed up");
        assert_eq!(fs::read_to_string(&backup).unwrap(), "[]");

        let second = store.save(&[Task::new(1, "A"), Task::new(2, "B")]).unwrap();
        let backup = second.backup.unwrap();
        let backed_up: Vec<Task> = serde_json::from_str(&fs::read_to_string(&backup).unwrap()).unwrap();
        assert_eq!(backed_up, vec![Task::new(1, "A")]);
        assert_eq!(store.backups().unwrap()[0], backup);
    }
}
