#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use taskvault::commands::load;
    use taskvault::db::store::{LoadStatus, TaskStore};
    use taskvault::db::tasks::{Persisted, Tasks};
    use taskvault::libs::error::StoreError;
    use taskvault::libs::error_log::ErrorKind;
    use taskvault::libs::task::{Task, TaskFilter, TITLE_MAX_LEN};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct TaskTestContext {
        _temp_dir: TempDir,
        dir: PathBuf,
        path: PathBuf,
    }

    impl TestContext for TaskTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let dir = temp_dir.path().to_path_buf();
            TaskTestContext {
                path: dir.join("tasks.json"),
                dir,
                _temp_dir: temp_dir,
            }
        }
    }

    impl TaskTestContext {
        fn open(&self) -> Tasks {
            let (tasks, _) = Tasks::open(&self.path, 5, true);
            tasks
        }

        fn on_disk(&self) -> Vec<Task> {
            TaskStore::new(&self.path, 5).load().tasks
        }
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_open_fresh_list(ctx: &mut TaskTestContext) {
        let (tasks, status) = Tasks::open(&ctx.path, 5, true);

        assert!(tasks.is_empty());
        assert_eq!(tasks.next_id(), 1);
        assert_eq!(status, LoadStatus::FreshStart);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_insert(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.open();

        let (first, persisted) = tasks.insert("  Write report  ").unwrap();
        assert_eq!(first, Task::new(1, "Write report"));
        assert!(matches!(persisted, Persisted::Saved(_)));

        let (second, _) = tasks.insert("Review code").unwrap();
        assert_eq!(second.id, 2);
        assert_eq!(ctx.on_disk(), vec![first, second]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_insert_rejects_bad_titles(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.open();

        assert!(matches!(tasks.insert("   "), Err(StoreError::InvalidTitle)));
        assert!(matches!(
            tasks.insert(&"x".repeat(TITLE_MAX_LEN + 1)),
            Err(StoreError::InvalidTitle)
        ));
        assert!(tasks.is_empty());
        assert!(!ctx.path.exists());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_toggle(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.open();
        tasks.insert("A").unwrap();

        let (task, _) = tasks.toggle(1).unwrap();
        assert!(task.done);
        assert!(ctx.on_disk()[0].done);

        let (task, _) = tasks.toggle(1).unwrap();
        assert!(!task.done);
        assert!(!ctx.on_disk()[0].done);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_missing_task_is_reported_and_logged(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.open();
        tasks.insert("A").unwrap();

        assert!(matches!(tasks.toggle(99), Err(StoreError::TaskNotFound(99))));
        assert!(matches!(tasks.update_title(42, "B"), Err(StoreError::TaskNotFound(42))));
        assert!(matches!(tasks.delete(7), Err(StoreError::TaskNotFound(7))));
        assert!(tasks.require(8).is_err());

        assert_eq!(tasks.store().errors().count_of(ErrorKind::TaskNotFound), 4);
        assert_eq!(tasks.len(), 1);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_update(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.open();
        tasks.insert("Original").unwrap();

        let (task, _) = tasks.update_title(1, " Renamed ").unwrap();
        assert_eq!(task.title, "Renamed");
        assert_eq!(ctx.on_disk()[0].title, "Renamed");

        assert!(matches!(tasks.update_title(1, ""), Err(StoreError::InvalidTitle)));
        assert_eq!(tasks.get_by_id(1).unwrap().title, "Renamed");
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_task_delete(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.open();
        for title in ["A", "B", "C"] {
            tasks.insert(title).unwrap();
        }

        let (removed, _) = tasks.delete(2).unwrap();
        assert_eq!(removed.title, "B");
        assert_eq!(ctx.on_disk().iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 3]);

        // IDs are not reused within the session.
        tasks.delete(3).unwrap();
        let (task, _) = tasks.insert("D").unwrap();
        assert_eq!(task.id, 4);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_fetch_filters(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.open();
        for title in ["A", "B", "C"] {
            tasks.insert(title).unwrap();
        }
        tasks.toggle(2).unwrap();

        assert_eq!(tasks.fetch(TaskFilter::All).len(), 3);
        assert_eq!(tasks.fetch(TaskFilter::Done).iter().map(|t| t.id).collect::<Vec<_>>(), vec![2]);
        assert_eq!(tasks.fetch(TaskFilter::Pending).len(), 2);
        assert_eq!(tasks.stats().completed, 1);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_clear_backs_up_first(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.open();
        tasks.insert("A").unwrap();
        tasks.insert("B").unwrap();

        let (count, persisted) = tasks.clear();
        assert_eq!(count, 2);
        assert!(matches!(persisted, Persisted::Saved(_)));
        assert!(tasks.is_empty());
        assert!(ctx.on_disk().is_empty());

        let newest = tasks.store().backups().unwrap()[0].clone();
        let backed_up: Vec<Task> = serde_json::from_str(&fs::read_to_string(newest).unwrap()).unwrap();
        assert_eq!(backed_up.len(), 2);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_auto_save_off_defers_writes(ctx: &mut TaskTestContext) {
        let (mut tasks, _) = Tasks::open(&ctx.path, 5, false);

        let (_, persisted) = tasks.insert("A").unwrap();
        assert!(matches!(persisted, Persisted::Deferred));
        assert!(!ctx.path.exists());

        let report = tasks.save().unwrap();
        assert_eq!(report.saved, 1);
        assert_eq!(ctx.on_disk(), vec![Task::new(1, "A")]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_import_renumbers_conflicts(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.open();
        tasks.insert("A").unwrap();
        tasks.insert("B").unwrap();

        let import = ctx.dir.join("import.json");
        fs::write(
            &import,
            r#"[{"id": 1, "title": "X", "done": true}, {"id": 5, "title": "Y", "done": false}]"#,
        )
        .unwrap();

        let (report, _) = tasks.import_from(&import).unwrap();
        assert_eq!(report.added, 2);
        assert_eq!(report.reassigned, vec![(1, 6)]);
        assert_eq!(tasks.all().iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2, 6, 5]);

        let (task, _) = tasks.insert("Z").unwrap();
        assert_eq!(task.id, 7);
        assert_eq!(ctx.on_disk().len(), 5);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_import_of_missing_file_changes_nothing(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.open();
        tasks.insert("A").unwrap();

        let result = tasks.import_from(&ctx.dir.join("nope.json"));
        assert!(matches!(result, Err(StoreError::NotFound(_))));
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks.store().errors().count_of(ErrorKind::Import), 1);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_load_from_then_replace(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.open();
        tasks.insert("Current").unwrap();

        let other = ctx.dir.join("other.json");
        TaskStore::new(&other, 5).save(&[Task::new(10, "Elsewhere")]).unwrap();

        let loaded = tasks.load_from(&other);
        assert_eq!(loaded.tasks, vec![Task::new(10, "Elsewhere")]);
        assert_eq!(tasks.len(), 1);

        tasks.replace(loaded.tasks);
        assert_eq!(tasks.next_id(), 11);
        assert_eq!(ctx.on_disk(), vec![Task::new(10, "Elsewhere")]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_load_from_copies_errors_into_session_log(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.open();

        let other = ctx.dir.join("other.json");
        fs::write(&other, r#"[{"id": 1, "title": "A", "done": false}, {"id": 2}]"#).unwrap();

        let loaded = tasks.load_from(&other);
        assert_eq!(loaded.status, LoadStatus::Loaded { skipped: 1 });
        assert_eq!(tasks.store().errors().count_of(ErrorKind::Validation), 1);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_recover_restores_backup(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.open();
        tasks.insert("A").unwrap();
        // Backs up the single-task version.
        tasks.insert("B").unwrap();

        let (count, backup, persisted) = tasks.recover().unwrap();
        assert_eq!(count, 1);
        assert!(backup.exists());
        assert!(matches!(persisted, Persisted::Saved(_)));
        assert_eq!(tasks.all(), &[Task::new(1, "A")]);
        assert_eq!(tasks.next_id(), 2);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_recover_without_backups(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.open();
        assert!(tasks.recover().is_none());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_reopen_continues_ids(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.open();
        tasks.insert("A").unwrap();
        tasks.insert("B").unwrap();
        drop(tasks);

        let (mut tasks, status) = Tasks::open(&ctx.path, 5, true);
        assert_eq!(status, LoadStatus::Loaded { skipped: 0 });
        let (task, _) = tasks.insert("C").unwrap();
        assert_eq!(task.id, 3);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_insert_after_max_id_reuses_lowest_free_id(ctx: &mut TaskTestContext) {
        fs::write(&ctx.path, r#"[{"id": 4294967295, "title": "A", "done": false}]"#).unwrap();
        let mut tasks = ctx.open();

        let (second, _) = tasks.insert("B").unwrap();
        let (third, _) = tasks.insert("C").unwrap();

        assert_eq!(second.id, 1);
        assert_eq!(third.id, 2);
        let ids: Vec<u32> = ctx.on_disk().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![u32::MAX, 1, 2]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_toggle_after_reorder_targets_right_task(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.open();
        tasks.insert("A").unwrap();
        tasks.insert("B").unwrap();
        tasks.delete(1).unwrap();

        let (toggled, _) = tasks.toggle(2).unwrap();
        assert_eq!(toggled.title, "B");
        assert!(toggled.done);
        assert!(matches!(tasks.toggle(1), Err(StoreError::TaskNotFound(1))));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_loading_the_data_file_itself_replaces(ctx: &mut TaskTestContext) {
        let mut tasks = ctx.open();
        tasks.insert("A").unwrap();
        tasks.insert("B").unwrap();

        assert!(tasks.is_primary(&ctx.path));
        assert!(!tasks.is_primary(&ctx.dir.join("other.json")));

        load::load(&mut tasks, &ctx.path, false).unwrap();

        assert_eq!(tasks.all(), &[Task::new(1, "A"), Task::new(2, "B")]);
        assert_eq!(ctx.on_disk().len(), 2);
    }
}
