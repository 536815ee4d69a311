use super::store::{LoadStatus, Loaded, SaveReport, TaskStore};
use crate::libs::error::StoreError;
use crate::libs::task::{free_id, import_merge, next_id, normalize_title, MergeReport, Task, TaskFilter, TaskStats};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// What happened to the data file after a mutation.
#[derive(Debug)]
pub enum Persisted {
    Saved(SaveReport),
    /// Auto-save is off; the change lives in memory only.
    Deferred,
    /// The change was applied in memory but writing it failed.
    Failed(StoreError),
}

/// In-memory task list bound to its data file.
pub struct Tasks {
    tasks: Vec<Task>,
    next_id: u32,
    store: TaskStore,
    auto_save: bool,
}

impl Tasks {
    /// Opens the data file at `path`, returning the list and how it loaded.
    pub fn open(path: impl Into<PathBuf>, max_backups: usize, auto_save: bool) -> (Self, LoadStatus) {
        let mut store = TaskStore::new(path, max_backups);
        let Loaded { tasks, status } = store.load();
        let repo = Tasks {
            next_id: next_id(&tasks),
            tasks,
            store,
            auto_save,
        };
        (repo, status)
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TaskStore {
        &mut self.store
    }

    pub fn auto_save(&self) -> bool {
        self.auto_save
    }

    pub fn set_auto_save(&mut self, enabled: bool) {
        self.auto_save = enabled;
    }

    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn fetch(&self, filter: TaskFilter) -> Vec<Task> {
        self.tasks.iter().filter(|t| filter.matches(t)).cloned().collect()
    }

    pub fn get_by_id(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Like [`Tasks::get_by_id`], but a miss is an error and is logged.
    pub fn require(&mut self, id: u32) -> Result<&Task, StoreError> {
        if let Some(index) = self.tasks.iter().position(|t| t.id == id) {
            return Ok(&self.tasks[index]);
        }
        Err(self.not_found(id))
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::of(&self.tasks)
    }

    pub fn insert(&mut self, title: &str) -> Result<(Task, Persisted), StoreError> {
        let title = normalize_title(title).ok_or(StoreError::InvalidTitle)?;
        let taken: HashSet<u32> = self.tasks.iter().map(|t| t.id).collect();
        let id = free_id(&taken, self.next_id).ok_or(StoreError::IdsExhausted)?;
        let task = Task::new(id, &title);
        self.tasks.push(task.clone());
        self.next_id = id.checked_add(1).unwrap_or(1);
        Ok((task, self.persist()))
    }

    /// Flips the `done` flag and returns the updated task.
    pub fn toggle(&mut self, id: u32) -> Result<(Task, Persisted), StoreError> {
        let task = self.find_mut(id)?;
        task.done = !task.done;
        let task = task.clone();
        Ok((task, self.persist()))
    }

    pub fn update_title(&mut self, id: u32, title: &str) -> Result<(Task, Persisted), StoreError> {
        let title = normalize_title(title).ok_or(StoreError::InvalidTitle)?;
        let task = self.find_mut(id)?;
        task.title = title;
        let task = task.clone();
        Ok((task, self.persist()))
    }

    pub fn delete(&mut self, id: u32) -> Result<(Task, Persisted), StoreError> {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            return Err(self.not_found(id));
        };
        let removed = self.tasks.remove(index);
        Ok((removed, self.persist()))
    }

    /// Removes every task after backing up the current data file.
    ///
    /// Returns how many tasks were removed. `next_id` is left untouched so
    /// IDs of cleared tasks are not handed out again in this session.
    pub fn clear(&mut self) -> (usize, Persisted) {
        if let Err(e) = self.store.backup_now() {
            tracing::warn!(error = %e, "backup before clear failed");
        }
        let count = self.tasks.len();
        self.tasks.clear();
        (count, self.persist())
    }

    /// Appends `incoming`, renumbering IDs that are already in use.
    pub fn merge(&mut self, incoming: Vec<Task>) -> (MergeReport, Persisted) {
        let report = import_merge(&mut self.tasks, incoming);
        self.next_id = self.next_id.max(next_id(&self.tasks));
        (report, self.persist())
    }

    pub fn replace(&mut self, tasks: Vec<Task>) -> Persisted {
        self.tasks = tasks;
        self.next_id = next_id(&self.tasks);
        self.persist()
    }

    /// Whether `path` names the data file this list is bound to.
    pub fn is_primary(&self, path: &Path) -> bool {
        let primary = self.store.path();
        if path == primary {
            return true;
        }
        match (path.canonicalize(), primary.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    /// Loads another data file with the same recovery rules as the primary one.
    ///
    /// The current list is not modified; callers decide between
    /// [`Tasks::merge`] and [`Tasks::replace`].
    pub fn load_from(&mut self, path: &Path) -> Loaded {
        if self.is_primary(path) {
            return self.store.load();
        }
        let mut other = TaskStore::new(path, self.store.max_backups());
        let loaded = other.load();
        for entry in other.errors().entries() {
            self.store.errors_mut().record(entry.kind, entry.message.clone());
        }
        loaded
    }

    /// Reads an import file and merges its valid tasks.
    pub fn import_from(&mut self, path: &Path) -> Result<(MergeReport, Persisted), StoreError> {
        let incoming = self.store.read_import(path)?;
        Ok(self.merge(incoming))
    }

    /// Replaces the list with the newest usable backup, if any.
    pub fn recover(&mut self) -> Option<(usize, PathBuf, Persisted)> {
        let (tasks, backup) = self.store.recover_from_backup()?;
        let count = tasks.len();
        let persisted = self.replace(tasks);
        Some((count, backup, persisted))
    }

    /// Writes the list regardless of the auto-save setting.
    pub fn save(&mut self) -> Result<SaveReport, StoreError> {
        self.store.save(&self.tasks)
    }

    fn persist(&mut self) -> Persisted {
        if !self.auto_save {
            return Persisted::Deferred;
        }
        match self.store.save(&self.tasks) {
            Ok(report) => Persisted::Saved(report),
            Err(e) => Persisted::Failed(e),
        }
    }

    fn find_mut(&mut self, id: u32) -> Result<&mut Task, StoreError> {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            return Err(self.not_found(id));
        };
        Ok(&mut self.tasks[index])
    }

    fn not_found(&mut self, id: u32) -> StoreError {
        let err = StoreError::TaskNotFound(id);
        self.store.errors_mut().record(err.kind(), format!("Task ID {} not found", id));
        err
    }
}
