//! Task record, schema validation and ID bookkeeping.
//!
//! A task is the only persisted entity: `{id, title, done}`. Records read from
//! disk arrive as untyped JSON and are checked field by field before they are
//! admitted into a task list, so one malformed entry never poisons the rest of
//! the file.
//!
//! ## Usage
//!
//! ```rust
//! use taskvault::libs::task::{Task, import_merge};
//!
//! let mut tasks = vec![Task::new(1, "Write report")];
//! let report = import_merge(&mut tasks, vec![Task::new(1, "Review code")]);
//! assert_eq!(report.reassigned, vec![(1, 2)]);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

/// Longest title accepted from user input.
pub const TITLE_MAX_LEN: usize = 200;

/// A single to-do entry as stored in the data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub title: String,
    pub done: bool,
}

/// Selects a subset of tasks for listing and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TaskFilter {
    #[default]
    All,
    Done,
    Pending,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Done => task.done,
            TaskFilter::Pending => !task.done,
        }
    }
}

/// The schema rule a raw record failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("task must be an object, got {0}")]
    NotAnObject(&'static str),
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("task {field} must be {expected}, got {found}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("task ID must be positive, got {0}")]
    NonPositiveId(i64),
    #[error("task ID {0} is out of range")]
    IdOutOfRange(i64),
    #[error("task title cannot be empty")]
    EmptyTitle,
}

impl Task {
    pub fn new(id: u32, title: &str) -> Self {
        Task {
            id,
            title: title.to_string(),
            done: false,
        }
    }

    /// Checks the invariants a typed task can still break.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id == 0 {
            return Err(ValidationError::NonPositiveId(0));
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Builds a task from an untyped JSON record.
    ///
    /// Unlike a plain serde deserialization this reports which rule failed,
    /// and it refuses values serde would coerce, such as `1.0` for an ID.
    /// Unknown extra fields are ignored.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found, checking shape, presence,
    /// types and then values.
    pub fn from_value(value: &Value) -> Result<Task, ValidationError> {
        let object = value.as_object().ok_or(ValidationError::NotAnObject(json_type_name(value)))?;

        let id = object.get("id").ok_or(ValidationError::MissingField("id"))?;
        let title = object.get("title").ok_or(ValidationError::MissingField("title"))?;
        let done = object.get("done").ok_or(ValidationError::MissingField("done"))?;

        if id.is_u64() && id.as_i64().is_none() {
            return Err(ValidationError::IdOutOfRange(i64::MAX));
        }
        let id = id.as_i64().ok_or(ValidationError::WrongType {
            field: "id",
            expected: "an integer",
            found: json_type_name(id),
        })?;
        let title = title.as_str().ok_or(ValidationError::WrongType {
            field: "title",
            expected: "a string",
            found: json_type_name(title),
        })?;
        let done = done.as_bool().ok_or(ValidationError::WrongType {
            field: "done",
            expected: "a boolean",
            found: json_type_name(done),
        })?;

        if id < 1 {
            return Err(ValidationError::NonPositiveId(id));
        }
        let id = u32::try_from(id).map_err(|_| ValidationError::IdOutOfRange(id))?;

        let task = Task {
            id,
            title: title.to_string(),
            done,
        };
        task.validate()?;
        Ok(task)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Cleans up a user supplied title.
///
/// Returns the trimmed title, or `None` when it is blank or longer than
/// [`TITLE_MAX_LEN`] characters.
pub fn normalize_title(raw: &str) -> Option<String> {
    let title = raw.trim();
    if title.is_empty() || title.chars().count() > TITLE_MAX_LEN {
        return None;
    }
    Some(title.to_string())
}

/// One past the highest ID in `tasks`, or 1 for an empty list.
///
/// When the highest ID is `u32::MAX` this falls back to the lowest unused ID.
pub fn next_id(tasks: &[Task]) -> u32 {
    let Some(max) = tasks.iter().map(|t| t.id).max() else {
        return 1;
    };
    max.checked_add(1).unwrap_or_else(|| {
        let taken: HashSet<u32> = tasks.iter().map(|t| t.id).collect();
        free_id(&taken, 1).unwrap_or(1)
    })
}

/// First ID at or above `from` that is not in `taken`, wrapping around to 1
/// after `u32::MAX`. `None` only when every valid ID is in use.
pub fn free_id(taken: &HashSet<u32>, from: u32) -> Option<u32> {
    let from = from.max(1);
    (from..=u32::MAX).chain(1..from).find(|id| !taken.contains(id))
}

/// Outcome of folding incoming tasks into an existing list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub added: usize,
    /// `(original_id, assigned_id)` for every incoming task that was renumbered.
    pub reassigned: Vec<(u32, u32)>,
}

/// Appends `incoming` to `existing`, renumbering colliding IDs.
///
/// An incoming task keeps its ID unless that ID is already taken, either by an
/// existing task or by an incoming task appended earlier in the same call. A
/// renumbered task gets the next free ID above every ID of both lists, so the
/// result never contains duplicates. Once IDs run past `u32::MAX` the lowest
/// free ID is used instead.
pub fn import_merge(existing: &mut Vec<Task>, incoming: Vec<Task>) -> MergeReport {
    let mut taken: HashSet<u32> = existing.iter().map(|t| t.id).collect();
    let mut next = next_id(existing).max(next_id(&incoming));
    let mut report = MergeReport::default();

    for mut task in incoming {
        if !taken.insert(task.id) {
            let Some(id) = free_id(&taken, next) else {
                tracing::warn!(id = task.id, "no free task ID left, dropping imported task");
                continue;
            };
            let original = task.id;
            task.id = id;
            next = id.checked_add(1).unwrap_or(1);
            taken.insert(id);
            report.reassigned.push((original, id));
        }
        existing.push(task);
        report.added += 1;
    }

    report
}

/// Aggregate counters for the list view and statistics screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl TaskStats {
    pub fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.done).count();
        TaskStats {
            total: tasks.len(),
            completed,
            pending: tasks.len() - completed,
        }
    }
}
