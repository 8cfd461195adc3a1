//! Domain types for the task list.
//!
//! A task list is an ordered sequence of task records mirrored from the
//! backend, a filter selector over it, and a count of backend calls still
//! in flight.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a task, assigned by the backend
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Creates a `TaskId` from its raw value
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The identifier that follows this one, or `None` at `u64::MAX`
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single task record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,
    /// Title of the task
    pub title: String,
    /// Whether the task is completed
    pub completed: bool,
}

impl Task {
    /// Creates a new, not yet completed task
    #[must_use]
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
        }
    }

    /// Returns a copy with the completion flag flipped
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}

/// View mode over the task list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Every task
    #[default]
    All,
    /// Only tasks that are not completed
    Active,
    /// Only completed tasks
    Completed,
}

impl Filter {
    /// All selector values, in display order
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    /// Whether `task` is visible under this selector
    #[must_use]
    pub const fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }

    /// Lowercase name, as accepted by [`FromStr`]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown filter name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter '{0}', expected one of: all, active, completed")]
pub struct ParseFilterError(String);

impl FromStr for Filter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseFilterError(s.to_string())),
        }
    }
}

/// State of the task list
///
/// `tasks` is a mirror of the backend, current as of the last completed
/// call. Order is the order the backend reported or the order results
/// arrived in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TasksState {
    /// Cached task records
    pub tasks: Vec<Task>,
    /// Current view mode
    pub filter: Filter,
    /// Backend calls started and not yet answered
    pub in_flight: usize,
    /// Message of the last failed backend call, if the latest result was a failure
    pub last_error: Option<String>,
}

impl TasksState {
    /// Creates an empty state with the `All` filter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state whose cache already holds `tasks`
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            ..Self::default()
        }
    }

    /// Tasks visible under the current filter
    #[must_use]
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| self.filter.matches(task))
            .collect()
    }

    /// Whether any backend call is outstanding
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Returns the number of cached tasks
    #[must_use]
    pub fn count(&self) -> usize {
        self.tasks.len()
    }

    /// Returns the number of completed tasks
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Returns the number of tasks still to do
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.count() - self.completed_count()
    }

    /// Returns a task by ID
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Checks if a task exists
    #[must_use]
    pub fn exists(&self, id: TaskId) -> bool {
        self.get(id).is_some()
    }
}

/// Backend operation, used to label failures
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// `list`
    List,
    /// `create`
    Create,
    /// `remove`
    Remove,
    /// `replace`
    Replace,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Remove => "remove",
            Self::Replace => "replace",
        })
    }
}

/// Actions for the task list
///
/// Commands express what a consumer wants; the remaining variants carry
/// backend results back into the reducer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TasksAction {
    // ========== Commands ==========
    /// Command: Reload the whole list from the backend
    FetchAll,

    /// Command: Create a task
    AddOne {
        /// Title of the new task
        title: String,
    },

    /// Command: Delete a task
    DeleteOne {
        /// Task to delete
        id: TaskId,
    },

    /// Command: Flip a task's completion flag
    ToggleOne {
        /// Task to toggle
        id: TaskId,
    },

    /// Command: Change the view mode
    SetFilter {
        /// New selector
        filter: Filter,
    },

    // ========== Backend results ==========
    /// The backend returned its full list
    TasksLoaded {
        /// Authoritative list
        tasks: Vec<Task>,
    },

    /// The backend created a task
    TaskAdded {
        /// Created record
        task: Task,
    },

    /// The backend removed a task
    TaskDeleted {
        /// Removed identifier
        id: TaskId,
    },

    /// The backend stored a toggled task
    TaskToggled {
        /// Stored record
        task: Task,
    },

    /// A backend call failed
    RequestFailed {
        /// Which call failed
        operation: Operation,
        /// Error message
        error: String,
    },
}

impl TasksAction {
    /// Whether this action is a consumer command
    #[must_use]
    pub const fn is_command(&self) -> bool {
        matches!(
            self,
            Self::FetchAll
                | Self::AddOne { .. }
                | Self::DeleteOne { .. }
                | Self::ToggleOne { .. }
                | Self::SetFilter { .. }
        )
    }

    /// Whether this action carries a backend result
    #[must_use]
    pub const fn is_result(&self) -> bool {
        !self.is_command()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Task> {
        vec![
            Task::new(TaskId::new(1), "Sample Task"),
            Task {
                completed: true,
                ..Task::new(TaskId::new(2), "Buy milk")
            },
            Task::new(TaskId::new(3), "Walk dog"),
        ]
    }

    #[test]
    fn task_new_is_incomplete() {
        let task = Task::new(TaskId::new(4), "Write docs");
        assert_eq!(task.id.get(), 4);
        assert_eq!(task.title, "Write docs");
        assert!(!task.completed);
    }

    #[test]
    fn next_id_stops_at_max() {
        assert_eq!(TaskId::new(1).next(), Some(TaskId::new(2)));
        assert_eq!(TaskId::new(u64::MAX).next(), None);
    }

    #[test]
    fn toggled_flips_only_the_flag() {
        let task = Task::new(TaskId::new(1), "Sample Task");
        let toggled = task.toggled();
        assert!(toggled.completed);
        assert_eq!(toggled.id, task.id);
        assert_eq!(toggled.title, task.title);
        assert_eq!(toggled.toggled(), task);
    }

    #[test]
    fn filter_views_partition_the_cache() {
        let mut state = TasksState::with_tasks(sample());

        state.filter = Filter::All;
        assert_eq!(state.filtered_tasks().len(), 3);

        state.filter = Filter::Active;
        let active: Vec<u64> = state.filtered_tasks().iter().map(|t| t.id.get()).collect();
        assert_eq!(active, vec![1, 3]);

        state.filter = Filter::Completed;
        let done: Vec<u64> = state.filtered_tasks().iter().map(|t| t.id.get()).collect();
        assert_eq!(done, vec![2]);

        assert_eq!(state.active_count() + state.completed_count(), state.count());
    }

    #[test]
    fn filter_parses_case_insensitively() {
        assert_eq!("all".parse::<Filter>(), Ok(Filter::All));
        assert_eq!(" Active ".parse::<Filter>(), Ok(Filter::Active));
        assert_eq!("COMPLETED".parse::<Filter>(), Ok(Filter::Completed));
        assert!("done".parse::<Filter>().is_err());

        for filter in Filter::ALL {
            assert_eq!(filter.to_string().parse::<Filter>(), Ok(filter));
        }
    }

    #[test]
    fn filter_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Filter::Completed).ok().as_deref(),
            Some("\"completed\"")
        );
    }

    #[test]
    fn task_id_serializes_as_number() {
        let task = Task::new(TaskId::new(7), "x");
        let json = serde_json::to_value(&task).unwrap_or_default();
        assert_eq!(json["id"], 7);
    }

    #[test]
    fn loading_follows_in_flight() {
        let mut state = TasksState::new();
        assert!(!state.is_loading());
        state.in_flight = 2;
        assert!(state.is_loading());
    }

    #[test]
    fn lookup_by_id() {
        let state = TasksState::with_tasks(sample());
        assert!(state.exists(TaskId::new(2)));
        assert!(!state.exists(TaskId::new(9)));
        assert_eq!(state.get(TaskId::new(3)).map(|t| t.title.as_str()), Some("Walk dog"));
    }

    #[test]
    fn command_and_result_split() {
        assert!(TasksAction::FetchAll.is_command());
        assert!(TasksAction::SetFilter { filter: Filter::Active }.is_command());
        assert!(TasksAction::TaskDeleted { id: TaskId::new(1) }.is_result());
        assert!(
            TasksAction::RequestFailed {
                operation: Operation::List,
                error: "down".to_string()
            }
            .is_result()
        );
    }
}
