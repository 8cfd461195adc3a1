//! Backend access for the task list.
//!
//! [`TaskApi`] is the seam between the reducer and whatever owns the
//! authoritative list. [`MockTaskApi`] is an in-process stand-in that adds
//! artificial latency to every call.

use crate::types::{Task, TaskId};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Latency applied by [`MockTaskApi`] unless configured otherwise
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(500);

/// Title of the record a seeded backend starts with
pub const SAMPLE_TITLE: &str = "Sample Task";

/// Boxed future returned by [`TaskApi`] methods
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// Errors a task backend may report
///
/// [`MockTaskApi`] never fails; these exist for backends that can.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The backend could not be reached
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// The backend refused the request
    #[error("request rejected: {0}")]
    Rejected(String),
}

/// Asynchronous CRUD access to the authoritative task list
///
/// Uses explicit `Pin<Box<dyn Future>>` returns so the trait stays usable
/// as `Arc<dyn TaskApi>` inside effects.
pub trait TaskApi: Send + Sync {
    /// Snapshot of every task
    fn list(&self) -> ApiFuture<'_, Vec<Task>>;

    /// Create a task with the next identifier, not completed
    fn create(&self, title: String) -> ApiFuture<'_, Task>;

    /// Remove the task with `id`; absent ids are ignored
    ///
    /// Resolves to `id` either way.
    fn remove(&self, id: TaskId) -> ApiFuture<'_, TaskId>;

    /// Replace the stored task with the same id; absent ids are ignored
    ///
    /// Resolves to `task` either way.
    fn replace(&self, task: Task) -> ApiFuture<'_, Task>;
}

#[derive(Debug)]
struct Backing {
    tasks: Vec<Task>,
    /// `None` once every identifier has been handed out
    next_id: Option<TaskId>,
}

/// In-process task backend with simulated network latency
///
/// Clones share one backing list, so a test can keep a handle to inspect
/// what the store's environment mutated.
///
/// Mutations are applied when the call is made; the result is delivered
/// after the latency.
///
/// # Example
///
/// ```
/// use taskstore::api::{MockTaskApi, TaskApi};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), taskstore::api::ApiError> {
/// let api = MockTaskApi::seeded().with_latency(Duration::ZERO);
/// let task = api.create("Buy milk".to_string()).await?;
/// assert_eq!(task.id.get(), 2);
/// assert_eq!(api.list().await?.len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockTaskApi {
    backing: Arc<Mutex<Backing>>,
    latency: Duration,
}

impl MockTaskApi {
    /// Empty backend; the first created task gets id 1
    #[must_use]
    pub fn new() -> Self {
        Self::with_tasks(Vec::new())
    }

    /// Backend holding a single "Sample Task" with id 1
    #[must_use]
    pub fn seeded() -> Self {
        Self::with_tasks([Task::new(TaskId::new(1), SAMPLE_TITLE)])
    }

    /// Backend holding `tasks`; new ids continue after the largest one
    ///
    /// Later duplicates of an id are dropped so the list stays unique.
    #[must_use]
    pub fn with_tasks<I>(tasks: I) -> Self
    where
        I: IntoIterator<Item = Task>,
    {
        let mut unique: Vec<Task> = Vec::new();
        for task in tasks {
            if !unique.iter().any(|t| t.id == task.id) {
                unique.push(task);
            }
        }

        let next_id = unique
            .iter()
            .map(|t| t.id)
            .max()
            .map_or(Some(TaskId::new(1)), TaskId::next);

        Self {
            backing: Arc::new(Mutex::new(Backing {
                tasks: unique,
                next_id,
            })),
            latency: DEFAULT_LATENCY,
        }
    }

    /// Set the artificial delay applied to every call
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Configured artificial delay
    #[must_use]
    pub const fn latency(&self) -> Duration {
        self.latency
    }

    /// Copy of the authoritative list, without latency
    #[must_use]
    pub fn snapshot(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Backing> {
        self.backing.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Deliver `value` after the configured latency
    fn respond<T>(&self, value: T) -> ApiFuture<'static, T>
    where
        T: Send + 'static,
    {
        let latency = self.latency;
        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            Ok(value)
        })
    }
}

impl Default for MockTaskApi {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskApi for MockTaskApi {
    fn list(&self) -> ApiFuture<'_, Vec<Task>> {
        let tasks = self.snapshot();
        tracing::debug!(count = tasks.len(), "mock backend: list");
        self.respond(tasks)
    }

    fn create(&self, title: String) -> ApiFuture<'_, Task> {
        let task = {
            let mut backing = self.lock();
            match backing.next_id {
                Some(id) => {
                    backing.next_id = id.next();
                    let task = Task::new(id, title);
                    backing.tasks.push(task.clone());
                    Some(task)
                },
                None => None,
            }
        };

        let Some(task) = task else {
            tracing::warn!("mock backend: create rejected, ids exhausted");
            return Box::pin(async { Err(ApiError::Rejected("task ids exhausted".to_string())) });
        };
        tracing::debug!(id = %task.id, "mock backend: create");
        self.respond(task)
    }

    fn remove(&self, id: TaskId) -> ApiFuture<'_, TaskId> {
        let removed = {
            let mut backing = self.lock();
            let before = backing.tasks.len();
            backing.tasks.retain(|t| t.id != id);
            before != backing.tasks.len()
        };
        tracing::debug!(%id, removed, "mock backend: remove");
        self.respond(id)
    }

    fn replace(&self, task: Task) -> ApiFuture<'_, Task> {
        let replaced = {
            let mut backing = self.lock();
            match backing.tasks.iter_mut().find(|t| t.id == task.id) {
                Some(slot) => {
                    *slot = task.clone();
                    true
                },
                None => false,
            }
        };
        tracing::debug!(id = %task.id, replaced, "mock backend: replace");
        self.respond(task)
    }
}
