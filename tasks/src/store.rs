//! Awaitable facade over the task store.
//!
//! Each write resolves once the backend result has been applied, which is
//! what a UI layer awaiting a dispatched operation expects.

use crate::api::{MockTaskApi, TaskApi};
use crate::config::TasksConfig;
use crate::reducer::{TasksEnvironment, TasksReducer};
use crate::types::{Filter, Task, TaskId, TasksAction, TasksState};
use std::sync::Arc;
use taskstore_runtime::{Store, StoreConfig, StoreError};

/// Store specialised to the task list
pub type TasksStore = Store<TasksState, TasksAction, TasksEnvironment, TasksReducer>;

/// Task list state container
///
/// Cloning yields another handle onto the same store.
///
/// # Example
///
/// ```no_run
/// use taskstore::{Filter, MockTaskApi, TaskList};
///
/// # async fn example() -> Result<(), taskstore_runtime::StoreError> {
/// let tasks = TaskList::new(MockTaskApi::seeded());
/// tasks.fetch_all().await?;
/// tasks.add_one("Buy milk").await?;
/// tasks.set_filter(Filter::Active).await?;
/// println!("{} open", tasks.filtered_view().await.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TaskList {
    store: TasksStore,
}

impl TaskList {
    /// Creates a task list over `api` with an empty cache
    #[must_use]
    pub fn new<A>(api: A) -> Self
    where
        A: TaskApi + 'static,
    {
        Self::with_store_config(Arc::new(api), StoreConfig::default())
    }

    /// Creates a task list over a shared backend with a custom store config
    #[must_use]
    pub fn with_store_config(api: Arc<dyn TaskApi>, config: StoreConfig) -> Self {
        let store = Store::with_config(
            TasksState::new(),
            TasksReducer::new(),
            TasksEnvironment::new(api),
            config,
        );
        Self { store }
    }

    /// Builds the mock backend and store described by `config`
    #[must_use]
    pub fn from_config(config: &TasksConfig) -> (Self, MockTaskApi) {
        let api = if config.seed_sample {
            MockTaskApi::seeded()
        } else {
            MockTaskApi::new()
        }
        .with_latency(config.latency);

        let list = Self::with_store_config(
            Arc::new(api.clone()),
            StoreConfig::default().with_broadcast_capacity(config.broadcast_capacity),
        );
        (list, api)
    }

    /// The underlying store, for subscribing to actions or raw dispatch
    #[must_use]
    pub const fn store(&self) -> &TasksStore {
        &self.store
    }

    /// Send `action` and wait until its backend result is applied
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the store is shutting down.
    pub async fn dispatch(&self, action: TasksAction) -> Result<(), StoreError> {
        tracing::debug!(?action, "dispatch");
        let mut handle = self.store.send(action).await?;
        handle.wait().await;
        Ok(())
    }

    /// Replace the cache with the backend's list
    ///
    /// # Errors
    ///
    /// See [`TaskList::dispatch`].
    pub async fn fetch_all(&self) -> Result<(), StoreError> {
        self.dispatch(TasksAction::FetchAll).await
    }

    /// Create a task and append it to the cache
    ///
    /// # Errors
    ///
    /// See [`TaskList::dispatch`].
    pub async fn add_one(&self, title: impl Into<String>) -> Result<(), StoreError> {
        self.dispatch(TasksAction::AddOne {
            title: title.into(),
        })
        .await
    }

    /// Delete a task from the backend and the cache
    ///
    /// # Errors
    ///
    /// See [`TaskList::dispatch`].
    pub async fn delete_one(&self, id: TaskId) -> Result<(), StoreError> {
        self.dispatch(TasksAction::DeleteOne { id }).await
    }

    /// Flip a cached task's completion flag; unknown ids are ignored
    ///
    /// # Errors
    ///
    /// See [`TaskList::dispatch`].
    pub async fn toggle_one(&self, id: TaskId) -> Result<(), StoreError> {
        self.dispatch(TasksAction::ToggleOne { id }).await
    }

    /// Change the view mode
    ///
    /// # Errors
    ///
    /// See [`TaskList::dispatch`].
    pub async fn set_filter(&self, filter: Filter) -> Result<(), StoreError> {
        self.dispatch(TasksAction::SetFilter { filter }).await
    }

    /// Cached tasks visible under the current filter
    pub async fn filtered_view(&self) -> Vec<Task> {
        self.store
            .state(|s| s.filtered_tasks().into_iter().cloned().collect())
            .await
    }

    /// Whether a backend call is outstanding
    pub async fn is_loading(&self) -> bool {
        self.store.state(TasksState::is_loading).await
    }

    /// Every cached task, ignoring the filter
    pub async fn tasks(&self) -> Vec<Task> {
        self.store.state(|s| s.tasks.clone()).await
    }

    /// Current filter
    pub async fn filter(&self) -> Filter {
        self.store.state(|s| s.filter).await
    }

    /// Message of the last failed backend call
    pub async fn last_error(&self) -> Option<String> {
        self.store.state(|s| s.last_error.clone()).await
    }

    /// Copy of the whole state
    pub async fn snapshot(&self) -> TasksState {
        self.store.state(Clone::clone).await
    }
}
