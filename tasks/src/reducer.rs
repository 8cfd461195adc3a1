//! Reducer logic for the task list.
//!
//! Commands bump the in-flight counter and describe a backend call; the
//! result action applies the outcome to the cache and releases the
//! counter. Failures release it too, so loading never sticks.

use crate::api::TaskApi;
use crate::types::{Operation, Task, TaskId, TasksAction, TasksState};
use std::sync::Arc;
use taskstore_core::{SmallVec, effect::Effect, reducer::Reducer, request_effect, smallvec};

/// Environment dependencies for the task reducer
#[derive(Clone)]
pub struct TasksEnvironment {
    /// Backend holding the authoritative list
    pub api: Arc<dyn TaskApi>,
}

impl TasksEnvironment {
    /// Creates a new `TasksEnvironment`
    #[must_use]
    pub fn new(api: Arc<dyn TaskApi>) -> Self {
        Self { api }
    }
}

/// Reducer for the task list
#[derive(Clone, Debug, Default)]
pub struct TasksReducer;

impl TasksReducer {
    /// Creates a new `TasksReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn begin_request(state: &mut TasksState) {
        state.in_flight += 1;
    }

    fn finish_request(state: &mut TasksState, error: Option<String>) {
        state.in_flight = state.in_flight.saturating_sub(1);
        state.last_error = error;
    }

    fn failed(operation: Operation, error: &impl ToString) -> TasksAction {
        TasksAction::RequestFailed {
            operation,
            error: error.to_string(),
        }
    }

    /// Inserts `task`, replacing a cached record with the same id
    fn upsert(state: &mut TasksState, task: Task) {
        match state.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => *slot = task,
            None => state.tasks.push(task),
        }
    }

    fn replace_existing(state: &mut TasksState, task: Task) {
        if let Some(slot) = state.tasks.iter_mut().find(|t| t.id == task.id) {
            *slot = task;
        }
    }

    fn remove(state: &mut TasksState, id: TaskId) {
        state.tasks.retain(|t| t.id != id);
    }
}

impl Reducer for TasksReducer {
    type State = TasksState;
    type Action = TasksAction;
    type Environment = TasksEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            TasksAction::FetchAll => {
                Self::begin_request(state);
                let api = Arc::clone(&env.api);

                smallvec![request_effect! {
                    call: api.list().await,
                    on_ok: |tasks| TasksAction::TasksLoaded { tasks },
                    on_err: |error| Self::failed(Operation::List, &error)
                }]
            },

            TasksAction::AddOne { title } => {
                Self::begin_request(state);
                let api = Arc::clone(&env.api);

                smallvec![request_effect! {
                    call: api.create(title).await,
                    on_ok: |task| TasksAction::TaskAdded { task },
                    on_err: |error| Self::failed(Operation::Create, &error)
                }]
            },

            TasksAction::DeleteOne { id } => {
                Self::begin_request(state);
                let api = Arc::clone(&env.api);

                smallvec![request_effect! {
                    call: api.remove(id).await,
                    on_ok: |id| TasksAction::TaskDeleted { id },
                    on_err: |error| Self::failed(Operation::Remove, &error)
                }]
            },

            TasksAction::ToggleOne { id } => {
                // Looked up in the local cache, not the backend
                let Some(updated) = state.get(id).map(Task::toggled) else {
                    tracing::debug!(%id, "toggle skipped: task not cached");
                    return SmallVec::new();
                };

                Self::begin_request(state);
                let api = Arc::clone(&env.api);

                smallvec![request_effect! {
                    call: api.replace(updated).await,
                    on_ok: |task| TasksAction::TaskToggled { task },
                    on_err: |error| Self::failed(Operation::Replace, &error)
                }]
            },

            TasksAction::SetFilter { filter } => {
                state.filter = filter;
                SmallVec::new()
            },

            // ========== Backend results ==========
            TasksAction::TasksLoaded { tasks } => {
                state.tasks = tasks;
                Self::finish_request(state, None);
                SmallVec::new()
            },

            TasksAction::TaskAdded { task } => {
                Self::upsert(state, task);
                Self::finish_request(state, None);
                SmallVec::new()
            },

            TasksAction::TaskDeleted { id } => {
                Self::remove(state, id);
                Self::finish_request(state, None);
                SmallVec::new()
            },

            TasksAction::TaskToggled { task } => {
                Self::replace_existing(state, task);
                Self::finish_request(state, None);
                SmallVec::new()
            },

            TasksAction::RequestFailed { operation, error } => {
                tracing::warn!(%operation, %error, "backend request failed");
                Self::finish_request(state, Some(format!("{operation} failed: {error}")));
                SmallVec::new()
            },
        }
    }
}
