//! Task list state container over a mocked asynchronous backend.
//!
//! The list is driven entirely through actions:
//!
//! - Commands (`FetchAll`, `AddOne`, `DeleteOne`, `ToggleOne`, `SetFilter`)
//!   describe what a consumer wants
//! - The reducer turns backend-bound commands into effects that call
//!   [`TaskApi`] and feeds the results back as actions
//! - Derived views ([`TasksState::filtered_tasks`], [`TasksState::is_loading`])
//!   are plain reads over the state
//!
//! [`MockTaskApi`] stands in for a real backend: an explicitly constructed,
//! in-memory list that answers each call after a configurable delay.
//!
//! # Quick Start
//!
//! ```no_run
//! use taskstore::{Filter, MockTaskApi, TaskId, TaskList};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tasks = TaskList::new(MockTaskApi::seeded());
//!
//! tasks.fetch_all().await?;
//! tasks.add_one("Buy milk").await?;
//! tasks.toggle_one(TaskId::new(2)).await?;
//! tasks.delete_one(TaskId::new(1)).await?;
//!
//! tasks.set_filter(Filter::Completed).await?;
//! for task in tasks.filtered_view().await {
//!     println!("[x] {}", task.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod reducer;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use api::{ApiError, MockTaskApi, TaskApi};
pub use config::{ConfigError, TasksConfig};
pub use reducer::{TasksEnvironment, TasksReducer};
pub use store::{TaskList, TasksStore};
pub use types::{Filter, Operation, Task, TaskId, TasksAction, TasksState};
