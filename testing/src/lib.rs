//! # Taskstore Testing
//!
//! Testing utilities and helpers for taskstore reducers and stores.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given/When/Then builder for reducer tests
//! - [`assertions`]: Effect assertion helpers
//! - [`effects`]: Run effect descriptions to completion without a Store
//! - [`helpers`]: Test tracing setup
//!
//! ## Example
//!
//! ```ignore
//! use taskstore_testing::{assertions, ReducerTest};
//!
//! ReducerTest::new(TasksReducer::new())
//!     .with_env(test_environment())
//!     .given_state(TasksState::default())
//!     .when_action(TasksAction::SetFilter { filter: Filter::Completed })
//!     .then_state(|state| assert_eq!(state.filter, Filter::Completed))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```


/// Executes effect descriptions outside the Store runtime
///
/// Handy when a reducer test wants the feedback action an effect would
/// produce without spinning up a `Store`.
pub mod effects {
    use futures::future::{BoxFuture, FutureExt, join_all};
    use taskstore_core::effect::Effect;

    /// Run a single effect and collect every action it produces
    ///
    /// `Delay` effects yield their action without sleeping. `Parallel`
    /// effects are joined and their actions returned in declaration order.
    pub fn resolve<A>(effect: Effect<A>) -> BoxFuture<'static, Vec<A>>
    where
        A: Send + 'static,
    {
        async move {
            match effect {
                Effect::None => Vec::new(),
                Effect::Future(fut) => fut.await.into_iter().collect(),
                Effect::Delay { action, .. } => vec![*action],
                Effect::Parallel(effects) => join_all(effects.into_iter().map(resolve))
                    .await
                    .into_iter()
                    .flatten()
                    .collect(),
            }
        }
        .boxed()
    }

    /// Run all effects returned by one reducer call, in order
    pub async fn resolve_all<A, I>(effects: I) -> Vec<A>
    where
        A: Send + 'static,
        I: IntoIterator<Item = Effect<A>>,
    {
        let mut actions = Vec::new();
        for effect in effects {
            actions.extend(resolve(effect).await);
        }
        actions
    }
}

/// Test helpers and utilities
pub mod helpers {
    use tracing_subscriber::EnvFilter;

    /// Install a test-friendly tracing subscriber
    ///
    /// Output goes through the test writer so it is captured per test.
    /// Respects `RUST_LOG`; defaults to `warn`. Safe to call from every
    /// test: only the first call installs anything.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use helpers::init_test_tracing;
pub use reducer_test::{ReducerTest, assertions};
