//! Declarative macros for ergonomic effect construction
//!
//! Reducers mostly return a single future that calls into the environment
//! and maps the outcome to a feedback action. `request_effect!` keeps that short.

/// Create an `Effect::Future` that awaits a fallible call and routes the
/// result to one of two feedback actions
///
/// Both arms always produce an action, so a reducer tracking outstanding
/// requests is guaranteed to hear back.
///
/// # Example
///
/// ```rust,ignore
/// use taskstore_core::request_effect;
///
/// request_effect! {
///     call: api.create(title).await,
///     on_ok: |task| TasksAction::TaskAdded { task },
///     on_err: |error| TasksAction::RequestFailed { operation: Operation::Create, error: error.to_string() }
/// }
/// ```
#[macro_export]
macro_rules! request_effect {
    (
        call: $call:expr,
        on_ok: |$ok_param:ident| $ok_body:expr,
        on_err: |$err_param:ident| $err_body:expr
    ) => {
        $crate::effect::Effect::Future(::std::boxed::Box::pin(async move {
            match $call {
                ::std::result::Result::Ok($ok_param) => ::std::option::Option::Some($ok_body),
                ::std::result::Result::Err($err_param) => ::std::option::Option::Some($err_body),
            }
        }))
    };
}
