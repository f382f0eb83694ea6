//! Tokio-specific async extensions.
//!
//! Spawning work as a Tokio task is what lets cancellation be observed: an
//! aborted task surfaces as [`Cause::Interrupt`](crate::Cause::Interrupt) and a
//! panicked task as a [`Defect`].
//!
//! # Feature Flag
//!
//! Requires the `async-tokio` feature:
//!
//! ```toml
//! [dependencies]
//! outcome-rail = { version = "0.1", features = ["async-tokio"] }
//! ```

use core::future::Future;

use tokio::task::{JoinError, JoinHandle};

use crate::types::{AsyncResult, Defect};

/// Converts the output of an awaited [`JoinHandle`] into an [`AsyncResult`].
///
/// - `Ok(Ok(value))` becomes a success
/// - `Ok(Err(error))` becomes a typed failure
/// - a cancelled task becomes an interruption
/// - a panicked task becomes a defect carrying the panic message
pub fn from_join_result<A, E>(joined: Result<Result<A, E>, JoinError>) -> AsyncResult<A, E> {
    match joined {
        Ok(result) => AsyncResult::from_result(result),
        Err(error) if error.is_cancelled() => {
            crate::trace_event!(debug, "task was cancelled");
            AsyncResult::interrupt()
        },
        Err(error) => {
            let defect = match error.try_into_panic() {
                Ok(payload) => Defect::from_panic(&*payload),
                Err(error) => Defect::from_error(&error),
            };
            crate::trace_event!(error, defect = %defect, "task panicked");
            AsyncResult::die(defect)
        },
    }
}

/// Awaits a spawned task and converts its outcome.
///
/// # Example
///
/// ```rust
/// use outcome_rail::async_ext::join;
///
/// #[tokio::main]
/// async fn main() {
///     let handle = tokio::spawn(async { Ok::<_, String>(7) });
///     let result = join(handle).await;
///     assert_eq!(result.value(), Some(&7));
/// }
/// ```
pub async fn join<A, E>(handle: JoinHandle<Result<A, E>>) -> AsyncResult<A, E> {
    from_join_result(handle.await)
}

/// Runs `future` to completion on a new Tokio task.
///
/// Must be called from within a Tokio runtime.
///
/// # Example
///
/// ```rust
/// use outcome_rail::async_ext::run;
///
/// #[tokio::main]
/// async fn main() {
///     let result = run(async { Ok::<_, String>(21 * 2) }).await;
///     assert_eq!(result.value(), Some(&42));
///
///     let crashed = run(async {
///         if true {
///             panic!("invariant violated");
///         }
///         Ok::<u8, String>(0)
///     })
///     .await;
///     assert_eq!(crashed.defect().map(|d| d.message()), Some("invariant violated"));
/// }
/// ```
pub async fn run<Fut, A, E>(future: Fut) -> AsyncResult<A, E>
where
    Fut: Future<Output = Result<A, E>> + Send + 'static,
    A: Send + 'static,
    E: Send + 'static,
{
    join(tokio::spawn(future)).await
}
