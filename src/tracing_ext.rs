//! Tracing integration for outcome-rail.
//!
//! Emits one `tracing` event per result, at a level chosen by what the result
//! holds: `debug` for a success, `warn` for a typed failure, `info` for an
//! interruption and `error` for a defect.
//!
//! # Feature Flag
//!
//! Requires the `tracing` feature:
//!
//! ```toml
//! [dependencies]
//! outcome-rail = { version = "0.1", features = ["tracing"] }
//! ```

use core::fmt::Display;

use tracing::Span;

use crate::types::AsyncResult;

/// Extension trait logging the outcome an [`AsyncResult`] holds.
///
/// # Example
///
/// ```rust,ignore
/// use outcome_rail::tracing_ext::ResultTraceExt;
///
/// let user = fetch_user(id).await.logged("fetch_user");
/// ```
pub trait ResultTraceExt {
    /// Emits the event for this result under `operation`.
    fn log_outcome(&self, operation: &str);

    /// Emits the event and hands the result back.
    fn logged(self, operation: &str) -> Self
    where
        Self: Sized,
    {
        self.log_outcome(operation);
        self
    }

    /// Emits the event inside `span`.
    fn log_outcome_in(&self, span: &Span, operation: &str) {
        span.in_scope(|| self.log_outcome(operation));
    }
}

impl<A, E: Display> ResultTraceExt for AsyncResult<A, E> {
    fn log_outcome(&self, operation: &str) {
        match self {
            AsyncResult::Success { timestamp, .. } => {
                tracing::debug!(
                    operation,
                    timestamp = timestamp.as_millis(),
                    "operation succeeded"
                );
            },
            AsyncResult::Failure { cause } if cause.is_die() => {
                tracing::error!(operation, cause = %cause, "operation died");
            },
            AsyncResult::Failure { cause } if cause.is_interrupted_only() => {
                tracing::info!(operation, "operation interrupted");
            },
            AsyncResult::Failure { cause } => {
                tracing::warn!(operation, cause = %cause, "operation failed");
            },
        }
    }
}
