//! Errors-as-values for the outcome of asynchronous work.
//!
//! An operation that ran to completion either produced a value or failed with a
//! [`Cause`]: a typed domain error, an interruption, or an unexpected defect.
//! [`AsyncResult`] holds that outcome as plain data, and the [`builder`] module
//! matches on it fluently, one failure kind at a time.
//!
//! Each submodule re-exports its public surface from here, so consumers can
//! simply depend on `outcome_rail::*` or pick focused pieces as needed.
//!
//! # Examples
//!
//! ## Inspecting a Result
//!
//! ```
//! use outcome_rail::{AsyncResult, Cause};
//!
//! let done = AsyncResult::<i32, &str>::from_outcome(Ok(42));
//! assert!(done.is_success());
//! assert_eq!(done.value(), Some(&42));
//!
//! let cancelled = AsyncResult::<i32, &str>::from_outcome(Err(Cause::interrupt()));
//! assert!(cancelled.is_interrupted());
//! assert_eq!(cancelled.error(), None);
//! ```
//!
//! ## Exhaustive Matching
//!
//! ```
//! use outcome_rail::{tagged_error, AsyncResult};
//!
//! tagged_error! {
//!     #[derive(Debug, Clone)]
//!     enum ApiError {
//!         NotFound,
//!         Unauthorized,
//!     }
//! }
//!
//! let result = AsyncResult::<u32, ApiError>::fail(ApiError::Unauthorized);
//! let chain = result
//!     .builder()
//!     .on_success(|v, _| *v as i64)
//!     .on_error_tag("NotFound", |_, _| 404)
//!     .on_error_tag("Unauthorized", |_, _| 401);
//!
//! assert!(chain.is_exhaustive());
//! assert_eq!(chain.render(), Some(401));
//! ```
//!
//! ## Combining Results
//!
//! ```
//! use outcome_rail::{all, AsyncResult};
//!
//! let combined: AsyncResult<Vec<i32>, &str> =
//!     all([AsyncResult::success(1), AsyncResult::success(2)]);
//! assert_eq!(combined.into_value(), Some(vec![1, 2]));
//! ```

/// Fluent first-match-wins matcher
pub mod builder;
/// Free-function conversions between `Result`, `Option` and `AsyncResult`
pub mod convert;
/// Macros for tagged error declarations
pub mod macros;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Core traits for tagged errors and result lifting
pub mod traits;
/// AsyncResult, Cause, Defect and related types
pub mod types;

/// Async extensions: futures, task joins and shared runtime context (requires `async` feature)
#[cfg(feature = "async")]
pub mod async_ext;

/// Outcome logging through `tracing` (requires `tracing` feature)
#[cfg(feature = "tracing")]
pub mod tracing_ext;

pub use builder::Builder;
pub use traits::*;
pub use types::{
    all, all_keyed, AsyncResult, Cause, CauseFormatConfig, CauseFormatter, CauseNode, Defect,
    Field, MissingValue, Outcome, Timestamp, UnmatchedFailure,
};
