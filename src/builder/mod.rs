//! Fluent exhaustive matching over an [`AsyncResult`](crate::AsyncResult).
//!
//! A [`Builder`] lets each failure kind be handled exactly once, in order:
//! success, typed errors (all of them, by predicate, or by tag), defects and
//! interruptions. The first clause that matches wins.
//!
//! Rust cannot subtract the handled variants from the error type, so coverage
//! is tracked at runtime instead: for errors implementing
//! [`Tagged`](crate::traits::Tagged), [`Builder::remaining_tags`] reports the
//! tags a chain does not handle, which makes exhaustiveness a one-line
//! assertion in a test.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::{AsyncResult, Cause};
//!
//! let cancelled = AsyncResult::<u32, &str>::failure(Cause::interrupt());
//!
//! let status = cancelled
//!     .builder()
//!     .on_success(|_, _| "done")
//!     .on_error(|_, _| "failed")
//!     .on_interrupt(|_| "cancelled")
//!     .on_defect(|_, _| "crashed")
//!     .render();
//!
//! assert_eq!(status, Some("cancelled"));
//! ```

mod core;
mod coverage;

pub use self::core::Builder;
