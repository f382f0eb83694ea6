//! Core traits.
//!
//! - [`Tagged`]: typed errors with a discriminant tag, for exhaustive matching
//! - [`ResultExt`]: lifts a plain `Result` into an [`AsyncResult`](crate::AsyncResult)
//!
//! # Examples
//!
//! ```
//! use outcome_rail::traits::ResultExt;
//!
//! let parsed = "42".parse::<i32>().into_async_result();
//! assert_eq!(parsed.value(), Some(&42));
//! ```

pub mod result_ext;
pub mod tagged;

pub use result_ext::ResultExt;
pub use tagged::Tagged;
