//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use outcome_rail::prelude::*;
//! ```
//!
//! # What's Included
//!
//! - **Macros**: [`tagged_error!`]
//! - **Types**: [`AsyncResult`], [`Cause`], [`Defect`], [`Builder`], [`Field`]
//! - **Functions**: [`all`], [`all_keyed`]
//! - **Traits**: [`ResultExt`], [`Tagged`]
//!
//! # Examples
//!
//! ```
//! use outcome_rail::prelude::*;
//!
//! fn load(id: u32) -> AsyncResult<String, &'static str> {
//!     if id == 0 {
//!         AsyncResult::fail("invalid id")
//!     } else {
//!         AsyncResult::success(format!("user {}", id))
//!     }
//! }
//!
//! let names: AsyncResult<Vec<String>, &str> = all([load(1), load(2)]);
//! assert_eq!(names.value().map(Vec::len), Some(2));
//! ```

// Macros
pub use crate::tagged_error;

// Core types
pub use crate::builder::Builder;
pub use crate::types::{all, all_keyed, AsyncResult, Cause, Defect, Field, Outcome};

// Traits
pub use crate::traits::{ResultExt, Tagged};

#[cfg(feature = "async")]
pub use crate::async_ext::FutureResultExt;

#[cfg(feature = "tracing")]
pub use crate::tracing_ext::ResultTraceExt;
