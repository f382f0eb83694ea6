//! Result, cause and defect types.
//!
//! This module provides the errors-as-values core: [`AsyncResult`], the
//! [`Cause`] tree it fails with, and the helpers that combine and render them.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::{AsyncResult, Cause};
//!
//! let failed = AsyncResult::<u32, &str>::failure(
//!     Cause::fail("quota exceeded").then(Cause::die("rollback failed")),
//! );
//!
//! assert_eq!(failed.error(), Some(&"quota exceeded"));
//! assert_eq!(failed.cause().unwrap().to_string(), "quota exceeded -> defect: rollback failed");
//! ```

pub mod all;
pub mod async_result;
pub mod cause;
pub mod cause_formatter;
pub mod defect;
pub mod fault;
pub mod timestamp;

pub use all::{all, all_keyed, Field};
pub use async_result::{AsyncResult, Outcome};
pub use cause::{Cause, CauseNode, CauseVec, Leaves};
pub use cause_formatter::{CauseFormatConfig, CauseFormatter, Composition};
pub use defect::Defect;
pub use fault::{MissingValue, UnmatchedFailure};
pub use timestamp::Timestamp;
