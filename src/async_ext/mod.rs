//! Async extensions for outcome-rail.
//!
//! This is the boundary between whatever executes asynchronous work and the
//! synchronous result algebra: each unit of work is driven to completion and
//! reported exactly once as an [`AsyncResult`](crate::AsyncResult).
//!
//! # Feature Flag
//!
//! Requires the `async` feature to be enabled; the Tokio pieces
//! ([`run`], [`join`], [`SharedContext`], [`ManagedRuntime`]) need `async-tokio`:
//!
//! ```toml
//! [dependencies]
//! outcome-rail = { version = "0.1", features = ["async-tokio"] }
//! ```
//!
//! # Examples
//!
//! ```ignore
//! use outcome_rail::prelude::*;
//!
//! async fn fetch_user(id: u64) -> AsyncResult<User, ApiError> {
//!     fetch_from_db(id).into_async_result().await
//! }
//! ```

mod future_ext;
mod result_future;

#[cfg(feature = "async-tokio")]
mod managed_runtime;
#[cfg(feature = "async-tokio")]
mod shared_context;
#[cfg(feature = "async-tokio")]
mod tokio_ext;

pub use future_ext::FutureResultExt;
pub use result_future::ResultFuture;

#[cfg(feature = "async-tokio")]
pub use managed_runtime::ManagedRuntime;
#[cfg(feature = "async-tokio")]
pub use shared_context::SharedContext;
#[cfg(feature = "async-tokio")]
pub use tokio_ext::{from_join_result, join, run};
