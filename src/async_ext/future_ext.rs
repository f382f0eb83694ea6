//! Extension trait for `Future<Output = Result<A, E>>`.

use core::future::Future;

use super::result_future::ResultFuture;

/// Extension trait resolving result-returning futures into [`AsyncResult`](crate::AsyncResult).
///
/// # Examples
///
/// ```rust,no_run
/// use outcome_rail::prelude::*;
///
/// #[derive(Debug)]
/// struct User;
///
/// #[derive(Debug)]
/// enum ApiError {
///     NotFound,
/// }
///
/// async fn fetch_from_db(_id: u64) -> Result<User, ApiError> {
///     Err(ApiError::NotFound)
/// }
///
/// async fn fetch_user(id: u64) -> AsyncResult<User, ApiError> {
///     fetch_from_db(id).into_async_result().await
/// }
/// ```
pub trait FutureResultExt<A, E>: Future<Output = Result<A, E>> + Sized {
    /// Wraps the future so it resolves to an `AsyncResult`, capturing panics
    /// raised while polling as defects.
    fn into_async_result(self) -> ResultFuture<Self>;
}

impl<Fut, A, E> FutureResultExt<A, E> for Fut
where
    Fut: Future<Output = Result<A, E>>,
{
    #[inline]
    fn into_async_result(self) -> ResultFuture<Self> {
        ResultFuture::new(self)
    }
}
