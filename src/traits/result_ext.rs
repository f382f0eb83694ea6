//! Extension trait for lifting `Result` values.

use crate::types::{AsyncResult, Defect};

/// Extension trait for turning a plain `Result` into an [`AsyncResult`].
///
/// # Examples
///
/// ```
/// use outcome_rail::traits::ResultExt;
/// use outcome_rail::AsyncResult;
///
/// // An expected error stays typed.
/// let r: AsyncResult<i32, std::num::ParseIntError> = "x".parse::<i32>().into_async_result();
/// assert!(r.error().is_some());
///
/// // An error that should never happen becomes a defect.
/// let r: AsyncResult<i32, ()> = "x".parse::<i32>().or_die();
/// assert!(r.defect().is_some());
/// ```
pub trait ResultExt<A, E> {
    /// Keeps the error as a typed failure.
    fn into_async_result(self) -> AsyncResult<A, E>;

    /// Treats the error as a defect, leaving the typed error set untouched.
    fn or_die<F>(self) -> AsyncResult<A, F>
    where
        E: std::error::Error;
}

impl<A, E> ResultExt<A, E> for Result<A, E> {
    #[inline]
    fn into_async_result(self) -> AsyncResult<A, E> {
        AsyncResult::from_result(self)
    }

    #[inline]
    fn or_die<F>(self) -> AsyncResult<A, F>
    where
        E: std::error::Error,
    {
        match self {
            Ok(value) => AsyncResult::success(value),
            Err(error) => AsyncResult::die(Defect::from_error(&error)),
        }
    }
}
