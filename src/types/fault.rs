//! Payloads raised by the two panicking exits of the crate.
//!
//! [`AsyncResult::get_or_panic`](crate::AsyncResult::get_or_panic) and
//! [`Builder::render`](crate::builder::Builder::render) panic with these values
//! through [`std::panic::panic_any`], so a supervisor that catches the unwind can
//! downcast the payload and recover the original [`Cause`]. Their
//! non-panicking twins return the same values as errors.
use core::fmt;

use crate::types::Cause;

/// A value was requested from a failed result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingValue<E> {
    pub(crate) cause: Cause<E>,
}

impl<E> MissingValue<E> {
    #[inline]
    pub fn new(cause: Cause<E>) -> Self {
        Self { cause }
    }

    #[inline]
    pub fn cause(&self) -> &Cause<E> {
        &self.cause
    }

    #[inline]
    pub fn into_cause(self) -> Cause<E> {
        self.cause
    }
}

impl<E: fmt::Display> fmt::Display for MissingValue<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "missing value: result failed with {}", self.cause)
    }
}

impl<E> std::error::Error for MissingValue<E> where E: fmt::Debug + fmt::Display {}

/// A builder chain reached its terminal with a failure no clause matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmatchedFailure<E> {
    pub(crate) cause: Cause<E>,
}

impl<E> UnmatchedFailure<E> {
    #[inline]
    pub fn new(cause: Cause<E>) -> Self {
        Self { cause }
    }

    #[inline]
    pub fn cause(&self) -> &Cause<E> {
        &self.cause
    }

    #[inline]
    pub fn into_cause(self) -> Cause<E> {
        self.cause
    }
}

impl<E: fmt::Display> fmt::Display for UnmatchedFailure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unmatched failure: {}", self.cause)
    }
}

impl<E> std::error::Error for UnmatchedFailure<E> where E: fmt::Debug + fmt::Display {}
