use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::builder::Builder;
use crate::types::{Cause, Defect, MissingValue, Timestamp};

/// Raw completion of a unit of work: its value, or the cause it failed with.
pub type Outcome<A, E> = Result<A, Cause<E>>;

/// Resolved outcome of an asynchronous operation, held as a plain value.
///
/// `AsyncResult<A, E>` is either a [`Success`](AsyncResult::Success) carrying the
/// value and the instant it was produced, or a [`Failure`](AsyncResult::Failure)
/// carrying the full [`Cause`]: a typed error `E`, an interruption, a defect, or a
/// composition of those. Nothing here panics except the explicitly named
/// [`get_or_panic`](AsyncResult::get_or_panic).
///
/// Two results are equal when they have the same variant and equal value or
/// cause; the success timestamp is metadata and is ignored.
///
/// # Serde Support
///
/// With the `serde` feature the result encodes as
/// `{"_tag":"Success","value":..,"timestamp":..}` or
/// `{"_tag":"Failure","cause":..}`. Any other `_tag` is rejected on decode, and
/// a missing `timestamp` decodes as the current time.
///
/// # Examples
///
/// ```
/// use outcome_rail::AsyncResult;
///
/// let ok = AsyncResult::<i32, &str>::success(21).map(|v| v * 2);
/// assert_eq!(ok.value(), Some(&42));
///
/// let err = AsyncResult::<i32, &str>::fail("not found");
/// assert_eq!(err.error(), Some(&"not found"));
/// assert_eq!(err.get_or_else(|| -1), -1);
/// ```
#[must_use]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "_tag"))]
#[derive(Debug, Clone)]
pub enum AsyncResult<A, E> {
    Success {
        value: A,
        #[cfg_attr(feature = "serde", serde(default = "Timestamp::now"))]
        timestamp: Timestamp,
    },
    Failure {
        cause: Cause<E>,
    },
}

impl<A, E> AsyncResult<A, E> {
    /// Creates a success stamped with the current time.
    #[inline]
    pub fn success(value: A) -> Self {
        Self::Success { value, timestamp: Timestamp::now() }
    }

    /// Creates a success with an explicit timestamp.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome_rail::{AsyncResult, Timestamp};
    ///
    /// let r = AsyncResult::<&str, ()>::success_at("ready", Timestamp::from_millis(7));
    /// assert_eq!(r.timestamp(), Some(Timestamp::from_millis(7)));
    /// ```
    #[inline]
    pub fn success_at(value: A, timestamp: Timestamp) -> Self {
        Self::Success { value, timestamp }
    }

    #[inline]
    pub fn failure(cause: Cause<E>) -> Self {
        Self::Failure { cause }
    }

    /// Creates a failure from a bare typed error.
    #[inline]
    pub fn fail(error: E) -> Self {
        Self::Failure { cause: Cause::fail(error) }
    }

    #[inline]
    pub fn die(defect: impl Into<Defect>) -> Self {
        Self::Failure { cause: Cause::die(defect) }
    }

    #[inline]
    pub fn interrupt() -> Self {
        Self::Failure { cause: Cause::interrupt() }
    }

    /// Converts the raw completion of a unit of work.
    ///
    /// This is the boundary between whatever executed the work and this crate:
    /// `Ok` becomes a fresh [`Success`](AsyncResult::Success), `Err` a
    /// [`Failure`](AsyncResult::Failure) with the cause untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome_rail::{AsyncResult, Cause};
    ///
    /// let done = AsyncResult::<i32, &str>::from_outcome(Ok(42));
    /// assert_eq!(done.value(), Some(&42));
    ///
    /// let cancelled = AsyncResult::<i32, &str>::from_outcome(Err(Cause::interrupt()));
    /// assert!(cancelled.is_interrupted());
    /// ```
    #[inline]
    pub fn from_outcome(outcome: Outcome<A, E>) -> Self {
        match outcome {
            Ok(value) => Self::success(value),
            Err(cause) => Self::failure(cause),
        }
    }

    /// Converts a plain `Result`, treating its error as a typed failure.
    #[inline]
    pub fn from_result(result: Result<A, E>) -> Self {
        match result {
            Ok(value) => Self::success(value),
            Err(error) => Self::fail(error),
        }
    }

    #[inline]
    pub fn into_outcome(self) -> Outcome<A, E> {
        match self {
            Self::Success { value, .. } => Ok(value),
            Self::Failure { cause } => Err(cause),
        }
    }

    #[must_use]
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[must_use]
    #[inline]
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Returns `true` if the operation was cancelled and nothing else went wrong.
    ///
    /// A failure that also carries a typed error or a defect is a real failure,
    /// not an interruption.
    #[must_use]
    #[inline]
    pub fn is_interrupted(&self) -> bool {
        match self {
            Self::Success { .. } => false,
            Self::Failure { cause } => cause.is_interrupted_only(),
        }
    }

    #[must_use]
    #[inline]
    pub fn value(&self) -> Option<&A> {
        match self {
            Self::Success { value, .. } => Some(value),
            Self::Failure { .. } => None,
        }
    }

    #[must_use]
    #[inline]
    pub fn into_value(self) -> Option<A> {
        match self {
            Self::Success { value, .. } => Some(value),
            Self::Failure { .. } => None,
        }
    }

    #[must_use]
    #[inline]
    pub fn timestamp(&self) -> Option<Timestamp> {
        match self {
            Self::Success { timestamp, .. } => Some(*timestamp),
            Self::Failure { .. } => None,
        }
    }

    /// Returns the first typed error of a failure.
    ///
    /// `None` for successes, and for failures made only of interruptions or
    /// defects.
    #[must_use]
    #[inline]
    pub fn error(&self) -> Option<&E> {
        self.cause().and_then(Cause::failure)
    }

    #[must_use]
    #[inline]
    pub fn into_error(self) -> Option<E> {
        self.into_cause().and_then(Cause::into_failure)
    }

    /// Returns the first defect of a failure.
    #[must_use]
    #[inline]
    pub fn defect(&self) -> Option<&Defect> {
        self.cause().and_then(Cause::defect)
    }

    #[must_use]
    #[inline]
    pub fn cause(&self) -> Option<&Cause<E>> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { cause } => Some(cause),
        }
    }

    #[must_use]
    #[inline]
    pub fn into_cause(self) -> Option<Cause<E>> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { cause } => Some(cause),
        }
    }

    /// Maps the success value, keeping its original timestamp.
    ///
    /// Failures pass through with their cause unchanged.
    #[inline]
    pub fn map<B, F>(self, f: F) -> AsyncResult<B, E>
    where
        F: FnOnce(A) -> B,
    {
        match self {
            Self::Success { value, timestamp } => {
                AsyncResult::Success { value: f(value), timestamp }
            },
            Self::Failure { cause } => AsyncResult::Failure { cause },
        }
    }

    /// Maps every typed error inside the cause.
    #[inline]
    pub fn map_error<G, F>(self, f: F) -> AsyncResult<A, G>
    where
        F: FnMut(E) -> G,
    {
        match self {
            Self::Success { value, timestamp } => AsyncResult::Success { value, timestamp },
            Self::Failure { cause } => AsyncResult::Failure { cause: cause.map(f) },
        }
    }

    /// Chains a computation that may itself fail.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome_rail::AsyncResult;
    ///
    /// fn half(v: i32) -> AsyncResult<i32, &'static str> {
    ///     if v % 2 == 0 { AsyncResult::success(v / 2) } else { AsyncResult::fail("odd") }
    /// }
    ///
    /// assert_eq!(AsyncResult::success(8).and_then(half).value(), Some(&4));
    /// assert_eq!(AsyncResult::success(3).and_then(half).error(), Some(&"odd"));
    /// ```
    #[inline]
    pub fn and_then<B, F>(self, f: F) -> AsyncResult<B, E>
    where
        F: FnOnce(A) -> AsyncResult<B, E>,
    {
        match self {
            Self::Success { value, .. } => f(value),
            Self::Failure { cause } => AsyncResult::Failure { cause },
        }
    }

    /// Two-way dispatch over both variants.
    ///
    /// Both handlers are required, so a caller cannot forget either case.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome_rail::AsyncResult;
    ///
    /// let label = AsyncResult::<u32, &str>::fail("denied")
    ///     .fold(|v| format!("got {}", v), |cause| format!("failed: {}", cause));
    /// assert_eq!(label, "failed: denied");
    /// ```
    #[inline]
    pub fn fold<T, S, F>(self, on_success: S, on_failure: F) -> T
    where
        S: FnOnce(A) -> T,
        F: FnOnce(Cause<E>) -> T,
    {
        match self {
            Self::Success { value, .. } => on_success(value),
            Self::Failure { cause } => on_failure(cause),
        }
    }

    /// Returns the value, or evaluates `fallback` on failure.
    ///
    /// `fallback` is never called on the success path.
    #[inline]
    pub fn get_or_else<F>(self, fallback: F) -> A
    where
        F: FnOnce() -> A,
    {
        match self {
            Self::Success { value, .. } => value,
            Self::Failure { .. } => fallback(),
        }
    }

    /// Returns the value, or the failure wrapped in [`MissingValue`].
    #[inline]
    pub fn try_get(self) -> Result<A, MissingValue<E>> {
        match self {
            Self::Success { value, .. } => Ok(value),
            Self::Failure { cause } => Err(MissingValue::new(cause)),
        }
    }

    /// Returns the value, panicking on failure.
    ///
    /// This is the one accessor that leaves the errors-as-values model. The
    /// panic payload is a [`MissingValue`] carrying the cause, so it can be
    /// recovered with [`std::panic::catch_unwind`] and `downcast`.
    ///
    /// # Panics
    ///
    /// Panics if the result is a failure.
    #[track_caller]
    pub fn get_or_panic(self) -> A
    where
        E: fmt::Debug + Send + 'static,
    {
        match self.try_get() {
            Ok(value) => value,
            Err(missing) => {
                crate::trace_event!(
                    error,
                    cause = ?missing.cause,
                    "get_or_panic on a failed result"
                );
                std::panic::panic_any(missing)
            },
        }
    }

    /// Starts a fluent match over this result.
    ///
    /// See [`Builder`] for the clause semantics.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome_rail::AsyncResult;
    ///
    /// let r = AsyncResult::<i32, &str>::from_outcome(Ok(42));
    /// let doubled = r.builder().on_success(|v, _| v * 2).or_else(|| -1);
    /// assert_eq!(doubled, 84);
    /// ```
    #[inline]
    pub fn builder<T>(&self) -> Builder<'_, A, E, T> {
        Builder::new(self)
    }
}

impl<A: PartialEq, E: PartialEq> PartialEq for AsyncResult<A, E> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Success { value: a, .. }, Self::Success { value: b, .. }) => a == b,
            (Self::Failure { cause: a }, Self::Failure { cause: b }) => a == b,
            _ => false,
        }
    }
}

impl<A: Eq, E: Eq> Eq for AsyncResult<A, E> {}

impl<A, E> From<Outcome<A, E>> for AsyncResult<A, E> {
    #[inline]
    fn from(outcome: Outcome<A, E>) -> Self {
        Self::from_outcome(outcome)
    }
}

impl<A, E> From<AsyncResult<A, E>> for Outcome<A, E> {
    #[inline]
    fn from(result: AsyncResult<A, E>) -> Self {
        result.into_outcome()
    }
}
