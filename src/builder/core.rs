use core::fmt;

use smallvec::SmallVec;

use crate::builder::coverage::Coverage;
use crate::traits::Tagged;
use crate::types::{AsyncResult, Cause, Defect, UnmatchedFailure};

/// Fluent, first-match-wins matcher over a borrowed [`AsyncResult`].
///
/// The builder holds one output slot. Clauses are checked in call order; the
/// first one whose condition holds fills the slot, and every later clause is a
/// no-op even if it would also match. The result itself is only inspected,
/// never consumed.
///
/// A chain ends with exactly one terminal:
///
/// - [`or_else`](Builder::or_else): the output, or a fallback
/// - [`or_none`](Builder::or_none): the output, if any
/// - [`render`](Builder::render): the output; panics if a failure went unmatched
///
/// # Type Parameters
///
/// * `A` - The success value type
/// * `E` - The typed error type
/// * `T` - The type every handler produces
///
/// # Examples
///
/// ```
/// use outcome_rail::{tagged_error, AsyncResult};
///
/// tagged_error! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub enum ApiError {
///         NotFound { id: u64 },
///         Unauthorized,
///     }
/// }
///
/// let result = AsyncResult::<String, ApiError>::fail(ApiError::NotFound { id: 7 });
///
/// let message = result
///     .builder()
///     .on_success(|name, _| format!("hello {}", name))
///     .on_error_tag("NotFound", |_, _| "no such user".to_string())
///     .on_error_tag("Unauthorized", |_, _| "sign in first".to_string())
///     .or_else(|| "unexpected".to_string());
///
/// assert_eq!(message, "no such user");
/// ```
#[must_use = "a builder chain ends with `or_else`, `or_none` or `render`"]
pub struct Builder<'r, A, E, T> {
    result: &'r AsyncResult<A, E>,
    output: Option<T>,
    coverage: Coverage,
}

impl<'r, A, E, T> Builder<'r, A, E, T> {
    /// Binds a result for the lifetime of the chain.
    #[inline]
    pub fn new(result: &'r AsyncResult<A, E>) -> Self {
        Self { result, output: None, coverage: Coverage::default() }
    }

    /// Returns the bound result.
    #[inline]
    pub fn result(&self) -> &'r AsyncResult<A, E> {
        self.result
    }

    /// Returns `true` once a clause has fired.
    #[must_use]
    #[inline]
    pub fn is_matched(&self) -> bool {
        self.output.is_some()
    }

    #[inline]
    fn cause(&self) -> Option<&'r Cause<E>> {
        match self.output {
            Some(_) => None,
            None => self.result.cause(),
        }
    }

    #[inline]
    fn error(&self) -> Option<&'r E> {
        self.cause().and_then(Cause::failure)
    }

    /// Fires on success with the value and the whole result.
    #[inline]
    pub fn on_success<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&'r A, &'r AsyncResult<A, E>) -> T,
    {
        if self.output.is_none() {
            if let AsyncResult::Success { value, .. } = self.result {
                self.output = Some(f(value, self.result));
            }
        }
        self
    }

    /// Fires on any failure with its full cause.
    #[inline]
    pub fn on_failure<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&'r Cause<E>, &'r AsyncResult<A, E>) -> T,
    {
        self.coverage.cover_all();
        if let Some(cause) = self.cause() {
            self.output = Some(f(cause, self.result));
        }
        self
    }

    /// Fires when the failure carries a typed error.
    ///
    /// Failures made only of interruptions or defects do not match.
    #[inline]
    pub fn on_error<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&'r E, &'r AsyncResult<A, E>) -> T,
    {
        self.coverage.cover_all();
        if let Some(error) = self.error() {
            self.output = Some(f(error, self.result));
        }
        self
    }

    /// Fires when the typed error also satisfies `predicate`.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome_rail::AsyncResult;
    ///
    /// let result = AsyncResult::<(), u16>::fail(503);
    /// let retry = result
    ///     .builder()
    ///     .on_error_if(|code| *code >= 500, |_, _| true)
    ///     .or_else(|| false);
    /// assert!(retry);
    /// ```
    #[inline]
    pub fn on_error_if<P, F>(mut self, predicate: P, f: F) -> Self
    where
        P: FnOnce(&E) -> bool,
        F: FnOnce(&'r E, &'r AsyncResult<A, E>) -> T,
    {
        if let Some(error) = self.error() {
            if predicate(error) {
                self.output = Some(f(error, self.result));
            }
        }
        self
    }

    /// Fires when `refine` extracts a narrower value from the typed error.
    ///
    /// The handler receives the refined value instead of the raw error.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome_rail::AsyncResult;
    ///
    /// enum DbError {
    ///     Conflict { key: String },
    ///     Unavailable,
    /// }
    ///
    /// let result = AsyncResult::<(), DbError>::fail(DbError::Conflict { key: "user:1".into() });
    /// let message = result
    ///     .builder()
    ///     .on_error_some(
    ///         |e| match e {
    ///             DbError::Conflict { key } => Some(key.as_str()),
    ///             _ => None,
    ///         },
    ///         |key, _| format!("conflict on {}", key),
    ///     )
    ///     .or_else(|| "other".into());
    /// assert_eq!(message, "conflict on user:1");
    /// ```
    #[inline]
    pub fn on_error_some<R, P, F>(mut self, refine: P, f: F) -> Self
    where
        P: FnOnce(&'r E) -> Option<R>,
        F: FnOnce(R, &'r AsyncResult<A, E>) -> T,
    {
        if let Some(refined) = self.error().and_then(refine) {
            self.output = Some(f(refined, self.result));
        }
        self
    }

    /// Fires when the typed error's tag equals `tag`, and marks `tag` as covered.
    #[inline]
    pub fn on_error_tag<F>(self, tag: &'static str, f: F) -> Self
    where
        E: Tagged,
        F: FnOnce(&'r E, &'r AsyncResult<A, E>) -> T,
    {
        self.on_error_tags(&[tag], f)
    }

    /// Fires when the typed error's tag is one of `tags`, and marks them all as covered.
    ///
    /// In debug builds a tag that is not in `E::TAGS` panics.
    pub fn on_error_tags<F>(mut self, tags: &[&'static str], f: F) -> Self
    where
        E: Tagged,
        F: FnOnce(&'r E, &'r AsyncResult<A, E>) -> T,
    {
        for tag in tags {
            debug_assert!(
                E::TAGS.contains(tag),
                "`{}` is not a tag of {}",
                tag,
                core::any::type_name::<E>()
            );
        }
        self.coverage.cover(tags);
        if let Some(error) = self.error() {
            if tags.contains(&error.tag()) {
                self.output = Some(f(error, self.result));
            }
        }
        self
    }

    /// Fires when the failure carries a defect.
    #[inline]
    pub fn on_defect<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&'r Defect, &'r AsyncResult<A, E>) -> T,
    {
        if let Some(defect) = self.cause().and_then(Cause::defect) {
            self.output = Some(f(defect, self.result));
        }
        self
    }

    /// Fires when the failure is an interruption and nothing else.
    #[inline]
    pub fn on_interrupt<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&'r AsyncResult<A, E>) -> T,
    {
        if self.cause().is_some_and(Cause::is_interrupted_only) {
            self.output = Some(f(self.result));
        }
        self
    }

    /// Tags of `E` that no clause of this chain handles yet.
    ///
    /// An unconditional [`on_error`](Builder::on_error) or
    /// [`on_failure`](Builder::on_failure) covers every tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome_rail::{tagged_error, AsyncResult};
    ///
    /// tagged_error! {
    ///     #[derive(Debug)]
    ///     enum FetchError {
    ///         Timeout,
    ///         Refused,
    ///         Malformed(String),
    ///     }
    /// }
    ///
    /// let result = AsyncResult::<(), FetchError>::fail(FetchError::Timeout);
    /// let chain = result.builder::<&str>().on_error_tags(&["Timeout", "Refused"], |_, _| "retry");
    ///
    /// assert_eq!(chain.remaining_tags().as_slice(), &["Malformed"]);
    /// assert!(!chain.is_exhaustive());
    /// ```
    pub fn remaining_tags(&self) -> SmallVec<[&'static str; 4]>
    where
        E: Tagged,
    {
        self.coverage.remaining::<E>()
    }

    /// Returns `true` when every tag of `E` has a handler in this chain.
    #[must_use]
    pub fn is_exhaustive(&self) -> bool
    where
        E: Tagged,
    {
        self.remaining_tags().is_empty()
    }

    /// Terminal: the captured output, or `fallback()` if no clause fired.
    #[inline]
    pub fn or_else<F>(self, fallback: F) -> T
    where
        F: FnOnce() -> T,
    {
        self.output.unwrap_or_else(fallback)
    }

    /// Terminal: the captured output, if any clause fired.
    #[inline]
    pub fn or_none(self) -> Option<T> {
        self.output
    }

    /// Terminal: like [`render`](Builder::render), returning an unmatched
    /// failure as an error instead of panicking.
    ///
    /// The builder only borrows the result, so the unmatched cause is cloned
    /// into the returned [`UnmatchedFailure`]; hence `E: Clone`. When the
    /// result can be consumed, [`AsyncResult::into_cause`] hands the cause
    /// over without a copy.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome_rail::AsyncResult;
    ///
    /// let result = AsyncResult::<u8, String>::fail("denied".into());
    /// let unmatched = result.builder::<u8>().on_success(|v, _| *v).try_render().unwrap_err();
    ///
    /// assert_eq!(unmatched.cause().failure().map(String::as_str), Some("denied"));
    /// assert_eq!(result.error().map(String::as_str), Some("denied"));
    /// ```
    pub fn try_render(self) -> Result<Option<T>, UnmatchedFailure<E>>
    where
        E: Clone,
    {
        match (self.output, self.result) {
            (Some(output), _) => Ok(Some(output)),
            (None, AsyncResult::Failure { cause }) => Err(UnmatchedFailure::new(cause.clone())),
            (None, AsyncResult::Success { .. }) => Ok(None),
        }
    }

    /// Terminal: the captured output.
    ///
    /// An unmatched success yields `None`. An unmatched failure is a chain
    /// that does not cover a case that occurred, and is not swallowed.
    ///
    /// # Panics
    ///
    /// Panics with an [`UnmatchedFailure`] payload carrying the cause when the
    /// result is a failure and no clause fired. The payload owns a clone of
    /// the cause, which is why `E` must be `Clone` and `'static`.
    #[track_caller]
    pub fn render(self) -> Option<T>
    where
        E: Clone + fmt::Debug + Send + 'static,
    {
        match self.try_render() {
            Ok(output) => output,
            Err(unmatched) => {
                crate::trace_event!(
                    error,
                    cause = ?unmatched.cause,
                    "builder rendered an unmatched failure"
                );
                std::panic::panic_any(unmatched)
            },
        }
    }
}

impl<A, E, T> fmt::Debug for Builder<'_, A, E, T>
where
    A: fmt::Debug,
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("result", self.result)
            .field("matched", &self.output.is_some())
            .finish()
    }
}
