use crate::types::{AsyncResult, Cause, Outcome};

#[inline]
pub fn from_outcome<A, E>(outcome: Outcome<A, E>) -> AsyncResult<A, E> {
    AsyncResult::from_outcome(outcome)
}

#[inline]
pub fn from_result<A, E>(result: Result<A, E>) -> AsyncResult<A, E> {
    AsyncResult::from_result(result)
}

/// `None` becomes a typed failure produced by `error`.
#[inline]
pub fn from_option<A, E, F>(option: Option<A>, error: F) -> AsyncResult<A, E>
where
    F: FnOnce() -> E,
{
    match option {
        Some(value) => AsyncResult::success(value),
        None => AsyncResult::fail(error()),
    }
}

/// Converts to a plain `Result` over the first typed error.
///
/// Failures without a typed error (interruptions, defects) come back as
/// `Err(None)` so they cannot be mistaken for domain errors.
#[inline]
pub fn to_result<A, E>(result: AsyncResult<A, E>) -> Result<A, Option<E>> {
    match result {
        AsyncResult::Success { value, .. } => Ok(value),
        AsyncResult::Failure { cause } => Err(cause.into_failure()),
    }
}

/// Splits results into their values and the causes of the failures, keeping order.
pub fn partition<A, E, I>(results: I) -> (Vec<A>, Vec<Cause<E>>)
where
    I: IntoIterator<Item = AsyncResult<A, E>>,
{
    let mut values = Vec::new();
    let mut causes = Vec::new();
    for result in results {
        match result {
            AsyncResult::Success { value, .. } => values.push(value),
            AsyncResult::Failure { cause } => causes.push(cause),
        }
    }
    (values, causes)
}

/// Folds the causes of every failure into one parallel cause.
///
/// Causes are merged pairwise, so the tree stays balanced and its depth grows
/// with the logarithm of the failure count. Leaf order is preserved.
///
/// Returns `None` when every result succeeded.
pub fn collect_causes<A, E, I>(results: I) -> Option<Cause<E>>
where
    I: IntoIterator<Item = AsyncResult<A, E>>,
{
    let mut level: Vec<Cause<E>> =
        results.into_iter().filter_map(AsyncResult::into_cause).collect();
    while level.len() > 1 {
        let mut merged = Vec::with_capacity(level.len().div_ceil(2));
        let mut causes = level.into_iter();
        while let Some(left) = causes.next() {
            merged.push(match causes.next() {
                Some(right) => left.both(right),
                None => left,
            });
        }
        level = merged;
    }
    level.pop()
}
