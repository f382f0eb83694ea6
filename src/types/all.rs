//! Combining many results into one.
//!
//! [`all`] and [`all_keyed`] accept entries that are either results or plain
//! values ([`Field`]). They stop at the first failure in input order and return
//! it verbatim; later entries are never inspected.
use std::collections::BTreeMap;

use crate::types::AsyncResult;

/// One entry of a combination: a result to unwrap, or a plain value kept as is.
///
/// Results convert with `From`; plain values go through [`Field::plain`].
#[derive(Debug, Clone, PartialEq)]
pub enum Field<A, E> {
    Result(AsyncResult<A, E>),
    Plain(A),
}

impl<A, E> Field<A, E> {
    #[inline]
    pub fn plain(value: A) -> Self {
        Self::Plain(value)
    }
}

impl<A, E> From<AsyncResult<A, E>> for Field<A, E> {
    #[inline]
    fn from(result: AsyncResult<A, E>) -> Self {
        Self::Result(result)
    }
}

/// Combines a sequence of entries into one result.
///
/// # Examples
///
/// ```
/// use outcome_rail::{all, AsyncResult, Field};
///
/// let combined: AsyncResult<Vec<i32>, &str> = all([
///     Field::from(AsyncResult::success(1)),
///     Field::plain(2),
///     AsyncResult::success(3).into(),
/// ]);
/// assert_eq!(combined.value(), Some(&vec![1, 2, 3]));
///
/// let failed: AsyncResult<Vec<i32>, &str> =
///     all([AsyncResult::success(1), AsyncResult::fail("first"), AsyncResult::fail("second")]);
/// assert_eq!(failed.error(), Some(&"first"));
/// ```
pub fn all<A, E, I>(entries: I) -> AsyncResult<Vec<A>, E>
where
    I: IntoIterator,
    I::Item: Into<Field<A, E>>,
{
    let entries = entries.into_iter();
    let mut values = Vec::with_capacity(entries.size_hint().0);
    for entry in entries {
        match entry.into() {
            Field::Plain(value) | Field::Result(AsyncResult::Success { value, .. }) => {
                values.push(value)
            },
            Field::Result(AsyncResult::Failure { cause }) => return AsyncResult::Failure { cause },
        }
    }
    AsyncResult::success(values)
}

/// Combines keyed entries into one result holding a map.
///
/// Entries are inspected in the order the iterator yields them, so a
/// `BTreeMap` input short-circuits in key order.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use outcome_rail::{all_keyed, AsyncResult, Field};
///
/// let mut entries = BTreeMap::new();
/// entries.insert("user", Field::from(AsyncResult::<&str, ()>::success("ada")));
/// entries.insert("role", Field::plain("admin"));
///
/// let combined: AsyncResult<BTreeMap<&str, &str>, ()> = all_keyed(entries);
/// assert_eq!(combined.value().and_then(|m| m.get("user")), Some(&"ada"));
/// ```
pub fn all_keyed<K, A, E, I, F>(entries: I) -> AsyncResult<BTreeMap<K, A>, E>
where
    K: Ord,
    I: IntoIterator<Item = (K, F)>,
    F: Into<Field<A, E>>,
{
    let mut values = BTreeMap::new();
    for (key, entry) in entries {
        match entry.into() {
            Field::Plain(value) | Field::Result(AsyncResult::Success { value, .. }) => {
                values.insert(key, value);
            },
            Field::Result(AsyncResult::Failure { cause }) => return AsyncResult::Failure { cause },
        }
    }
    AsyncResult::success(values)
}

/// Collects results, stopping at the first failure.
///
/// # Examples
///
/// ```
/// use outcome_rail::AsyncResult;
///
/// let parsed: AsyncResult<Vec<u8>, String> = ["1", "2", "x", "4"]
///     .iter()
///     .map(|s| AsyncResult::from_result(s.parse::<u8>().map_err(|e| e.to_string())))
///     .collect();
/// assert!(parsed.is_failure());
/// ```
impl<A, E, V> FromIterator<AsyncResult<A, E>> for AsyncResult<V, E>
where
    V: FromIterator<A>,
{
    fn from_iter<I: IntoIterator<Item = AsyncResult<A, E>>>(iter: I) -> Self {
        let mut failure = None;
        let collected: V = iter
            .into_iter()
            .map_while(|result| match result {
                AsyncResult::Success { value, .. } => Some(value),
                AsyncResult::Failure { cause } => {
                    failure = Some(cause);
                    None
                },
            })
            .collect();

        match failure {
            Some(cause) => AsyncResult::Failure { cause },
            None => AsyncResult::success(collected),
        }
    }
}

impl<A, E> IntoIterator for AsyncResult<A, E> {
    type Item = A;
    type IntoIter = std::option::IntoIter<A>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_value().into_iter()
    }
}

impl<'a, A, E> IntoIterator for &'a AsyncResult<A, E> {
    type Item = &'a A;
    type IntoIter = std::option::IntoIter<&'a A>;

    fn into_iter(self) -> Self::IntoIter {
        self.value().into_iter()
    }
}
