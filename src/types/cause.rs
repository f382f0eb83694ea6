//! Failure description carried by a failed [`AsyncResult`](crate::AsyncResult).
//!
//! A [`Cause`] is a small tree. Its leaves say *why* an operation failed:
//!
//! - [`Cause::Fail`]: an expected, typed domain error
//! - [`Cause::Interrupt`]: the operation was cancelled
//! - [`Cause::Die`]: an unexpected [`Defect`] (panic, invariant violation)
//! - [`Cause::Empty`]: nothing failed
//!
//! Inner nodes record how failures were combined: one after another
//! ([`Cause::Sequential`]) or concurrently ([`Cause::Parallel`]).
//! Every query walks the leaves depth-first, left to right.
//!
//! Walking, comparing, cloning, mapping, rendering and dropping a cause all
//! run on an explicit heap stack, so a chain of any depth is handled
//! without growing the call stack.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::Cause;
//!
//! let cause = Cause::fail("not found").both(Cause::die("pool exhausted"));
//!
//! assert_eq!(cause.failure(), Some(&"not found"));
//! assert_eq!(cause.defect().map(|d| d.message()), Some("pool exhausted"));
//! assert!(!cause.is_interrupted_only());
//! ```
use core::{
    fmt,
    hash::{Hash, Hasher},
    mem,
    ops::Deref,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::types::cause_formatter::{CauseFormatConfig, CauseFormatter, Composition};
use crate::types::Defect;

/// Why an operation failed.
///
/// With the `serde` feature the cause encodes as an object discriminated by
/// a `_tag` field, e.g. `{"_tag":"Fail","error":"not found"}`.
#[must_use]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "_tag"))]
#[derive(Debug)]
pub enum Cause<E> {
    /// No failure. Identity for [`Cause::then`] and [`Cause::both`].
    Empty,
    /// Expected, typed domain error.
    Fail { error: E },
    /// The operation was cancelled before it could finish.
    Interrupt,
    /// Unexpected failure outside the typed error set.
    Die { defect: Defect },
    /// `left` happened, then `right`.
    Sequential { left: CauseNode<E>, right: CauseNode<E> },
    /// `left` and `right` happened concurrently.
    Parallel { left: CauseNode<E>, right: CauseNode<E> },
}

/// Heap-allocated child of a composite [`Cause`].
///
/// Dereferences to the inner cause. Dropping a node tears its subtree down
/// iteratively.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CauseNode<E>(Box<Cause<E>>);

impl<E> CauseNode<E> {
    #[inline]
    pub fn new(cause: Cause<E>) -> Self {
        Self(Box::new(cause))
    }

    /// Moves the inner cause out of the node.
    #[inline]
    pub fn into_inner(mut self) -> Cause<E> {
        self.take()
    }

    fn take(&mut self) -> Cause<E> {
        mem::take(&mut *self.0)
    }
}

impl<E> From<Cause<E>> for CauseNode<E> {
    #[inline]
    fn from(cause: Cause<E>) -> Self {
        Self::new(cause)
    }
}

impl<E> Deref for CauseNode<E> {
    type Target = Cause<E>;

    #[inline]
    fn deref(&self) -> &Cause<E> {
        &self.0
    }
}

impl<E: fmt::Debug> fmt::Debug for CauseNode<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl<E> Drop for CauseNode<E> {
    fn drop(&mut self) {
        if !self.0.is_composite() {
            return;
        }
        // Children are detached before their parent is freed, so every
        // nested `drop` sees a leaf.
        let mut stack = vec![self.take()];
        while let Some(mut cause) = stack.pop() {
            match &mut cause {
                Cause::Sequential { left, right } | Cause::Parallel { left, right } => {
                    stack.push(left.take());
                    stack.push(right.take());
                },
                _ => {},
            }
        }
    }
}

enum Step<N> {
    Visit(N),
    Join(Composition),
}

fn join<E>(composition: Composition, left: Cause<E>, right: Cause<E>) -> Cause<E> {
    let (left, right) = (CauseNode::new(left), CauseNode::new(right));
    match composition {
        Composition::Sequential => Cause::Sequential { left, right },
        Composition::Parallel => Cause::Parallel { left, right },
    }
}

fn assemble<E>(built: &mut Vec<Cause<E>>, composition: Composition) {
    let right = built.pop().unwrap_or_default();
    let left = built.pop().unwrap_or_default();
    built.push(join(composition, left, right));
}

/// Collection of borrowed leaves, inline for the common single-failure case.
pub type CauseVec<'a, T> = SmallVec<[&'a T; 2]>;

impl<E> Cause<E> {
    #[inline]
    pub fn empty() -> Self {
        Self::Empty
    }

    #[inline]
    pub fn fail(error: E) -> Self {
        Self::Fail { error }
    }

    #[inline]
    pub fn die(defect: impl Into<Defect>) -> Self {
        Self::Die { defect: defect.into() }
    }

    #[inline]
    pub fn interrupt() -> Self {
        Self::Interrupt
    }

    /// Sequential composition: `self` happened, then `next`.
    ///
    /// [`Cause::Empty`] on either side is dropped.
    pub fn then(self, next: Cause<E>) -> Self {
        match (self, next) {
            (Self::Empty, other) | (other, Self::Empty) => other,
            (left, right) => join(Composition::Sequential, left, right),
        }
    }

    /// Parallel composition: `self` and `other` happened concurrently.
    ///
    /// [`Cause::Empty`] on either side is dropped.
    pub fn both(self, other: Cause<E>) -> Self {
        match (self, other) {
            (Self::Empty, other) | (other, Self::Empty) => other,
            (left, right) => join(Composition::Parallel, left, right),
        }
    }

    /// Iterates the leaves depth-first, left to right.
    #[inline]
    pub fn leaves(&self) -> Leaves<'_, E> {
        Leaves { stack: smallvec![self] }
    }

    /// Returns the first typed error, if any.
    pub fn failure(&self) -> Option<&E> {
        self.leaves().find_map(|leaf| match leaf {
            Self::Fail { error } => Some(error),
            _ => None,
        })
    }

    /// Consumes the cause, returning the first typed error, if any.
    pub fn into_failure(self) -> Option<E> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Self::Fail { error } => return Some(error),
                Self::Sequential { left, right } | Self::Parallel { left, right } => {
                    stack.push(right.into_inner());
                    stack.push(left.into_inner());
                },
                Self::Empty | Self::Interrupt | Self::Die { .. } => {},
            }
        }
        None
    }

    /// Returns every typed error in leaf order.
    pub fn failures(&self) -> CauseVec<'_, E> {
        self.leaves()
            .filter_map(|leaf| match leaf {
                Self::Fail { error } => Some(error),
                _ => None,
            })
            .collect()
    }

    /// Returns the first defect, if any.
    pub fn defect(&self) -> Option<&Defect> {
        self.leaves().find_map(|leaf| match leaf {
            Self::Die { defect } => Some(defect),
            _ => None,
        })
    }

    /// Returns every defect in leaf order.
    pub fn defects(&self) -> CauseVec<'_, Defect> {
        self.leaves()
            .filter_map(|leaf| match leaf {
                Self::Die { defect } => Some(defect),
                _ => None,
            })
            .collect()
    }

    /// `true` when no leaf records a failure of any kind.
    pub fn is_empty(&self) -> bool {
        self.leaves().all(|leaf| matches!(leaf, Self::Empty))
    }

    /// `true` when at least one leaf is a typed error.
    pub fn is_failure(&self) -> bool {
        self.failure().is_some()
    }

    /// `true` when at least one leaf is a defect.
    pub fn is_die(&self) -> bool {
        self.defect().is_some()
    }

    /// `true` when at least one leaf is an interruption.
    pub fn is_interrupted(&self) -> bool {
        self.leaves().any(|leaf| matches!(leaf, Self::Interrupt))
    }

    /// `true` when the cause is made of interruptions only: at least one
    /// [`Cause::Interrupt`] and neither a typed error nor a defect.
    pub fn is_interrupted_only(&self) -> bool {
        let mut interrupted = false;
        for leaf in self.leaves() {
            match leaf {
                Self::Interrupt => interrupted = true,
                Self::Fail { .. } | Self::Die { .. } => return false,
                _ => {},
            }
        }
        interrupted
    }

    /// Maps every typed error, keeping the shape of the tree.
    pub fn map<F, G>(self, mut f: F) -> Cause<G>
    where
        F: FnMut(E) -> G,
    {
        let mut pending = vec![Step::Visit(self)];
        let mut built = Vec::new();
        while let Some(step) = pending.pop() {
            match step {
                Step::Visit(Self::Sequential { left, right }) => {
                    pending.push(Step::Join(Composition::Sequential));
                    pending.push(Step::Visit(right.into_inner()));
                    pending.push(Step::Visit(left.into_inner()));
                },
                Step::Visit(Self::Parallel { left, right }) => {
                    pending.push(Step::Join(Composition::Parallel));
                    pending.push(Step::Visit(right.into_inner()));
                    pending.push(Step::Visit(left.into_inner()));
                },
                Step::Visit(Self::Empty) => built.push(Cause::Empty),
                Step::Visit(Self::Fail { error }) => built.push(Cause::Fail { error: f(error) }),
                Step::Visit(Self::Interrupt) => built.push(Cause::Interrupt),
                Step::Visit(Self::Die { defect }) => built.push(Cause::Die { defect }),
                Step::Join(composition) => assemble(&mut built, composition),
            }
        }
        built.pop().unwrap_or_default()
    }

    #[inline]
    fn is_composite(&self) -> bool {
        matches!(self, Self::Sequential { .. } | Self::Parallel { .. })
    }

    /// Renders the cause with a custom formatter.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome_rail::{Cause, CauseFormatConfig};
    ///
    /// let cause = Cause::fail("timeout").then(Cause::<&str>::interrupt());
    /// assert_eq!(cause.render(&CauseFormatConfig::labeled()), "Fail: timeout -> Interrupt");
    /// ```
    pub fn render<F>(&self, formatter: &F) -> String
    where
        E: fmt::Display,
        F: CauseFormatter + ?Sized,
    {
        formatter.format_cause(self)
    }

    /// Renders the cause as a multi-line tree.
    pub fn pretty(&self) -> String
    where
        E: fmt::Display,
    {
        self.render(&CauseFormatConfig::pretty())
    }
}

impl<E> Default for Cause<E> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<E> From<Defect> for Cause<E> {
    #[inline]
    fn from(defect: Defect) -> Self {
        Self::Die { defect }
    }
}

impl<E: Clone> Clone for Cause<E> {
    fn clone(&self) -> Self {
        let mut pending = vec![Step::Visit(self)];
        let mut built = Vec::new();
        while let Some(step) = pending.pop() {
            match step {
                Step::Visit(Self::Sequential { left, right }) => {
                    pending.push(Step::Join(Composition::Sequential));
                    pending.push(Step::Visit(&**right));
                    pending.push(Step::Visit(&**left));
                },
                Step::Visit(Self::Parallel { left, right }) => {
                    pending.push(Step::Join(Composition::Parallel));
                    pending.push(Step::Visit(&**right));
                    pending.push(Step::Visit(&**left));
                },
                Step::Visit(Self::Empty) => built.push(Self::Empty),
                Step::Visit(Self::Fail { error }) => {
                    built.push(Self::Fail { error: error.clone() });
                },
                Step::Visit(Self::Interrupt) => built.push(Self::Interrupt),
                Step::Visit(Self::Die { defect }) => {
                    built.push(Self::Die { defect: defect.clone() });
                },
                Step::Join(composition) => assemble(&mut built, composition),
            }
        }
        built.pop().unwrap_or_default()
    }
}

impl<E: PartialEq> PartialEq for Cause<E> {
    fn eq(&self, other: &Self) -> bool {
        let mut stack: SmallVec<[(&Self, &Self); 8]> = smallvec![(self, other)];
        while let Some(pair) = stack.pop() {
            match pair {
                (Self::Empty, Self::Empty) | (Self::Interrupt, Self::Interrupt) => {},
                (Self::Fail { error: a }, Self::Fail { error: b }) => {
                    if a != b {
                        return false;
                    }
                },
                (Self::Die { defect: a }, Self::Die { defect: b }) => {
                    if a != b {
                        return false;
                    }
                },
                (
                    Self::Sequential { left: l1, right: r1 },
                    Self::Sequential { left: l2, right: r2 },
                )
                | (
                    Self::Parallel { left: l1, right: r1 },
                    Self::Parallel { left: l2, right: r2 },
                ) => {
                    stack.push((&**r1, &**r2));
                    stack.push((&**l1, &**l2));
                },
                _ => return false,
            }
        }
        true
    }
}

impl<E: Eq> Eq for Cause<E> {}

impl<E: Hash> Hash for Cause<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut stack: SmallVec<[&Self; 8]> = smallvec![self];
        while let Some(node) = stack.pop() {
            mem::discriminant(node).hash(state);
            match node {
                Self::Fail { error } => error.hash(state),
                Self::Die { defect } => defect.hash(state),
                Self::Sequential { left, right } | Self::Parallel { left, right } => {
                    stack.push(right);
                    stack.push(left);
                },
                Self::Empty | Self::Interrupt => {},
            }
        }
    }
}

impl<E: fmt::Display> fmt::Display for Cause<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&CauseFormatConfig::default()))
    }
}

/// Depth-first iterator over the leaves of a [`Cause`].
///
/// Created by [`Cause::leaves`].
pub struct Leaves<'a, E> {
    stack: SmallVec<[&'a Cause<E>; 4]>,
}

impl<'a, E> Iterator for Leaves<'a, E> {
    type Item = &'a Cause<E>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                Cause::Sequential { left, right } | Cause::Parallel { left, right } => {
                    self.stack.push(right);
                    self.stack.push(left);
                },
                leaf => return Some(leaf),
            }
        }
        None
    }
}
