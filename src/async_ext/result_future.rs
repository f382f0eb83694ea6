//! Future wrapper resolving to an [`AsyncResult`].
//!
//! [`ResultFuture`] drives a `Future<Output = Result<A, E>>` to completion and
//! reports exactly one result: `Ok` becomes a success, `Err` a typed failure,
//! and a panic raised while polling a [`Defect`].

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use std::panic::{catch_unwind, AssertUnwindSafe};

use futures_core::future::FusedFuture;

use pin_project_lite::pin_project;

use crate::types::{AsyncResult, Defect};

pin_project! {
    /// A Future wrapper that turns the inner outcome into an [`AsyncResult`].
    ///
    /// # Cancel Safety
    ///
    /// `ResultFuture` is cancel-safe if the inner future is cancel-safe.
    /// Dropping it before completion produces no result at all; use
    /// [`run`](crate::async_ext::run) when cancellation must surface as an
    /// interruption.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use outcome_rail::prelude::*;
    ///
    /// async fn example() {
    ///     let result = async { Err::<i32, _>("refused") }.into_async_result().await;
    ///     assert_eq!(result.error(), Some(&"refused"));
    /// }
    /// ```
    #[must_use = "futures do nothing unless polled"]
    pub struct ResultFuture<Fut> {
        #[pin]
        future: Fut,
        terminated: bool,
    }
}

impl<Fut> ResultFuture<Fut> {
    #[inline]
    pub fn new(future: Fut) -> Self {
        Self { future, terminated: false }
    }
}

impl<Fut, A, E> Future for ResultFuture<Fut>
where
    Fut: Future<Output = Result<A, E>>,
{
    type Output = AsyncResult<A, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        assert!(!*this.terminated, "ResultFuture polled after completion; this is a bug");

        let future = this.future;
        let polled = catch_unwind(AssertUnwindSafe(|| future.poll(cx)));
        let result = match polled {
            Ok(Poll::Pending) => return Poll::Pending,
            Ok(Poll::Ready(result)) => AsyncResult::from_result(result),
            Err(payload) => {
                let defect = Defect::from_panic(&*payload);
                crate::trace_event!(error, defect = %defect, "future panicked while polled");
                AsyncResult::die(defect)
            },
        };
        *this.terminated = true;
        Poll::Ready(result)
    }
}

impl<Fut, A, E> FusedFuture for ResultFuture<Fut>
where
    Fut: Future<Output = Result<A, E>>,
{
    fn is_terminated(&self) -> bool {
        self.terminated
    }
}
