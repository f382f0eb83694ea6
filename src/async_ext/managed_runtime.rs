//! Units of work run against a lazily built, shared execution context.

use core::fmt;
use core::future::Future;
use core::pin::Pin;
use std::sync::Arc;

use super::future_ext::FutureResultExt;
use super::shared_context::SharedContext;
use super::tokio_ext::run;
use crate::types::AsyncResult;

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;
type Initializer<C, IE> = Box<dyn Fn() -> BoxFuture<Result<C, IE>> + Send + Sync>;

/// Pairs a [`SharedContext`] with the routine that builds it.
///
/// Every [`run`](ManagedRuntime::run) first obtains the context (building it on
/// first use, once, however many callers race for it) and then executes the
/// unit of work against it. A failed build is reported to the caller as a typed
/// failure and retried on the next call.
///
/// # Examples
///
/// ```rust
/// use outcome_rail::async_ext::ManagedRuntime;
///
/// #[derive(Debug, Clone, PartialEq)]
/// enum AppError {
///     Startup(String),
///     NotFound,
/// }
///
/// impl From<String> for AppError {
///     fn from(message: String) -> Self {
///         AppError::Startup(message)
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let runtime = ManagedRuntime::new(|| async { Ok::<_, String>(vec!["ada", "grace"]) });
///
///     let found = runtime
///         .run(|users| async move {
///             users.iter().position(|u| *u == "grace").ok_or(AppError::NotFound)
///         })
///         .await;
///     assert_eq!(found.value(), Some(&1));
/// }
/// ```
pub struct ManagedRuntime<C, IE> {
    context: SharedContext<C, IE>,
    init: Initializer<C, IE>,
}

impl<C, IE> ManagedRuntime<C, IE>
where
    C: Send + Sync + 'static,
    IE: Clone + Send + 'static,
{
    pub fn new<F, Fut>(init: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<C, IE>> + Send + 'static,
    {
        let init: Initializer<C, IE> =
            Box::new(move || -> BoxFuture<Result<C, IE>> { Box::pin(init()) });
        Self { context: SharedContext::new(), init }
    }

    /// Returns the shared context, building it if needed.
    pub async fn context(&self) -> Result<Arc<C>, IE> {
        self.context.get_or_try_init(|| (self.init)()).await
    }

    /// Runs `work` against the shared context in the current task.
    ///
    /// A panic raised while `work`'s future is polled becomes a defect.
    pub async fn run<A, E, W, Fut>(&self, work: W) -> AsyncResult<A, E>
    where
        W: FnOnce(Arc<C>) -> Fut,
        Fut: Future<Output = Result<A, E>>,
        E: From<IE>,
    {
        match self.context().await {
            Ok(context) => work(context).into_async_result().await,
            Err(error) => AsyncResult::fail(E::from(error)),
        }
    }

    /// Runs `work` against the shared context on a new Tokio task.
    ///
    /// Aborting the task surfaces as an interruption.
    pub async fn spawn<A, E, W, Fut>(&self, work: W) -> AsyncResult<A, E>
    where
        W: FnOnce(Arc<C>) -> Fut,
        Fut: Future<Output = Result<A, E>> + Send + 'static,
        A: Send + 'static,
        E: From<IE> + Send + 'static,
    {
        match self.context().await {
            Ok(context) => run(work(context)).await,
            Err(error) => AsyncResult::fail(E::from(error)),
        }
    }

    /// Drops the cached context; the next unit of work rebuilds it.
    pub fn dispose(&self) -> bool {
        self.context.reset().is_some()
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.context.is_initialized()
    }
}

impl<C, IE> fmt::Debug for ManagedRuntime<C, IE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagedRuntime").field("context", &self.context).finish_non_exhaustive()
    }
}
