//! Single-flight, lazily initialized shared context.
//!
//! A [`SharedContext`] starts empty. The first caller of
//! [`get_or_try_init`](SharedContext::get_or_try_init) runs the initializer;
//! callers arriving while it runs wait for that same run and observe its
//! outcome, success or failure. A success is cached for every later call. A
//! failure is not: the slot goes back to empty and the next call retries.

use core::fmt;
use core::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

type Published<C, IE> = Option<Result<Arc<C>, IE>>;

enum State<C, IE> {
    Empty,
    Initializing(watch::Receiver<Published<C, IE>>),
    Ready(Arc<C>),
}

enum Step<C, IE> {
    Lead(watch::Sender<Published<C, IE>>),
    Wait(watch::Receiver<Published<C, IE>>),
}

/// Lazily initialized handle shared by many concurrent callers.
///
/// # Type Parameters
///
/// * `C` - The context type, handed out as `Arc<C>`
/// * `IE` - The initialization error; cloned to every waiting caller
///
/// # Examples
///
/// ```rust
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use outcome_rail::async_ext::SharedContext;
///
/// #[tokio::main]
/// async fn main() {
///     let runs = AtomicU32::new(0);
///     let shared: SharedContext<String, String> = SharedContext::new();
///
///     let counter = &runs;
///     let init = move || async move {
///         counter.fetch_add(1, Ordering::SeqCst);
///         Ok::<_, String>("pool".to_string())
///     };
///     let (a, b) = tokio::join!(shared.get_or_try_init(init), shared.get_or_try_init(init));
///
///     assert_eq!(a.unwrap().as_str(), "pool");
///     assert_eq!(b.unwrap().as_str(), "pool");
///     assert_eq!(runs.load(Ordering::SeqCst), 1);
/// }
/// ```
pub struct SharedContext<C, IE> {
    state: Mutex<State<C, IE>>,
}

impl<C, IE> SharedContext<C, IE> {
    #[inline]
    pub const fn new() -> Self {
        Self { state: Mutex::new(State::Empty) }
    }

    fn lock(&self) -> MutexGuard<'_, State<C, IE>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the cached context without initializing it.
    pub fn get(&self) -> Option<Arc<C>> {
        match &*self.lock() {
            State::Ready(context) => Some(Arc::clone(context)),
            State::Empty | State::Initializing(_) => None,
        }
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        matches!(&*self.lock(), State::Ready(_))
    }

    /// Drops the cached context so the next call initializes a fresh one.
    ///
    /// An initialization already in flight is left alone.
    pub fn reset(&self) -> Option<Arc<C>> {
        let mut state = self.lock();
        match core::mem::replace(&mut *state, State::Empty) {
            State::Ready(context) => Some(context),
            in_flight @ State::Initializing(_) => {
                *state = in_flight;
                None
            },
            State::Empty => None,
        }
    }
}

impl<C, IE: Clone> SharedContext<C, IE> {
    /// Returns the shared context, running `init` if no context is cached and
    /// no other caller is initializing one.
    ///
    /// Concurrent callers share a single run of the initializer and all
    /// receive its outcome. On failure nothing is cached. If the caller running
    /// the initializer is dropped before it finishes, the waiting callers start
    /// over and one of them runs its own initializer.
    pub async fn get_or_try_init<F, Fut>(&self, init: F) -> Result<Arc<C>, IE>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<C, IE>>,
    {
        loop {
            let step = {
                let mut state = self.lock();
                match &*state {
                    State::Ready(context) => return Ok(Arc::clone(context)),
                    State::Initializing(receiver) => Step::Wait(receiver.clone()),
                    State::Empty => {
                        let (sender, receiver) = watch::channel(None);
                        *state = State::Initializing(receiver);
                        Step::Lead(sender)
                    },
                }
            };

            match step {
                Step::Lead(sender) => return self.lead(sender, init).await,
                Step::Wait(mut receiver) => {
                    if let Ok(published) = receiver.wait_for(Option::is_some).await {
                        if let Some(outcome) = &*published {
                            return outcome.clone();
                        }
                    }
                    crate::trace_event!(debug, "shared context initializer went away, retrying");
                },
            }
        }
    }

    async fn lead<F, Fut>(
        &self,
        sender: watch::Sender<Published<C, IE>>,
        init: F,
    ) -> Result<Arc<C>, IE>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<C, IE>>,
    {
        crate::trace_event!(debug, "initializing shared context");
        let guard = ResetOnDrop { shared: self, armed: true };
        let outcome = init().await.map(Arc::new);
        guard.disarm();

        *self.lock() = match &outcome {
            Ok(context) => {
                crate::trace_event!(debug, "shared context ready");
                State::Ready(Arc::clone(context))
            },
            Err(_) => {
                crate::trace_event!(
                    warn,
                    "shared context initialization failed; next call retries"
                );
                State::Empty
            },
        };
        sender.send_replace(Some(outcome.clone()));
        outcome
    }
}

impl<C, IE> Default for SharedContext<C, IE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, IE> fmt::Debug for SharedContext<C, IE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &*self.lock() {
            State::Empty => "empty",
            State::Initializing(_) => "initializing",
            State::Ready(_) => "ready",
        };
        f.debug_struct("SharedContext").field("state", &state).finish()
    }
}

/// Puts the slot back to empty if the initializing caller is dropped or unwinds.
struct ResetOnDrop<'a, C, IE> {
    shared: &'a SharedContext<C, IE>,
    armed: bool,
}

impl<C, IE> ResetOnDrop<'_, C, IE> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<C, IE> Drop for ResetOnDrop<'_, C, IE> {
    fn drop(&mut self) {
        if self.armed {
            *self.shared.lock() = State::Empty;
        }
    }
}
