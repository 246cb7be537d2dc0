/// Trailing-edge debounce
///
/// State transitions:
/// - Idle → Pending: first call arms a timer
/// - Pending → Pending: a new call aborts the armed timer and arms a fresh one
/// - Pending → Idle: the timer fires and the callback runs with the latest arguments
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::trace;

type Callback<A> = Arc<dyn Fn(A) + Send + Sync>;

/// Debounced wrapper around a callback
///
/// Clones share the pending timer. Two wrappers built by separate
/// [`debounce`] calls never interact.
pub struct Debounced<A> {
    callback: Callback<A>,
    delay: Duration,
    state: Arc<Mutex<DebounceState>>,
}

struct DebounceState {
    /// Bumped on every call; a timer only fires if its generation is still current
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

impl<A> Clone for Debounced<A> {
    fn clone(&self) -> Self {
        Self {
            callback: self.callback.clone(),
            delay: self.delay,
            state: self.state.clone(),
        }
    }
}

/// Wrap `callback` so a burst of calls runs it once, `delay` after the last call
pub fn debounce<A, F>(callback: F, delay: Duration) -> Debounced<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Debounced {
        callback: Arc::new(callback),
        delay,
        state: Arc::new(Mutex::new(DebounceState {
            generation: 0,
            pending: None,
        })),
    }
}

impl<A: Send + 'static> Debounced<A> {
    /// Request an execution with `args`, superseding any pending one
    ///
    /// # Panics
    ///
    /// Must be called from within a tokio runtime, the timer is a spawned task.
    pub fn call(&self, args: A) {
        let mut state = self.state.lock();

        if let Some(previous) = state.pending.take() {
            previous.abort();
            trace!("debounce: superseded pending execution");
        }

        state.generation = state.generation.wrapping_add(1);
        let generation = state.generation;

        let callback = self.callback.clone();
        let shared = self.state.clone();
        let delay = self.delay;

        state.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            {
                let mut state = shared.lock();
                // A newer call got the lock between our wake-up and now
                if state.generation != generation {
                    return;
                }
                state.pending = None;
            }

            trace!(?delay, "debounce: firing");
            callback(args);
        }));

        trace!(?delay, "debounce: armed");
    }

    /// Whether an execution is currently scheduled
    pub fn is_pending(&self) -> bool {
        self.state.lock().pending.is_some()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}
