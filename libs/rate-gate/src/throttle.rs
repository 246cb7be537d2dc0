/// Leading-edge throttle: run immediately, then drop calls until the window has passed
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::trace;

/// Throttled wrapper around a callback
///
/// Clones share the last-invocation timestamp. Two wrappers built by separate
/// [`throttle`] calls never interact.
pub struct Throttled<A> {
    callback: Arc<dyn Fn(A) + Send + Sync>,
    delay: Duration,
    /// `None` until the first accepted call, so that call always runs
    last_invocation: Arc<Mutex<Option<Instant>>>,
}

impl<A> Clone for Throttled<A> {
    fn clone(&self) -> Self {
        Self {
            callback: self.callback.clone(),
            delay: self.delay,
            last_invocation: self.last_invocation.clone(),
        }
    }
}

/// Wrap `callback` so it runs at most once per `delay` window
pub fn throttle<A, F>(callback: F, delay: Duration) -> Throttled<A>
where
    F: Fn(A) + Send + Sync + 'static,
{
    Throttled {
        callback: Arc::new(callback),
        delay,
        last_invocation: Arc::new(Mutex::new(None)),
    }
}

impl<A> Throttled<A> {
    /// Run the callback now if the window has elapsed, otherwise drop the call
    ///
    /// Returns whether the callback ran. Dropped calls are never queued.
    pub fn call(&self, args: A) -> bool {
        let now = Instant::now();

        {
            let mut last = self.last_invocation.lock();
            if let Some(previous) = *last {
                if now.saturating_duration_since(previous) < self.delay {
                    trace!(delay = ?self.delay, "throttle: call dropped");
                    return false;
                }
            }
            *last = Some(now);
        }

        // Lock released: a re-entrant call from the callback is dropped, not deadlocked
        (self.callback)(args);
        true
    }

    /// When the callback last ran
    pub fn last_invocation(&self) -> Option<Instant> {
        *self.last_invocation.lock()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}
