//! Trailing-edge debounce on the tokio runtime.
//!
//! [`debounce`] wraps a callback so that a burst of calls results in a
//! single invocation, `wait` after the last call, with the last call's
//! arguments.  Every wrapped handle owns its own timer.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

struct Inner<T> {
    callback: Box<dyn Fn(T) + Send + Sync>,
    wait: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

/// A debounced callback.  Clones share the same pending timer.
pub struct Debounced<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Debounced<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Wrap `callback` so it only runs once calls have been quiet for `wait`.
pub fn debounce<T, F>(callback: F, wait: Duration) -> Debounced<T>
where
    T: Send + 'static,
    F: Fn(T) + Send + Sync + 'static,
{
    Debounced {
        inner: Arc::new(Inner {
            callback: Box::new(callback),
            wait,
            pending: Mutex::new(None),
        }),
    }
}

impl<T: Send + 'static> Debounced<T> {
    /// Schedule the callback with `args`, replacing any pending call.
    ///
    /// Must be called from within a tokio runtime.
    pub fn call(&self, args: T) {
        let mut pending = self
            .inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        let inner = Arc::clone(&self.inner);
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(inner.wait).await;
            tracing::trace!(wait = ?inner.wait, "debounced call firing");
            (inner.callback)(args);
        }));
    }

    /// Drop the pending call, if any.
    pub fn cancel(&self) {
        let mut pending = self
            .inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
        }
    }

    /// True while a call is scheduled but has not run yet.
    pub fn is_pending(&self) -> bool {
        self.inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn wait(&self) -> Duration {
        self.inner.wait
    }
}
