use std::fmt;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// A one-shot, broadcast notification.
///
/// A `Signal` starts open and can be closed exactly once. Closing wakes
/// every thread blocked in [`Signal::wait`] or [`Signal::wait_timeout`],
/// and every later wait returns immediately. A closed signal is never
/// reopened; callers that need a new round create a new signal.
///
/// Clones share the same underlying state.
#[derive(Clone, Default)]
pub struct Signal {
    inner: Arc<SignalInner>,
}

#[derive(Default)]
struct SignalInner {
    /// Whether the signal has been closed.
    closed: Mutex<bool>,

    /// Condition variable used to wake waiters on close.
    condvar: Condvar,
}

impl Signal {
    /// Creates a new, open signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Closes the signal and wakes all waiters.
    ///
    /// Closing is idempotent: only the first call has an effect.
    ///
    /// # Returns
    ///
    /// `true` if this call closed the signal, `false` if it was already
    /// closed.
    pub fn close(&self) -> bool {
        let mut closed = self.lock();

        if *closed {
            return false;
        }

        *closed = true;
        self.inner.condvar.notify_all();

        true
    }

    /// Returns `true` once the signal has been closed.
    pub fn is_closed(&self) -> bool {
        *self.lock()
    }

    /// Blocks the current thread until the signal is closed.
    ///
    /// Returns immediately if the signal is already closed. A signal that
    /// is never closed blocks the caller forever.
    pub fn wait(&self) {
        let closed = self.lock();

        let _closed = self
            .inner
            .condvar
            .wait_while(closed, |closed| !*closed)
            .unwrap_or_else(PoisonError::into_inner);
    }

    /// Blocks the current thread until the signal is closed or `timeout`
    /// elapses, whichever comes first.
    ///
    /// # Returns
    ///
    /// `true` if the signal is closed, `false` if the timeout elapsed first.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let closed = self.lock();

        let (closed, _) = self
            .inner
            .condvar
            .wait_timeout_while(closed, timeout, |closed| !*closed)
            .unwrap_or_else(PoisonError::into_inner);

        *closed
    }

    /// Returns `true` if both handles refer to the same signal.
    pub fn same_as(&self, other: &Signal) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn lock(&self) -> MutexGuard<'_, bool> {
        self.inner
            .closed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// The stop request handed to a running workload.
///
/// A `StopSignal` is a read-only view over the stop [`Signal`] of one
/// worker round. Workloads poll [`StopSignal::is_stopped`] on every
/// iteration of their loop, or park on [`StopSignal::wait_timeout`]
/// between iterations to react to a stop without waiting out a full sleep.
#[derive(Clone, Debug)]
pub struct StopSignal {
    signal: Signal,
}

impl StopSignal {
    /// Returns `true` once a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        self.signal.is_closed()
    }

    /// Blocks until a stop is requested.
    pub fn wait(&self) {
        self.signal.wait();
    }

    /// Blocks until a stop is requested or `timeout` elapses.
    ///
    /// Returns `true` if a stop was requested.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        self.signal.wait_timeout(timeout)
    }

    /// Returns `true` if both stop signals belong to the same round.
    pub fn same_as(&self, other: &StopSignal) -> bool {
        self.signal.same_as(&other.signal)
    }
}

impl From<Signal> for StopSignal {
    fn from(signal: Signal) -> Self {
        Self { signal }
    }
}
