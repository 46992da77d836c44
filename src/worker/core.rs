use super::builder::Config;
use super::{State, Workload};
use crate::error::WorkerError;
use crate::sync::{Signal, StopSignal};

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use std::thread;
use std::time::Duration;

use tracing::{debug, error, trace};

/// A restartable worker thread with cooperative cancellation.
///
/// A `ManagedWorker` binds exactly one [`Workload`] and runs it on a
/// dedicated thread each time it is started. Stopping only requests
/// cancellation: the workload observes its [`StopSignal`] and returns on
/// its own, at which point the worker goes back to [`State::Stopped`] and
/// can be started again.
///
/// `ManagedWorker` is a handle. Clones share the same worker, and every
/// operation may be called concurrently from any thread.
pub struct ManagedWorker<W: Workload> {
    inner: Arc<Inner<W>>,
}

struct Inner<W: Workload> {
    /// State machine and signals of the current round.
    ///
    /// All transitions happen while this lock is held.
    control: Mutex<Control>,

    /// The bound workload. Set once, under the `control` lock.
    ///
    /// Its mutex is held by the worker thread for the whole run.
    workload: OnceLock<Mutex<W>>,

    /// Thread and error hook settings.
    config: Config<W>,
}

struct Control {
    initialized: bool,
    state: State,

    /// Stop request of the current round.
    stop: Signal,

    /// Completion of the current round.
    ///
    /// Before the first start this signal is never closed, so a join
    /// issued too early blocks.
    done: Signal,
}

impl<W: Workload> ManagedWorker<W> {
    /// Creates a worker bound to `workload`, in the `Stopped` state.
    ///
    /// Use [`WorkerBuilder`](crate::WorkerBuilder) to name the thread or
    /// observe workload errors.
    pub fn new(workload: W) -> Self {
        let worker = Self::uninit();
        worker.init(workload);
        worker
    }

    /// Creates a worker with no workload bound yet.
    pub fn uninit() -> Self {
        Self::with_config(Config::default())
    }

    pub(crate) fn with_config(config: Config<W>) -> Self {
        Self {
            inner: Arc::new(Inner {
                control: Mutex::new(Control {
                    initialized: false,
                    state: State::Stopped,
                    stop: Signal::new(),
                    done: Signal::new(),
                }),
                workload: OnceLock::new(),
                config,
            }),
        }
    }

    /// Binds `workload` to this worker and puts it in the `Stopped` state.
    ///
    /// # Panics
    ///
    /// Panics with [`WorkerError::AlreadyInitialized`] if a workload is
    /// already bound. Initializing twice is a bug in the calling code.
    pub fn init(&self, workload: W) -> &Self {
        let mut control = self.inner.lock_control();

        // Release the lock before panicking so the worker stays usable.
        if control.initialized || self.inner.workload.set(Mutex::new(workload)).is_err() {
            drop(control);
            panic!("{}", WorkerError::AlreadyInitialized);
        }

        control.initialized = true;
        control.state = State::Stopped;

        self
    }

    /// Starts the workload on a new thread.
    ///
    /// A fresh stop signal and completion signal are created for the
    /// round, and the call returns without waiting for the workload to
    /// make progress. Starting a worker that is `Running` or `Stopping`
    /// does nothing.
    ///
    /// # Errors
    ///
    /// - [`WorkerError::NotInitialized`] if no workload is bound.
    /// - [`WorkerError::Spawn`] if the thread could not be spawned. The
    ///   worker is left `Stopped`.
    pub fn start(&self) -> Result<(), WorkerError> {
        let mut control = self.inner.lock_control();

        if !control.initialized {
            return Err(WorkerError::NotInitialized);
        }

        if control.state != State::Stopped {
            trace!(worker = self.inner.label(), state = %control.state, "start ignored");
            return Ok(());
        }

        let stop = Signal::new();
        let done = Signal::new();

        control.stop = stop.clone();
        control.done = done.clone();
        control.state = State::Running;

        let mut builder = thread::Builder::new();
        if let Some(name) = &self.inner.config.name {
            builder = builder.name(name.clone());
        }
        if let Some(size) = self.inner.config.stack_size {
            builder = builder.stack_size(size);
        }

        let inner = Arc::clone(&self.inner);
        let round_stop = stop.clone();
        let round_done = done.clone();

        if let Err(err) = builder.spawn(move || inner.run(round_stop, round_done)) {
            control.state = State::Stopped;
            stop.close();
            done.close();

            error!(worker = self.inner.label(), error = %err, "failed to spawn worker thread");
            return Err(WorkerError::Spawn(err));
        }

        debug!(worker = self.inner.label(), "worker started");

        Ok(())
    }

    /// Requests the running workload to stop.
    ///
    /// Moves the worker from `Running` to `Stopping` and closes the
    /// round's stop signal. The call does not wait for the workload to
    /// return; use [`ManagedWorker::join`] for that. Stopping a worker
    /// that is not `Running` does nothing.
    ///
    /// # Returns
    ///
    /// `true` if this call requested the stop.
    pub fn stop(&self) -> bool {
        let mut control = self.inner.lock_control();

        if control.state != State::Running {
            trace!(worker = self.inner.label(), state = %control.state, "stop ignored");
            return false;
        }

        control.state = State::Stopping;
        control.stop.close();

        debug!(worker = self.inner.label(), "stop requested");

        true
    }

    /// Blocks until the most recently started round has finished.
    ///
    /// Returns once the workload has returned and the worker is back in
    /// `Stopped`. The lock is only taken to read the current completion
    /// signal, so joining never holds up `start` or `stop`.
    ///
    /// Joining a worker that was never started blocks forever.
    pub fn join(&self) {
        let done = self.inner.lock_control().done.clone();
        done.wait();
    }

    /// Like [`ManagedWorker::join`], but gives up after `timeout`.
    ///
    /// Returns `true` if the round finished within the timeout.
    pub fn join_timeout(&self, timeout: Duration) -> bool {
        let done = self.inner.lock_control().done.clone();
        done.wait_timeout(timeout)
    }

    /// Returns the current state.
    pub fn state(&self) -> State {
        self.inner.lock_control().state
    }

    /// Returns `true` while the worker is `Running`.
    pub fn is_running(&self) -> bool {
        self.state() == State::Running
    }

    /// Returns `true` once a workload has been bound.
    pub fn is_initialized(&self) -> bool {
        self.inner.lock_control().initialized
    }

    /// Returns the configured thread name, if any.
    pub fn name(&self) -> Option<&str> {
        self.inner.config.name.as_deref()
    }

    /// Runs `f` with exclusive access to the workload.
    ///
    /// Blocks while a round is executing, since the worker thread holds
    /// the workload for the whole run. Intended for inspecting or
    /// adjusting the workload between rounds.
    ///
    /// # Errors
    ///
    /// [`WorkerError::NotInitialized`] if no workload is bound.
    pub fn with_workload<R>(&self, f: impl FnOnce(&mut W) -> R) -> Result<R, WorkerError> {
        let workload = self
            .inner
            .workload
            .get()
            .ok_or(WorkerError::NotInitialized)?;

        let mut workload = workload.lock().unwrap_or_else(PoisonError::into_inner);

        Ok(f(&mut workload))
    }
}

impl<W: Workload> Inner<W> {
    fn lock_control(&self) -> MutexGuard<'_, Control> {
        self.control.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn label(&self) -> &str {
        self.config.name.as_deref().unwrap_or("unnamed")
    }

    /// Body of the worker thread.
    ///
    /// The cleanup guard is declared first so it is dropped last, after
    /// the workload lock has been released, and also runs when the
    /// workload panics.
    fn run(&self, stop: Signal, done: Signal) {
        let _cleanup = Cleanup {
            inner: self,
            stop: stop.clone(),
            done,
        };

        let Some(workload) = self.workload.get() else {
            return;
        };

        let mut workload = workload.lock().unwrap_or_else(PoisonError::into_inner);

        if let Err(err) = workload.run(&StopSignal::from(stop)) {
            if let Some(hook) = &self.config.on_error {
                hook(&err);
            }
        }
    }
}

/// Restores the worker to `Stopped` when a round ends.
struct Cleanup<'a, W: Workload> {
    inner: &'a Inner<W>,
    stop: Signal,
    done: Signal,
}

impl<W: Workload> Drop for Cleanup<'_, W> {
    fn drop(&mut self) {
        let mut control = self.inner.lock_control();

        let requested = control.state == State::Stopping;

        // The workload returned on its own: close the stop signal so
        // anything still holding it sees the round as over.
        if !requested {
            self.stop.close();
        }

        control.state = State::Stopped;
        self.done.close();

        debug!(
            worker = self.inner.label(),
            requested,
            panicked = thread::panicking(),
            "worker exited"
        );
    }
}

impl<W: Workload> Clone for ManagedWorker<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W: Workload> Default for ManagedWorker<W> {
    fn default() -> Self {
        Self::uninit()
    }
}

impl<W: Workload> fmt::Debug for ManagedWorker<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let control = self.inner.lock_control();

        f.debug_struct("ManagedWorker")
            .field("name", &self.inner.config.name)
            .field("initialized", &control.initialized)
            .field("state", &control.state)
            .finish()
    }
}
