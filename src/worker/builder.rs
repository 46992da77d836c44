use super::{ManagedWorker, Workload};

use std::fmt;

/// Callback invoked with the error returned by a workload run.
pub(crate) type ErrorHook<E> = Box<dyn Fn(&E) + Send + Sync>;

/// Settings applied to every thread a worker spawns.
pub(crate) struct Config<W: Workload> {
    /// Name given to the worker thread, also used in log events.
    pub(crate) name: Option<String>,

    /// Stack size of the worker thread, in bytes.
    pub(crate) stack_size: Option<usize>,

    /// Observer for errors returned by the workload.
    pub(crate) on_error: Option<ErrorHook<W::Error>>,
}

impl<W: Workload> Default for Config<W> {
    fn default() -> Self {
        Self {
            name: None,
            stack_size: None,
            on_error: None,
        }
    }
}

impl<W: Workload> fmt::Debug for Config<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("name", &self.name)
            .field("stack_size", &self.stack_size)
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// Builder for configuring and creating a [`ManagedWorker`].
///
/// # Examples
///
/// ```rust,ignore
/// let worker = WorkerBuilder::new()
///     .name("ingest")
///     .on_error(|err: &IngestError| eprintln!("ingest failed: {err}"))
///     .build(Ingest::default());
/// ```
pub struct WorkerBuilder<W: Workload> {
    config: Config<W>,
}

impl<W: Workload> WorkerBuilder<W> {
    /// Creates a builder with the default configuration: an unnamed
    /// thread with the platform stack size and no error hook.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Names the worker thread.
    ///
    /// The name shows up in panic messages and in the `worker` field of
    /// the worker's log events.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = Some(name.into());
        self
    }

    /// Sets the stack size of the worker thread, in bytes.
    ///
    /// # Panics
    ///
    /// Panics if `size == 0`.
    pub fn stack_size(mut self, size: usize) -> Self {
        assert!(size > 0, "stack_size must be > 0");

        self.config.stack_size = Some(size);
        self
    }

    /// Installs an observer for errors returned by the workload.
    ///
    /// The hook runs on the worker thread after the workload returns and
    /// before joiners are released. It only observes: the worker never
    /// retries a failed workload.
    ///
    /// While the hook runs, the worker still holds the workload and is
    /// still `Running`. Calling [`ManagedWorker::with_workload`] or
    /// [`ManagedWorker::join`] on the same worker from the hook deadlocks,
    /// and calling [`ManagedWorker::start`] is ignored.
    pub fn on_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&W::Error) + Send + Sync + 'static,
    {
        self.config.on_error = Some(Box::new(hook));
        self
    }

    /// Builds a worker bound to `workload`, in the `Stopped` state.
    pub fn build(self, workload: W) -> ManagedWorker<W> {
        let worker = self.build_uninit();
        worker.init(workload);
        worker
    }

    /// Builds a worker with no workload bound yet.
    ///
    /// The worker must be initialized with [`ManagedWorker::init`] before
    /// it can be started.
    pub fn build_uninit(self) -> ManagedWorker<W> {
        ManagedWorker::with_config(self.config)
    }
}

impl<W: Workload> Default for WorkerBuilder<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Workload> fmt::Debug for WorkerBuilder<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerBuilder")
            .field("config", &self.config)
            .finish()
    }
}
