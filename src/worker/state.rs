use std::fmt;

/// Execution status of a [`ManagedWorker`](crate::ManagedWorker).
///
/// The legal transitions are:
///
/// ```text
/// Stopped  --start()-->             Running
/// Running  --stop()-->              Stopping
/// Stopping --workload returns-->    Stopped
/// Running  --workload returns-->    Stopped
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    /// The workload is executing on its own thread.
    Running,

    /// A stop has been requested; the workload has not returned yet.
    Stopping,

    /// No workload thread is active. The worker may be started.
    #[default]
    Stopped,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            State::Running => "running",
            State::Stopping => "stopping",
            State::Stopped => "stopped",
        };

        f.write_str(name)
    }
}
