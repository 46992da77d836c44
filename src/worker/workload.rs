use crate::sync::StopSignal;

/// A unit of work driven by a [`ManagedWorker`](crate::ManagedWorker).
///
/// `run` is expected to be a loop that checks the stop signal on every
/// iteration and returns promptly once a stop is requested:
///
/// ```rust
/// use lifeline::{StopSignal, Workload};
/// use std::convert::Infallible;
/// use std::time::Duration;
///
/// struct Ticker {
///     ticks: u64,
/// }
///
/// impl Workload for Ticker {
///     type Error = Infallible;
///
///     fn run(&mut self, stop: &StopSignal) -> Result<(), Self::Error> {
///         while !stop.is_stopped() {
///             self.ticks += 1;
///             stop.wait_timeout(Duration::from_millis(10));
///         }
///         Ok(())
///     }
/// }
/// ```
///
/// Cancellation is cooperative. A workload that never looks at its stop
/// signal keeps its thread alive, and the worker cannot end it.
///
/// The workload value is kept by the worker across rounds, so fields
/// mutated by one run are visible to the next.
pub trait Workload: Send + 'static {
    /// Failure type returned by [`Workload::run`].
    type Error;

    /// Runs the workload until `stop` is signaled or the work is done.
    ///
    /// The returned value is not surfaced by the worker. It is dropped
    /// unless an error hook was installed with
    /// [`WorkerBuilder::on_error`](crate::WorkerBuilder::on_error).
    fn run(&mut self, stop: &StopSignal) -> Result<(), Self::Error>;
}
