//! # Lifeline
//!
//! **Lifeline** wraps a long-running loop in a thread that can be started,
//! asked to stop, joined, and started again.
//!
//! It is not a thread pool or a scheduler. A [`ManagedWorker`] owns exactly
//! one [`Workload`] and at most one thread running it, and keeps the
//! bookkeeping around that thread race-free:
//!
//! - **start** spawns the workload on a fresh thread with a fresh
//!   [`StopSignal`], and is ignored while a round is active
//! - **stop** requests cooperative cancellation, and is ignored unless the
//!   worker is running
//! - **join** blocks until the current round has finished
//!
//! Cancellation is cooperative: the workload polls its stop signal and
//! returns. Whatever the workload returns is dropped unless an error hook
//! is installed through [`WorkerBuilder::on_error`].
//!
//! ## Quick Start
//!
//! ```rust
//! use lifeline::{ManagedWorker, StopSignal, Workload};
//! use std::convert::Infallible;
//! use std::time::Duration;
//!
//! struct Counter {
//!     count: u64,
//! }
//!
//! impl Workload for Counter {
//!     type Error = Infallible;
//!
//!     fn run(&mut self, stop: &StopSignal) -> Result<(), Self::Error> {
//!         while !stop.is_stopped() {
//!             self.count += 1;
//!             stop.wait_timeout(Duration::from_millis(5));
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let worker = ManagedWorker::new(Counter { count: 0 });
//!
//! worker.start().unwrap();
//! std::thread::sleep(Duration::from_millis(20));
//! worker.stop();
//! worker.join();
//!
//! let count = worker.with_workload(|counter| counter.count).unwrap();
//! assert!(count > 0);
//! ```
//!
//! ## Modules
//!
//! - [`sync`] — The one-shot [`Signal`](sync::Signal) and the
//!   [`StopSignal`] handed to workloads

mod error;
mod worker;

pub mod sync;

pub use error::WorkerError;
pub use sync::StopSignal;
pub use worker::{ManagedWorker, State, WorkerBuilder, Workload};
