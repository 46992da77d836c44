//! Managed worker lifecycle.
//!
//! This module contains the worker state machine and its collaborators:
//! - [`ManagedWorker`], which starts, stops and joins one workload thread,
//! - [`Workload`], the trait implemented by the code the worker runs,
//! - [`WorkerBuilder`], for thread and error hook configuration,
//! - [`State`], the worker's execution status.

mod builder;
mod core;
mod state;
mod workload;

pub use builder::WorkerBuilder;
pub use self::core::ManagedWorker;
pub use state::State;
pub use workload::Workload;
