//! Synchronization primitives.
//!
//! This module provides the one-shot [`Signal`] used by the worker to
//! request a stop and to report completion, and the [`StopSignal`] view
//! handed to workloads.

mod signal;

pub use signal::{Signal, StopSignal};
