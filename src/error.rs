use std::io;

use thiserror::Error;

/// Errors produced by [`ManagedWorker`](crate::ManagedWorker).
///
/// Only [`WorkerError::NotInitialized`] and [`WorkerError::Spawn`] are ever
/// returned. [`WorkerError::AlreadyInitialized`] describes a contract
/// violation and is raised as a panic.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The worker was initialized a second time.
    #[error("worker has already been initialized")]
    AlreadyInitialized,

    /// The worker has no workload bound to it.
    #[error("worker has not been initialized")]
    NotInitialized,

    /// The operating system refused to spawn the worker thread.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] io::Error),
}
