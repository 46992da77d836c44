//! Example: Two start/stop rounds over the same counter workload

use lifeline::{ManagedWorker, StopSignal, Workload};
use std::convert::Infallible;
use std::thread;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

struct Counter {
    count: u64,
}

impl Workload for Counter {
    type Error = Infallible;

    fn run(&mut self, stop: &StopSignal) -> Result<(), Self::Error> {
        info!("counter running");

        loop {
            if stop.is_stopped() {
                info!("stop received");
                return Ok(());
            }

            info!(count = self.count, "tick");
            self.count += 1;
            thread::sleep(Duration::from_millis(400));
        }
    }
}

fn main() -> Result<(), lifeline::WorkerError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let worker = ManagedWorker::new(Counter { count: 0 });

    // Each round gets a fresh stop signal, the count carries over.
    for _ in 0..2 {
        info!("starting");
        worker.start()?;

        thread::sleep(Duration::from_secs(1));

        info!("stopping");
        worker.stop();
        worker.join();
        info!(state = %worker.state(), "stopped");

        thread::sleep(Duration::from_secs(1));
    }

    let count = worker.with_workload(|counter| counter.count)?;
    info!(count, "exit");

    Ok(())
}
