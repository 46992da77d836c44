#![allow(dead_code)]

use lifeline::{StopSignal, Workload};
use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Installs a test-friendly subscriber, once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Increments `count` once per iteration, sleeping `interval` in between.
pub struct Counter {
    pub count: usize,
    pub interval: Duration,
}

impl Counter {
    pub fn new(interval: Duration) -> Self {
        Self { count: 0, interval }
    }
}

impl Workload for Counter {
    type Error = Infallible;

    fn run(&mut self, stop: &StopSignal) -> Result<(), Self::Error> {
        loop {
            if stop.is_stopped() {
                return Ok(());
            }

            self.count += 1;
            thread::sleep(self.interval);
        }
    }
}

/// Parks until stopped, recording how many runs entered and how many are
/// active at once.
#[derive(Clone, Default)]
pub struct Probe {
    pub runs: Arc<AtomicUsize>,
    pub active: Arc<AtomicUsize>,
    pub max_active: Arc<AtomicUsize>,
    pub signals: Arc<Mutex<Vec<StopSignal>>>,
}

impl Workload for Probe {
    type Error = Infallible;

    fn run(&mut self, stop: &StopSignal) -> Result<(), Self::Error> {
        self.signals.lock().unwrap().push(stop.clone());
        self.runs.fetch_add(1, Ordering::SeqCst);
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(active, Ordering::SeqCst);

        stop.wait();

        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Returns on its own after `iterations` loop turns, without being stopped.
pub struct Finite {
    pub iterations: usize,
    pub seen: Arc<Mutex<Option<StopSignal>>>,
}

impl Workload for Finite {
    type Error = Infallible;

    fn run(&mut self, stop: &StopSignal) -> Result<(), Self::Error> {
        *self.seen.lock().unwrap() = Some(stop.clone());

        for _ in 0..self.iterations {
            if stop.is_stopped() {
                break;
            }
            thread::sleep(Duration::from_millis(1));
        }

        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Broken(pub &'static str);

/// Fails immediately with `Broken`.
pub struct Failing;

impl Workload for Failing {
    type Error = Broken;

    fn run(&mut self, _stop: &StopSignal) -> Result<(), Self::Error> {
        Err(Broken("disk on fire"))
    }
}

/// Panics on its first run, then behaves like a stoppable loop.
#[derive(Default)]
pub struct PanicsOnce {
    pub panicked: bool,
    pub runs: usize,
}

impl Workload for PanicsOnce {
    type Error = Infallible;

    fn run(&mut self, stop: &StopSignal) -> Result<(), Self::Error> {
        self.runs += 1;

        if !self.panicked {
            self.panicked = true;
            panic!("workload blew up");
        }

        stop.wait();
        Ok(())
    }
}

/// Polls `condition` until it holds or `timeout` elapses.
pub fn wait_until(timeout: Duration, condition: impl Fn() -> bool) -> bool {
    let deadline = std::time::Instant::now() + timeout;

    while std::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }

    condition()
}
