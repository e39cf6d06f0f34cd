//! Periodic tick source for the countdown

use std::time::Duration;
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

/// Cadence of the countdown
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A single tick emitted by an armed source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSignal {
    /// Generation of the arming that produced this tick
    pub generation: u64,
}

/// Cancellable source of one-second ticks owned by the timer
pub trait TickSource: Send {
    /// Start emitting ticks tagged with `generation`, replacing any armed source
    fn arm(&mut self, generation: u64);
    /// Stop emitting ticks before returning
    fn cancel(&mut self);
    fn is_armed(&self) -> bool;
}

/// Tick source backed by a tokio interval task
#[derive(Debug)]
pub struct IntervalTickSource {
    tx: mpsc::UnboundedSender<TickSignal>,
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl IntervalTickSource {
    /// Create a one-second tick source and the receiver its ticks arrive on
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TickSignal>) {
        Self::with_period(TICK_PERIOD)
    }

    pub fn with_period(period: Duration) -> (Self, mpsc::UnboundedReceiver<TickSignal>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, period, handle: None }, rx)
    }
}

impl TickSource for IntervalTickSource {
    fn arm(&mut self, generation: u64) {
        self.cancel();

        let tx = self.tx.clone();
        let period = self.period;
        debug!("Arming tick source (generation {})", generation);

        self.handle = Some(tokio::spawn(async move {
            // First tick lands one full period after arming
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if tx.send(TickSignal { generation }).is_err() {
                    break;
                }
            }
        }));
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("Tick source cancelled");
        }
    }

    fn is_armed(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for IntervalTickSource {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Tick source that never fires on its own; tests drive ticks by hand
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct ManualTickSource {
    pub stats: std::sync::Arc<std::sync::Mutex<ManualTickStats>>,
}

#[cfg(test)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ManualTickStats {
    pub armed: Option<u64>,
    pub arm_calls: usize,
    pub cancel_calls: usize,
}

#[cfg(test)]
impl ManualTickSource {
    pub fn stats(&self) -> ManualTickStats {
        self.stats.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl TickSource for ManualTickSource {
    fn arm(&mut self, generation: u64) {
        let mut stats = self.stats.lock().unwrap();
        assert!(stats.armed.is_none(), "tick source armed twice");
        stats.armed = Some(generation);
        stats.arm_calls += 1;
    }

    fn cancel(&mut self) {
        let mut stats = self.stats.lock().unwrap();
        stats.armed = None;
        stats.cancel_calls += 1;
    }

    fn is_armed(&self) -> bool {
        self.stats.lock().unwrap().armed.is_some()
    }
}
