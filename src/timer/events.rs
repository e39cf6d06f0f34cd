//! Timer lifecycle notifications
//!
//! The timer reports every transition through a [`TimerObserver`]. Each
//! notification is fired synchronously, after the timer has finished mutating
//! its own fields.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info, trace};

use super::{FormattedTime, Mode};

/// Payload of the start notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartPayload {
    pub duration: u64,
    pub remaining: u64,
    pub mode: Mode,
}

/// Payload of the per-second tick notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickPayload {
    pub remaining: u64,
    pub duration: u64,
    pub progress: f64,
    pub remaining_progress: f64,
    pub formatted: FormattedTime,
    pub mode: Mode,
}

/// Payload of the pause notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PausePayload {
    pub remaining: u64,
    pub mode: Mode,
}

/// Payload of the completion notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletePayload {
    /// The mode that just finished
    pub mode: Mode,
    pub duration: u64,
}

/// Listener for timer lifecycle events. Every method defaults to a no-op.
pub trait TimerObserver: Send {
    fn on_mode_change(&mut self, _mode: Mode) {}
    fn on_start(&mut self, _payload: &StartPayload) {}
    fn on_tick(&mut self, _payload: &TickPayload) {}
    fn on_pause(&mut self, _payload: &PausePayload) {}
    fn on_complete(&mut self, _payload: &CompletePayload) {}
    fn on_reset(&mut self) {}
}

/// Observer that ignores every notification
impl TimerObserver for () {}

/// Transport form of a timer notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimerEvent {
    ModeChange { mode: Mode },
    Start(StartPayload),
    Tick(TickPayload),
    Pause(PausePayload),
    Complete(CompletePayload),
    Reset,
}

impl TimerEvent {
    /// Short name used in logs and WebSocket frames
    pub fn name(&self) -> &'static str {
        match self {
            TimerEvent::ModeChange { .. } => "mode_change",
            TimerEvent::Start(_) => "start",
            TimerEvent::Tick(_) => "tick",
            TimerEvent::Pause(_) => "pause",
            TimerEvent::Complete(_) => "complete",
            TimerEvent::Reset => "reset",
        }
    }
}

/// Forwards every notification onto a broadcast channel
#[derive(Debug, Clone)]
pub struct BroadcastObserver {
    tx: broadcast::Sender<TimerEvent>,
}

impl BroadcastObserver {
    pub fn new(tx: broadcast::Sender<TimerEvent>) -> Self {
        Self { tx }
    }

    fn publish(&self, event: TimerEvent) {
        // No subscribers is not an error, the timer keeps running on its own
        if let Err(e) = self.tx.send(event) {
            trace!("No listeners for {} event", e.0.name());
        }
    }
}

impl TimerObserver for BroadcastObserver {
    fn on_mode_change(&mut self, mode: Mode) {
        debug!("Mode changed to {}", mode);
        self.publish(TimerEvent::ModeChange { mode });
    }

    fn on_start(&mut self, payload: &StartPayload) {
        info!(
            "{} session running: {}s of {}s left",
            payload.mode, payload.remaining, payload.duration
        );
        self.publish(TimerEvent::Start(payload.clone()));
    }

    fn on_tick(&mut self, payload: &TickPayload) {
        trace!("Tick: {} ({:.1}%)", payload.formatted.display, payload.progress);
        self.publish(TimerEvent::Tick(payload.clone()));
    }

    fn on_pause(&mut self, payload: &PausePayload) {
        info!("{} session paused with {}s left", payload.mode, payload.remaining);
        self.publish(TimerEvent::Pause(payload.clone()));
    }

    fn on_complete(&mut self, payload: &CompletePayload) {
        info!("{} session of {}s complete", payload.mode, payload.duration);
        self.publish(TimerEvent::Complete(payload.clone()));
    }

    fn on_reset(&mut self) {
        info!("Timer reset");
        self.publish(TimerEvent::Reset);
    }
}

/// Observer that records every notification, for tests
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingObserver {
    pub events: std::sync::Arc<std::sync::Mutex<Vec<TimerEvent>>>,
}

#[cfg(test)]
impl RecordingObserver {
    pub fn take(&self) -> Vec<TimerEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }

    fn push(&self, event: TimerEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[cfg(test)]
impl TimerObserver for RecordingObserver {
    fn on_mode_change(&mut self, mode: Mode) {
        self.push(TimerEvent::ModeChange { mode });
    }

    fn on_start(&mut self, payload: &StartPayload) {
        self.push(TimerEvent::Start(payload.clone()));
    }

    fn on_tick(&mut self, payload: &TickPayload) {
        self.push(TimerEvent::Tick(payload.clone()));
    }

    fn on_pause(&mut self, payload: &PausePayload) {
        self.push(TimerEvent::Pause(payload.clone()));
    }

    fn on_complete(&mut self, payload: &CompletePayload) {
        self.push(TimerEvent::Complete(payload.clone()));
    }

    fn on_reset(&mut self) {
        self.push(TimerEvent::Reset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_tag() {
        let event = TimerEvent::Complete(CompletePayload {
            mode: Mode::Focus,
            duration: 60,
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "complete");
        assert_eq!(json["mode"], "focus");
        assert_eq!(json["duration"], 60);

        let reset = serde_json::to_value(&TimerEvent::Reset).unwrap();
        assert_eq!(reset, serde_json::json!({ "event": "reset" }));
    }

    #[test]
    fn test_broadcast_observer_publishes() {
        let (tx, mut rx) = broadcast::channel(8);
        let mut observer = BroadcastObserver::new(tx);

        observer.on_mode_change(Mode::Rest);
        observer.on_reset();

        assert_eq!(rx.try_recv().unwrap(), TimerEvent::ModeChange { mode: Mode::Rest });
        assert_eq!(rx.try_recv().unwrap(), TimerEvent::Reset);
    }

    #[test]
    fn test_broadcast_observer_without_listeners() {
        let (tx, rx) = broadcast::channel(8);
        drop(rx);
        let mut observer = BroadcastObserver::new(tx);
        observer.on_reset();
    }
}
