//! Session flow tracking
//!
//! Follows completed sessions so the next one can be offered: a rest after a
//! focus block, another focus block after a rest.

use serde::{Deserialize, Serialize};

use crate::timer::{Mode, SessionKind, TimerEvent};

/// Session history and the session offered next
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Mode of the most recently completed session
    pub last_completed: Option<Mode>,
    /// Session kind offered after the last completion
    pub next_offer: Option<SessionKind>,
    pub completed_focus_sessions: u32,
    pub completed_rest_sessions: u32,
    /// Sum of the durations of every completed focus session
    pub total_focus_seconds: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a timer event into the session history
    pub fn apply(&mut self, event: &TimerEvent) {
        match event {
            TimerEvent::Complete(payload) => {
                self.last_completed = Some(payload.mode);
                match payload.mode.session_kind() {
                    Some(SessionKind::Focus) => {
                        self.completed_focus_sessions += 1;
                        self.total_focus_seconds += payload.duration;
                    }
                    Some(SessionKind::Rest) => self.completed_rest_sessions += 1,
                    None => {}
                }
                self.next_offer = payload.mode.session_kind().map(|kind| kind.next());
            }
            // A new session or a reset withdraws any pending offer
            TimerEvent::Start(_) | TimerEvent::Reset => self.next_offer = None,
            TimerEvent::ModeChange { .. } | TimerEvent::Tick(_) | TimerEvent::Pause(_) => {}
        }
    }
}
