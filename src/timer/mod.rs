//! Countdown timer module
//!
//! This module contains the focus/rest countdown state machine, its derived
//! readouts, the observer contract and the periodic tick source that drives it.

pub mod countdown;
pub mod events;
pub mod format;
pub mod mode;
pub mod tick_source;

// Re-export main types
pub use countdown::{CountdownTimer, TimerSnapshot};
pub use events::{
    BroadcastObserver, CompletePayload, PausePayload, StartPayload, TickPayload, TimerEvent,
    TimerObserver,
};
pub use format::FormattedTime;
pub use mode::{Mode, RunState, SessionKind};
pub use tick_source::{IntervalTickSource, TickSignal, TickSource};
