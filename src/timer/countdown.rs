//! Countdown timer state machine
//!
//! A single [`CountdownTimer`] owns how much time is left in the current
//! focus or rest session. It is mutated only through `start`, `pause`,
//! `resume`, `toggle`, `reset` and the tick advance; every transition
//! notifies the observer after the fields have been updated.
//!
//! Calls that make no sense in the current state (starting twice, pausing a
//! stopped timer, resuming something that is not paused) are ignored.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    events::{CompletePayload, PausePayload, StartPayload, TickPayload, TimerObserver},
    format::{elapsed_percent, remaining_percent, FormattedTime},
    mode::{Mode, RunState, SessionKind},
    tick_source::{TickSignal, TickSource},
};

/// Full snapshot of the timer for status displays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    /// True while a session is armed, including while it is paused
    pub is_running: bool,
    pub is_paused: bool,
    pub mode: Mode,
    pub duration: u64,
    pub remaining: u64,
    pub progress: f64,
    pub remaining_progress: f64,
    pub formatted: FormattedTime,
}

/// Focus/rest countdown driven by a one-second tick source
pub struct CountdownTimer {
    duration_seconds: u64,
    remaining_seconds: u64,
    mode: Mode,
    run_state: RunState,
    /// Bumped every time the tick source is armed
    generation: u64,
    ticks: Box<dyn TickSource>,
    observer: Box<dyn TimerObserver>,
}

impl CountdownTimer {
    /// Create an idle timer
    pub fn new(ticks: impl TickSource + 'static, observer: impl TimerObserver + 'static) -> Self {
        Self {
            duration_seconds: 0,
            remaining_seconds: 0,
            mode: Mode::Idle,
            run_state: RunState::Stopped,
            generation: 0,
            ticks: Box::new(ticks),
            observer: Box::new(observer),
        }
    }

    /// Start a fresh session, or re-arm a paused one
    ///
    /// A paused timer keeps its duration, remaining time and mode; `minutes`
    /// and `kind` are only read when beginning a new session.
    pub fn start(&mut self, minutes: u64, kind: SessionKind) {
        if self.run_state == RunState::Running {
            debug!("Ignoring start: timer already running");
            return;
        }

        if self.run_state != RunState::Paused {
            if minutes == 0 {
                debug!("Ignoring start: session length must be positive");
                return;
            }

            let Some(duration) = minutes.checked_mul(60) else {
                debug!("Ignoring start: {} minutes does not fit in seconds", minutes);
                return;
            };

            self.duration_seconds = duration;
            self.remaining_seconds = self.duration_seconds;
            self.mode = kind.into();
            self.observer.on_mode_change(self.mode);
        }

        self.run_state = RunState::Running;
        self.observer.on_start(&StartPayload {
            duration: self.duration_seconds,
            remaining: self.remaining_seconds,
            mode: self.mode,
        });

        self.generation += 1;
        self.ticks.arm(self.generation);
    }

    /// Deliver a tick from the tick source, dropping stale ones
    pub fn handle_tick(&mut self, signal: TickSignal) {
        if signal.generation != self.generation || !self.ticks.is_armed() {
            debug!(
                "Dropping stale tick (generation {}, current {})",
                signal.generation, self.generation
            );
            return;
        }
        self.tick();
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) {
        if self.run_state != RunState::Running {
            return;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);

        self.observer.on_tick(&TickPayload {
            remaining: self.remaining_seconds,
            duration: self.duration_seconds,
            progress: self.progress(),
            remaining_progress: self.remaining_progress(),
            formatted: self.formatted_time(),
            mode: self.mode,
        });

        if self.remaining_seconds == 0 {
            self.complete();
        }
    }

    /// Hold the countdown without losing any state
    pub fn pause(&mut self) {
        if self.run_state != RunState::Running {
            debug!("Ignoring pause: timer not running");
            return;
        }

        self.ticks.cancel();
        self.run_state = RunState::Paused;

        self.observer.on_pause(&PausePayload {
            remaining: self.remaining_seconds,
            mode: self.mode,
        });
    }

    /// Continue a paused session from the exact second it was paused at
    pub fn resume(&mut self) {
        if self.run_state != RunState::Paused {
            debug!("Ignoring resume: timer not paused");
            return;
        }

        // Paused implies a session mode, so this always resolves
        if let Some(kind) = self.mode.session_kind() {
            self.start(self.remaining_seconds / 60, kind);
        }
    }

    /// Pause a running session or resume a paused one
    pub fn toggle(&mut self) {
        match self.run_state {
            RunState::Paused => self.resume(),
            RunState::Running => self.pause(),
            RunState::Stopped => debug!("Ignoring toggle: no active session"),
        }
    }

    /// Return to idle from any state
    pub fn reset(&mut self) {
        self.ticks.cancel();
        self.run_state = RunState::Stopped;
        self.remaining_seconds = 0;
        self.duration_seconds = 0;
        self.mode = Mode::Idle;

        self.observer.on_reset();
        self.observer.on_mode_change(self.mode);
    }

    fn complete(&mut self) {
        self.ticks.cancel();
        self.run_state = RunState::Stopped;
        self.remaining_seconds = 0;

        // Mode stays as-is until the next start or reset
        let completed = self.mode;
        self.observer.on_complete(&CompletePayload {
            mode: completed,
            duration: self.duration_seconds,
        });
    }

    /// Percentage of the session elapsed (0-100)
    pub fn progress(&self) -> f64 {
        elapsed_percent(self.duration_seconds, self.remaining_seconds)
    }

    /// Percentage of the session left (100-0), drives the fill level
    pub fn remaining_progress(&self) -> f64 {
        remaining_percent(self.duration_seconds, self.remaining_seconds)
    }

    pub fn formatted_time(&self) -> FormattedTime {
        FormattedTime::from_seconds(self.remaining_seconds)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            is_running: self.is_running(),
            is_paused: self.is_paused(),
            mode: self.mode,
            duration: self.duration_seconds,
            remaining: self.remaining_seconds,
            progress: self.progress(),
            remaining_progress: self.remaining_progress(),
            formatted: self.formatted_time(),
        }
    }

    /// Session kind to offer next: the other kind right after a completion,
    /// otherwise focus
    pub fn next_session_kind(&self) -> SessionKind {
        match (self.run_state, self.mode.session_kind()) {
            (RunState::Stopped, Some(completed)) => completed.next(),
            _ => SessionKind::Focus,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    /// True while a session is armed or paused
    pub fn is_running(&self) -> bool {
        self.run_state != RunState::Stopped
    }

    pub fn is_paused(&self) -> bool {
        self.run_state == RunState::Paused
    }

    pub fn is_focus_mode(&self) -> bool {
        self.mode == Mode::Focus
    }

    pub fn is_rest_mode(&self) -> bool {
        self.mode == Mode::Rest
    }

    pub fn is_idle(&self) -> bool {
        self.mode == Mode::Idle
    }
}

impl std::fmt::Debug for CountdownTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountdownTimer")
            .field("duration_seconds", &self.duration_seconds)
            .field("remaining_seconds", &self.remaining_seconds)
            .field("mode", &self.mode)
            .field("run_state", &self.run_state)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::{
        events::RecordingObserver,
        tick_source::ManualTickSource,
        TimerEvent,
    };

    fn timer() -> (CountdownTimer, ManualTickSource, RecordingObserver) {
        let ticks = ManualTickSource::default();
        let observer = RecordingObserver::default();
        let timer = CountdownTimer::new(ticks.clone(), observer.clone());
        (timer, ticks, observer)
    }

    fn assert_idle(timer: &CountdownTimer) {
        let state = timer.snapshot();
        assert!(!state.is_running);
        assert!(!state.is_paused);
        assert_eq!(state.mode, Mode::Idle);
        assert_eq!(state.duration, 0);
        assert_eq!(state.remaining, 0);
    }

    #[test]
    fn test_new_timer_is_idle() {
        let (timer, ticks, _) = timer();
        assert_idle(&timer);
        assert!(timer.is_idle());
        assert_eq!(timer.progress(), 0.0);
        assert_eq!(timer.remaining_progress(), 100.0);
        assert_eq!(timer.formatted_time().display, "00:00");
        assert!(!ticks.is_armed());
    }

    #[test]
    fn test_start_sets_up_session() {
        for (minutes, kind) in [(1, SessionKind::Focus), (25, SessionKind::Focus), (5, SessionKind::Rest)] {
            let (mut timer, ticks, observer) = timer();
            timer.start(minutes, kind);

            let state = timer.snapshot();
            assert!(state.is_running);
            assert!(!state.is_paused);
            assert_eq!(state.duration, minutes * 60);
            assert_eq!(state.remaining, minutes * 60);
            assert_eq!(state.mode, Mode::from(kind));
            assert_eq!(ticks.stats().armed, Some(1));

            assert_eq!(
                observer.take(),
                vec![
                    TimerEvent::ModeChange { mode: kind.into() },
                    TimerEvent::Start(StartPayload {
                        duration: minutes * 60,
                        remaining: minutes * 60,
                        mode: kind.into(),
                    }),
                ]
            );
        }
    }

    #[test]
    fn test_start_with_zero_minutes_is_ignored() {
        let (mut timer, ticks, observer) = timer();
        timer.start(0, SessionKind::Focus);

        assert_idle(&timer);
        assert!(observer.take().is_empty());
        assert_eq!(ticks.stats().arm_calls, 0);
    }

    #[test]
    fn test_start_with_overflowing_minutes_is_ignored() {
        let (mut timer, ticks, observer) = timer();
        timer.start(u64::MAX / 60 + 1, SessionKind::Focus);

        assert_idle(&timer);
        assert!(observer.take().is_empty());
        assert_eq!(ticks.stats().arm_calls, 0);

        // The largest representable session still starts
        timer.start(u64::MAX / 60, SessionKind::Rest);
        assert_eq!(timer.duration_seconds(), (u64::MAX / 60) * 60);
        assert!(timer.is_running());
    }

    #[test]
    fn test_start_while_running_is_ignored() {
        let (mut timer, ticks, observer) = timer();
        timer.start(5, SessionKind::Focus);
        timer.tick();
        observer.take();

        timer.start(10, SessionKind::Rest);

        assert_eq!(timer.duration_seconds(), 300);
        assert_eq!(timer.remaining_seconds(), 299);
        assert_eq!(timer.mode(), Mode::Focus);
        assert_eq!(ticks.stats().arm_calls, 1);
        assert!(observer.take().is_empty());
    }

    #[test]
    fn test_tick_reports_progress() {
        let (mut timer, _, observer) = timer();
        timer.start(1, SessionKind::Focus);
        observer.take();

        for _ in 0..15 {
            timer.tick();
        }

        let events = observer.take();
        assert_eq!(events.len(), 15);
        match events.last() {
            Some(TimerEvent::Tick(payload)) => {
                assert_eq!(payload.remaining, 45);
                assert_eq!(payload.duration, 60);
                assert_eq!(payload.progress, 25.0);
                assert_eq!(payload.remaining_progress, 75.0);
                assert_eq!(payload.formatted.display, "00:45");
                assert_eq!(payload.formatted.short_display, "45s");
                assert_eq!(payload.mode, Mode::Focus);
            }
            other => panic!("expected tick, got {:?}", other),
        }
    }

    #[test]
    fn test_progress_is_monotonic_and_bounded() {
        let (mut timer, _, _) = timer();
        timer.start(2, SessionKind::Rest);
        assert_eq!(timer.progress(), 0.0);

        let mut last = timer.progress();
        while timer.is_running() {
            timer.tick();
            assert!(timer.remaining_seconds() <= timer.duration_seconds());
            assert!(timer.progress() >= last);
            let sum = timer.progress() + timer.remaining_progress();
            assert!((sum - 100.0).abs() < 1e-9);
            last = timer.progress();
        }

        assert_eq!(timer.progress(), 100.0);
        assert_eq!(timer.remaining_progress(), 0.0);
    }

    #[test]
    fn test_completes_after_sixty_ticks() {
        let (mut timer, ticks, observer) = timer();
        timer.start(1, SessionKind::Focus);
        observer.take();

        for _ in 0..60 {
            timer.tick();
        }

        let events = observer.take();
        let completions: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, TimerEvent::Complete(_)))
            .collect();
        assert_eq!(
            completions,
            vec![&TimerEvent::Complete(CompletePayload {
                mode: Mode::Focus,
                duration: 60,
            })]
        );
        // Final tick is reported before the completion, in the same advance
        assert!(matches!(events[events.len() - 2], TimerEvent::Tick(ref t) if t.remaining == 0));

        let state = timer.snapshot();
        assert_eq!(state.remaining, 0);
        assert!(!state.is_running);
        assert!(!state.is_paused);
        assert_eq!(state.mode, Mode::Focus);
        assert!(!ticks.is_armed());

        // Stray ticks after completion do nothing
        timer.tick();
        assert!(observer.take().is_empty());
    }

    #[test]
    fn test_start_after_completion_begins_new_session() {
        let (mut timer, _, observer) = timer();
        timer.start(1, SessionKind::Focus);
        for _ in 0..60 {
            timer.tick();
        }
        observer.take();

        timer.start(5, SessionKind::Rest);

        assert_eq!(timer.mode(), Mode::Rest);
        assert_eq!(timer.remaining_seconds(), 300);
        assert_eq!(
            observer.take()[0],
            TimerEvent::ModeChange { mode: Mode::Rest }
        );
    }

    #[test]
    fn test_pause_and_resume() {
        let (mut timer, ticks, observer) = timer();
        timer.start(5, SessionKind::Rest);
        for _ in 0..10 {
            timer.tick();
        }
        assert_eq!(timer.remaining_seconds(), 290);
        observer.take();

        timer.pause();
        let state = timer.snapshot();
        assert!(state.is_paused);
        assert_eq!(state.remaining, 290);
        assert!(!ticks.is_armed());
        assert_eq!(
            observer.take(),
            vec![TimerEvent::Pause(PausePayload {
                remaining: 290,
                mode: Mode::Rest,
            })]
        );

        // Ticks that slip through while paused change nothing
        timer.tick();
        assert_eq!(timer.remaining_seconds(), 290);

        timer.resume();
        let state = timer.snapshot();
        assert!(state.is_running);
        assert!(!state.is_paused);
        assert_eq!(state.duration, 300);
        assert_eq!(state.remaining, 290);
        assert_eq!(state.mode, Mode::Rest);
        assert!(ticks.is_armed());
        assert_eq!(
            observer.take(),
            vec![TimerEvent::Start(StartPayload {
                duration: 300,
                remaining: 290,
                mode: Mode::Rest,
            })]
        );

        timer.tick();
        assert_eq!(timer.remaining_seconds(), 289);
    }

    #[test]
    fn test_resume_keeps_sub_minute_remainder() {
        let (mut timer, _, _) = timer();
        timer.start(1, SessionKind::Focus);
        for _ in 0..35 {
            timer.tick();
        }

        timer.pause();
        timer.resume();

        assert_eq!(timer.remaining_seconds(), 25);
        assert!(timer.is_running());
        assert!(!timer.is_paused());
    }

    #[test]
    fn test_invalid_calls_are_ignored() {
        let (mut timer, ticks, observer) = timer();

        timer.pause();
        timer.resume();
        timer.toggle();
        timer.tick();
        assert_idle(&timer);
        assert!(observer.take().is_empty());

        timer.start(3, SessionKind::Focus);
        timer.resume();
        timer.pause();
        timer.pause();
        assert!(timer.is_paused());
        assert_eq!(ticks.stats().cancel_calls, 1);
        let pauses = observer
            .take()
            .into_iter()
            .filter(|e| matches!(e, TimerEvent::Pause(_)))
            .count();
        assert_eq!(pauses, 1);
    }

    #[test]
    fn test_double_toggle_returns_to_running() {
        let (mut timer, ticks, _) = timer();
        timer.start(25, SessionKind::Focus);
        for _ in 0..3 {
            timer.tick();
        }
        let before = timer.snapshot();

        timer.toggle();
        assert!(timer.is_paused());
        timer.toggle();

        assert_eq!(timer.snapshot(), before);
        assert!(ticks.is_armed());
    }

    #[test]
    fn test_reset_from_any_state() {
        let (mut idle, _, _) = timer();
        idle.reset();
        idle.reset();
        assert_idle(&idle);

        let (mut running, ticks, observer) = timer();
        running.start(10, SessionKind::Focus);
        running.tick();
        observer.take();
        running.reset();
        assert_idle(&running);
        assert!(!ticks.is_armed());
        assert_eq!(
            observer.take(),
            vec![TimerEvent::Reset, TimerEvent::ModeChange { mode: Mode::Idle }]
        );

        let (mut paused, ticks, _) = timer();
        paused.start(10, SessionKind::Rest);
        paused.pause();
        paused.reset();
        assert_idle(&paused);
        assert!(!ticks.is_armed());

        let (mut completed, _, _) = timer();
        completed.start(1, SessionKind::Rest);
        for _ in 0..60 {
            completed.tick();
        }
        completed.reset();
        assert_idle(&completed);
    }

    #[test]
    fn test_stale_tick_signals_are_dropped() {
        let (mut timer, _, _) = timer();
        timer.start(5, SessionKind::Focus);

        timer.handle_tick(TickSignal { generation: 1 });
        assert_eq!(timer.remaining_seconds(), 299);

        // A tick queued before pause must not land after it
        timer.pause();
        timer.handle_tick(TickSignal { generation: 1 });
        assert_eq!(timer.remaining_seconds(), 299);

        timer.resume();
        timer.handle_tick(TickSignal { generation: 1 });
        assert_eq!(timer.remaining_seconds(), 299);
        timer.handle_tick(TickSignal { generation: 2 });
        assert_eq!(timer.remaining_seconds(), 298);

        timer.reset();
        timer.handle_tick(TickSignal { generation: 2 });
        assert_idle(&timer);
    }

    #[test]
    fn test_next_session_kind_follows_completion() {
        let (mut timer, _, _) = timer();
        assert_eq!(timer.next_session_kind(), SessionKind::Focus);

        timer.start(1, SessionKind::Focus);
        assert_eq!(timer.next_session_kind(), SessionKind::Focus);
        for _ in 0..60 {
            timer.tick();
        }
        assert_eq!(timer.next_session_kind(), SessionKind::Rest);

        timer.start(1, SessionKind::Rest);
        for _ in 0..60 {
            timer.tick();
        }
        assert_eq!(timer.next_session_kind(), SessionKind::Focus);

        timer.start(1, SessionKind::Focus);
        for _ in 0..60 {
            timer.tick();
        }
        timer.reset();
        assert_eq!(timer.next_session_kind(), SessionKind::Focus);
    }

    #[test]
    fn test_mode_predicates() {
        let (mut timer, _, _) = timer();
        timer.start(1, SessionKind::Rest);
        assert!(timer.is_rest_mode());
        assert!(!timer.is_focus_mode());
        assert!(!timer.is_idle());
    }
}
