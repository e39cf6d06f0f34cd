//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, mpsc};
use tracing::{info, warn};

use super::SessionState;
use crate::{
    config::Config,
    services::{Quote, QuoteDeck, SoundCues},
    timer::{
        BroadcastObserver, CountdownTimer, IntervalTickSource, SessionKind, TickSignal,
        TimerEvent, TimerSnapshot,
    },
};

/// Application context that owns the timer and everything derived from it
#[derive(Debug)]
pub struct AppState {
    /// The single countdown for this process
    pub timer: Arc<Mutex<CountdownTimer>>,
    /// Completed sessions and the next offered session
    pub session_state: Arc<Mutex<SessionState>>,
    /// Quote rotation
    pub quotes: Arc<Mutex<QuoteDeck>>,
    pub current_quote: Arc<Mutex<Option<Quote>>>,
    pub sounds: Arc<Mutex<SoundCues>>,
    /// Default session lengths in minutes
    pub focus_minutes: u64,
    pub rest_minutes: u64,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Every timer notification is published here
    pub timer_event_tx: broadcast::Sender<TimerEvent>,
}

impl AppState {
    /// Create the application state and the receiver the timer's ticks arrive on
    pub fn new(config: &Config) -> (Self, mpsc::UnboundedReceiver<TickSignal>) {
        let (timer_event_tx, _) = broadcast::channel(256);
        let (ticks, tick_rx) = IntervalTickSource::new();
        let timer = CountdownTimer::new(ticks, BroadcastObserver::new(timer_event_tx.clone()));

        let mut quotes = QuoteDeck::new();
        let first_quote = quotes.next_quote();

        let state = Self {
            timer: Arc::new(Mutex::new(timer)),
            session_state: Arc::new(Mutex::new(SessionState::new())),
            quotes: Arc::new(Mutex::new(quotes)),
            current_quote: Arc::new(Mutex::new(first_quote)),
            sounds: Arc::new(Mutex::new(SoundCues::new(!config.mute, config.volume))),
            focus_minutes: config.focus,
            rest_minutes: config.rest,
            start_time: Instant::now(),
            port: config.port,
            host: config.host.clone(),
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            timer_event_tx,
        };

        (state, tick_rx)
    }

    /// Run a timer operation, record it as the last action and return the new snapshot
    pub fn update_timer<F>(&self, action: &str, operation: F) -> Result<TimerSnapshot, String>
    where
        F: FnOnce(&mut CountdownTimer),
    {
        // Observers fire while the lock is held, so notifications keep timer order
        let mut timer = self.timer.lock()
            .map_err(|e| format!("Failed to lock timer: {}", e))?;

        operation(&mut *timer);
        let snapshot = timer.snapshot();
        drop(timer);

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(snapshot)
    }

    /// Default length in minutes for a session kind
    pub fn default_minutes(&self, kind: SessionKind) -> u64 {
        match kind {
            SessionKind::Focus => self.focus_minutes,
            SessionKind::Rest => self.rest_minutes,
        }
    }

    /// Start a focus session
    pub fn start_focus(&self, minutes: u64) -> Result<TimerSnapshot, String> {
        info!("Starting focus session for {} minutes", minutes);
        self.update_timer("focus", |timer| timer.start(minutes, SessionKind::Focus))
    }

    /// Start a rest session
    pub fn start_rest(&self, minutes: u64) -> Result<TimerSnapshot, String> {
        info!("Starting rest session for {} minutes", minutes);
        self.update_timer("rest", |timer| timer.start(minutes, SessionKind::Rest))
    }

    /// Start whichever session is on offer, if nothing is active
    pub fn start_next(&self) -> Result<TimerSnapshot, String> {
        self.update_timer("next", |timer| {
            // Read the offer under the same lock, so a just-completed session counts
            let kind = timer.next_session_kind();
            if timer.is_running() {
                warn!("Session already active, not starting next {:?} session", kind);
                return;
            }
            timer.start(self.default_minutes(kind), kind);
        })
    }

    pub fn pause(&self) -> Result<TimerSnapshot, String> {
        self.update_timer("pause", CountdownTimer::pause)
    }

    pub fn resume(&self) -> Result<TimerSnapshot, String> {
        self.update_timer("resume", CountdownTimer::resume)
    }

    pub fn toggle(&self) -> Result<TimerSnapshot, String> {
        self.update_timer("toggle", CountdownTimer::toggle)
    }

    pub fn reset(&self) -> Result<TimerSnapshot, String> {
        self.update_timer("reset", CountdownTimer::reset)
    }

    /// Hand a tick from the tick source to the timer
    pub fn deliver_tick(&self, signal: TickSignal) -> Result<(), String> {
        let mut timer = self.timer.lock()
            .map_err(|e| format!("Failed to lock timer: {}", e))?;

        timer.handle_tick(signal);
        Ok(())
    }

    /// Get current timer snapshot
    pub fn timer_snapshot(&self) -> Result<TimerSnapshot, String> {
        self.timer.lock()
            .map(|timer| timer.snapshot())
            .map_err(|e| format!("Failed to lock timer: {}", e))
    }

    /// Get current session state
    pub fn get_session_state(&self) -> Result<SessionState, String> {
        self.session_state.lock()
            .map(|state| state.clone())
            .map_err(|e| format!("Failed to lock session state: {}", e))
    }

    /// Fold a timer event into the session state
    pub fn record_event(&self, event: &TimerEvent) -> Result<SessionState, String> {
        let mut state = self.session_state.lock()
            .map_err(|e| format!("Failed to lock session state: {}", e))?;

        state.apply(event);
        Ok(state.clone())
    }

    /// Quote currently on display
    pub fn current_quote(&self) -> Result<Option<Quote>, String> {
        self.current_quote.lock()
            .map(|quote| *quote)
            .map_err(|e| format!("Failed to lock current quote: {}", e))
    }

    /// Move on to the next quote in the deck
    pub fn advance_quote(&self) -> Result<Option<Quote>, String> {
        let next = self.quotes.lock()
            .map_err(|e| format!("Failed to lock quote deck: {}", e))?
            .next_quote();

        let mut current = self.current_quote.lock()
            .map_err(|e| format!("Failed to lock current quote: {}", e))?;
        *current = next;
        Ok(next)
    }

    /// Current sound cue settings
    pub fn sound_settings(&self) -> Result<SoundCues, String> {
        self.sounds.lock()
            .map(|sounds| *sounds)
            .map_err(|e| format!("Failed to lock sound settings: {}", e))
    }

    /// Flip sound cues on or off, returning the new settings
    pub fn toggle_sounds(&self) -> Result<SoundCues, String> {
        let mut sounds = self.sounds.lock()
            .map_err(|e| format!("Failed to lock sound settings: {}", e))?;

        let enabled = sounds.toggle();
        info!("Sound cues {}", if enabled { "enabled" } else { "disabled" });
        Ok(*sounds)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
