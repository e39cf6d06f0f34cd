//! Session event handling background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

use crate::{
    services::{play_cue, Cue},
    state::AppState,
    timer::TimerEvent,
};

/// Background task that tracks session flow and plays cues from timer events
pub async fn session_events_task(state: Arc<AppState>) {
    info!("Starting session events task");

    let mut event_rx = state.timer_event_tx.subscribe();

    loop {
        match event_rx.recv().await {
            Ok(event) => {
                let session = match state.record_event(&event) {
                    Ok(session) => session,
                    Err(e) => {
                        error!("Failed to record {} event: {}", event.name(), e);
                        continue;
                    }
                };

                if let TimerEvent::Complete(payload) = &event {
                    info!(
                        "{} session finished, offering {:?} next ({} focus sessions completed)",
                        payload.mode, session.next_offer, session.completed_focus_sessions
                    );
                    play_completion_cue(&state);
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                // Only ticks are frequent enough to be dropped here
                warn!("Session events task lagged, skipped {} events", skipped);
            }
            Err(RecvError::Closed) => {
                debug!("Timer event channel closed");
                break;
            }
        }
    }
}

fn play_completion_cue(state: &AppState) {
    let settings = match state.sound_settings() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to read sound settings: {}", e);
            return;
        }
    };

    tokio::spawn(async move {
        if let Err(e) = play_cue(Cue::Completion, settings).await {
            warn!("Failed to play completion cue: {}", e);
        }
    });
}
