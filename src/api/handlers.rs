//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    services::{play_cue, Cue},
    state::AppState,
    timer::{SessionKind, TimerSnapshot},
};
use super::responses::{
    timer_status, ApiResponse, HealthResponse, QuoteResponse, SessionRequest, SoundsResponse,
    StatusResponse,
};

/// Turn the result of a timer operation into a response
fn lifecycle_response(action: &str, result: Result<TimerSnapshot, String>) -> Result<Json<ApiResponse>, StatusCode> {
    match result {
        Ok(snapshot) => {
            info!("{} endpoint called - timer is {}", action, timer_status(&snapshot));
            let message = format!("{} applied, {} remaining", action, snapshot.formatted.display);
            Ok(Json(ApiResponse::new(message, snapshot)))
        }
        Err(e) => {
            error!("Failed to {} timer: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Acknowledge a user action with a click cue
fn play_click(state: &AppState) {
    let Ok(settings) = state.sound_settings() else {
        return;
    };
    tokio::spawn(async move {
        if let Err(e) = play_cue(Cue::Click, settings).await {
            warn!("Failed to play click cue: {}", e);
        }
    });
}

fn start_session(
    state: &AppState,
    kind: SessionKind,
    body: Option<Json<SessionRequest>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let requested = match body.map(|Json(request)| request.total_minutes()).transpose() {
        Ok(requested) => requested.flatten(),
        Err(e) => {
            warn!("Rejecting {:?} session: {}", kind, e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    let minutes = match requested {
        Some(0) => {
            warn!("Rejecting {:?} session with zero length", kind);
            return Err(StatusCode::BAD_REQUEST);
        }
        Some(minutes) => minutes,
        None => state.default_minutes(kind),
    };

    let result = match kind {
        SessionKind::Focus => state.start_focus(minutes),
        SessionKind::Rest => state.start_rest(minutes),
    };
    play_click(state);

    match kind {
        SessionKind::Focus => lifecycle_response("focus", result),
        SessionKind::Rest => lifecycle_response("rest", result),
    }
}

/// Handle POST /focus - Start a focus session
pub async fn focus_handler(
    State(state): State<Arc<AppState>>,
    body: Option<Json<SessionRequest>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    start_session(&state, SessionKind::Focus, body)
}

/// Handle POST /rest - Start a rest session
pub async fn rest_handler(
    State(state): State<Arc<AppState>>,
    body: Option<Json<SessionRequest>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    start_session(&state, SessionKind::Rest, body)
}

/// Handle POST /next - Start the session offered after the last completion
pub async fn next_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let result = state.start_next();
    play_click(&state);
    lifecycle_response("next", result)
}

/// Handle POST /pause - Pause the running session
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    lifecycle_response("pause", state.pause())
}

/// Handle POST /resume - Resume a paused session
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    lifecycle_response("resume", state.resume())
}

/// Handle POST /toggle - Pause or resume
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    lifecycle_response("toggle", state.toggle())
}

/// Handle POST /reset - Return the timer to idle
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    lifecycle_response("reset", state.reset())
}

/// Handle GET /status - Return the full timer and session status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.timer_snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let session = match state.get_session_state() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get session state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (quote, sounds) = match (state.current_quote(), state.sound_settings()) {
        (Ok(quote), Ok(sounds)) => (quote, sounds),
        (Err(e), _) | (_, Err(e)) => {
            error!("Failed to read status extras: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        status: timer_status(&timer).to_string(),
        label: timer.mode.label().to_string(),
        timer,
        session,
        quote,
        sounds,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /quote - Return the quote on display
pub async fn quote_handler(State(state): State<Arc<AppState>>) -> Result<Json<QuoteResponse>, StatusCode> {
    state.current_quote()
        .map(|quote| Json(QuoteResponse::new(quote)))
        .map_err(|e| {
            error!("Failed to get current quote: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// Handle POST /quote/next - Move to the next quote
pub async fn next_quote_handler(State(state): State<Arc<AppState>>) -> Result<Json<QuoteResponse>, StatusCode> {
    state.advance_quote()
        .map(|quote| Json(QuoteResponse::new(quote)))
        .map_err(|e| {
            error!("Failed to advance quote: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// Handle POST /sounds/toggle - Turn sound cues on or off
pub async fn sounds_toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<SoundsResponse>, StatusCode> {
    match state.toggle_sounds() {
        Ok(sounds) => {
            if sounds.enabled {
                play_click(&state);
            }
            Ok(Json(sounds.into()))
        }
        Err(e) => {
            error!("Failed to toggle sounds: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, timer::Mode};

    fn state() -> Arc<AppState> {
        let config = Config { mute: true, ..Config::default() };
        let (state, _tick_rx) = AppState::new(&config);
        Arc::new(state)
    }

    fn minutes(minutes: u64) -> Option<Json<SessionRequest>> {
        Some(Json(SessionRequest { hours: None, minutes: Some(minutes) }))
    }

    #[tokio::test]
    async fn test_focus_uses_default_length() {
        let state = state();
        let Json(response) = focus_handler(State(Arc::clone(&state)), None).await.unwrap();

        assert_eq!(response.status, "running");
        assert_eq!(response.timer.mode, Mode::Focus);
        assert_eq!(response.timer.duration, 25 * 60);
        assert_eq!(response.timer.formatted.display, "25:00");
    }

    #[tokio::test]
    async fn test_rest_with_custom_length() {
        let state = state();
        let body = Some(Json(SessionRequest { hours: Some(1), minutes: Some(2) }));
        let Json(response) = rest_handler(State(state), body).await.unwrap();

        assert_eq!(response.timer.mode, Mode::Rest);
        assert_eq!(response.timer.duration, 62 * 60);
        assert_eq!(response.timer.formatted.display, "1:02:00");
    }

    #[tokio::test]
    async fn test_zero_length_is_rejected() {
        let state = state();
        let result = focus_handler(State(Arc::clone(&state)), minutes(0)).await;

        assert_eq!(result.unwrap_err(), StatusCode::BAD_REQUEST);
        assert_eq!(state.timer_snapshot().unwrap().mode, Mode::Idle);
    }

    #[tokio::test]
    async fn test_oversized_length_leaves_timer_usable() {
        let state = state();

        let too_many_minutes = minutes(u64::MAX / 60 + 1);
        let Json(ignored) = focus_handler(State(Arc::clone(&state)), too_many_minutes).await.unwrap();
        assert_eq!(ignored.status, "idle");

        let too_many_hours = Some(Json(SessionRequest { hours: Some(u64::MAX), minutes: None }));
        let result = rest_handler(State(Arc::clone(&state)), too_many_hours).await;
        assert_eq!(result.unwrap_err(), StatusCode::BAD_REQUEST);

        // The timer lock is still healthy afterwards
        assert!(status_handler(State(Arc::clone(&state))).await.is_ok());
        let Json(started) = focus_handler(State(Arc::clone(&state)), minutes(25)).await.unwrap();
        assert_eq!(started.status, "running");
        assert_eq!(started.timer.duration, 1500);
    }

    #[tokio::test]
    async fn test_lifecycle_endpoints() {
        let state = state();
        focus_handler(State(Arc::clone(&state)), minutes(10)).await.unwrap();

        let Json(paused) = pause_handler(State(Arc::clone(&state))).await.unwrap();
        assert_eq!(paused.status, "paused");

        let Json(resumed) = toggle_handler(State(Arc::clone(&state))).await.unwrap();
        assert_eq!(resumed.status, "running");
        assert_eq!(resumed.timer.remaining, 600);

        // Resuming a running timer is a no-op, not an error
        let Json(still) = resume_handler(State(Arc::clone(&state))).await.unwrap();
        assert_eq!(still.status, "running");

        let Json(reset) = reset_handler(State(Arc::clone(&state))).await.unwrap();
        assert_eq!(reset.status, "idle");
        assert_eq!(reset.timer.duration, 0);
    }

    #[tokio::test]
    async fn test_next_starts_focus_when_nothing_offered() {
        let state = state();
        let Json(response) = next_handler(State(state)).await.unwrap();
        assert_eq!(response.timer.mode, Mode::Focus);
    }

    #[tokio::test]
    async fn test_status_reports_everything() {
        let state = state();
        rest_handler(State(Arc::clone(&state)), minutes(5)).await.unwrap();

        let Json(status) = status_handler(State(Arc::clone(&state))).await.unwrap();
        assert_eq!(status.status, "running");
        assert_eq!(status.label, "Rest Time");
        assert_eq!(status.timer.remaining, 300);
        assert_eq!(status.last_action.as_deref(), Some("rest"));
        assert!(status.quote.is_some());
        assert!(!status.sounds.enabled);
        assert_eq!(status.port, 20525);
    }

    #[tokio::test]
    async fn test_quote_endpoints() {
        let state = state();
        let Json(current) = quote_handler(State(Arc::clone(&state))).await.unwrap();
        let Json(next) = next_quote_handler(State(Arc::clone(&state))).await.unwrap();

        assert!(current.quote.is_some());
        assert_ne!(current.quote, next.quote);
    }

    #[tokio::test]
    async fn test_sounds_toggle() {
        let state = state();
        let Json(first) = sounds_toggle_handler(State(Arc::clone(&state))).await.unwrap();
        assert!(first.enabled);
        let Json(second) = sounds_toggle_handler(State(state)).await.unwrap();
        assert!(!second.enabled);
    }

    #[tokio::test]
    async fn test_health() {
        let Json(health) = health_handler().await;
        assert_eq!(health.status, "ok");
    }
}
