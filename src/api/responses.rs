//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    services::{Quote, SoundCues},
    state::SessionState,
    timer::{Mode, TimerSnapshot},
};

/// Optional body for the session start endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionRequest {
    pub hours: Option<u64>,
    pub minutes: Option<u64>,
}

impl SessionRequest {
    /// Requested length in minutes, `Ok(None)` when neither field is given
    pub fn total_minutes(&self) -> Result<Option<u64>, String> {
        if self.hours.is_none() && self.minutes.is_none() {
            return Ok(None);
        }
        self.hours.unwrap_or(0)
            .checked_mul(60)
            .and_then(|minutes| minutes.checked_add(self.minutes.unwrap_or(0)))
            .map(Some)
            .ok_or_else(|| "Requested session length is too long".to_string())
    }
}

/// API response structure for timer lifecycle endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl ApiResponse {
    /// Create a new API response, deriving the status from the snapshot
    pub fn new(message: String, timer: TimerSnapshot) -> Self {
        Self {
            status: timer_status(&timer).to_string(),
            message,
            timestamp: Utc::now(),
            timer,
        }
    }
}

/// One-word summary of a timer snapshot
pub fn timer_status(timer: &TimerSnapshot) -> &'static str {
    if timer.is_paused {
        "paused"
    } else if timer.is_running {
        "running"
    } else if timer.mode != Mode::Idle {
        "complete"
    } else {
        "idle"
    }
}

/// Full status response
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub label: String,
    pub timer: TimerSnapshot,
    pub session: SessionState,
    pub quote: Option<Quote>,
    pub sounds: SoundCues,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Quote response
#[derive(Debug, Clone, Serialize)]
pub struct QuoteResponse {
    pub quote: Option<Quote>,
    pub timestamp: DateTime<Utc>,
}

impl QuoteResponse {
    pub fn new(quote: Option<Quote>) -> Self {
        Self { quote, timestamp: Utc::now() }
    }
}

/// Sound settings response
#[derive(Debug, Clone, Serialize)]
pub struct SoundsResponse {
    pub enabled: bool,
    pub volume: f32,
    pub timestamp: DateTime<Utc>,
}

impl From<SoundCues> for SoundsResponse {
    fn from(sounds: SoundCues) -> Self {
        Self {
            enabled: sounds.enabled,
            volume: sounds.volume,
            timestamp: Utc::now(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_request_minutes() {
        assert_eq!(SessionRequest::default().total_minutes(), Ok(None));

        let custom = SessionRequest { hours: Some(1), minutes: Some(30) };
        assert_eq!(custom.total_minutes(), Ok(Some(90)));

        let hours_only = SessionRequest { hours: Some(2), minutes: None };
        assert_eq!(hours_only.total_minutes(), Ok(Some(120)));

        let empty = SessionRequest { hours: Some(0), minutes: Some(0) };
        assert_eq!(empty.total_minutes(), Ok(Some(0)));
    }

    #[test]
    fn test_session_request_overflow_is_an_error() {
        let huge_hours = SessionRequest { hours: Some(u64::MAX), minutes: None };
        assert!(huge_hours.total_minutes().is_err());

        let sum_overflows = SessionRequest { hours: Some(u64::MAX / 60), minutes: Some(u64::MAX) };
        assert!(sum_overflows.total_minutes().is_err());

        let huge_minutes = SessionRequest { hours: None, minutes: Some(u64::MAX) };
        assert_eq!(huge_minutes.total_minutes(), Ok(Some(u64::MAX)));
    }

    #[test]
    fn test_session_request_parses_partial_body() {
        let request: SessionRequest = serde_json::from_str(r#"{"minutes": 50}"#).unwrap();
        assert_eq!(request.total_minutes(), Ok(Some(50)));
    }
}
