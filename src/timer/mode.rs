//! Session mode and run state

use serde::{Deserialize, Serialize};

/// Semantic label of the current session, independent of run/pause state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Idle,
    Focus,
    Rest,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Idle => "idle",
            Mode::Focus => "focus",
            Mode::Rest => "rest",
        }
    }

    /// Human readable label for status displays
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Idle => "Select Duration",
            Mode::Focus => "Focus Session",
            Mode::Rest => "Rest Time",
        }
    }

    /// The session kind this mode belongs to, if any
    pub fn session_kind(&self) -> Option<SessionKind> {
        match self {
            Mode::Idle => None,
            Mode::Focus => Some(SessionKind::Focus),
            Mode::Rest => Some(SessionKind::Rest),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of session that can be started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Focus,
    Rest,
}

impl SessionKind {
    /// The kind offered once a session of this kind completes
    pub fn next(&self) -> SessionKind {
        match self {
            SessionKind::Focus => SessionKind::Rest,
            SessionKind::Rest => SessionKind::Focus,
        }
    }
}

impl From<SessionKind> for Mode {
    fn from(kind: SessionKind) -> Self {
        match kind {
            SessionKind::Focus => Mode::Focus,
            SessionKind::Rest => Mode::Rest,
        }
    }
}

/// Whether the countdown is ticking, held, or not armed at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    #[default]
    Stopped,
    Running,
    Paused,
}
