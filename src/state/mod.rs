//! State management module
//!
//! This module contains the application context that owns the timer and the
//! state derived from its events.

pub mod app_state;
pub mod session_state;

// Re-export main types
pub use app_state::AppState;
pub use session_state::SessionState;
