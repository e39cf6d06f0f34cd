//! Focus Time - A local focus timer service
//!
//! This library provides a focus/rest countdown with session flow tracking,
//! rotating motivational quotes and sound cues, exposed over HTTP and a
//! WebSocket event stream.

pub mod api;
pub mod config;
pub mod services;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use state::AppState;
pub use timer::{CountdownTimer, Mode, SessionKind, TimerEvent, TimerObserver};
pub use utils::signals::shutdown_signal;
