//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod quote_rotation;
pub mod session_events;
pub mod tick_driver;

// Re-export main functions
pub use quote_rotation::quote_rotation_task;
pub use session_events::session_events_task;
pub use tick_driver::tick_driver_task;
