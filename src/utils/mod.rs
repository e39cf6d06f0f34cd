//! Process utilities
//!
//! Shutdown signal handling shared by the binary and integration harnesses.

pub mod signals;

pub use signals::shutdown_signal;
