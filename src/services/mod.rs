//! Supporting services module
//!
//! This module contains the quote rotation deck and the sound cues played
//! around session events.

pub mod cues;
pub mod quotes;

// Re-export main types
pub use cues::{play_cue, Cue, SoundCues};
pub use quotes::{Quote, QuoteDeck, QUOTES};
