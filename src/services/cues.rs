//! Sound cues for session events
//!
//! Cues are short tone patterns. On a terminal each tone is rendered as a bell
//! at the tone's offset from the start of the cue.

use std::time::Duration;
use serde::Serialize;
use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    time::{sleep_until, Instant},
};
use tracing::debug;

const BELL: &[u8] = b"\x07";

/// One tone of a cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    /// Delay from the start of the cue
    pub offset: Duration,
    pub length: Duration,
}

const fn tone(frequency_hz: f32, offset_ms: u64, length_ms: u64) -> Tone {
    Tone {
        frequency_hz,
        offset: Duration::from_millis(offset_ms),
        length: Duration::from_millis(length_ms),
    }
}

const COMPLETION_TONES: [Tone; 3] = [tone(880.0, 0, 150), tone(880.0, 200, 150), tone(1100.0, 500, 200)];
const CLICK_TONES: [Tone; 1] = [tone(600.0, 0, 50)];

/// The cues the timer service can play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Double beep and a higher closing tone when a session ends
    Completion,
    /// Short tick acknowledging a user action
    Click,
}

impl Cue {
    pub fn tones(&self) -> &'static [Tone] {
        match self {
            Cue::Completion => &COMPLETION_TONES,
            Cue::Click => &CLICK_TONES,
        }
    }

    /// Fraction of the master volume this cue peaks at
    fn gain_factor(&self) -> f32 {
        match self {
            Cue::Completion => 0.3,
            Cue::Click => 0.1,
        }
    }
}

/// Sound cue settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SoundCues {
    pub enabled: bool,
    /// Master volume in `[0, 1]`
    pub volume: f32,
}

impl SoundCues {
    pub fn new(enabled: bool, volume: f32) -> Self {
        let mut cues = Self { enabled, volume: 0.0 };
        cues.set_volume(volume);
        cues
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = if volume.is_nan() { 0.0 } else { volume.clamp(0.0, 1.0) };
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Flip the enabled flag and return the new value
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// Peak gain a cue would play at, zero when muted
    pub fn gain(&self, cue: Cue) -> f32 {
        if self.enabled {
            self.volume * cue.gain_factor()
        } else {
            0.0
        }
    }
}

impl Default for SoundCues {
    fn default() -> Self {
        Self::new(true, 0.5)
    }
}

/// Play a cue on the terminal
pub async fn play_cue(cue: Cue, settings: SoundCues) -> Result<(), String> {
    let mut stdout = tokio::io::stdout();
    play_cue_to(cue, settings, &mut stdout).await
}

/// Play a cue into any writer, one bell per tone
pub async fn play_cue_to<W>(cue: Cue, settings: SoundCues, writer: &mut W) -> Result<(), String>
where
    W: AsyncWrite + Unpin,
{
    let gain = settings.gain(cue);
    if gain <= 0.0 {
        debug!("Skipping {:?} cue (muted)", cue);
        return Ok(());
    }

    let started = Instant::now();
    for tone in cue.tones() {
        sleep_until(started + tone.offset).await;
        debug!("Cue tone: {}Hz for {:?} at gain {:.2}", tone.frequency_hz, tone.length, gain);

        writer.write_all(BELL)
            .await
            .map_err(|e| format!("Failed to write cue: {}", e))?;
        writer.flush()
            .await
            .map_err(|e| format!("Failed to flush cue: {}", e))?;
    }

    Ok(())
}
