//! Melody players
//!
//! Both players walk a melody note by note: program the tone, wait for the
//! note's duration, then silence the output. The first token that fails to
//! parse ends playback with the output silent.
//!
//! - [`MelodyPlayer`] blocks the caller with an [`embedded_hal::delay::DelayNs`]
//! - [`AsyncMelodyPlayer`] awaits an [`embedded_hal_async::delay::DelayNs`],
//!   so chimes can run on their own task

pub mod asynch;
pub mod blocking;

pub use asynch::AsyncMelodyPlayer;
pub use blocking::MelodyPlayer;

use mkesc_core::melody::NoteError;
use mkesc_core::traits::ToneOutput;

/// Result of playing a melody
///
/// Advisory only: an aborted melody has already been silenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayOutcome {
    /// Every note was played
    Completed,
    /// Playback stopped at an unparseable note
    Aborted(NoteError),
}

impl PlayOutcome {
    /// Check if the whole melody was played
    pub fn is_completed(&self) -> bool {
        matches!(self, PlayOutcome::Completed)
    }
}

/// Start sounding a note
///
/// A pause leaves the timer alone and only makes sure the output is off.
fn start_note<O: ToneOutput + ?Sized>(output: &mut O, freq_hz: f32, duty: f32) {
    if freq_hz > 0.0 {
        output.configure(freq_hz as u32, duty);
    } else {
        output.silence();
    }
}
