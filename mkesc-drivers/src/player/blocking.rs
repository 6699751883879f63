//! Blocking melody player

use embedded_hal::delay::DelayNs;
use mkesc_core::config::ToneConfig;
use mkesc_core::melody::{chimes, parse_note_with_tempo, Melody, Note, NoteError};
use mkesc_core::traits::{Chime, ToneOutput};

use super::{start_note, PlayOutcome};

/// Melody player that blocks for the length of each note
///
/// The caller is occupied for the whole melody. Do not use it from a
/// context that cannot tolerate that; see [`AsyncMelodyPlayer`](super::AsyncMelodyPlayer).
pub struct MelodyPlayer<O, D> {
    output: O,
    delay: D,
    config: ToneConfig,
}

impl<O: ToneOutput, D: DelayNs> MelodyPlayer<O, D> {
    /// Create a new player
    pub fn new(output: O, delay: D, config: ToneConfig) -> Self {
        Self {
            output,
            delay,
            config,
        }
    }

    /// Bring the output up silent and play the startup chime
    pub fn init(&mut self) -> PlayOutcome {
        self.output.configure(self.config.idle_rate_hz, 0.0);
        self.play_melody(chimes::CONNECTED)
    }

    /// Play a single tone, then silence the output
    ///
    /// A frequency of 0 is a pause.
    pub fn play_tone(&mut self, freq_hz: f32, duration_ms: u32) {
        start_note(&mut self.output, freq_hz, self.config.duty);
        if duration_ms > 0 {
            self.delay.delay_ms(duration_ms);
        }
        self.output.silence();
    }

    /// Parse and play one note token
    pub fn play_note(&mut self, token: &str) -> Result<Note, NoteError> {
        let note = parse_note_with_tempo(token, self.config.whole_note_ms)?;
        self.play_tone(note.frequency_hz, note.duration_ms);
        Ok(note)
    }

    /// Play a melody string
    pub fn play_melody(&mut self, text: &str) -> PlayOutcome {
        debug!("melody: {=str}", text);

        for note in Melody::with_tempo(text, self.config.whole_note_ms) {
            match note {
                Ok(note) => self.play_tone(note.frequency_hz, note.duration_ms),
                Err(e) => {
                    warn!("melody aborted: {}", e);
                    self.output.silence();
                    return PlayOutcome::Aborted(e);
                }
            }
        }

        PlayOutcome::Completed
    }

    /// Play several melodies back to back
    ///
    /// An aborted melody does not stop the following ones. Returns how
    /// many played to completion.
    pub fn play_all(&mut self, melodies: &[&str]) -> usize {
        melodies
            .iter()
            .filter(|text| self.play_melody(text).is_completed())
            .count()
    }

    /// Get access to the tone output
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get mutable access to the tone output
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Get access to the delay provider
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Release the output and delay
    pub fn into_parts(self) -> (O, D) {
        (self.output, self.delay)
    }
}

impl<O: ToneOutput, D: DelayNs> Chime for MelodyPlayer<O, D> {
    fn play(&mut self, melody: &'static str) {
        let _ = self.play_melody(melody);
    }

    fn silence(&mut self) {
        self.output.silence();
    }
}
