//! Async melody player
//!
//! Same playback rules as the blocking player, but note durations are
//! awaited. Paired with a [`ChimeQueue`], the debouncer can post chimes
//! from its sampling tick while a separate task plays them.
//!
//! ```ignore
//! static CHIMES: ChimeQueue = ChimeQueue::new();
//!
//! #[embassy_executor::task]
//! async fn chime_task(mut player: AsyncMelodyPlayer<PwmTone<BuzzerTimer>, Delay>) {
//!     player.serve(&CHIMES).await
//! }
//! ```

use embedded_hal_async::delay::DelayNs;
use mkesc_core::config::ToneConfig;
use mkesc_core::melody::{chimes, parse_note_with_tempo, Melody, Note, NoteError};
use mkesc_core::traits::ToneOutput;

use super::{start_note, PlayOutcome};
use crate::chime::{ChimeQueue, ChimeRequest};

/// Melody player that awaits each note
pub struct AsyncMelodyPlayer<O, D> {
    output: O,
    delay: D,
    config: ToneConfig,
}

impl<O: ToneOutput, D: DelayNs> AsyncMelodyPlayer<O, D> {
    /// Create a new player
    pub fn new(output: O, delay: D, config: ToneConfig) -> Self {
        Self {
            output,
            delay,
            config,
        }
    }

    /// Bring the output up silent and play the startup chime
    pub async fn init(&mut self) -> PlayOutcome {
        self.output.configure(self.config.idle_rate_hz, 0.0);
        self.play_melody(chimes::CONNECTED).await
    }

    /// Play a single tone, then silence the output
    pub async fn play_tone(&mut self, freq_hz: f32, duration_ms: u32) {
        start_note(&mut self.output, freq_hz, self.config.duty);
        if duration_ms > 0 {
            self.delay.delay_ms(duration_ms).await;
        }
        self.output.silence();
    }

    /// Parse and play one note token
    pub async fn play_note(&mut self, token: &str) -> Result<Note, NoteError> {
        let note = parse_note_with_tempo(token, self.config.whole_note_ms)?;
        self.play_tone(note.frequency_hz, note.duration_ms).await;
        Ok(note)
    }

    /// Play a melody string
    pub async fn play_melody(&mut self, text: &str) -> PlayOutcome {
        debug!("melody: {=str}", text);

        for note in Melody::with_tempo(text, self.config.whole_note_ms) {
            match note {
                Ok(note) => self.play_tone(note.frequency_hz, note.duration_ms).await,
                Err(e) => {
                    warn!("melody aborted: {}", e);
                    self.output.silence();
                    return PlayOutcome::Aborted(e);
                }
            }
        }

        PlayOutcome::Completed
    }

    /// Carry out one queued request
    pub async fn handle(&mut self, request: ChimeRequest) {
        match request {
            ChimeRequest::Play(melody) => {
                let _ = self.play_melody(melody).await;
            }
            ChimeRequest::Silence => self.output.silence(),
        }
    }

    /// Play every request already waiting in the queue
    ///
    /// Returns the number of requests handled.
    pub async fn drain(&mut self, queue: &ChimeQueue) -> usize {
        let mut handled = 0;
        while let Some(request) = queue.try_next() {
            self.handle(request).await;
            handled += 1;
        }
        handled
    }

    /// Serve the queue forever
    pub async fn serve(&mut self, queue: &ChimeQueue) -> ! {
        info!("chime player started");
        loop {
            let request = queue.next().await;
            self.handle(request).await;
        }
    }

    /// Get access to the tone output
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get access to the delay provider
    pub fn delay(&self) -> &D {
        &self.delay
    }
}
