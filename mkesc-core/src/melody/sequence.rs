//! Melody sequencing
//!
//! Splits a melody string into note tokens on single spaces. The first
//! token that fails to parse ends the melody: it is yielded once as an
//! error and nothing after it is played.

use super::note::{parse_note_with_tempo, Note, NoteError};
use crate::config::WHOLE_NOTE_MS;

/// Iterator over the notes of a melody string
///
/// Borrows the melody text; nothing is copied.
#[derive(Debug, Clone)]
pub struct Melody<'a> {
    remaining: &'a str,
    whole_note_ms: u32,
}

impl<'a> Melody<'a> {
    /// Create a melody at the default tempo
    pub fn new(text: &'a str) -> Self {
        Self::with_tempo(text, WHOLE_NOTE_MS)
    }

    /// Create a melody with a custom whole note duration
    pub fn with_tempo(text: &'a str, whole_note_ms: u32) -> Self {
        Self {
            remaining: text,
            whole_note_ms,
        }
    }

    /// Total duration of the notes that would be played, in ms
    ///
    /// Stops at the first unparseable token, like playback does.
    pub fn duration_ms(&self) -> u32 {
        self.clone()
            .map_while(Result::ok)
            .fold(0u32, |total, note| total.saturating_add(note.duration_ms))
    }

    /// Check the whole melody, returning the first parse error
    pub fn validate(&self) -> Result<usize, NoteError> {
        let mut count = 0;
        for note in self.clone() {
            note?;
            count += 1;
        }
        Ok(count)
    }
}

impl Iterator for Melody<'_> {
    type Item = Result<Note, NoteError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }

        let (token, rest) = self.remaining.split_once(' ').unwrap_or((self.remaining, ""));
        self.remaining = rest;

        let result = parse_note_with_tempo(token, self.whole_note_ms);
        if result.is_err() {
            // Abort the rest of the melody
            self.remaining = "";
        }

        Some(result)
    }
}

impl core::iter::FusedIterator for Melody<'_> {}
