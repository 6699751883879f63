//! Single note parser
//!
//! Pitches use equal temperament relative to A4 = 440 Hz. Durations are
//! a fraction of a whole note; at the default tempo a whole note lasts
//! 500 ms, so a quarter note is 125 ms.

use crate::config::WHOLE_NOTE_MS;

/// Reference pitch, A4 (Hz)
pub const REFERENCE_HZ: f32 = 440.0;

/// Octave used when a note has none
pub const DEFAULT_OCTAVE: u32 = 4;

/// Fraction divisor used when a note has none (quarter note)
pub const DEFAULT_DIVISOR: u8 = 4;

/// Errors from parsing a note token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NoteError {
    /// Token is empty (e.g. two spaces in a row)
    Empty,
    /// First character is neither `P` nor `A`..`G`
    InvalidLetter,
    /// Fraction divisor is zero or missing after `/`
    ZeroDivisor,
    /// Fraction divisor does not fit in 1..=255
    DivisorOutOfRange,
}

/// A parsed note
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Note {
    /// Pitch in Hz, 0.0 for a pause
    pub frequency_hz: f32,
    /// Duration in milliseconds, always > 0 at the default tempo
    pub duration_ms: u32,
}

impl Note {
    /// Check if this note is a pause
    pub fn is_rest(&self) -> bool {
        self.frequency_hz <= 0.0
    }
}

/// Semitone distance of a natural note from A in the same octave
///
/// The naturals are two semitones apart except B→C and E→F. Octaves
/// start at C, so C..G sit below A.
fn semitones_from_a(letter: u8) -> Option<i32> {
    match letter {
        b'C' => Some(-9),
        b'D' => Some(-7),
        b'E' => Some(-5),
        b'F' => Some(-4),
        b'G' => Some(-2),
        b'A' => Some(0),
        b'B' => Some(2),
        _ => None,
    }
}

/// Parse a run of ASCII digits, saturating on overflow
///
/// Returns the value and the number of bytes consumed.
fn parse_digits(bytes: &[u8]) -> (u32, usize) {
    let mut value: u32 = 0;
    let mut used = 0;

    for &b in bytes {
        if !b.is_ascii_digit() {
            break;
        }
        value = value.saturating_mul(10).saturating_add((b - b'0') as u32);
        used += 1;
    }

    (value, used)
}

fn pitch(natural: i32, octave: u32, sharp: bool) -> f32 {
    let semitones = natural + sharp as i32;
    let in_octave = REFERENCE_HZ * libm::exp2f(semitones as f32 / 12.0);

    // Octave shifts are exact powers of two
    let shift = i32::try_from(octave)
        .unwrap_or(i32::MAX)
        .saturating_sub(DEFAULT_OCTAVE as i32);
    libm::ldexpf(in_octave, shift)
}

/// Frequency of a note name
///
/// Returns `None` if `letter` is not in `A`..`G`.
pub fn frequency_for(letter: char, octave: u32, sharp: bool) -> Option<f32> {
    let letter = u8::try_from(letter).ok()?;
    semitones_from_a(letter).map(|natural| pitch(natural, octave, sharp))
}

/// Duration of a note played for `1/divisor` of a whole note
pub fn duration_for(divisor: u8, whole_note_ms: u32) -> u32 {
    whole_note_ms / divisor.max(1) as u32
}

/// Parse a note at the default tempo
pub fn parse_note(token: &str) -> Result<Note, NoteError> {
    parse_note_with_tempo(token, WHOLE_NOTE_MS)
}

/// Parse a note token
///
/// Parsing starts at the first character of `token`; anything after the
/// recognised note is ignored. A missing or malformed octave falls back to
/// the default octave, and a `#` is only recognised after the octave.
pub fn parse_note_with_tempo(token: &str, whole_note_ms: u32) -> Result<Note, NoteError> {
    let bytes = token.as_bytes();

    let (frequency_hz, pos) = match bytes.first() {
        None => return Err(NoteError::Empty),
        Some(b'P') => (0.0, 1),
        Some(&letter) => {
            let natural = semitones_from_a(letter).ok_or(NoteError::InvalidLetter)?;

            let (octave, used) = parse_digits(&bytes[1..]);
            let octave = if used == 0 { DEFAULT_OCTAVE } else { octave };
            let mut pos = 1 + used;

            let sharp = bytes.get(pos) == Some(&b'#');
            if sharp {
                pos += 1;
            }

            (pitch(natural, octave, sharp), pos)
        }
    };

    let divisor = if bytes.get(pos) == Some(&b'/') {
        let (value, _) = parse_digits(&bytes[pos + 1..]);
        match value {
            0 => return Err(NoteError::ZeroDivisor),
            1..=255 => value as u8,
            _ => return Err(NoteError::DivisorOutOfRange),
        }
    } else {
        DEFAULT_DIVISOR
    };

    Ok(Note {
        frequency_hz,
        duration_ms: duration_for(divisor, whole_note_ms),
    })
}
