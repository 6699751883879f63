//! Note notation and melody sequencing
//!
//! A melody is a string of space-separated notes:
//!
//! ```text
//! [A-G,P][octave][#][/fraction]
//! ```
//!
//! - `A`..`G` is the note name, `P` is a pause
//! - octave is optional and defaults to 4
//! - `#` raises the note by a semitone
//! - `/n` plays the note for 1/n of a whole note (default `/4`)
//!
//! Example: `"D D F D  F G C5 A"`.

pub mod chimes;
pub mod note;
pub mod sequence;

pub use chimes::{CONNECTED, DISCONNECTED, ERROR};
pub use note::{
    duration_for, frequency_for, parse_note, parse_note_with_tempo, Note, NoteError,
    DEFAULT_DIVISOR, DEFAULT_OCTAVE, REFERENCE_HZ,
};
pub use sequence::Melody;
