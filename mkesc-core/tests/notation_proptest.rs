//! Property-based tests for the note notation.
//! Pitch and duration invariants checked across the whole input space.

use mkesc_core::melody::{duration_for, frequency_for, parse_note, Melody, NoteError};
use proptest::prelude::*;

const LETTERS: [char; 7] = ['A', 'B', 'C', 'D', 'E', 'F', 'G'];

fn letter() -> impl Strategy<Value = char> {
    proptest::sample::select(LETTERS.to_vec())
}

proptest! {
    /// Changing the octave scales the pitch by an exact power of two.
    #[test]
    fn octave_scaling_is_exact(l in letter(), octave in 0u32..=9, sharp in any::<bool>()) {
        let base = frequency_for(l, 4, sharp).unwrap();
        let shifted = frequency_for(l, octave, sharp).unwrap();
        let scale = 2f32.powi(octave as i32 - 4);
        prop_assert_eq!(shifted, base * scale);
    }

    /// Every divisor in 1..=255 gives whole / divisor with integer division.
    #[test]
    fn duration_is_integer_fraction(d in 1u8..=255) {
        prop_assert_eq!(duration_for(d, 500), 500 / d as u32);

        let token = format!("C/{}", d);
        prop_assert_eq!(parse_note(&token).unwrap().duration_ms, 500 / d as u32);
    }

    /// The parser agrees with frequency_for for well-formed tokens.
    #[test]
    fn parser_matches_pitch_table(l in letter(), octave in 0u32..=9, sharp in any::<bool>()) {
        let token = format!("{}{}{}", l, octave, if sharp { "#" } else { "" });
        let note = parse_note(&token).unwrap();
        prop_assert_eq!(note.frequency_hz, frequency_for(l, octave, sharp).unwrap());
        prop_assert_eq!(note.duration_ms, 125);
    }

    /// A sharp is exactly one semitone above the natural.
    #[test]
    fn sharp_is_one_semitone(l in letter(), octave in 1u32..=8) {
        let natural = frequency_for(l, octave, false).unwrap();
        let sharp = frequency_for(l, octave, true).unwrap();
        let ratio = sharp / natural;
        prop_assert!((ratio - 2f32.powf(1.0 / 12.0)).abs() < 1e-4);
    }

    /// Tokens starting with anything but P or A..G never parse.
    #[test]
    fn invalid_first_character_fails(c in any::<char>(), rest in "[0-9#/]{0,4}") {
        prop_assume!(c != 'P' && !LETTERS.contains(&c));
        let token = format!("{}{}", c, rest);
        prop_assert_eq!(parse_note(&token), Err(NoteError::InvalidLetter));
    }

    /// Parsing never panics on arbitrary input.
    #[test]
    fn parse_never_panics(s in "\\PC{0,12}") {
        let _ = parse_note(&s);
        let _ = Melody::new(&s).count();
    }

    /// A bad token ends playback: only the valid prefix is yielded.
    #[test]
    fn melody_stops_at_first_bad_token(prefix in 0usize..6, suffix in 0usize..6) {
        let mut text = String::new();
        for _ in 0..prefix {
            text.push_str("C5 ");
        }
        text.push_str("Z4");
        for _ in 0..suffix {
            text.push_str(" E5");
        }

        let played = Melody::new(&text).map_while(Result::ok).count();
        prop_assert_eq!(played, prefix);
        prop_assert_eq!(Melody::new(&text).count(), prefix + 1);
    }
}

#[test]
fn reference_pitch_is_exact() {
    assert_eq!(frequency_for('A', 4, false), Some(440.0));
}

#[test]
fn minor_third_ratio() {
    let ratio = frequency_for('C', 5, false).unwrap() / frequency_for('A', 4, false).unwrap();
    assert!((ratio - 2f64.powf(3.0 / 12.0) as f32).abs() < 1e-4);
}

#[test]
fn pause_half_note() {
    let note = parse_note("P/2").unwrap();
    assert_eq!(note.frequency_hz, 0.0);
    assert_eq!(note.duration_ms, 250);
}

#[test]
fn connected_chime_totals_half_a_second() {
    let notes: Vec<_> = Melody::new("C5 E5 G5/2").map(Result::unwrap).collect();
    let durations: Vec<_> = notes.iter().map(|n| n.duration_ms).collect();
    assert_eq!(durations, vec![125, 125, 250]);
    assert_eq!(durations.iter().sum::<u32>(), 500);
}

#[test]
fn invalid_note_truncates_melody() {
    let notes: Vec<_> = Melody::new("C5 E5 Z4 G5").collect();
    assert_eq!(notes.len(), 3);
    assert!(notes[0].is_ok());
    assert!(notes[1].is_ok());
    assert_eq!(notes[2], Err(NoteError::InvalidLetter));
}
