//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in mkesc-core for the MK ESC buzzer and power button:
//!
//! - Tone output stage on a PWM timer channel
//! - Melody players (blocking and async)
//! - Chime queue for playing feedback on a separate task
//! - Lock-guarded shutdown sense voltage
//! - Power latch and shutdown button glue

#![no_std]
#![deny(unsafe_code)]

mod fmt;

pub mod button;
pub mod chime;
pub mod player;
pub mod power;
pub mod sense;
pub mod tone;

#[cfg(test)]
mod mock;

pub use button::ShutdownButton;
pub use chime::{ChimeError, ChimeQueue, ChimeRequest, ChimeSender};
pub use player::{AsyncMelodyPlayer, MelodyPlayer, PlayOutcome};
pub use power::PowerLatch;
pub use sense::SharedVoltage;
pub use tone::{PwmTone, ToneTimer};
