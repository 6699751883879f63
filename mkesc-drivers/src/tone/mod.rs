//! Buzzer tone output implementations

pub mod pwm;

pub use pwm::{PwmTone, ToneTimer};
