//! Shutdown button debouncing
//!
//! The power button on the MK ESC is read through an analog sense line.
//! A press raises the voltage above a slowly-tracked resting level; the
//! debouncer turns that signal into a single "power off now" decision.

pub mod debouncer;
pub mod snapshot;

pub use debouncer::{Decision, Phase, ShutdownDebouncer};
pub use snapshot::DebounceSnapshot;
