//! Hardware abstraction traits
//!
//! These traits define the interface between the chime/shutdown logic
//! and the board-specific timer, ADC and motor control code.

pub mod shutdown;
pub mod tone;

pub use shutdown::{SpeedSource, VoltageSampler};
pub use tone::{Chime, ToneOutput};
