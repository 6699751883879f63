//! Read-only view of the debouncer internals

use core::fmt;

/// Debouncer state captured for diagnostics
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceSnapshot {
    /// Ticks of sustained press (or release wait)
    pub hold_counter: u32,
    /// Difference between the last two samples (V)
    pub last_diff: f32,
    /// Resting level, `None` while still warming up (V)
    pub baseline: Option<f32>,
    /// Last raw sample, `None` before the first tick (V)
    pub last_sample: Option<f32>,
    /// Shutdown armed, waiting for release
    pub pending: bool,
    /// Armed by the emergency hold
    pub forced: bool,
}

impl DebounceSnapshot {
    /// Render the snapshot as a fixed-capacity terminal line
    ///
    /// Fails if the line does not fit, which only happens for voltages far
    /// outside the ADC range.
    pub fn to_line(&self) -> Result<heapless::String<80>, fmt::Error> {
        let mut line = heapless::String::new();
        fmt::write(&mut line, format_args!("{}", self))?;
        Ok(line)
    }
}

impl fmt::Display for DebounceSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BT: {} [{:.2}V], {:.2}V, {:.2}V, OFF={}",
            self.hold_counter,
            self.last_diff,
            self.baseline.unwrap_or(0.0),
            self.last_sample.unwrap_or(0.0),
            self.pending as u8,
        )?;

        if self.forced {
            f.write_str(" FORCED")?;
        }

        Ok(())
    }
}
