//! Power latch
//!
//! The controller keeps itself powered by holding the shutdown line high
//! after the button has woken it. Releasing the line turns it off.

use embedded_hal::digital::OutputPin;
use mkesc_core::shutdown::Decision;

/// Shutdown hold line
pub struct PowerLatch<P> {
    pin: P,
    held: bool,
}

impl<P: OutputPin> PowerLatch<P> {
    /// Wrap the hold pin without driving it
    pub fn new(pin: P) -> Self {
        Self { pin, held: false }
    }

    /// Keep the controller powered
    pub fn hold(&mut self) -> Result<(), P::Error> {
        self.pin.set_high()?;
        self.held = true;
        Ok(())
    }

    /// Drop the hold line, cutting power
    pub fn release(&mut self) -> Result<(), P::Error> {
        self.pin.set_low()?;
        self.held = false;
        Ok(())
    }

    /// Act on a debouncer decision
    pub fn apply(&mut self, decision: Decision) -> Result<(), P::Error> {
        match decision {
            Decision::KeepRunning => Ok(()),
            Decision::PowerOff => {
                info!("power latch released");
                self.release()
            }
        }
    }

    /// Check if the hold line is driven
    pub fn is_held(&self) -> bool {
        self.held
    }
}
