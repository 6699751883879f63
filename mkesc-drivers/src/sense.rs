//! Shutdown sense voltage
//!
//! The sense line is converted together with the other ADC channels; the
//! conversion handler stores the result here and the debouncer reads it.
//! The lock is held only for the single load or store.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use mkesc_core::traits::VoltageSampler;

/// Latest shutdown sense voltage, shared between the ADC and the debouncer
pub struct SharedVoltage {
    volts: Mutex<CriticalSectionRawMutex, Cell<f32>>,
}

impl Default for SharedVoltage {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedVoltage {
    /// Create a slot holding 0 V
    pub const fn new() -> Self {
        Self {
            volts: Mutex::const_new(CriticalSectionRawMutex::new(), Cell::new(0.0)),
        }
    }

    /// Publish a new reading (V)
    pub fn store(&self, volts: f32) {
        self.volts.lock(|v| v.set(volts));
    }

    /// Read the latest reading (V)
    pub fn load(&self) -> f32 {
        self.volts.lock(|v| v.get())
    }
}

impl VoltageSampler for &SharedVoltage {
    fn sample_volts(&mut self) -> f32 {
        self.load()
    }
}
