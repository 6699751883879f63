//! Shutdown button
//!
//! Ties a [`ShutdownDebouncer`] to its collaborators: the sense voltage,
//! the motor speed and the chime. Call [`sample`](ShutdownButton::sample)
//! once per 10 ms tick.
//!
//! ```ignore
//! let mut button = ShutdownButton::new(
//!     ShutdownDebouncer::default(),
//!     &SENSE,
//!     motor_speed,
//!     CHIMES.sender(),
//! );
//!
//! loop {
//!     if !button.sample() {
//!         latch.release()?;
//!     }
//!     ticker.next().await;
//! }
//! ```

use mkesc_core::shutdown::{DebounceSnapshot, Decision, ShutdownDebouncer};
use mkesc_core::traits::{Chime, SpeedSource, VoltageSampler};

/// Shutdown button with its sampling and feedback collaborators
pub struct ShutdownButton<V, S, C> {
    debouncer: ShutdownDebouncer,
    sampler: V,
    speed: S,
    chime: C,
}

impl<V, S, C> ShutdownButton<V, S, C>
where
    V: VoltageSampler,
    S: SpeedSource,
    C: Chime,
{
    /// Create a new shutdown button
    pub fn new(debouncer: ShutdownDebouncer, sampler: V, speed: S, chime: C) -> Self {
        Self {
            debouncer,
            sampler,
            speed,
            chime,
        }
    }

    /// Run one tick, returning the decision
    pub fn poll(&mut self) -> Decision {
        let volts = self.sampler.sample_volts();
        self.debouncer.update(volts, &self.speed, &mut self.chime)
    }

    /// Run one tick
    ///
    /// Returns `false` when the controller should shut down now.
    pub fn sample(&mut self) -> bool {
        self.poll().keep_running()
    }

    /// Capture the debouncer state for diagnostics
    pub fn snapshot(&self) -> DebounceSnapshot {
        self.debouncer.snapshot()
    }

    /// Get access to the debouncer
    pub fn debouncer(&self) -> &ShutdownDebouncer {
        &self.debouncer
    }

    /// Get access to the chime
    pub fn chime(&self) -> &C {
        &self.chime
    }

    /// Get mutable access to the speed source
    pub fn speed_mut(&mut self) -> &mut S {
        &mut self.speed
    }
}
