//! Shutdown button state machine
//!
//! Called once per sampling tick (nominally 10 ms) with the latest sense
//! voltage. The sequence is:
//!
//! 1. Warm up: the first sample seeds the edge detector, the first steady
//!    sample after that becomes the resting baseline.
//! 2. Idle: a rising edge starts a hold; steady samples near the baseline
//!    slowly pull it along to follow temperature drift.
//! 3. Holding: the level must stay clearly above the baseline. Dropping
//!    back aborts the hold.
//! 4. After 0.5 s with the motor (nearly) stopped, the shutdown is armed
//!    and a chime tells the user to let go. Power-off happens on release.
//! 5. With the motor spinning the normal hold never arms. Holding for 3 s
//!    forces an emergency shutdown immediately.
//!
//! Spinning the motor while a normal shutdown is armed cancels it.

use crate::config::DebounceConfig;
use crate::melody::chimes;
use crate::traits::{Chime, SpeedSource};

use super::DebounceSnapshot;

/// Outcome of a sampling tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Decision {
    /// Keep the controller powered
    KeepRunning,
    /// Release the power latch now
    PowerOff,
}

impl Decision {
    /// Check if the controller should stay on
    pub fn keep_running(&self) -> bool {
        matches!(self, Decision::KeepRunning)
    }
}

/// Behavioural phase of the debouncer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// No baseline yet
    Uninitialized,
    /// Waiting for a press, tracking the baseline
    Idle,
    /// Press in progress, counting ticks
    Holding,
    /// Normal shutdown armed, waiting for release
    Pending,
    /// Emergency shutdown armed
    Forced,
}

/// Shutdown button debouncer
///
/// Owns all per-button state; several instances can run side by side.
#[derive(Debug, Clone)]
pub struct ShutdownDebouncer {
    config: DebounceConfig,
    /// Previous raw sample
    last_sample: Option<f32>,
    /// Difference between the last two samples
    last_diff: f32,
    /// Estimated unpressed level
    baseline: Option<f32>,
    /// Ticks of sustained press since the rising edge
    hold_counter: u32,
    /// Shutdown armed, waiting for release
    pending: bool,
    /// Armed by the emergency hold (implies `pending`)
    forced: bool,
}

impl Default for ShutdownDebouncer {
    fn default() -> Self {
        Self::new(DebounceConfig::default())
    }
}

impl ShutdownDebouncer {
    /// Create a new debouncer
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            config,
            last_sample: None,
            last_diff: 0.0,
            baseline: None,
            hold_counter: 0,
            pending: false,
            forced: false,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &DebounceConfig {
        &self.config
    }

    /// Get the current phase
    pub fn phase(&self) -> Phase {
        if self.forced {
            Phase::Forced
        } else if self.pending {
            Phase::Pending
        } else if self.baseline.is_none() {
            Phase::Uninitialized
        } else if self.hold_counter > 0 {
            Phase::Holding
        } else {
            Phase::Idle
        }
    }

    /// Get the tracked resting level
    pub fn baseline(&self) -> Option<f32> {
        self.baseline
    }

    /// Get the current hold counter
    pub fn hold_counter(&self) -> u32 {
        self.hold_counter
    }

    /// Check if a shutdown is armed
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Check if the armed shutdown is an emergency one
    pub fn is_forced(&self) -> bool {
        self.forced
    }

    /// Capture the internal state for diagnostics
    pub fn snapshot(&self) -> DebounceSnapshot {
        DebounceSnapshot {
            hold_counter: self.hold_counter,
            last_diff: self.last_diff,
            baseline: self.baseline,
            last_sample: self.last_sample,
            pending: self.pending,
            forced: self.forced,
        }
    }

    /// Forget everything, as after a power cycle
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }

    /// Process one sample
    ///
    /// `speed` is only queried when a decision depends on it. Chimes are
    /// started through `chime`; with a blocking chime this call lasts as
    /// long as the melody.
    pub fn update<S, C>(&mut self, sample: f32, speed: &S, chime: &mut C) -> Decision
    where
        S: SpeedSource + ?Sized,
        C: Chime + ?Sized,
    {
        let Some(last) = self.last_sample else {
            self.last_sample = Some(sample);
            return Decision::KeepRunning;
        };

        let diff = sample - last;
        self.last_diff = diff;
        self.last_sample = Some(sample);

        let steady = libm::fabsf(diff) < self.config.steady_threshold_v;
        let rising_edge = diff > self.config.edge_threshold_v;

        let Some(baseline) = self.baseline else {
            if steady {
                debug!("shutdown: baseline {}V", sample);
                self.baseline = Some(sample);
            }
            return Decision::KeepRunning;
        };

        if self.pending {
            return self.await_release(sample, diff, baseline, speed, chime);
        }

        if self.hold_counter == 0 {
            if rising_edge {
                trace!("shutdown: rising edge {}V", diff);
                self.hold_counter = 1;
            } else if steady && sample <= self.config.release_level(baseline) {
                // Follow slow drift of the resting level
                let weight = self.config.baseline_weight;
                self.baseline = Some(baseline * weight + sample * (1.0 - weight));
            }
            return Decision::KeepRunning;
        }

        if sample > self.config.hold_level(baseline) {
            self.hold_counter = self.hold_counter.saturating_add(1);

            if self.hold_counter > self.config.normal_hold_ticks {
                let erpm = libm::fabsf(speed.erpm());

                if erpm < self.config.speed_limit_erpm {
                    info!("shutdown: armed, waiting for release");
                    self.pending = true;
                    self.hold_counter = 0;
                    chime.play(chimes::DISCONNECTED);
                } else if self.hold_counter > self.config.emergency_hold_ticks {
                    warn!("shutdown: emergency hold at {} ERPM", erpm);
                    chime.play(chimes::ERROR);
                    chime.play(chimes::DISCONNECTED);
                    self.pending = true;
                    self.forced = true;
                    self.hold_counter = 0;
                    return Decision::PowerOff;
                }
            }
        } else {
            // Press too short
            trace!("shutdown: hold aborted after {} ticks", self.hold_counter);
            self.hold_counter = 0;
            chime.silence();
        }

        Decision::KeepRunning
    }

    fn await_release<S, C>(
        &mut self,
        sample: f32,
        diff: f32,
        baseline: f32,
        speed: &S,
        chime: &mut C,
    ) -> Decision
    where
        S: SpeedSource + ?Sized,
        C: Chime + ?Sized,
    {
        if !self.forced && libm::fabsf(speed.erpm()) > self.config.speed_limit_erpm {
            info!("shutdown: cancelled, motor spinning");
            self.pending = false;
            self.hold_counter = 0;
            chime.silence();
            return Decision::KeepRunning;
        }

        let falling_edge = diff < -self.config.edge_threshold_v;
        if falling_edge || sample < self.config.release_level(baseline) {
            info!("shutdown: released, powering off");
            self.hold_counter = self.hold_counter.saturating_add(1);
            chime.silence();
            return Decision::PowerOff;
        }

        Decision::KeepRunning
    }
}
