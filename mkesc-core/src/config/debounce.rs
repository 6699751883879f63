//! Shutdown button debouncer configuration
//!
//! Times are expressed in sampling ticks. The debouncer is expected to be
//! called every 10 ms, so 50 ticks is half a second.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Sample-to-sample change treated as an edge (V)
pub const EDGE_THRESHOLD_V: f32 = 0.09;

/// Sample-to-sample change still considered noise (V)
pub const STEADY_THRESHOLD_V: f32 = 0.02;

/// Hold time for a normal shutdown (ticks, 500 ms at 10 ms/tick)
pub const NORMAL_HOLD_TICKS: u32 = 50;

/// Hold time for an emergency shutdown (ticks, 3 s at 10 ms/tick)
pub const EMERGENCY_HOLD_TICKS: u32 = 300;

/// Motor speed above which a normal shutdown is refused (ERPM)
pub const SPEED_LIMIT_ERPM: f32 = 100.0;

/// Shutdown debouncer configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DebounceConfig {
    /// Rising/falling edge threshold (V)
    pub edge_threshold_v: f32,
    /// Noise band for "steady" samples (V)
    pub steady_threshold_v: f32,
    /// Ticks of sustained press before a normal shutdown is armed
    pub normal_hold_ticks: u32,
    /// Ticks of sustained press before an emergency shutdown fires
    pub emergency_hold_ticks: u32,
    /// Motor speed gate (ERPM, compared against the absolute speed)
    pub speed_limit_erpm: f32,
    /// Weight of the old baseline in the drift filter
    pub baseline_weight: f32,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            edge_threshold_v: EDGE_THRESHOLD_V,
            steady_threshold_v: STEADY_THRESHOLD_V,
            normal_hold_ticks: NORMAL_HOLD_TICKS,
            emergency_hold_ticks: EMERGENCY_HOLD_TICKS,
            speed_limit_erpm: SPEED_LIMIT_ERPM,
            baseline_weight: 0.9,
        }
    }
}

impl DebounceConfig {
    /// Level at or below which the button counts as released
    pub fn release_level(&self, baseline: f32) -> f32 {
        baseline + self.edge_threshold_v / 2.0
    }

    /// Level above which a press counts as still held
    pub fn hold_level(&self, baseline: f32) -> f32 {
        baseline + self.edge_threshold_v * 1.5
    }

    /// Check the configuration for inconsistent thresholds
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.edge_threshold_v <= 0.0 {
            return Err(ConfigError::EdgeThresholdNotPositive);
        }

        if self.steady_threshold_v <= 0.0 || self.steady_threshold_v >= self.edge_threshold_v {
            return Err(ConfigError::SteadyThresholdInvalid);
        }

        if self.normal_hold_ticks >= self.emergency_hold_ticks {
            return Err(ConfigError::HoldTimesInverted);
        }

        if self.speed_limit_erpm <= 0.0 {
            return Err(ConfigError::SpeedLimitNotPositive);
        }

        if !(0.0..1.0).contains(&self.baseline_weight) {
            return Err(ConfigError::BaselineWeightOutOfRange);
        }

        Ok(())
    }
}
