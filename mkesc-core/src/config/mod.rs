//! Configuration types
//!
//! Tuning constants for the tone stage and the shutdown debouncer,
//! grouped into `Default`-able structs that can be validated at startup.

pub mod debounce;
pub mod tone;

pub use debounce::*;
pub use tone::*;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Timer clock must be non-zero
    ZeroTimerClock,
    /// Timer clock is too slow to reach 1 Hz at the longest period
    TimerClockTooSlow,
    /// Minimum pulse width exceeds the maximum
    PulseRangeInverted,
    /// Idle tone rate is outside the timer's frequency band
    IdleRateOutOfBand,
    /// Whole note duration must be non-zero
    ZeroWholeNote,
    /// Tone duty must be within 0.0..=1.0
    DutyOutOfRange,
    /// Edge threshold must be positive
    EdgeThresholdNotPositive,
    /// Steady threshold must be positive and below the edge threshold
    SteadyThresholdInvalid,
    /// Normal hold time must be shorter than the emergency hold time
    HoldTimesInverted,
    /// Speed limit must be positive
    SpeedLimitNotPositive,
    /// Baseline smoothing weight must be within 0.0..1.0
    BaselineWeightOutOfRange,
}
