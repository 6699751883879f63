//! Tone stage and notation timing configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Timer input clock driving the buzzer output (Hz)
pub const TIMER_CLOCK_HZ: u32 = 2_000_000;

/// Whole note duration: 120 BPM with a quarter note as one beat
pub const WHOLE_NOTE_MS: u32 = 500;

/// Largest timer period, in ticks (lowest frequency = clock / this)
pub const MAX_PERIOD_TICKS: u32 = 65_000;

/// Smallest timer period, in ticks (highest frequency = clock / this)
pub const MIN_PERIOD_TICKS: u32 = 100;

/// Buzzer tone stage configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ToneConfig {
    /// Timer input clock (Hz)
    pub timer_clock_hz: u32,
    /// Output pulse width at level 0.0 (µs)
    pub pulse_min_us: f32,
    /// Output pulse width at level 1.0 before any tone is configured (µs)
    pub pulse_max_us: f32,
    /// Carrier rate used when the output is first brought up (Hz)
    pub idle_rate_hz: u32,
    /// Duration of a whole note (ms)
    pub whole_note_ms: u32,
    /// Duty used for every played note (square wave at 0.5)
    pub duty: f32,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            timer_clock_hz: TIMER_CLOCK_HZ,
            pulse_min_us: 0.0,
            pulse_max_us: 250.0,
            idle_rate_hz: 4000,
            whole_note_ms: WHOLE_NOTE_MS,
            duty: 0.5,
        }
    }
}

impl ToneConfig {
    /// Lowest frequency the timer can produce without overflowing its period
    pub fn min_freq_hz(&self) -> u32 {
        self.timer_clock_hz / MAX_PERIOD_TICKS
    }

    /// Highest frequency that still leaves usable duty resolution
    pub fn max_freq_hz(&self) -> u32 {
        self.timer_clock_hz / MIN_PERIOD_TICKS
    }

    /// Clamp a requested frequency into the timer's usable band
    pub fn clamp_freq(&self, freq_hz: u32) -> u32 {
        freq_hz.clamp(self.min_freq_hz(), self.max_freq_hz())
    }

    /// Check the configuration for values the tone stage cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timer_clock_hz == 0 {
            return Err(ConfigError::ZeroTimerClock);
        }

        if self.timer_clock_hz < MAX_PERIOD_TICKS {
            return Err(ConfigError::TimerClockTooSlow);
        }

        if self.pulse_min_us > self.pulse_max_us {
            return Err(ConfigError::PulseRangeInverted);
        }

        if self.idle_rate_hz < self.min_freq_hz() || self.idle_rate_hz > self.max_freq_hz() {
            return Err(ConfigError::IdleRateOutOfBand);
        }

        if self.whole_note_ms == 0 {
            return Err(ConfigError::ZeroWholeNote);
        }

        if !(0.0..=1.0).contains(&self.duty) {
            return Err(ConfigError::DutyOutOfRange);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ToneConfig::default();
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_frequency_band() {
        let config = ToneConfig::default();
        // 2 MHz / 65000 and 2 MHz / 100
        assert_eq!(config.min_freq_hz(), 30);
        assert_eq!(config.max_freq_hz(), 20_000);

        assert_eq!(config.clamp_freq(5), 30);
        assert_eq!(config.clamp_freq(440), 440);
        assert_eq!(config.clamp_freq(50_000), 20_000);
    }

    #[test]
    fn test_invalid_configs() {
        let config = ToneConfig {
            timer_clock_hz: 0,
            ..ToneConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimerClock));

        let config = ToneConfig {
            timer_clock_hz: 50_000,
            idle_rate_hz: 100,
            ..ToneConfig::default()
        };
        assert_eq!(config.min_freq_hz(), 0);
        assert_eq!(config.validate(), Err(ConfigError::TimerClockTooSlow));

        let config = ToneConfig {
            timer_clock_hz: MAX_PERIOD_TICKS,
            idle_rate_hz: 100,
            ..ToneConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));

        let config = ToneConfig {
            pulse_min_us: 300.0,
            ..ToneConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::PulseRangeInverted));

        let config = ToneConfig {
            idle_rate_hz: 25_000,
            ..ToneConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::IdleRateOutOfBand));

        let config = ToneConfig {
            whole_note_ms: 0,
            ..ToneConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroWholeNote));

        let config = ToneConfig {
            duty: 1.5,
            ..ToneConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::DutyOutOfRange));
    }
}
