//! PWM timer tone output
//!
//! Drives the buzzer from one compare channel of a general purpose timer
//! clocked at a fixed rate (2 MHz by default). The tone frequency sets the
//! timer period; the output level sets the pulse width, scaled so that a
//! level of 1.0 spans one full period of the current tone.
//!
//! ```ignore
//! let mut tone = PwmTone::new(timer, ToneConfig::default());
//! tone.init();
//! tone.configure(440, 0.5); // A4, square wave
//! tone.silence();
//! ```

use mkesc_core::config::ToneConfig;
use mkesc_core::traits::ToneOutput;

/// Trait for the timer channel register abstraction
pub trait ToneTimer {
    /// Program the timer period (auto-reload), in timer ticks
    fn set_period(&mut self, ticks: u32);

    /// Program the compare value (pulse width), in timer ticks
    fn set_compare(&mut self, ticks: u32);

    /// Start the counter with preload enabled
    fn enable(&mut self);

    /// Drive the output pin to its inactive level
    fn force_low(&mut self);
}

/// Tone output on a PWM timer channel
pub struct PwmTone<T> {
    timer: T,
    config: ToneConfig,
    /// Last applied frequency (Hz)
    freq_hz: u32,
    /// Pulse width at level 1.0 (µs)
    pulse_max_us: f32,
    /// Current output level
    level: f32,
}

impl<T: ToneTimer> PwmTone<T> {
    /// Create a new tone output
    ///
    /// The timer is not touched until [`init`](Self::init) or
    /// [`configure`](ToneOutput::configure) is called.
    pub fn new(timer: T, config: ToneConfig) -> Self {
        let pulse_max_us = config.pulse_max_us;
        Self {
            timer,
            config,
            freq_hz: 0,
            pulse_max_us,
            level: 0.0,
        }
    }

    /// Bring the output up at the idle rate, silent
    ///
    /// Returns the frequency actually applied.
    pub fn init(&mut self) -> u32 {
        let applied = self.program_period(self.config.idle_rate_hz);
        self.pulse_max_us = self.config.pulse_max_us;
        self.set_level(0.0);
        self.timer.enable();
        applied
    }

    /// Force the pin low, independent of the timer
    pub fn stop(&mut self) {
        self.level = 0.0;
        self.timer.force_low();
    }

    /// Get the last applied frequency (0 before the first configure)
    pub fn frequency_hz(&self) -> u32 {
        self.freq_hz
    }

    /// Get the current output level
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Get the pulse width produced at level 1.0 (µs)
    pub fn pulse_max_us(&self) -> f32 {
        self.pulse_max_us
    }

    /// Get the configuration
    pub fn config(&self) -> &ToneConfig {
        &self.config
    }

    /// Get access to the underlying timer
    pub fn timer(&self) -> &T {
        &self.timer
    }

    fn program_period(&mut self, freq_hz: u32) -> u32 {
        // A slow clock rounds the lower band edge down to 0 Hz
        let applied = self.config.clamp_freq(freq_hz).max(1);
        self.timer.set_period(self.config.timer_clock_hz / applied);
        self.freq_hz = applied;
        applied
    }

    /// Convert a level to a compare value in timer ticks
    fn compare_ticks(&self, level: f32) -> u32 {
        let span = self.pulse_max_us - self.config.pulse_min_us;
        let us = self.config.pulse_min_us + level * span;
        (us * self.config.timer_clock_hz as f32 / 1_000_000.0) as u32
    }
}

impl<T: ToneTimer> ToneOutput for PwmTone<T> {
    fn configure(&mut self, freq_hz: u32, duty: f32) -> u32 {
        let applied = self.program_period(freq_hz);

        // Full scale is one period of the tone
        self.pulse_max_us = 1_000_000.0 / applied as f32;
        self.set_level(duty);
        self.timer.enable();

        applied
    }

    fn set_level(&mut self, level: f32) {
        let level = level.clamp(0.0, 1.0);
        self.timer.set_compare(self.compare_ticks(level));
        self.level = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock timer registers
    #[derive(Default)]
    struct MockTimer {
        period: u32,
        compare: u32,
        enabled: bool,
        forced_low: bool,
    }

    impl ToneTimer for MockTimer {
        fn set_period(&mut self, ticks: u32) {
            self.period = ticks;
        }

        fn set_compare(&mut self, ticks: u32) {
            self.compare = ticks;
            self.forced_low = false;
        }

        fn enable(&mut self) {
            self.enabled = true;
        }

        fn force_low(&mut self) {
            self.forced_low = true;
        }
    }

    fn tone() -> PwmTone<MockTimer> {
        PwmTone::new(MockTimer::default(), ToneConfig::default())
    }

    #[test]
    fn test_new_leaves_timer_alone() {
        let tone = tone();
        assert!(!tone.timer().enabled);
        assert_eq!(tone.frequency_hz(), 0);
    }

    #[test]
    fn test_init_idle_rate() {
        let mut tone = tone();

        assert_eq!(tone.init(), 4000);
        assert!(tone.timer().enabled);
        // 2 MHz / 4 kHz
        assert_eq!(tone.timer().period, 500);
        assert_eq!(tone.timer().compare, 0);
        assert_eq!(tone.pulse_max_us(), 250.0);
    }

    #[test]
    fn test_square_wave() {
        let mut tone = tone();

        assert_eq!(tone.configure(1000, 0.5), 1000);
        assert_eq!(tone.timer().period, 2000);
        assert_eq!(tone.timer().compare, 1000);
        assert_eq!(tone.level(), 0.5);

        // A4: period 4545 ticks, compare at half a period
        tone.configure(440, 0.5);
        assert_eq!(tone.timer().period, 4545);
        assert!(tone.timer().compare.abs_diff(2272) <= 1);
    }

    #[test]
    fn test_frequency_clamped() {
        let mut tone = tone();

        assert_eq!(tone.configure(10, 0.5), 30);
        assert_eq!(tone.timer().period, 66_666);

        assert_eq!(tone.configure(50_000, 0.5), 20_000);
        assert_eq!(tone.timer().period, 100);
        assert_eq!(tone.timer().compare, 50);
    }

    #[test]
    fn test_slow_clock_never_divides_by_zero() {
        let config = ToneConfig {
            timer_clock_hz: 50_000,
            idle_rate_hz: 100,
            ..ToneConfig::default()
        };
        assert_eq!(config.min_freq_hz(), 0);
        let mut tone = PwmTone::new(MockTimer::default(), config);

        assert_eq!(tone.configure(0, 0.5), 1);
        assert_eq!(tone.timer().period, 50_000);
        assert!(tone.timer().compare.abs_diff(25_000) <= 1);

        assert_eq!(tone.configure(440, 0.5), 440);
        assert_eq!(tone.timer().period, 113);
    }

    #[test]
    fn test_level_clamped() {
        let mut tone = tone();
        tone.configure(1000, 0.0);

        tone.set_level(2.0);
        assert_eq!(tone.level(), 1.0);
        assert_eq!(tone.timer().compare, 2000);

        tone.set_level(-1.0);
        assert_eq!(tone.level(), 0.0);
        assert_eq!(tone.timer().compare, 0);
    }

    #[test]
    fn test_silence_keeps_frequency() {
        let mut tone = tone();
        tone.configure(2000, 0.5);

        tone.silence();
        assert_eq!(tone.timer().compare, 0);
        assert_eq!(tone.frequency_hz(), 2000);
        assert_eq!(tone.timer().period, 1000);
    }

    #[test]
    fn test_pulse_min_offset() {
        let config = ToneConfig {
            pulse_min_us: 100.0,
            ..ToneConfig::default()
        };
        let mut tone = PwmTone::new(MockTimer::default(), config);

        // 1 kHz: 100 µs..1000 µs, level 0 is the minimum pulse
        tone.configure(1000, 0.0);
        assert_eq!(tone.timer().compare, 200);

        tone.set_level(1.0);
        assert_eq!(tone.timer().compare, 2000);
    }

    #[test]
    fn test_stop() {
        let mut tone = tone();
        tone.configure(1000, 0.5);

        tone.stop();
        assert!(tone.timer().forced_low);
        assert_eq!(tone.level(), 0.0);
    }
}
