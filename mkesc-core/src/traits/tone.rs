//! Tone output and chime traits

/// Square-wave output stage driving the buzzer
///
/// Implementations own the timer programming. The only state they keep
/// is the last configured frequency, which bounds the pulse width that
/// [`set_level`](ToneOutput::set_level) can produce.
pub trait ToneOutput {
    /// Reprogram the output period and duty
    ///
    /// The frequency is clamped into the range the timer supports and
    /// the duty into 0.0..=1.0. Returns the frequency actually applied.
    fn configure(&mut self, freq_hz: u32, duty: f32) -> u32;

    /// Set the output level (0.0 = silent, 1.0 = maximum pulse width)
    fn set_level(&mut self, level: f32);

    /// Silence the output without changing the configured frequency
    fn silence(&mut self) {
        self.set_level(0.0);
    }
}

/// Audible feedback sink used by the shutdown debouncer
///
/// A blocking implementation plays the melody before returning; a
/// queued implementation hands it to another task.
pub trait Chime {
    /// Play a melody written in note notation
    fn play(&mut self, melody: &'static str);

    /// Stop any tone currently sounding
    fn silence(&mut self);
}
