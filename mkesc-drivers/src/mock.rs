//! Test doubles shared by the driver tests

use mkesc_core::traits::ToneOutput;

/// Call recorded by [`MockTone`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToneEvent {
    Configure(u32, f32),
    Level(f32),
}

/// Tone output that records every call
#[derive(Debug, Default)]
pub struct MockTone {
    pub events: heapless::Vec<ToneEvent, 64>,
}

impl MockTone {
    pub fn configures(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, ToneEvent::Configure(..)))
            .count()
    }

    pub fn last(&self) -> Option<ToneEvent> {
        self.events.last().copied()
    }
}

impl ToneOutput for MockTone {
    fn configure(&mut self, freq_hz: u32, duty: f32) -> u32 {
        let _ = self.events.push(ToneEvent::Configure(freq_hz, duty));
        freq_hz
    }

    fn set_level(&mut self, level: f32) {
        let _ = self.events.push(ToneEvent::Level(level));
    }
}

/// Delay that only adds up the requested time
#[derive(Debug, Default)]
pub struct MockDelay {
    pub total_ms: u32,
    pub calls: u32,
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ms += ns / 1_000_000;
        self.calls += 1;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += ms;
        self.calls += 1;
    }
}

impl embedded_hal_async::delay::DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.total_ms += ns / 1_000_000;
        self.calls += 1;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.total_ms += ms;
        self.calls += 1;
    }
}
