//! Queued chimes
//!
//! Lets the shutdown button request melodies without blocking its
//! sampling tick. Requests go into a small channel; an
//! [`AsyncMelodyPlayer`](crate::player::AsyncMelodyPlayer) task plays them
//! in order. Playback of a started melody is never cancelled.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Sender};
use mkesc_core::traits::Chime;

/// Number of chime requests that can wait for the player
pub const CHIME_QUEUE_DEPTH: usize = 4;

/// A request for the chime player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChimeRequest {
    /// Play a melody in note notation
    Play(&'static str),
    /// Silence the output
    Silence,
}

/// Errors from posting a chime request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChimeError {
    /// The player has fallen behind and the queue is full
    QueueFull,
}

/// Queue of pending chime requests
///
/// Usually placed in a `static` shared by the sampling and player tasks.
pub struct ChimeQueue {
    channel: Channel<CriticalSectionRawMutex, ChimeRequest, CHIME_QUEUE_DEPTH>,
}

impl Default for ChimeQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ChimeQueue {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Get a sender for posting requests
    pub fn sender(&self) -> ChimeSender<'_> {
        ChimeSender {
            sender: self.channel.sender(),
            dropped: 0,
        }
    }

    /// Take the next request if one is waiting
    pub fn try_next(&self) -> Option<ChimeRequest> {
        self.channel.try_receive().ok()
    }

    /// Wait for the next request
    pub async fn next(&self) -> ChimeRequest {
        self.channel.receive().await
    }

    /// Check if no requests are waiting
    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}

/// Non-blocking [`Chime`] that posts to a [`ChimeQueue`]
pub struct ChimeSender<'a> {
    sender: Sender<'a, CriticalSectionRawMutex, ChimeRequest, CHIME_QUEUE_DEPTH>,
    /// Requests lost to a full queue
    dropped: u32,
}

impl ChimeSender<'_> {
    /// Post a request without waiting
    pub fn try_post(&self, request: ChimeRequest) -> Result<(), ChimeError> {
        self.sender
            .try_send(request)
            .map_err(|_| ChimeError::QueueFull)
    }

    /// Get the number of requests dropped because the queue was full
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    fn post(&mut self, request: ChimeRequest) {
        if self.try_post(request).is_err() {
            warn!("chime queue full, dropping {}", request);
            self.dropped = self.dropped.saturating_add(1);
        }
    }
}

impl Chime for ChimeSender<'_> {
    fn play(&mut self, melody: &'static str) {
        self.post(ChimeRequest::Play(melody));
    }

    fn silence(&mut self) {
        self.post(ChimeRequest::Silence);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mkesc_core::melody::chimes;

    #[test]
    fn test_requests_in_order() {
        let queue = ChimeQueue::new();
        let mut sender = queue.sender();

        sender.play(chimes::ERROR);
        sender.silence();

        assert_eq!(queue.try_next(), Some(ChimeRequest::Play(chimes::ERROR)));
        assert_eq!(queue.try_next(), Some(ChimeRequest::Silence));
        assert_eq!(queue.try_next(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_full_queue_drops() {
        let queue = ChimeQueue::new();
        let mut sender = queue.sender();

        for _ in 0..CHIME_QUEUE_DEPTH {
            sender.play(chimes::CONNECTED);
        }
        assert_eq!(sender.dropped(), 0);

        sender.play(chimes::DISCONNECTED);
        assert_eq!(sender.dropped(), 1);
        assert_eq!(
            sender.try_post(ChimeRequest::Silence),
            Err(ChimeError::QueueFull)
        );

        // Oldest requests survive
        assert_eq!(queue.try_next(), Some(ChimeRequest::Play(chimes::CONNECTED)));
    }
}
