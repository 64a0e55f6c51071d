//! Debounced delivery of spoken status text to a live region.
//!
//! Each request cancels whatever is still pending, so a burst of key
//! presses is announced once, describing where the selection came to rest.
//! The debounce is deadline based: the owner calls
//! [`DebouncedAnnouncer::flush_due`] from its event loop.

pub mod message;

use std::time::{Duration, Instant};

/// Default delay between the last request and delivery.
pub const DEFAULT_ANNOUNCE_DELAY: Duration = Duration::from_millis(50);

/// The external announcer that speaks text to assistive technology.
pub trait LiveRegion {
    fn announce(&mut self, message: &str);
}

impl<F: FnMut(&str)> LiveRegion for F {
    fn announce(&mut self, message: &str) {
        self(message)
    }
}

/// Collects announcements in memory. Handy for embedders that poll, and
/// for tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingRegion {
    pub messages: Vec<String>,
}

impl LiveRegion for RecordingRegion {
    fn announce(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

#[derive(Debug, Clone)]
struct Pending {
    message: String,
    due: Instant,
}

#[derive(Debug)]
pub struct DebouncedAnnouncer<R: LiveRegion> {
    region: R,
    delay: Duration,
    pending: Option<Pending>,
}

impl<R: LiveRegion> DebouncedAnnouncer<R> {
    pub fn new(region: R, delay: Duration) -> Self {
        Self {
            region,
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `message`, replacing any pending one.
    pub fn request(&mut self, message: impl Into<String>, now: Instant) {
        let message = message.into();
        if let Some(dropped) = self.pending.take() {
            log::trace!("[announce] superseded: {}", dropped.message);
        }
        self.pending = Some(Pending {
            message,
            due: now + self.delay,
        });
    }

    /// Deliver the pending message if its delay has elapsed.
    /// Returns true if something was announced.
    pub fn flush_due(&mut self, now: Instant) -> bool {
        match &self.pending {
            Some(pending) if now >= pending.due => {}
            _ => return false,
        }
        let Some(pending) = self.pending.take() else {
            return false;
        };
        log::debug!("[announce] {}", pending.message);
        self.region.announce(&pending.message);
        true
    }

    /// When the pending message becomes due, for event loop timeouts.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    pub fn pending_message(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.message.as_str())
    }

    /// Drop the pending message without delivering it.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn region(&self) -> &R {
        &self.region
    }

    pub fn region_mut(&mut self) -> &mut R {
        &mut self.region
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_request_wins() {
        let start = Instant::now();
        let mut announcer = DebouncedAnnouncer::new(RecordingRegion::default(), DEFAULT_ANNOUNCE_DELAY);
        announcer.request("one", start);
        announcer.request("two", start + Duration::from_millis(10));
        assert!(!announcer.flush_due(start + Duration::from_millis(50)));
        assert!(announcer.flush_due(start + Duration::from_millis(60)));
        assert_eq!(announcer.region().messages, ["two"]);
        assert!(!announcer.flush_due(start + Duration::from_secs(1)));
    }
}
