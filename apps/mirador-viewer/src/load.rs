//! Load generations
//!
//! Every new document source gets a fresh ticket. Renderer callbacks carry the
//! ticket they were started with, and only the newest one is honored.

use serde::Serialize;

/// Identifies one load of one document source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadTicket(u32);

impl LoadTicket {
    pub fn generation(self) -> u32 {
        self.0
    }

    /// Rebuild a ticket handed back from JS
    pub fn from_generation(generation: u32) -> Self {
        Self(generation)
    }
}

/// Issues tickets and tells current from stale
#[derive(Debug, Default)]
pub struct LoadTracker {
    generation: u32,
}

impl LoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load, invalidating every earlier ticket
    pub fn begin(&mut self) -> LoadTicket {
        self.generation = self.generation.wrapping_add(1);
        LoadTicket(self.generation)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.generation != 0 && ticket.0 == self.generation
    }

    /// Invalidate everything in flight without starting a new load
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_load_supersedes_older() {
        let mut tracker = LoadTracker::new();
        let first = tracker.begin();
        assert!(tracker.is_current(first));

        let second = tracker.begin();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }

    #[test]
    fn test_cancel_invalidates_in_flight() {
        let mut tracker = LoadTracker::new();
        let ticket = tracker.begin();
        tracker.cancel();
        assert!(!tracker.is_current(ticket));
    }

    #[test]
    fn test_no_ticket_is_current_before_first_load() {
        let tracker = LoadTracker::new();
        assert!(!tracker.is_current(LoadTicket::from_generation(0)));
    }
}
