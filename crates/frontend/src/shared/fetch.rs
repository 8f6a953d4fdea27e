//! Fetch lifecycle primitives shared by every panel that talks to the API.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// State of one fetch-backed panel.
///
/// The three states are mutually exclusive and explicitly modeled — never
/// inferred from a bare `loading` boolean. `Loaded` with an empty payload is
/// a real, renderable state ("no projects found"), distinct from both
/// `Loading` and `Error`.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Error(String),
    Loaded(T),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// Monotonic ticket counter guarding against stale responses.
///
/// Every fetch takes a ticket before awaiting and re-checks it before
/// applying the response. A later fetch (or a close/unmount, which calls
/// [`RequestSeq::invalidate`]) bumps the counter, so a slow response that
/// lost the race is discarded instead of overwriting newer state.
#[derive(Clone, Default)]
pub struct RequestSeq(Arc<AtomicU64>);

impl RequestSeq {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a new ticket, superseding all previously issued ones.
    pub fn issue(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Is this ticket still the latest one issued?
    pub fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::Relaxed) == ticket
    }

    /// Cancel interest in any in-flight fetch without starting a new one
    /// (modal closed, component unmounted).
    pub fn invalidate(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loaded_empty_is_not_loading_and_not_error() {
        let state: FetchState<Vec<u32>> = FetchState::Loaded(Vec::new());
        assert!(!state.is_loading());
        assert_ne!(state, FetchState::Error(String::new()));
        assert_eq!(state.loaded().map(Vec::len), Some(0));
    }

    #[test]
    fn later_ticket_supersedes_earlier_one() {
        let seq = RequestSeq::new();
        // Filter change A issues a fetch, then change B issues another
        // before A's response lands.
        let ticket_a = seq.issue();
        let ticket_b = seq.issue();

        // B's (faster) response applies; A's late response is discarded.
        assert!(seq.is_current(ticket_b));
        assert!(!seq.is_current(ticket_a));
    }

    #[test]
    fn invalidate_discards_in_flight_responses() {
        let seq = RequestSeq::new();
        let ticket = seq.issue();
        seq.invalidate();
        assert!(!seq.is_current(ticket));
    }

    #[test]
    fn clones_share_the_counter() {
        let seq = RequestSeq::new();
        let ticket = seq.issue();
        let other = seq.clone();
        assert!(other.is_current(ticket));
        other.issue();
        assert!(!seq.is_current(ticket));
    }
}
