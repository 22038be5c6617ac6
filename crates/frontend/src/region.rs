//! Display state for a surface filled by an asynchronous fetch.
//!
//! Each region carries a generation counter. Starting a request bumps it and
//! hands out a `Ticket`; a completion is applied only if its ticket still
//! matches, so a slow early response can never overwrite a newer one.

use tracing::debug;

/// What a region currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum RegionState<T> {
    /// Nothing requested yet (or reset)
    Idle,
    Loading,
    Populated(T),
    /// Inline, user-visible failure message
    Error(String),
}

/// Proof that a request was the latest one when it started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Whether a completion made it onto the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer request (or a reset) superseded this one
    Stale,
}

/// End result of one user-triggered load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Populated,
    Failed,
    Superseded,
    /// Nothing was requested (e.g. blank search query)
    Skipped,
}

impl Outcome {
    pub(crate) fn from_completion(completion: Completion, ok: bool) -> Self {
        match (completion, ok) {
            (Completion::Stale, _) => Outcome::Superseded,
            (Completion::Applied, true) => Outcome::Populated,
            (Completion::Applied, false) => Outcome::Failed,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Region<T> {
    state: RegionState<T>,
    generation: u64,
}

impl<T> Region<T> {
    pub fn new() -> Self {
        Self {
            state: RegionState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &RegionState<T> {
        &self.state
    }

    /// The populated value, if any
    pub fn value(&self) -> Option<&T> {
        match &self.state {
            RegionState::Populated(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            RegionState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, RegionState::Loading)
    }

    /// Start a request: supersede anything in flight and show `Loading`.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.state = RegionState::Loading;
        Ticket(self.generation)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    pub fn populate(&mut self, ticket: Ticket, value: T) -> Completion {
        self.settle(ticket, RegionState::Populated(value))
    }

    pub fn fail(&mut self, ticket: Ticket, message: impl Into<String>) -> Completion {
        self.settle(ticket, RegionState::Error(message.into()))
    }

    /// Back to `Idle`; any in-flight request becomes stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = RegionState::Idle;
    }

    fn settle(&mut self, ticket: Ticket, state: RegionState<T>) -> Completion {
        if !self.is_current(ticket) {
            debug!(
                ticket = ticket.0,
                current = self.generation,
                "Discarding stale response"
            );
            return Completion::Stale;
        }
        self.state = state;
        Completion::Applied
    }
}

impl<T> Default for Region<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_then_populate() {
        let mut region: Region<Vec<u32>> = Region::new();
        assert_eq!(region.state(), &RegionState::Idle);

        let ticket = region.begin();
        assert!(region.is_loading());

        assert_eq!(region.populate(ticket, vec![1, 2]), Completion::Applied);
        assert_eq!(region.value(), Some(&vec![1, 2]));
    }

    #[test]
    fn test_last_request_wins_in_either_order() {
        // Second response arrives first
        let mut region: Region<&str> = Region::new();
        let first = region.begin();
        let second = region.begin();
        assert_eq!(region.populate(second, "second"), Completion::Applied);
        assert_eq!(region.populate(first, "first"), Completion::Stale);
        assert_eq!(region.value(), Some(&"second"));

        // First response arrives first
        let mut region: Region<&str> = Region::new();
        let first = region.begin();
        let second = region.begin();
        assert_eq!(region.populate(first, "first"), Completion::Stale);
        assert!(region.is_loading());
        assert_eq!(region.populate(second, "second"), Completion::Applied);
        assert_eq!(region.value(), Some(&"second"));
    }

    #[test]
    fn test_stale_failure_does_not_clobber() {
        let mut region: Region<u32> = Region::new();
        let first = region.begin();
        let second = region.begin();
        region.populate(second, 7);

        assert_eq!(region.fail(first, "boom"), Completion::Stale);
        assert_eq!(region.value(), Some(&7));
        assert_eq!(region.error(), None);
    }

    #[test]
    fn test_reset_supersedes_in_flight() {
        let mut region: Region<u32> = Region::new();
        let ticket = region.begin();
        region.reset();

        assert_eq!(region.populate(ticket, 1), Completion::Stale);
        assert_eq!(region.state(), &RegionState::Idle);
    }

    #[test]
    fn test_outcome_mapping() {
        assert_eq!(
            Outcome::from_completion(Completion::Applied, true),
            Outcome::Populated
        );
        assert_eq!(
            Outcome::from_completion(Completion::Applied, false),
            Outcome::Failed
        );
        assert_eq!(
            Outcome::from_completion(Completion::Stale, true),
            Outcome::Superseded
        );
    }
}
