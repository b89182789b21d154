//! Latest-wins sequencing for overlapping requests
//!
//! Each logical request stream owns a `QuerySlot`. Issuing a token supersedes
//! every earlier one, so a slow response that arrives after a newer request was
//! made is recognised as stale and dropped.

/// Identifies one issued request within its slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing tokens and remembers the latest
#[derive(Debug, Clone, Default)]
pub struct QuerySlot {
    latest: u64,
    in_flight: bool,
}

impl QuerySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, superseding any still in flight
    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        self.in_flight = true;
        RequestToken(self.latest)
    }

    /// Whether `token` is the most recently issued one
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }

    /// Accepts a response for `token`
    ///
    /// Returns false for stale tokens, which leave the slot untouched.
    pub fn complete(&mut self, token: RequestToken) -> bool {
        if !self.is_current(token) {
            tracing::warn!(
                token = token.0,
                latest = self.latest,
                "discarding stale response"
            );
            return false;
        }
        self.in_flight = false;
        true
    }

    /// Whether the latest issued request has not completed yet
    pub fn is_pending(&self) -> bool {
        self.in_flight
    }
}
