//! Detail page controller: one location by id

use crate::data::{ApiError, Location};
use crate::sequence::{QuerySlot, RequestToken};

pub const DETAIL_ERROR: &str = "Failed to load location details. Please try again later.";
pub const NOT_FOUND: &str = "Location not found";

/// Upper bound for the scroll offset; the renderer clamps to the content
const MAX_SCROLL: u16 = 200;

#[derive(Debug, Clone, Default)]
pub struct DetailPage {
    id: Option<u64>,
    location: Option<Location>,
    error: Option<String>,
    scroll: u16,
    slot: QuerySlot,
}

impl DetailPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows location `id`, returning the token for its fetch
    ///
    /// Every open refetches. Switching to a different id drops the previously
    /// shown location so it is never displayed under the wrong id.
    pub fn open(&mut self, id: u64) -> RequestToken {
        if self.id != Some(id) {
            self.location = None;
        }
        self.id = Some(id);
        self.error = None;
        self.scroll = 0;
        self.slot.issue()
    }

    /// Accepts the fetch result; stale tokens are ignored
    pub fn finish(&mut self, token: RequestToken, result: Result<Location, ApiError>) {
        if !self.slot.complete(token) {
            return;
        }
        match result {
            Ok(location) => {
                self.location = Some(location);
                self.error = None;
            }
            Err(ApiError::NotFound) => {
                tracing::warn!(id = ?self.id, "location not found");
                self.location = None;
                self.error = Some(NOT_FOUND.to_string());
            }
            Err(err) => {
                tracing::warn!(id = ?self.id, error = %err, "location detail fetch failed");
                self.location = None;
                self.error = Some(DETAIL_ERROR.to_string());
            }
        }
    }

    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.slot.is_pending()
    }

    pub fn scroll_offset(&self) -> u16 {
        self.scroll
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.scroll < MAX_SCROLL {
            self.scroll += 1;
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = MAX_SCROLL;
    }
}
