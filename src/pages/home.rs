//! Home page controller: filtered location listing

use crate::data::{ApiError, FilterCriteria, Location};
use crate::sequence::{QuerySlot, RequestToken};

/// Number of locations fetched when no filter is active
pub const DEFAULT_PAGE_SIZE: u32 = 10;

pub const MOUNT_ERROR: &str = "Failed to load locations. Please try again later.";
pub const FILTER_ERROR: &str = "Failed to filter locations. Please try again.";

/// How the result set is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultView {
    #[default]
    List,
    Map,
}

impl ResultView {
    pub fn toggled(self) -> Self {
        match self {
            ResultView::List => ResultView::Map,
            ResultView::Map => ResultView::List,
        }
    }
}

/// Why a list query was issued; decides the failure message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Mount,
    Filter,
}

/// A list and count query for the shell to dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub list_token: RequestToken,
    pub count_token: RequestToken,
    /// Server-side criteria; never carries a search term
    pub criteria: FilterCriteria,
}

/// Builds the server query for a filter change
///
/// Only country, city and category are sent. The page size applies when no
/// filter at all is active, search included; otherwise the query is unlimited.
pub fn server_criteria(criteria: &FilterCriteria, page_size: u32) -> FilterCriteria {
    let criteria = criteria.clone().normalized();
    let unfiltered = criteria.is_unfiltered();
    FilterCriteria {
        country: criteria.country,
        city: criteria.city,
        category: criteria.category,
        search: None,
        limit: unfiltered.then_some(page_size),
        offset: None,
    }
}

/// Keeps the locations whose text fields contain `search`, case-insensitively
///
/// The term is matched as typed, surrounding spaces included.
pub fn apply_search(locations: Vec<Location>, search: Option<&str>) -> Vec<Location> {
    match search.filter(|s| !s.is_empty()) {
        None => locations,
        Some(term) => {
            let needle = term.to_lowercase();
            locations
                .into_iter()
                .filter(|location| location.matches_search(&needle))
                .collect()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListState {
    Pending,
    Landed,
    Failed,
}

/// State behind the home screen
#[derive(Debug, Clone)]
pub struct HomePage {
    locations: Vec<Location>,
    total: Option<u64>,
    error: Option<String>,
    view: ResultView,
    selected: usize,
    page_size: u32,
    /// Search term of the latest list query, applied when it lands
    search: Option<String>,
    kind: QueryKind,
    /// Outcome of the latest list query, which decides where its count goes
    list_state: ListState,
    /// Count that arrived before its list; committed only if the list lands
    early_total: Option<Option<u64>>,
    list_slot: QuerySlot,
    count_slot: QuerySlot,
}

impl Default for HomePage {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl HomePage {
    pub fn new(page_size: u32) -> Self {
        Self {
            locations: Vec::new(),
            total: None,
            error: None,
            view: ResultView::default(),
            selected: 0,
            page_size: page_size.max(1),
            search: None,
            kind: QueryKind::Mount,
            list_state: ListState::Pending,
            early_total: None,
            list_slot: QuerySlot::new(),
            count_slot: QuerySlot::new(),
        }
    }

    /// Initial unfiltered load
    pub fn mount(&mut self) -> ListRequest {
        self.issue(QueryKind::Mount, &FilterCriteria::new())
    }

    /// Reload after the filter bar reported new criteria
    pub fn apply_filter(&mut self, criteria: &FilterCriteria) -> ListRequest {
        self.issue(QueryKind::Filter, criteria)
    }

    fn issue(&mut self, kind: QueryKind, criteria: &FilterCriteria) -> ListRequest {
        self.kind = kind;
        self.search = criteria.clone().normalized().search;
        self.error = None;
        self.list_state = ListState::Pending;
        self.early_total = None;
        ListRequest {
            list_token: self.list_slot.issue(),
            count_token: self.count_slot.issue(),
            criteria: server_criteria(criteria, self.page_size),
        }
    }

    /// Accepts a list response; stale tokens are ignored
    pub fn finish_list(&mut self, token: RequestToken, result: Result<Vec<Location>, ApiError>) {
        if !self.list_slot.complete(token) {
            return;
        }
        match result {
            Ok(locations) => {
                self.locations = apply_search(locations, self.search.as_deref());
                self.error = None;
                self.list_state = ListState::Landed;
                if let Some(total) = self.early_total.take() {
                    self.total = total;
                }
                self.clamp_selection();
            }
            Err(err) => {
                tracing::warn!(error = %err, kind = ?self.kind, "location list fetch failed");
                // The previous results and their total stay on screen
                self.list_state = ListState::Failed;
                self.early_total = None;
                self.error = Some(
                    match self.kind {
                        QueryKind::Mount => MOUNT_ERROR,
                        QueryKind::Filter => FILTER_ERROR,
                    }
                    .to_string(),
                );
            }
        }
    }

    /// Accepts a count response; a failed count only hides the total
    ///
    /// The total always describes the locations on screen, so a count is
    /// held back until its list lands and dropped if that list failed.
    pub fn finish_count(&mut self, token: RequestToken, result: Result<u64, ApiError>) {
        if !self.count_slot.complete(token) {
            return;
        }
        let total = match result {
            Ok(total) => Some(total),
            Err(err) => {
                tracing::warn!(error = %err, "location count fetch failed");
                None
            }
        };
        match self.list_state {
            ListState::Landed => self.total = total,
            ListState::Pending => self.early_total = Some(total),
            ListState::Failed => {}
        }
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.list_slot.is_pending()
    }

    pub fn view(&self) -> ResultView {
        self.view
    }

    pub fn toggle_view(&mut self) {
        self.view = self.view.toggled();
    }

    /// "Showing N of M", or just N while the total is unknown
    pub fn summary(&self) -> String {
        let shown = self.locations.len();
        match self.total {
            Some(total) => format!("Showing {} of {}", shown, total),
            None => format!("Showing {}", shown),
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_location(&self) -> Option<&Location> {
        self.locations.get(self.selected)
    }

    /// Moves the selection up, wrapping to the bottom
    pub fn select_previous(&mut self) {
        let count = self.locations.len();
        if count == 0 {
            return;
        }
        self.selected = if self.selected == 0 {
            count - 1
        } else {
            self.selected - 1
        };
    }

    /// Moves the selection down, wrapping to the top
    pub fn select_next(&mut self) {
        let count = self.locations.len();
        if count == 0 {
            return;
        }
        self.selected = (self.selected + 1) % count;
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.locations.len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.locations.len() {
            self.selected = self.locations.len().saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Category, Coordinates};

    fn location(id: u64, name: &str, city: &str) -> Location {
        Location {
            id,
            name: name.to_string(),
            description: format!("{} in {}", name, city),
            category: Category::Monument,
            city: city.to_string(),
            country: "India".to_string(),
            coordinates: Coordinates {
                latitude: 27.0,
                longitude: 78.0,
            },
            rating: None,
            price_range: None,
            image_url: None,
            opening_hours: None,
            address: None,
            tourism_links: Vec::new(),
        }
    }

    fn red_fort_and_taj() -> Vec<Location> {
        vec![location(1, "Red Fort", "Delhi"), location(2, "Taj Mahal", "Agra")]
    }

    #[test]
    fn test_no_filters_requests_exactly_page_size() {
        let server = server_criteria(&FilterCriteria::new(), 10);
        assert_eq!(server.limit, Some(10));
        assert_eq!(server.location_params().to_query_string(), "limit=10");
    }

    #[test]
    fn test_any_filter_requests_unlimited() {
        for criteria in [
            FilterCriteria::new().with_country("India"),
            FilterCriteria::new().with_city("Agra"),
            FilterCriteria::new().with_category("park"),
            FilterCriteria::new().with_search("fort"),
        ] {
            assert_eq!(server_criteria(&criteria, 10).limit, None, "{:?}", criteria);
        }
    }

    #[test]
    fn test_server_criteria_drops_search_and_empty_fields() {
        let criteria = FilterCriteria {
            country: Some(String::new()),
            search: Some("fort".to_string()),
            ..Default::default()
        };

        let server = server_criteria(&criteria, 10);

        assert!(server.search.is_none());
        assert!(server.country.is_none());
        assert!(server.location_params().is_empty());
    }

    #[test]
    fn test_search_fort_keeps_only_red_fort() {
        let filtered = apply_search(red_fort_and_taj(), Some("fort"));

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Red Fort");
    }

    #[test]
    fn test_search_is_case_insensitive_and_matches_city() {
        let filtered = apply_search(red_fort_and_taj(), Some("AGRA"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Taj Mahal");
    }

    #[test]
    fn test_empty_search_keeps_everything() {
        assert_eq!(apply_search(red_fort_and_taj(), Some("")).len(), 2);
        assert_eq!(apply_search(red_fort_and_taj(), None).len(), 2);
    }

    #[test]
    fn test_search_term_is_matched_with_its_spaces() {
        let filtered = apply_search(red_fort_and_taj(), Some(" fort"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Red Fort");

        assert!(apply_search(red_fort_and_taj(), Some("fort  ")).is_empty());
    }

    #[test]
    fn test_whitespace_search_lifts_the_default_limit() {
        let criteria = FilterCriteria::new().with_search(" ");
        assert_eq!(server_criteria(&criteria, 10).limit, None);
    }

    #[test]
    fn test_mount_loads_locations() {
        let mut page = HomePage::default();
        let request = page.mount();

        assert!(page.is_loading());
        assert_eq!(request.criteria.limit, Some(DEFAULT_PAGE_SIZE));

        page.finish_list(request.list_token, Ok(red_fort_and_taj()));
        page.finish_count(request.count_token, Ok(25));

        assert!(!page.is_loading());
        assert_eq!(page.locations().len(), 2);
        assert_eq!(page.summary(), "Showing 2 of 25");
    }

    #[test]
    fn test_filter_applies_search_after_fetch() {
        let mut page = HomePage::default();
        let request = page.apply_filter(&FilterCriteria::new().with_search("fort"));

        page.finish_list(request.list_token, Ok(red_fort_and_taj()));

        assert_eq!(page.locations().len(), 1);
        assert_eq!(page.locations()[0].name, "Red Fort");
    }

    #[test]
    fn test_mount_failure_message() {
        let mut page = HomePage::default();
        let request = page.mount();

        page.finish_list(request.list_token, Err(ApiError::Server { status: 500 }));

        assert_eq!(page.error(), Some(MOUNT_ERROR));
        assert!(!page.is_loading());
    }

    #[test]
    fn test_filter_failure_message_keeps_previous_results() {
        let mut page = HomePage::default();
        let mount = page.mount();
        page.finish_list(mount.list_token, Ok(red_fort_and_taj()));

        let request = page.apply_filter(&FilterCriteria::new().with_country("India"));
        page.finish_list(request.list_token, Err(ApiError::NotFound));

        assert_eq!(page.error(), Some(FILTER_ERROR));
        assert_eq!(page.locations().len(), 2);
    }

    #[test]
    fn test_stale_list_response_is_discarded() {
        let mut page = HomePage::default();
        let slow = page.apply_filter(&FilterCriteria::new().with_city("Delhi"));
        let fast = page.apply_filter(&FilterCriteria::new().with_city("Agra"));

        page.finish_list(fast.list_token, Ok(vec![location(2, "Taj Mahal", "Agra")]));
        page.finish_list(slow.list_token, Ok(vec![location(1, "Red Fort", "Delhi")]));

        assert_eq!(page.locations().len(), 1);
        assert_eq!(page.locations()[0].name, "Taj Mahal");
    }

    #[test]
    fn test_stale_response_uses_latest_search_term() {
        let mut page = HomePage::default();
        page.apply_filter(&FilterCriteria::new().with_search("taj"));
        let latest = page.apply_filter(&FilterCriteria::new().with_search("fort"));

        page.finish_list(latest.list_token, Ok(red_fort_and_taj()));

        assert_eq!(page.locations()[0].name, "Red Fort");
    }

    #[test]
    fn test_count_arriving_first_waits_for_its_list() {
        let mut page = HomePage::default();
        let mount = page.mount();
        page.finish_list(mount.list_token, Ok(red_fort_and_taj()));
        page.finish_count(mount.count_token, Ok(25));

        let request = page.apply_filter(&FilterCriteria::new().with_city("Agra"));
        page.finish_count(request.count_token, Ok(1));
        assert_eq!(page.summary(), "Showing 2 of 25");

        page.finish_list(request.list_token, Ok(vec![location(2, "Taj Mahal", "Agra")]));
        assert_eq!(page.summary(), "Showing 1 of 1");
    }

    #[test]
    fn test_failed_filter_keeps_the_previous_total() {
        let mut page = HomePage::default();
        let mount = page.mount();
        page.finish_list(mount.list_token, Ok(red_fort_and_taj()));
        page.finish_count(mount.count_token, Ok(25));

        let request = page.apply_filter(&FilterCriteria::new().with_country("France"));
        page.finish_count(request.count_token, Ok(7));
        page.finish_list(request.list_token, Err(ApiError::Server { status: 500 }));
        assert_eq!(page.summary(), "Showing 2 of 25");

        let late = page.apply_filter(&FilterCriteria::new().with_country("Peru"));
        page.finish_list(late.list_token, Err(ApiError::Server { status: 500 }));
        page.finish_count(late.count_token, Ok(3));
        assert_eq!(page.summary(), "Showing 2 of 25");
    }

    #[test]
    fn test_failed_count_hides_total() {
        let mut page = HomePage::default();
        let request = page.mount();
        page.finish_list(request.list_token, Ok(red_fort_and_taj()));
        page.finish_count(request.count_token, Err(ApiError::Server { status: 502 }));

        assert_eq!(page.total(), None);
        assert_eq!(page.summary(), "Showing 2");
        assert!(page.error().is_none());
    }

    #[test]
    fn test_selection_wraps_and_clamps() {
        let mut page = HomePage::default();
        let request = page.mount();
        page.finish_list(request.list_token, Ok(red_fort_and_taj()));

        page.select_previous();
        assert_eq!(page.selected_index(), 1);
        page.select_next();
        assert_eq!(page.selected_index(), 0);
        page.select_last();

        let request = page.apply_filter(&FilterCriteria::new().with_search("fort"));
        page.finish_list(request.list_token, Ok(red_fort_and_taj()));
        assert_eq!(page.selected_index(), 0);
        assert_eq!(page.selected_location().map(|l| l.id), Some(1));
    }

    #[test]
    fn test_selection_on_empty_results() {
        let mut page = HomePage::default();
        page.select_next();
        page.select_previous();
        assert_eq!(page.selected_index(), 0);
        assert!(page.selected_location().is_none());
    }

    #[test]
    fn test_toggle_view() {
        let mut page = HomePage::default();
        assert_eq!(page.view(), ResultView::List);
        page.toggle_view();
        assert_eq!(page.view(), ResultView::Map);
        page.toggle_view();
        assert_eq!(page.view(), ResultView::List);
    }
}
