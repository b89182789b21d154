//! Filter criteria and query-string construction
//!
//! `QueryParams` keeps parameters sorted by name so that two requests with the
//! same values always serialise, and therefore cache, identically.

use std::collections::BTreeMap;
use url::form_urlencoded;

/// Filter values that parameterise a location query
///
/// Empty strings are never stored; the `with_*` setters normalise them to
/// `None`. `search` is applied client-side and never sent to the server. It
/// is kept exactly as typed, so a term of only spaces still counts as a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub country: Option<String>,
    pub city: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Trims a value and drops it if nothing is left
fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Drops an empty search term without touching its whitespace
fn raw_term(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = non_empty(Some(country.into()));
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = non_empty(Some(city.into()));
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = non_empty(Some(category.into()));
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = raw_term(Some(search.into()));
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Re-applies empty-string normalisation to every text field
    pub fn normalized(self) -> Self {
        Self {
            country: non_empty(self.country),
            city: non_empty(self.city),
            category: non_empty(self.category),
            search: raw_term(self.search),
            limit: self.limit,
            offset: self.offset,
        }
    }

    /// True when none of country, city, category or search is set
    pub fn is_unfiltered(&self) -> bool {
        self.country.is_none()
            && self.city.is_none()
            && self.category.is_none()
            && self.search.is_none()
    }

    /// Parameters for `GET /locations`
    pub fn location_params(&self) -> QueryParams {
        let mut params = self.count_params();
        params.insert_opt("limit", self.limit.map(|l| l.to_string()));
        params.insert_opt("offset", self.offset.map(|o| o.to_string()));
        params
    }

    /// Parameters for `GET /locations/count`; pagination does not apply
    pub fn count_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert_opt("country", self.country.clone());
        params.insert_opt("city", self.city.clone());
        params.insert_opt("category", self.category.clone());
        params
    }
}

/// Sorted, de-duplicated query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<&'static str, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, replacing any previous value
    pub fn insert(&mut self, name: &'static str, value: impl Into<String>) {
        self.params.insert(name, value.into());
    }

    /// Sets a parameter only when a value is present
    pub fn insert_opt(&mut self, name: &'static str, value: Option<String>) {
        if let Some(value) = value {
            self.insert(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Pairs in name order, for handing to the HTTP client
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// URL-encoded query string without the leading `?`
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in self.pairs() {
            serializer.append_pair(name, value);
        }
        serializer.finish()
    }

    /// Cache key for a request to `path` with these parameters
    pub fn cache_key(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, self.to_query_string())
        }
    }
}
