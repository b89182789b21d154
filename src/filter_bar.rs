//! Filter bar state and key handling
//!
//! The filter bar owns the selected country, city, category and search term.
//! It never performs I/O: key presses produce `FilterBarEvent`s that the
//! application turns into fetches. Selector changes notify immediately while
//! search edits go through a `Debouncer`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

use crate::data::FilterCriteria;
use crate::debounce::Debouncer;

/// Selector that currently has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterField {
    #[default]
    Country,
    City,
    Category,
}

impl FilterField {
    pub fn next(self) -> Self {
        match self {
            FilterField::Country => FilterField::City,
            FilterField::City => FilterField::Category,
            FilterField::Category => FilterField::Country,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FilterField::Country => FilterField::Category,
            FilterField::City => FilterField::Country,
            FilterField::Category => FilterField::City,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterField::Country => "Country",
            FilterField::City => "City",
            FilterField::Category => "Category",
        }
    }
}

/// Requests emitted to the owning page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterBarEvent {
    /// The city options should be reloaded, scoped to `country` when set
    CitiesRequested { country: Option<String> },
    /// The criteria changed and results should be refetched
    Changed(FilterCriteria),
}

/// Outcome of offering a key to the filter bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResult {
    /// The key is not a filter bar key
    NotHandled,
    /// The key was consumed; the events, if any, must be dispatched in order
    Handled(Vec<FilterBarEvent>),
}

/// Filter bar state
#[derive(Debug, Clone, Default)]
pub struct FilterBar {
    countries: Vec<String>,
    cities: Vec<String>,
    categories: Vec<String>,
    country: Option<String>,
    city: Option<String>,
    category: Option<String>,
    search: String,
    focus: FilterField,
    editing_search: bool,
    debouncer: Debouncer,
}

/// Steps through "All" followed by `options`, wrapping at both ends
fn step(options: &[String], current: Option<&str>, forward: bool) -> Option<String> {
    let total = options.len() + 1;
    let index = current
        .and_then(|c| options.iter().position(|o| o == c))
        .map_or(0, |i| i + 1);
    let next = if forward {
        (index + 1) % total
    } else {
        (index + total - 1) % total
    };
    if next == 0 {
        None
    } else {
        options.get(next - 1).cloned()
    }
}

impl FilterBar {
    pub fn new(debouncer: Debouncer) -> Self {
        Self {
            debouncer,
            ..Default::default()
        }
    }

    /// Seeds the selection without emitting any event
    pub fn with_criteria(mut self, criteria: &FilterCriteria) -> Self {
        self.country = criteria.country.clone();
        self.city = criteria.city.clone();
        self.category = criteria.category.clone();
        self.search = criteria.search.clone().unwrap_or_default();
        self
    }

    pub fn set_countries(&mut self, countries: Vec<String>) {
        self.countries = countries;
    }

    pub fn set_cities(&mut self, cities: Vec<String>) {
        self.cities = cities;
    }

    pub fn set_categories(&mut self, categories: Vec<String>) {
        self.categories = categories;
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn focus(&self) -> FilterField {
        self.focus
    }

    pub fn is_editing_search(&self) -> bool {
        self.editing_search
    }

    /// Whether a search notification is waiting for the quiet period
    pub fn has_pending_search(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Current selection as query criteria
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            country: self.country.clone(),
            city: self.city.clone(),
            category: self.category.clone(),
            search: Some(self.search.clone()),
            limit: None,
            offset: None,
        }
        .normalized()
    }

    /// Offers a key press to the filter bar
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> KeyResult {
        if self.editing_search {
            return self.handle_search_key(key, now);
        }

        match key.code {
            KeyCode::Char('/') => {
                self.editing_search = true;
                KeyResult::Handled(Vec::new())
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
                KeyResult::Handled(Vec::new())
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                KeyResult::Handled(Vec::new())
            }
            KeyCode::Right | KeyCode::Char('l') => KeyResult::Handled(self.step_focused(true)),
            KeyCode::Left | KeyCode::Char('h') => KeyResult::Handled(self.step_focused(false)),
            KeyCode::Char('x') => KeyResult::Handled(self.clear_all()),
            _ => KeyResult::NotHandled,
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent, now: Instant) -> KeyResult {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.editing_search = false;
            }
            KeyCode::Backspace => {
                if self.search.pop().is_some() {
                    self.debouncer.schedule(now);
                }
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if !self.search.is_empty() {
                    self.search.clear();
                    self.debouncer.schedule(now);
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.push(c);
                self.debouncer.schedule(now);
            }
            _ => {}
        }
        // Search mode swallows every key so typing never triggers shortcuts
        KeyResult::Handled(Vec::new())
    }

    /// Emits the debounced search notification once its quiet period is over
    pub fn tick(&mut self, now: Instant) -> Option<FilterBarEvent> {
        if self.debouncer.poll(now) {
            tracing::debug!(search = %self.search, "search debounce fired");
            Some(FilterBarEvent::Changed(self.criteria()))
        } else {
            None
        }
    }

    fn step_focused(&mut self, forward: bool) -> Vec<FilterBarEvent> {
        match self.focus {
            FilterField::Country => {
                let country = step(&self.countries, self.country.as_deref(), forward);
                self.select_country(country)
            }
            FilterField::City => {
                let city = step(&self.cities, self.city.as_deref(), forward);
                self.select_city(city)
            }
            FilterField::Category => {
                let category = step(&self.categories, self.category.as_deref(), forward);
                self.select_category(category)
            }
        }
    }

    /// The immediate notification carries the search text, so any pending
    /// debounce would only repeat it
    fn changed(&mut self) -> FilterBarEvent {
        self.debouncer.cancel();
        FilterBarEvent::Changed(self.criteria())
    }

    /// Selects a country, resetting the city and rescoping the city list
    pub fn select_country(&mut self, country: Option<String>) -> Vec<FilterBarEvent> {
        self.country = country;
        self.city = None;
        self.cities.clear();
        vec![
            FilterBarEvent::CitiesRequested {
                country: self.country.clone(),
            },
            self.changed(),
        ]
    }

    pub fn select_city(&mut self, city: Option<String>) -> Vec<FilterBarEvent> {
        self.city = city;
        vec![self.changed()]
    }

    pub fn select_category(&mut self, category: Option<String>) -> Vec<FilterBarEvent> {
        self.category = category;
        vec![self.changed()]
    }

    /// Resets every field and cancels a pending search notification
    pub fn clear_all(&mut self) -> Vec<FilterBarEvent> {
        self.country = None;
        self.city = None;
        self.category = None;
        self.search.clear();
        self.editing_search = false;
        self.debouncer.cancel();
        vec![
            FilterBarEvent::CitiesRequested { country: None },
            FilterBarEvent::Changed(FilterCriteria::new()),
        ]
    }
}
