//! Application state for Roamy
//!
//! `App` routes key presses to the filter bar and the page controllers,
//! dispatches the fetches they ask for and feeds results back in as they
//! arrive on the fetch channel.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc::{self, error::TryRecvError};

use crate::cli::StartupAction;
use crate::config::Config;
use crate::data::{FilterCriteria, LocationService};
use crate::debounce::Debouncer;
use crate::fetch::{FetchMessage, Fetcher};
use crate::filter_bar::{FilterBar, FilterBarEvent, KeyResult};
use crate::pages::{DetailPage, HomePage};
use crate::sequence::QuerySlot;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Home,
    Detail,
}

pub struct App {
    pub state: AppState,
    pub home: HomePage,
    pub detail: DetailPage,
    pub filter_bar: FilterBar,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Set once the home listing has been requested at least once
    home_started: bool,
    cities_slot: QuerySlot,
    fetcher: Fetcher,
    receiver: mpsc::UnboundedReceiver<FetchMessage>,
}

impl App {
    pub fn new(service: LocationService, config: &Config) -> Self {
        let (fetcher, receiver) = Fetcher::channel(service);
        Self {
            state: AppState::Home,
            home: HomePage::new(config.page_size),
            detail: DetailPage::new(),
            filter_bar: FilterBar::new(Debouncer::new(config.search_debounce())),
            show_help: false,
            should_quit: false,
            home_started: false,
            cities_slot: QuerySlot::new(),
            fetcher,
            receiver,
        }
    }

    /// Issues the first fetches for the startup action
    ///
    /// Must run inside a tokio runtime. `Create` never reaches the UI and is
    /// treated like `Home`.
    pub fn start(&mut self, action: StartupAction) {
        self.fetcher.lookups();
        match action {
            StartupAction::Home | StartupAction::Create(_) => {
                self.request_cities(None);
                self.mount_home();
            }
            StartupAction::Filtered(criteria) => {
                self.filter_bar = std::mem::take(&mut self.filter_bar).with_criteria(&criteria);
                self.request_cities(criteria.country.clone());
                let seeded = self.filter_bar.criteria();
                self.apply_filter(&seeded);
            }
            StartupAction::Detail(id) => {
                self.request_cities(None);
                self.mount_home();
                self.open_detail(id);
            }
        }
    }

    fn mount_home(&mut self) {
        self.home_started = true;
        let request = self.home.mount();
        self.fetcher.list(request);
    }

    fn apply_filter(&mut self, criteria: &FilterCriteria) {
        self.home_started = true;
        let request = self.home.apply_filter(criteria);
        self.fetcher.list(request);
    }

    fn request_cities(&mut self, country: Option<String>) {
        let token = self.cities_slot.issue();
        self.fetcher.cities(token, country);
    }

    fn open_detail(&mut self, id: u64) {
        let token = self.detail.open(id);
        self.fetcher.location(token, id);
        self.state = AppState::Detail;
    }

    /// Performs what a filter bar event asks for
    pub fn dispatch(&mut self, event: FilterBarEvent) {
        match event {
            FilterBarEvent::CitiesRequested { country } => self.request_cities(country),
            FilterBarEvent::Changed(criteria) => self.apply_filter(&criteria),
        }
    }

    /// Applies one fetch result to the page it belongs to
    pub fn handle_message(&mut self, message: FetchMessage) {
        match message {
            FetchMessage::Locations { token, result } => self.home.finish_list(token, result),
            FetchMessage::Count { token, result } => self.home.finish_count(token, result),
            FetchMessage::Location { token, result } => self.detail.finish(token, result),
            FetchMessage::Cities { token, result } => {
                if !self.cities_slot.complete(token) {
                    return;
                }
                match result {
                    Ok(cities) => self.filter_bar.set_cities(cities),
                    Err(err) => tracing::warn!(error = %err, "failed to load cities"),
                }
            }
            FetchMessage::Countries(result) => match result {
                Ok(countries) => self.filter_bar.set_countries(countries),
                Err(err) => tracing::warn!(error = %err, "failed to load countries"),
            },
            FetchMessage::Categories(result) => match result {
                Ok(categories) => self.filter_bar.set_categories(categories),
                Err(err) => tracing::warn!(error = %err, "failed to load categories"),
            },
        }
    }

    /// Applies every fetch result that has arrived so far
    pub fn drain_messages(&mut self) {
        loop {
            match self.receiver.try_recv() {
                Ok(message) => self.handle_message(message),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    /// Drives time-based work, currently the search debounce
    pub fn tick(&mut self, now: Instant) {
        if let Some(event) = self.filter_bar.tick(now) {
            self.dispatch(event);
        }
    }

    /// Handles keyboard input based on current state
    pub fn handle_key(&mut self, key_event: KeyEvent, now: Instant) {
        // Help overlay intercepts all keys when shown
        if self.show_help {
            if matches!(
                key_event.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return;
        }

        match self.state {
            AppState::Home => self.handle_home_key(key_event, now),
            AppState::Detail => self.handle_detail_key(key_event),
        }
    }

    fn handle_home_key(&mut self, key_event: KeyEvent, now: Instant) {
        if let KeyResult::Handled(events) = self.filter_bar.handle_key(key_event, now) {
            for event in events {
                self.dispatch(event);
            }
            return;
        }

        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.home.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.home.select_next(),
            KeyCode::Char('g') => self.home.select_first(),
            KeyCode::Char('G') => self.home.select_last(),
            KeyCode::Enter => {
                if let Some(id) = self.home.selected_location().map(|l| l.id) {
                    self.open_detail(id);
                }
            }
            KeyCode::Char('m') => self.home.toggle_view(),
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Backspace => {
                self.state = AppState::Home;
                if !self.home_started {
                    self.mount_home();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => self.detail.scroll_down(),
            KeyCode::Up | KeyCode::Char('k') => self.detail.scroll_up(),
            KeyCode::Char('g') => self.detail.scroll_to_top(),
            KeyCode::Char('G') => self.detail.scroll_to_bottom(),
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }
    }
}
