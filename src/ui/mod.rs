//! UI rendering module for roamy
//!
//! Views are pure functions of page state; none of them mutate anything or
//! trigger fetches.

pub mod category_style;
pub mod filter_bar;
pub mod help_overlay;
pub mod home;
pub mod location_detail;
pub mod location_list;
pub mod location_map;

pub use help_overlay::render as render_help_overlay;
pub use home::render as render_home;
pub use location_detail::render as render_location_detail;

use ratatui::Frame;

use crate::app::{App, AppState};

/// Renders the current screen and, on top of it, the help overlay
pub fn render(frame: &mut Frame, app: &App) {
    match app.state {
        AppState::Home => render_home(frame, &app.home, &app.filter_bar),
        AppState::Detail => render_location_detail(frame, &app.detail),
    }
    if app.show_help {
        render_help_overlay(frame);
    }
}

/// Shortens `text` to at most `max` characters, ending with an ellipsis
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}\u{2026}", kept.trim_end())
}
