//! Help overlay showing all keybindings
//!
//! Renders a centered modal overlay with keyboard shortcuts.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Renders the help overlay on top of the current view
pub fn render(frame: &mut Frame) {
    let area = frame.area();

    let overlay_area = centered_rect(56, 25, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let lines = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section("Listing"),
        help_line("↑/k, ↓/j", "Move selection up/down"),
        help_line("g, G", "First / last location"),
        help_line("Enter", "Open location details"),
        help_line("m", "Toggle list / map view"),
        Line::from(""),
        section("Filters"),
        help_line("/", "Edit search (Enter/Esc to finish)"),
        help_line("Tab, S-Tab", "Focus country / city / category"),
        help_line("←/h, →/l", "Change focused filter"),
        help_line("x", "Clear all filters"),
        Line::from(""),
        section("Other"),
        help_line("Esc", "Back to listing"),
        help_line("?", "Toggle this help"),
        help_line("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or ? to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, overlay_area);
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

/// Creates a help line with key and description
fn help_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<14}", key), Style::default().fg(Color::Yellow)),
        Span::raw(description.to_string()),
    ])
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::{joined, render_rows};

    #[test]
    fn test_help_overlay_renders() {
        let rows = render_rows(80, 30, render);
        let content = joined(&rows);

        assert!(content.contains("Help"), "Should render help title");
        assert!(content.contains("Listing"), "Should show listing section");
        assert!(content.contains("Clear all filters"));
    }

    #[test]
    fn test_centered_rect_fits_small_terminals() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered_rect(56, 25, area);

        assert!(rect.width <= area.width);
        assert!(rect.height <= area.height);
    }
}
