//! Card list of locations
//!
//! Each card shows the category badge, name, rating pill and price on the
//! first line, the place on the second and a description excerpt on the third.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{category_style, truncate};
use crate::data::Location;

/// Rows per card, blank separator included
const CARD_HEIGHT: u16 = 4;

const EXCERPT_CHARS: usize = 80;

/// Index of the first card to draw so that `selected` stays visible
pub fn first_visible(selected: usize, visible_cards: usize) -> usize {
    if visible_cards == 0 {
        return selected;
    }
    selected.saturating_sub(visible_cards - 1)
}

fn rating_pill(rating: f64) -> Span<'static> {
    Span::styled(
        format!(" \u{2605} {:.1} ", rating),
        Style::default().fg(Color::Black).bg(Color::Yellow),
    )
}

fn price_span(location: &Location) -> Option<Span<'static>> {
    if location.is_free() {
        return Some(Span::styled(
            "Free",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
    }
    location
        .price_range
        .as_ref()
        .filter(|p| !p.trim().is_empty())
        .map(|p| Span::styled(p.clone(), Style::default().fg(Color::Gray)))
}

/// Builds the lines of one card
pub fn card_lines(location: &Location, is_selected: bool) -> Vec<Line<'static>> {
    let style = category_style::style_for(&location.category);
    let cursor = if is_selected { "\u{25B8} " } else { "  " }; // ▸

    let name_style = if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    };

    let mut title = vec![
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
        Span::styled(style.icon, Style::default().fg(style.color)),
        Span::raw(" "),
        Span::styled(location.name.clone(), name_style),
    ];
    if let Some(rating) = location.rating {
        title.push(Span::raw("  "));
        title.push(rating_pill(rating));
    }
    if let Some(price) = price_span(location) {
        title.push(Span::raw("  "));
        title.push(price);
    }

    let place = Line::from(vec![
        Span::raw("    "),
        Span::styled(
            format!("{}, {}", location.city, location.country),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(" \u{00B7} ", Style::default().fg(Color::DarkGray)),
        Span::styled(location.category.label().to_string(), Style::default().fg(style.color)),
    ]);

    let excerpt = Line::from(vec![
        Span::raw("    "),
        Span::styled(
            truncate(&location.description, EXCERPT_CHARS),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    vec![Line::from(title), place, excerpt, Line::from("")]
}

/// Renders the card list into `area`
pub fn render(frame: &mut Frame, area: Rect, locations: &[Location], selected: usize) {
    let block = Block::default()
        .title(" Locations ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if locations.is_empty() {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No locations found",
                Style::default().fg(Color::Yellow),
            )),
            Line::from(Span::styled(
                "Try adjusting your filters or search",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(ratatui::layout::Alignment::Center)
        .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let visible_cards = (area.height.saturating_sub(2) / CARD_HEIGHT).max(1) as usize;
    let first = first_visible(selected, visible_cards);

    let lines: Vec<Line> = locations
        .iter()
        .enumerate()
        .skip(first)
        .take(visible_cards)
        .flat_map(|(index, location)| card_lines(location, index == selected))
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
