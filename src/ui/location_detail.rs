//! Location detail screen rendering
//!
//! Shows every field of one location followed by a zoomed map. Optional
//! sections are left out entirely when the location has no value for them.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{category_style, location_map};
use crate::data::{Location, MAX_RATING};
use crate::pages::DetailPage;

const MAP_HEIGHT: u16 = 12;

/// "★★★★☆" for 4.x; only whole stars count
pub fn stars(rating: f64) -> String {
    let full = rating.clamp(0.0, MAX_RATING).floor() as usize;
    let empty = MAX_RATING as usize - full;
    format!("{}{}", "\u{2605}".repeat(full), "\u{2606}".repeat(empty))
}

fn section_title(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn field(icon: &str, label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{} ", icon)),
        Span::styled(format!("{:<14}", label), Style::default().fg(Color::Gray)),
        Span::styled(value.to_string(), Style::default().fg(Color::White)),
    ])
}

/// Text lines of the detail view, top to bottom
pub fn detail_lines(location: &Location) -> Vec<Line<'static>> {
    let style = category_style::style_for(&location.category);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(style.icon, Style::default().fg(style.color)),
            Span::raw(" "),
            Span::styled(
                location.category.label().to_string(),
                Style::default().fg(style.color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("\u{1F4CD} {}, {}", location.city, location.country), // 📍
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];

    if let Some(rating) = location.rating {
        lines.push(Line::from(vec![
            Span::styled(stars(rating), Style::default().fg(Color::Yellow)),
            Span::raw(format!("  {:.1} / {:.1}", rating, MAX_RATING)),
        ]));
    }
    if location.is_free() {
        lines.push(Line::from(vec![
            Span::raw("\u{1F4B0} "), // 💰
            Span::styled(format!("{:<14}", "Price"), Style::default().fg(Color::Gray)),
            Span::styled(
                "Free",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    } else if let Some(price) = location.price_range.as_deref().filter(|p| !p.is_empty()) {
        lines.push(field("\u{1F4B0}", "Price", price));
    }
    if let Some(hours) = location.opening_hours.as_deref() {
        lines.push(field("\u{1F552}", "Opening hours", hours)); // 🕒
    }
    if let Some(address) = location.address.as_deref() {
        lines.push(field("\u{1F4EE}", "Address", address)); // 📮
    }

    lines.push(Line::from(""));
    lines.push(section_title("About"));
    lines.push(Line::from(location.description.clone()));

    if !location.tourism_links.is_empty() {
        lines.push(Line::from(""));
        lines.push(section_title("Tourism links"));
        for link in &location.tourism_links {
            lines.push(Line::from(vec![
                Span::raw("\u{2022} "),
                Span::styled(
                    link.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    link.url.clone(),
                    Style::default()
                        .fg(Color::Blue)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ]));
            if let Some(description) = &link.description {
                lines.push(Line::from(Span::styled(
                    format!("  {}", description),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
    }

    lines
}

fn render_help_text(frame: &mut Frame, area: Rect) {
    let help = Line::from(vec![
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Scroll  "),
        Span::styled("g/G", Style::default().fg(Color::Yellow)),
        Span::raw(" Top/Bottom  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" Back  "),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::raw(" Help  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit"),
    ]);
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, color: Color, hint: bool) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ];
    if hint {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press Esc to go back to the listing",
            Style::default().fg(Color::DarkGray),
        )));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

pub fn render(frame: &mut Frame, page: &DetailPage) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let location = match (page.location(), page.error()) {
        (_, Some(error)) => {
            render_message(frame, chunks[0], error, Color::Red, true);
            render_help_text(frame, chunks[1]);
            return;
        }
        (Some(location), None) => location,
        (None, None) => {
            render_message(frame, chunks[0], "Loading location...", Color::Cyan, false);
            render_help_text(frame, chunks[1]);
            return;
        }
    };

    let mut title = vec![Span::styled(
        format!(" {} ", location.name),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    if page.is_loading() {
        title.push(Span::styled("refreshing ", Style::default().fg(Color::DarkGray)));
    }
    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(chunks[0]);
    frame.render_widget(block, chunks[0]);

    let map_height = if inner.height > MAP_HEIGHT + 6 { MAP_HEIGHT } else { 0 };
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(map_height)])
        .split(inner);

    // Bound the offset by wrapped rows, not logical lines
    let paragraph = Paragraph::new(detail_lines(location)).wrap(Wrap { trim: false });
    let rows = u16::try_from(paragraph.line_count(sections[0].width)).unwrap_or(u16::MAX);
    let scroll = page.scroll_offset().min(rows.saturating_sub(sections[0].height));
    frame.render_widget(paragraph.scroll((scroll, 0)), sections[0]);

    if map_height > 0 {
        let viewport =
            location_map::around(&location.coordinates, location_map::DETAIL_SPAN_DEGREES);
        location_map::render_canvas(
            frame,
            sections[1],
            " Location ".to_string(),
            std::slice::from_ref(location),
            Some(0),
            viewport,
        );
    }

    render_help_text(frame, chunks[1]);
}
