//! Home screen: header, filter bar, results and key hints

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{filter_bar, location_list, location_map};
use crate::filter_bar::FilterBar;
use crate::pages::{HomePage, ResultView};

fn render_header(frame: &mut Frame, area: Rect, page: &HomePage) {
    let mut spans = vec![
        Span::styled(
            "\u{1F30D} Roamy",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  Discover destinations",
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("   "),
        Span::styled(page.summary(), Style::default().fg(Color::White)),
    ];
    if page.is_loading() {
        spans.push(Span::styled(
            "  Loading...",
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Rows of the error banner, borders included
const ERROR_HEIGHT: u16 = 3;

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let line = Line::from(vec![
        Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  Change a filter or press x to try again",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn render_results(frame: &mut Frame, area: Rect, page: &HomePage) {
    match page.view() {
        ResultView::List => {
            location_list::render(frame, area, page.locations(), page.selected_index())
        }
        ResultView::Map => {
            location_map::render(frame, area, page.locations(), page.selected_index())
        }
    }
}

fn render_help(frame: &mut Frame, area: Rect, page: &HomePage) {
    let view_hint = match page.view() {
        ResultView::List => " Map  ",
        ResultView::Map => " List  ",
    };
    let help = Line::from(vec![
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Navigate  "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Details  "),
        Span::styled("/", Style::default().fg(Color::Yellow)),
        Span::raw(" Search  "),
        Span::styled("Tab ←/→", Style::default().fg(Color::Yellow)),
        Span::raw(" Filters  "),
        Span::styled("m", Style::default().fg(Color::Yellow)),
        Span::raw(view_hint),
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

pub fn render(frame: &mut Frame, page: &HomePage, bar: &FilterBar) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(filter_bar::HEIGHT),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], page);
    filter_bar::render(frame, chunks[1], bar);

    // Previous results stay on screen while a query is in flight or failed
    match page.error() {
        Some(message) => {
            let content = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(ERROR_HEIGHT), Constraint::Min(3)])
                .split(chunks[2]);
            render_error(frame, content[0], message);
            render_results(frame, content[1], page);
        }
        None => render_results(frame, chunks[2], page),
    }

    render_help(frame, chunks[3], page);
}
