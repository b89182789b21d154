//! Filter bar rendering: search box and the three selectors

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::truncate;
use crate::filter_bar::{FilterBar, FilterField};

/// Rows the filter bar needs, borders included
pub const HEIGHT: u16 = 4;

fn selector(bar: &FilterBar, field: FilterField, value: Option<&str>) -> Vec<Span<'static>> {
    let focused = bar.focus() == field && !bar.is_editing_search();
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let value_style = if focused {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };

    vec![
        Span::styled(format!("{}: ", field.label()), label_style),
        Span::styled(
            format!("\u{2039} {} \u{203A}", truncate(value.unwrap_or("All"), 18)), // ‹ ›
            value_style,
        ),
        Span::raw("   "),
    ]
}

pub fn lines(bar: &FilterBar) -> Vec<Line<'static>> {
    let search_style = if bar.is_editing_search() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    let mut search = vec![
        Span::styled("Search: ", Style::default().fg(Color::Gray)),
        Span::styled(bar.search().to_string(), search_style),
    ];
    if bar.is_editing_search() {
        search.push(Span::styled("\u{258F}", Style::default().fg(Color::Yellow))); // ▏
    } else if bar.search().is_empty() {
        search.push(Span::styled(
            "press / to search",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let mut selectors = Vec::new();
    selectors.extend(selector(bar, FilterField::Country, bar.country()));
    selectors.extend(selector(bar, FilterField::City, bar.city()));
    selectors.extend(selector(bar, FilterField::Category, bar.category()));

    vec![Line::from(search), Line::from(selectors)]
}

pub fn render(frame: &mut Frame, area: Rect, bar: &FilterBar) {
    let border = if bar.is_editing_search() {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title(" Filters ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    frame.render_widget(Paragraph::new(lines(bar)).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::{joined, render_rows};

    #[test]
    fn test_unset_selectors_show_all() {
        let bar = FilterBar::default();
        let rows = render_rows(100, HEIGHT, |frame| {
            let area = frame.area();
            render(frame, area, &bar)
        });
        let screen = joined(&rows);

        assert!(screen.contains("Country: \u{2039} All \u{203A}"));
        assert!(screen.contains("Category: \u{2039} All \u{203A}"));
        assert!(screen.contains("press / to search"));
    }

    #[test]
    fn test_selected_values_are_shown() {
        let mut bar = FilterBar::default();
        bar.set_countries(vec!["India".to_string()]);
        bar.select_country(Some("India".to_string()));

        let rows = render_rows(100, HEIGHT, |frame| {
            let area = frame.area();
            render(frame, area, &bar)
        });

        assert!(joined(&rows).contains("\u{2039} India \u{203A}"));
    }

    #[test]
    fn test_focused_selector_is_highlighted() {
        let bar = FilterBar::default();
        let lines = lines(&bar);

        let country_value = &lines[1].spans[1];
        let city_value = &lines[1].spans[4];
        assert_eq!(country_value.style.bg, Some(Color::Cyan));
        assert_eq!(city_value.style.bg, None);
    }
}
