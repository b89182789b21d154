//! World map of locations drawn on a ratatui canvas
//!
//! The viewport is fitted to the plotted locations with some padding. A
//! minimum span caps the zoom so a single location still shows its
//! surroundings.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Map, MapResolution, Points},
        Block, Borders, Paragraph,
    },
    Frame,
};

use super::category_style;
use crate::data::{Coordinates, Location};

/// Smallest span in degrees the viewport may shrink to
pub const MIN_SPAN_DEGREES: f64 = 2.0;

/// Span around a single location on the detail screen
pub const DETAIL_SPAN_DEGREES: f64 = 6.0;

/// Fraction of the span added on each side
const PADDING_RATIO: f64 = 0.1;

/// Longitude and latitude ranges of the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl Viewport {
    pub const WORLD: Viewport = Viewport {
        x: [-180.0, 180.0],
        y: [-90.0, 90.0],
    };

    #[cfg(test)]
    fn contains(&self, point: &Coordinates) -> bool {
        (self.x[0]..=self.x[1]).contains(&point.longitude)
            && (self.y[0]..=self.y[1]).contains(&point.latitude)
    }
}

/// Grows `[min, max]` to at least `min_span`, pads it and clamps to `limit`
fn fit_axis(min: f64, max: f64, min_span: f64, limit: f64) -> [f64; 2] {
    let center = (min + max) / 2.0;
    let span = (max - min).max(min_span);
    let half = span * (0.5 + PADDING_RATIO);
    let mut lo = center - half;
    let mut hi = center + half;

    // Shift back inside the world before clamping so the span is kept
    if lo < -limit {
        hi += -limit - lo;
        lo = -limit;
    }
    if hi > limit {
        lo -= hi - limit;
        hi = limit;
    }
    [lo.max(-limit), hi.min(limit)]
}

/// Viewport enclosing every valid coordinate, or the world if there is none
pub fn fit_bounds<'a>(points: impl IntoIterator<Item = &'a Coordinates>) -> Viewport {
    let mut bounds: Option<(f64, f64, f64, f64)> = None;
    for point in points.into_iter().filter(|p| p.is_valid()) {
        let (lon, lat) = (point.longitude, point.latitude);
        bounds = Some(match bounds {
            None => (lon, lon, lat, lat),
            Some((x0, x1, y0, y1)) => (x0.min(lon), x1.max(lon), y0.min(lat), y1.max(lat)),
        });
    }

    match bounds {
        None => Viewport::WORLD,
        Some((x0, x1, y0, y1)) => Viewport {
            x: fit_axis(x0, x1, MIN_SPAN_DEGREES, 180.0),
            y: fit_axis(y0, y1, MIN_SPAN_DEGREES, 90.0),
        },
    }
}

/// Fixed-size viewport centred on one point
pub fn around(point: &Coordinates, span: f64) -> Viewport {
    if !point.is_valid() {
        return Viewport::WORLD;
    }
    Viewport {
        x: fit_axis(point.longitude, point.longitude, span, 180.0),
        y: fit_axis(point.latitude, point.latitude, span, 90.0),
    }
}

/// Draws `locations` on a world map inside `viewport`
///
/// The location at `selected`, if any, is labelled with its name.
pub fn render_canvas(
    frame: &mut Frame,
    area: Rect,
    title: String,
    locations: &[Location],
    selected: Option<usize>,
    viewport: Viewport,
) {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds(viewport.x)
        .y_bounds(viewport.y)
        .paint(|ctx| {
            ctx.draw(&Map {
                color: Color::DarkGray,
                resolution: MapResolution::High,
            });
            ctx.layer();

            for location in locations.iter().filter(|l| l.coordinates.is_valid()) {
                ctx.draw(&Points {
                    coords: &[(location.coordinates.longitude, location.coordinates.latitude)],
                    color: category_style::color(&location.category),
                });
            }

            if let Some(location) = selected.and_then(|i| locations.get(i)) {
                if location.coordinates.is_valid() {
                    ctx.print(
                        location.coordinates.longitude,
                        location.coordinates.latitude,
                        Line::from(Span::styled(
                            format!("\u{25CF} {}", location.name),
                            Style::default()
                                .fg(category_style::color(&location.category))
                                .add_modifier(Modifier::BOLD),
                        )),
                    );
                }
            }
        });

    frame.render_widget(canvas, area);
}

/// Home screen map: every location, fitted bounds, selection labelled
pub fn render(frame: &mut Frame, area: Rect, locations: &[Location], selected: usize) {
    let plotted = locations
        .iter()
        .filter(|l| l.coordinates.is_valid())
        .count();

    if plotted == 0 {
        let block = Block::default()
            .title(" Map ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No Locations to Display",
                Style::default().fg(Color::Yellow),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let viewport = fit_bounds(locations.iter().map(|l| &l.coordinates));
    let title = format!(" Map \u{00B7} {} locations ", plotted);
    render_canvas(frame, area, title, locations, Some(selected), viewport);
}
