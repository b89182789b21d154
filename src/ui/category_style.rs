//! Category icon and colour table shared by every view

use ratatui::style::Color;

use crate::data::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    pub icon: &'static str,
    pub color: Color,
}

const STYLES: [(Category, CategoryStyle); 6] = [
    (
        Category::Museum,
        CategoryStyle {
            icon: "\u{1F3DB}", // 🏛
            color: Color::Rgb(124, 58, 237),
        },
    ),
    (
        Category::Monument,
        CategoryStyle {
            icon: "\u{1F5FF}", // 🗿
            color: Color::Rgb(79, 70, 229),
        },
    ),
    (
        Category::Park,
        CategoryStyle {
            icon: "\u{1F333}", // 🌳
            color: Color::Rgb(16, 185, 129),
        },
    ),
    (
        Category::Restaurant,
        CategoryStyle {
            icon: "\u{1F37D}", // 🍽
            color: Color::Rgb(245, 158, 11),
        },
    ),
    (
        Category::Attraction,
        CategoryStyle {
            icon: "\u{2B50}", // ⭐
            color: Color::Rgb(236, 72, 153),
        },
    ),
    (
        Category::Other(String::new()),
        CategoryStyle {
            icon: "\u{1F4CD}", // 📍
            color: Color::Rgb(79, 70, 229),
        },
    ),
];

/// Unknown categories share the `Other` entry
pub fn style_for(category: &Category) -> CategoryStyle {
    let kind = std::mem::discriminant(category);
    STYLES
        .iter()
        .find(|(c, _)| std::mem::discriminant(c) == kind)
        .map(|(_, style)| *style)
        .unwrap_or(STYLES[STYLES.len() - 1].1)
}

pub fn icon(category: &Category) -> &'static str {
    style_for(category).icon
}

pub fn color(category: &Category) -> Color {
    style_for(category).color
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_an_entry() {
        for category in Category::KNOWN {
            assert!(
                STYLES.iter().any(|(c, _)| *c == category),
                "{:?} missing",
                category
            );
        }
    }

    #[test]
    fn test_lookup_matches_table() {
        assert_eq!(icon(&Category::Park), "\u{1F333}");
        assert_eq!(color(&Category::Restaurant), Color::Rgb(245, 158, 11));
    }

    #[test]
    fn test_unknown_server_category_uses_pin() {
        assert_eq!(icon(&Category::parse("volcano")), "\u{1F4CD}");
    }
}
