//! Display model for the gallery: cards, pills and the empty placeholder.
//!
//! Nothing here touches the terminal. The TUI draws these structures, and
//! `--list` prints them with [`render_plain`].

mod cards;
mod pills;

pub use cards::{
    platform_icon, render_cards, Card, CardGrid, FailurePolicy, GridView, MediaStatus,
};
pub use pills::{active_index, render_categories, Pill};

use std::fmt::Write;

/// Plain-text rendering of the pill row and grid, one card per line.
pub fn render_plain(pills: &[Pill], grid: &CardGrid) -> String {
    let mut out = String::new();

    if !pills.is_empty() {
        let row: Vec<String> = pills
            .iter()
            .map(|p| {
                if p.active {
                    format!("[{}]", p.label)
                } else {
                    p.label.clone()
                }
            })
            .collect();
        let _ = writeln!(out, "{}", row.join("  "));
        out.push('\n');
    }

    match grid.view() {
        GridView::Placeholder(msg) => {
            let _ = writeln!(out, "{}", msg);
        }
        GridView::Cards(cards) => {
            for card in cards {
                let _ = writeln!(
                    out,
                    "{} {} ({})  {}",
                    card.icon, card.title, card.caption, card.url
                );
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{CategoryDefinition, GalleryKind, Item};

    #[test]
    fn test_plain_marks_active_pill_and_lists_cards() {
        let pills = render_categories(
            &[
                CategoryDefinition::new("all", "All"),
                CategoryDefinition::new("reef", "Reef"),
            ],
            "reef",
        );
        let grid = render_cards(
            &[Item {
                title: "Coral".into(),
                url: "https://v/1".into(),
                thumbnail_url: "https://t/1".into(),
                platform: "YouTube".into(),
                category: Some("Reef".into()),
            }],
            GalleryKind::Videos,
        );

        let text = render_plain(&pills, &grid);
        assert!(text.starts_with("All  [Reef]\n"));
        assert!(text.contains("▶ Coral (YouTube)  https://v/1"));
    }

    #[test]
    fn test_plain_placeholder() {
        let grid = render_cards(&[], GalleryKind::Channels);
        assert_eq!(render_plain(&[], &grid), "No channels available\n");
    }
}
