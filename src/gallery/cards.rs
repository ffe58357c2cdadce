use std::collections::HashSet;

use crate::feed::{GalleryKind, Item};

const PLATFORM_ICONS: &[(&str, &str)] = &[("YouTube", "▶"), ("Vimeo", "▶"), ("Dailymotion", "▶")];
const DEFAULT_ICON: &str = "▶";

/// Icon shown next to a platform name.
pub fn platform_icon(platform: &str) -> &'static str {
    PLATFORM_ICONS
        .iter()
        .find(|&&(name, _)| name == platform)
        .map_or(DEFAULT_ICON, |&(_, icon)| icon)
}

/// What happens to a card whose media fails to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Remove the card from the layout.
    Hide,
    /// Keep the card and show a placeholder badge instead of the media.
    Fallback,
}

impl From<GalleryKind> for FailurePolicy {
    fn from(kind: GalleryKind) -> Self {
        match kind {
            GalleryKind::Videos => Self::Hide,
            GalleryKind::Channels => Self::Fallback,
        }
    }
}

/// Media state of a single card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaStatus {
    Ok,
    Hidden,
    Fallback,
}

/// One rendered gallery card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub url: String,
    pub media_url: String,
    pub caption: String,
    pub icon: &'static str,
    pub media: MediaStatus,
}

impl Card {
    fn from_item(item: &Item) -> Self {
        Self {
            title: item.title.clone(),
            url: item.url.clone(),
            media_url: item.thumbnail_url.clone(),
            caption: item.platform.clone(),
            icon: platform_icon(&item.platform),
            media: MediaStatus::Ok,
        }
    }

    fn is_visible(&self) -> bool {
        self.media != MediaStatus::Hidden
    }
}

/// What the grid area should show.
#[derive(Debug, PartialEq, Eq)]
pub enum GridView<'a> {
    /// The rendered sequence was empty.
    Placeholder(&'static str),
    /// Visible cards in display order.
    Cards(Vec<&'a Card>),
}

/// The rendered card grid for one filter state.
#[derive(Debug, Clone)]
pub struct CardGrid {
    cards: Vec<Card>,
    policy: FailurePolicy,
    empty_message: &'static str,
}

impl CardGrid {
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn visible_cards(&self) -> Vec<&Card> {
        self.cards.iter().filter(|c| c.is_visible()).collect()
    }

    pub fn view(&self) -> GridView<'_> {
        if self.cards.is_empty() {
            GridView::Placeholder(self.empty_message)
        } else {
            GridView::Cards(self.visible_cards())
        }
    }

    /// Apply a media load failure to every card showing `media_url`.
    ///
    /// Returns how many cards changed. Other cards are untouched.
    pub fn fail_media(&mut self, media_url: &str) -> usize {
        let status = match self.policy {
            FailurePolicy::Hide => MediaStatus::Hidden,
            FailurePolicy::Fallback => MediaStatus::Fallback,
        };

        let mut changed = 0;
        for card in self.cards.iter_mut().filter(|c| c.media_url == media_url) {
            if card.media != status {
                card.media = status;
                changed += 1;
            }
        }
        changed
    }

    /// Re-apply failures already observed before this grid was rendered.
    pub fn apply_failures(&mut self, failed: &HashSet<String>) {
        for url in failed {
            self.fail_media(url);
        }
    }
}

/// Project items into a card grid. An empty sequence renders the placeholder.
pub fn render_cards(items: &[Item], kind: GalleryKind) -> CardGrid {
    CardGrid {
        cards: items.iter().map(Card::from_item).collect(),
        policy: kind.into(),
        empty_message: kind.empty_message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str) -> Item {
        Item {
            title: title.into(),
            url: format!("https://example.com/{title}"),
            thumbnail_url: format!("https://img.example.com/{title}.jpg"),
            platform: "Vimeo".into(),
            category: None,
        }
    }

    #[test]
    fn test_empty_renders_placeholder() {
        let grid = render_cards(&[], GalleryKind::Videos);
        assert_eq!(grid.view(), GridView::Placeholder("No videos in this category"));

        let grid = render_cards(&[], GalleryKind::Channels);
        assert_eq!(grid.view(), GridView::Placeholder("No channels available"));
    }

    #[test]
    fn test_cards_keep_order() {
        let grid = render_cards(&[item("b"), item("a")], GalleryKind::Videos);
        let GridView::Cards(cards) = grid.view() else {
            panic!("expected cards");
        };
        assert_eq!(cards[0].title, "b");
        assert_eq!(cards[1].title, "a");
        assert_eq!(cards[0].icon, "▶");
        assert_eq!(cards[0].caption, "Vimeo");
    }

    #[test]
    fn test_failed_media_hides_only_that_card() {
        let mut grid = render_cards(&[item("a"), item("b"), item("c")], GalleryKind::Videos);

        let changed = grid.fail_media("https://img.example.com/b.jpg");
        assert_eq!(changed, 1);

        let titles: Vec<&str> = grid.visible_cards().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c"]);
        // Hidden cards are still part of the rendered grid, not filtered out
        assert_eq!(grid.cards().len(), 3);
    }

    #[test]
    fn test_failed_media_twice_is_idempotent() {
        let mut grid = render_cards(&[item("a"), item("b")], GalleryKind::Videos);
        assert_eq!(grid.fail_media("https://img.example.com/a.jpg"), 1);
        assert_eq!(grid.fail_media("https://img.example.com/a.jpg"), 0);
        assert_eq!(grid.fail_media("https://img.example.com/unknown.jpg"), 0);
    }

    #[test]
    fn test_channels_fallback_keeps_card() {
        let mut grid = render_cards(&[item("a"), item("b")], GalleryKind::Channels);
        grid.fail_media("https://img.example.com/a.jpg");

        let visible = grid.visible_cards();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].media, MediaStatus::Fallback);
        assert_eq!(visible[1].media, MediaStatus::Ok);
    }

    #[test]
    fn test_all_failed_is_not_placeholder() {
        let mut grid = render_cards(&[item("a")], GalleryKind::Videos);
        grid.fail_media("https://img.example.com/a.jpg");
        assert_eq!(grid.view(), GridView::Cards(Vec::new()));
    }

    #[test]
    fn test_apply_known_failures() {
        let mut grid = render_cards(&[item("a"), item("b")], GalleryKind::Videos);
        let failed: HashSet<String> = ["https://img.example.com/a.jpg".to_string()].into();
        grid.apply_failures(&failed);
        assert_eq!(grid.visible_cards().len(), 1);
    }
}
