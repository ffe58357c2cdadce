use std::sync::Arc;

use super::classify::{count_by_category, derive_tags, normalize_tag, visible_categories, CategoryCount};
use super::shuffle::{shuffle, shuffle_random};
use super::types::{CategoryDefinition, Dataset, GalleryKind, Item, ALL_CATEGORY};
use crate::storage::SeedStore;

/// How the displayed sequence is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShuffleMode {
    /// Driven by the cached seed; stable for the seed's lifetime.
    Seeded,
    /// Fresh random order on every computation.
    PerLoad,
}

impl From<GalleryKind> for ShuffleMode {
    fn from(kind: GalleryKind) -> Self {
        match kind {
            GalleryKind::Videos => Self::Seeded,
            GalleryKind::Channels => Self::PerLoad,
        }
    }
}

/// Fetched dataset plus the active category filter.
///
/// `items` is shared behind an `Arc` and never mutated after construction;
/// every derived sequence is a fresh `Vec`.
#[derive(Debug, Clone)]
pub struct FeedState {
    items: Arc<Vec<Item>>,
    definitions: Vec<CategoryDefinition>,
    counts: CategoryCount,
    active_category: String,
    mode: ShuffleMode,
}

impl FeedState {
    pub fn new(dataset: Dataset) -> Self {
        let counts = count_by_category(&dataset.items);
        Self {
            mode: dataset.kind.into(),
            items: Arc::new(dataset.items),
            definitions: dataset.categories,
            counts,
            active_category: ALL_CATEGORY.to_string(),
        }
    }

    pub fn with_mode(mut self, mode: ShuffleMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn active_category(&self) -> &str {
        &self.active_category
    }

    pub fn counts(&self) -> &CategoryCount {
        &self.counts
    }

    /// Category definitions that have at least one item, plus `"all"`.
    pub fn visible_categories(&self) -> Vec<CategoryDefinition> {
        visible_categories(&self.definitions, &self.counts)
    }

    /// Change the active filter. Does not touch the data or the seed.
    pub fn set_category(&mut self, id: &str) {
        let id = normalize_tag(id);
        tracing::debug!(category = %id, "Category filter changed");
        self.active_category = if id.is_empty() {
            ALL_CATEGORY.to_string()
        } else {
            id
        };
    }

    /// Change the filter only if `id` names a visible category.
    ///
    /// Unknown or empty categories fall back to `"all"` so that exactly one
    /// pill stays active. Returns `false` on fallback.
    pub fn select_visible_category(&mut self, id: &str) -> bool {
        let wanted = normalize_tag(id);
        let visible = wanted == ALL_CATEGORY
            || self
                .visible_categories()
                .iter()
                .any(|def| normalize_tag(&def.id) == wanted);

        if visible {
            self.set_category(&wanted);
        } else {
            tracing::warn!(category = %id, "Requested category has no items, showing all");
            self.set_category(ALL_CATEGORY);
        }
        visible
    }

    /// Items matching the active category, shuffled.
    ///
    /// Recomputed on each call; order stability comes from the seed alone.
    pub fn visible_items(&self, seeds: &mut SeedStore) -> Vec<Item> {
        let filtered = self.filtered_items();

        match self.mode {
            ShuffleMode::Seeded => {
                let seed = seeds.get_or_create_seed();
                shuffle(&filtered, &seed)
            }
            ShuffleMode::PerLoad => shuffle_random(&filtered, &mut rand::thread_rng()),
        }
    }

    fn filtered_items(&self) -> Vec<Item> {
        if self.active_category == ALL_CATEGORY {
            return self.items.to_vec();
        }

        self.items
            .iter()
            .filter(|item| derive_tags(item.category.as_deref()).contains(&self.active_category))
            .cloned()
            .collect()
    }
}
