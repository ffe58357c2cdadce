//! Category tag derivation and per-tag counts.

use std::collections::{BTreeSet, HashMap};

use super::types::{CategoryDefinition, Item, ALL_CATEGORY};

/// Separator between segments of a compound category label.
pub const CATEGORY_SEPARATOR: &str = " / ";

/// Item count per category tag.
pub type CategoryCount = HashMap<String, usize>;

/// Normalize a single category token: trimmed and lowercased.
pub fn normalize_tag(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Derive the tag set for a raw category label.
///
/// `"Underwater / Marine"` yields `{"underwater", "marine"}`. Empty segments
/// are dropped, so the set never contains an empty string.
pub fn derive_tags(raw: Option<&str>) -> BTreeSet<String> {
    let Some(raw) = raw else {
        return BTreeSet::new();
    };

    raw.split(CATEGORY_SEPARATOR)
        .map(normalize_tag)
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Count items per tag. An item increments each of its tags exactly once.
pub fn count_by_category(items: &[Item]) -> CategoryCount {
    let mut counts = CategoryCount::new();
    for item in items {
        for tag in derive_tags(item.category.as_deref()) {
            *counts.entry(tag).or_insert(0) += 1;
        }
    }
    counts
}

/// Definitions worth showing: `"all"` plus every category with items.
///
/// Input order is preserved.
pub fn visible_categories(
    definitions: &[CategoryDefinition],
    counts: &CategoryCount,
) -> Vec<CategoryDefinition> {
    definitions
        .iter()
        .filter(|def| {
            let id = normalize_tag(&def.id);
            id == ALL_CATEGORY || counts.get(&id).copied().unwrap_or(0) > 0
        })
        .cloned()
        .collect()
}
