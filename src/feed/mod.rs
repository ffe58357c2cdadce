//! Feed pipeline: ingestion, category derivation, shuffling and filtering.
//!
//! - [`types`] - Feed document shapes and the normalized [`Item`]
//! - [`classify`] - Category tags, per-tag counts, visible categories
//! - [`shuffle`] - Seeded and unseeded Fisher–Yates shuffles
//! - [`state`] - [`FeedState`]: dataset plus active filter
//! - [`fetcher`] - One-shot document fetch over HTTP or from disk
//! - [`media`] - Thumbnail probing that produces media-failure events
//!
//! # Example
//!
//! ```ignore
//! use holofeed::feed::{fetch_dataset, FeedSource, FeedState, GalleryKind};
//!
//! let dataset = fetch_dataset(&client, &FeedSource::parse(src), GalleryKind::Videos).await?;
//! let mut state = FeedState::new(dataset);
//! state.set_category("reef");
//! let items = state.visible_items(&mut seeds);
//! ```

pub mod classify;
mod fetcher;
pub mod media;
pub mod shuffle;
mod state;
mod types;

pub use classify::{count_by_category, derive_tags, visible_categories, CategoryCount};
pub use fetcher::{fetch_dataset, FeedSource, FetchError};
pub use shuffle::{shuffle, shuffle_random};
pub use state::{FeedState, ShuffleMode};
pub use types::{
    CategoryDefinition, ChannelEntry, Dataset, GalleryKind, Item, VideoEntry, VideoFeedDocument,
    ALL_CATEGORY,
};
