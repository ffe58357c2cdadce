use crate::config::Config;
use crate::feed::{Dataset, FeedState, FetchError, GalleryKind};
use crate::gallery::{active_index, render_cards, render_categories, Card, CardGrid, Pill};
use crate::lifecycle::Phase;
use crate::storage::SeedStore;
use crate::theme::{StyleMap, ThemeVariant};
use anyhow::Result;
use ratatui::style::Style;
use reqwest::redirect::Policy;
use std::borrow::Cow;
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::Instant;

// ============================================================================
// HTTP Client Configuration
// ============================================================================

/// Redirect policy: at most 3 hops, no loops.
fn create_redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= 3 {
            return attempt.error("Too many redirects (max 3)");
        }

        let url = attempt.url();
        if attempt.previous().iter().any(|prev| prev == url) {
            return attempt.error("Redirect loop detected");
        }

        tracing::debug!(to = %url, hop = attempt.previous().len() + 1, "Following redirect");
        attempt.follow()
    })
}

/// HTTP client shared by the feed fetch and the thumbnail probes.
///
/// No client-wide timeout: the feed fetch waits as long as it takes, and
/// each thumbnail check applies its own limit.
pub fn build_http_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .redirect(create_redirect_policy())
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(30))
        .build()?;
    Ok(client)
}

// ============================================================================
// Events
// ============================================================================

/// Events from background tasks.
pub enum AppEvent {
    /// The one feed fetch finished.
    FeedLoaded(Result<Dataset, FetchError>),
    /// A card's media failed to load.
    MediaFailed { url: String, reason: String },
    /// A background task panicked.
    TaskPanicked { task: &'static str, error: String },
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state.
///
/// Owns the feed state and the seed store; all mutation happens on the UI
/// task in response to discrete events.
pub struct App {
    pub http_client: reqwest::Client,
    pub kind: GalleryKind,
    pub probe_media: bool,
    pub media_probe_concurrency: usize,
    pub media_timeout: Duration,

    // Lifecycle
    pub phase: Phase,

    // Data
    pub feed: Option<FeedState>,
    pub seeds: SeedStore,
    /// Category to select once the feed is ready (from `--category`).
    pub initial_category: Option<String>,

    // Rendered surface
    pub pills: Vec<Pill>,
    pub grid: CardGrid,
    /// Media URLs known to be broken; re-applied on every re-render.
    pub failed_media: HashSet<String>,

    // UI State
    /// Index into the visible cards.
    pub selected_card: usize,
    /// Columns in the last drawn grid, for up/down navigation.
    pub grid_columns: usize,
    /// First visible grid row.
    pub grid_scroll: usize,
    pub spinner_frame: usize,

    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,

    /// Status message with the time it was set.
    pub status_message: Option<(Cow<'static, str>, Instant)>,
    /// Render only when state changed.
    pub needs_redraw: bool,
}

impl App {
    pub fn new(config: &Config, seeds: SeedStore) -> Result<Self> {
        let http_client = build_http_client()?;

        let theme_variant = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "Unknown theme, using dark");
            ThemeVariant::Dark
        });

        Ok(Self {
            http_client,
            kind: config.gallery,
            probe_media: config.probe_media,
            media_probe_concurrency: config.media_probe_concurrency,
            media_timeout: config.media_timeout(),
            phase: Phase::Loading,
            feed: None,
            seeds,
            initial_category: None,
            pills: Vec::new(),
            grid: render_cards(&[], config.gallery),
            failed_media: HashSet::new(),
            selected_card: 0,
            grid_columns: 1,
            grid_scroll: 0,
            spinner_frame: 0,
            theme_variant,
            theme: StyleMap::from_palette(&theme_variant.palette()),
            status_message: None,
            needs_redraw: true,
        })
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    /// Cycle to the next theme variant. Returns its name for status display.
    pub fn cycle_theme(&mut self) -> &'static str {
        self.theme_variant = self.theme_variant.next();
        self.theme = StyleMap::from_palette(&self.theme_variant.palette());
        self.needs_redraw = true;
        self.theme_variant.name()
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Handle the result of the feed fetch.
    ///
    /// Success renders pills and grid and moves to `Ready`; failure moves to
    /// `Error`. Returns `true` when the page became ready.
    pub fn on_feed_loaded(&mut self, result: Result<Dataset, FetchError>) -> bool {
        match result {
            Ok(dataset) => {
                if self.phase != Phase::Loading {
                    tracing::warn!(phase = ?self.phase, "Feed data arrived outside loading phase");
                    return false;
                }
                self.feed = Some(FeedState::new(dataset));

                if let Some(id) = self.initial_category.take() {
                    let selected = self
                        .feed
                        .as_mut()
                        .is_some_and(|feed| feed.select_visible_category(&id));
                    if !selected {
                        self.set_status(format!("No items in category '{}'", id));
                    }
                }

                self.rerender();
                self.phase.mark_ready()
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load feed");
                self.phase.mark_failed(e.to_string());
                false
            }
        }
    }

    // ------------------------------------------------------------------------
    // Filtering and rendering
    // ------------------------------------------------------------------------

    /// Switch the category filter and re-render the whole grid.
    ///
    /// No effect until the page is ready.
    pub fn select_category(&mut self, id: &str) {
        if !self.phase.is_ready() {
            return;
        }
        self.apply_category(id);
        self.rerender();
    }

    fn apply_category(&mut self, id: &str) {
        if let Some(feed) = self.feed.as_mut() {
            feed.set_category(id);
        }
    }

    /// Select the pill `offset` steps from the active one, wrapping around.
    pub fn cycle_category(&mut self, offset: isize) {
        if self.pills.is_empty() {
            return;
        }
        let len = self.pills.len() as isize;
        let current = active_index(&self.pills).unwrap_or(0) as isize;
        let next = (current + offset).rem_euclid(len) as usize;
        let id = self.pills[next].id.clone();
        self.select_category(&id);
    }

    /// Select the pill at `index`, if it exists.
    pub fn select_category_at(&mut self, index: usize) {
        if let Some(id) = self.pills.get(index).map(|p| p.id.clone()) {
            self.select_category(&id);
        }
    }

    /// Rebuild pills and grid from the feed state. Always a full re-render.
    pub fn rerender(&mut self) {
        let Some(feed) = self.feed.as_ref() else {
            return;
        };

        let items = feed.visible_items(&mut self.seeds);
        self.pills = render_categories(&feed.visible_categories(), feed.active_category());

        let mut grid = render_cards(&items, self.kind);
        grid.apply_failures(&self.failed_media);
        self.grid = grid;

        self.selected_card = 0;
        self.grid_scroll = 0;
        self.needs_redraw = true;
    }

    /// Record a media failure and apply it to the current grid.
    pub fn on_media_failed(&mut self, url: String) {
        let changed = self.grid.fail_media(&url);
        self.failed_media.insert(url);
        if changed > 0 {
            self.clamp_selection();
            self.needs_redraw = true;
        }
    }

    /// Media URLs of every item in the feed, for probing.
    ///
    /// Covers all categories so later filter changes already know the
    /// broken thumbnails.
    pub fn media_urls(&self) -> Vec<String> {
        self.feed
            .as_ref()
            .map(|feed| {
                feed.items()
                    .iter()
                    .map(|item| item.thumbnail_url.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    pub fn selected_card(&self) -> Option<&Card> {
        self.grid.visible_cards().get(self.selected_card).copied()
    }

    /// Move the card selection by `dx` columns and `dy` rows, clamped.
    pub fn move_selection(&mut self, dx: isize, dy: isize) {
        let count = self.grid.visible_cards().len();
        if count == 0 {
            return;
        }
        let columns = self.grid_columns.max(1) as isize;
        let target = self.selected_card as isize + dx + dy * columns;
        self.selected_card = target.clamp(0, count as isize - 1) as usize;
    }

    fn clamp_selection(&mut self) {
        let count = self.grid.visible_cards().len();
        self.selected_card = self.selected_card.min(count.saturating_sub(1));
    }

    // ------------------------------------------------------------------------
    // Status
    // ------------------------------------------------------------------------

    /// Set status message (expires after 3 seconds).
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear the status message if expired. Returns true if one was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{CategoryDefinition, Item};
    use crate::gallery::GridView;
    use crate::storage::{KeyValueStore, MemoryStore, SEED_KEY};

    fn item(title: &str, category: Option<&str>) -> Item {
        Item {
            title: title.into(),
            url: format!("https://example.com/{title}"),
            thumbnail_url: format!("https://img.example.com/{title}.jpg"),
            platform: "YouTube".into(),
            category: category.map(String::from),
        }
    }

    fn dataset() -> Dataset {
        Dataset {
            kind: GalleryKind::Videos,
            categories: vec![
                CategoryDefinition::new("all", "All"),
                CategoryDefinition::new("reef", "Reef"),
                CategoryDefinition::new("space", "Space"),
                CategoryDefinition::new("deep", "Deep"),
            ],
            items: vec![
                item("a", Some("Reef")),
                item("b", Some("Reef / Deep")),
                item("c", Some("Deep")),
            ],
        }
    }

    fn test_app() -> App {
        let mut store = MemoryStore::new();
        let record = format!(
            r#"{{"seed":"42","timestamp":{}}}"#,
            chrono::Utc::now().timestamp_millis()
        );
        store.set(SEED_KEY, &record).unwrap();
        App::new(&Config::default(), SeedStore::new(Box::new(store))).unwrap()
    }

    fn visible_titles(app: &App) -> Vec<String> {
        let mut titles: Vec<String> = app
            .grid
            .visible_cards()
            .iter()
            .map(|c| c.title.clone())
            .collect();
        titles.sort();
        titles
    }

    #[tokio::test]
    async fn test_load_success_renders_and_becomes_ready() {
        let mut app = test_app();
        assert_eq!(app.phase, Phase::Loading);

        assert!(app.on_feed_loaded(Ok(dataset())));
        assert!(app.phase.is_ready());
        assert_eq!(visible_titles(&app), vec!["a", "b", "c"]);

        // "space" has no items, so it gets no pill
        let ids: Vec<&str> = app.pills.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["all", "reef", "deep"]);
        assert!(app.pills[0].active);
    }

    #[tokio::test]
    async fn test_fetch_failure_enters_error() {
        let mut app = test_app();
        assert!(!app.on_feed_loaded(Err(FetchError::HttpStatus(503))));

        let surfaces = app.phase.surfaces();
        assert!(surfaces.error);
        assert!(!surfaces.loading);
        assert!(!surfaces.content);

        // Late data cannot resurrect the page
        assert!(!app.on_feed_loaded(Ok(dataset())));
        assert!(app.feed.is_none());
    }

    #[tokio::test]
    async fn test_select_category_rerenders() {
        let mut app = test_app();
        app.on_feed_loaded(Ok(dataset()));

        app.select_category("deep");
        assert_eq!(visible_titles(&app), vec!["b", "c"]);
        assert_eq!(app.pills.iter().filter(|p| p.active).count(), 1);
        assert_eq!(active_index(&app.pills), Some(2));
        assert!(app.phase.is_ready());
    }

    #[tokio::test]
    async fn test_empty_category_shows_placeholder() {
        let mut app = test_app();
        app.on_feed_loaded(Ok(dataset()));

        app.select_category("space");
        assert_eq!(
            app.grid.view(),
            GridView::Placeholder("No videos in this category")
        );
        assert!(app.phase.is_ready());
    }

    #[tokio::test]
    async fn test_cycle_category_wraps() {
        let mut app = test_app();
        app.on_feed_loaded(Ok(dataset()));

        app.cycle_category(-1);
        assert_eq!(app.feed.as_ref().unwrap().active_category(), "deep");
        app.cycle_category(1);
        assert_eq!(app.feed.as_ref().unwrap().active_category(), "all");
        app.select_category_at(1);
        assert_eq!(app.feed.as_ref().unwrap().active_category(), "reef");
    }

    #[tokio::test]
    async fn test_media_failure_survives_rerender() {
        let mut app = test_app();
        app.on_feed_loaded(Ok(dataset()));

        app.on_media_failed("https://img.example.com/b.jpg".into());
        assert_eq!(visible_titles(&app), vec!["a", "c"]);

        app.select_category("reef");
        assert_eq!(visible_titles(&app), vec!["a"]);
        app.select_category("all");
        assert_eq!(visible_titles(&app), vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_order_stable_across_rerenders() {
        let mut app = test_app();
        app.on_feed_loaded(Ok(dataset()));
        let first: Vec<String> = app.grid.cards().iter().map(|c| c.title.clone()).collect();

        app.select_category("reef");
        app.select_category("all");
        let second: Vec<String> = app.grid.cards().iter().map(|c| c.title.clone()).collect();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_initial_category() {
        let mut app = test_app();
        app.initial_category = Some("Reef".into());
        app.on_feed_loaded(Ok(dataset()));
        assert_eq!(visible_titles(&app), vec!["a", "b"]);

        let mut app = test_app();
        app.initial_category = Some("space".into());
        app.on_feed_loaded(Ok(dataset()));
        assert_eq!(app.feed.as_ref().unwrap().active_category(), "all");
        assert!(app.status_message.is_some());
    }

    #[tokio::test]
    async fn test_move_selection_clamps() {
        let mut app = test_app();
        app.on_feed_loaded(Ok(dataset()));
        app.grid_columns = 2;

        app.move_selection(0, 1);
        assert_eq!(app.selected_card, 2);
        app.move_selection(5, 5);
        assert_eq!(app.selected_card, 2);
        app.move_selection(-1, -1);
        assert_eq!(app.selected_card, 0);
        assert!(app.selected_card().is_some());
    }

    #[tokio::test]
    async fn test_select_category_ignored_while_loading() {
        let mut app = test_app();
        app.select_category("reef");
        assert_eq!(app.phase, Phase::Loading);
        assert!(app.pills.is_empty());
    }
}
