//! Application event handling.
//!
//! Processes results from the feed fetch and the thumbnail probe.

use crate::app::{App, AppEvent};
use tokio::sync::mpsc;

use super::helpers::spawn_media_probe;

/// Handle one event from a background task.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent, event_tx: &mpsc::Sender<AppEvent>) {
    match event {
        AppEvent::FeedLoaded(result) => {
            let became_ready = app.on_feed_loaded(result);
            if became_ready {
                let count = app.feed.as_ref().map_or(0, |f| f.items().len());
                tracing::info!(items = count, "Feed ready");
                if app.probe_media {
                    spawn_media_probe(app, event_tx);
                }
            }
        }
        AppEvent::MediaFailed { url, reason } => {
            tracing::debug!(url = %url, reason = %reason, "Applying media failure");
            app.on_media_failed(url);
        }
        AppEvent::TaskPanicked { task, error } => {
            tracing::error!(task, error, "Background task panicked");
            if task == "feed load" {
                app.phase.mark_failed(format!("Internal error while loading feed: {}", error));
            } else {
                app.set_status(format!("Internal error in {} task", task));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::feed::{CategoryDefinition, Dataset, GalleryKind, Item};
    use crate::lifecycle::Phase;
    use crate::storage::{MemoryStore, SeedStore};

    fn app() -> App {
        let config = Config {
            probe_media: false,
            ..Config::default()
        };
        App::new(&config, SeedStore::new(Box::new(MemoryStore::new()))).unwrap()
    }

    fn dataset() -> Dataset {
        Dataset {
            kind: GalleryKind::Videos,
            categories: vec![CategoryDefinition::new("all", "All")],
            items: vec![Item {
                title: "Kelp Forest".into(),
                url: "https://example.com/kelp".into(),
                thumbnail_url: "https://img.example.com/kelp.jpg".into(),
                platform: "Vimeo".into(),
                category: None,
            }],
        }
    }

    #[tokio::test]
    async fn test_feed_loaded_then_media_failed() {
        let (tx, _rx) = mpsc::channel(4);
        let mut app = app();

        handle_app_event(&mut app, AppEvent::FeedLoaded(Ok(dataset())), &tx);
        assert_eq!(app.phase, Phase::Ready);
        assert_eq!(app.grid.visible_cards().len(), 1);

        let event = AppEvent::MediaFailed {
            url: "https://img.example.com/kelp.jpg".into(),
            reason: "HTTP 404".into(),
        };
        handle_app_event(&mut app, event, &tx);
        assert!(app.grid.visible_cards().is_empty());
        assert_eq!(app.phase, Phase::Ready);
    }

    #[tokio::test]
    async fn test_feed_task_panic_is_an_error_page() {
        let (tx, _rx) = mpsc::channel(4);
        let mut app = app();

        let event = AppEvent::TaskPanicked {
            task: "feed load",
            error: "boom".into(),
        };
        handle_app_event(&mut app, event, &tx);
        assert!(app.phase.surfaces().error);
    }
}
