//! Background task spawning shared across the UI layer.

use crate::app::{App, AppEvent};
use crate::feed::{fetch_dataset, media, FeedSource, GalleryKind};
use anyhow::Result;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;

/// Wraps a future to catch panics and convert them to errors.
///
/// Returns `Err(panic_message)` when the future panics, so a spawned task
/// can report `AppEvent::TaskPanicked` instead of vanishing silently.
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            }
        })
}

async fn send_event(tx: &mpsc::Sender<AppEvent>, event: AppEvent, what: &str) {
    if let Err(e) = tx.send(event).await {
        tracing::warn!(error = %e, what, "Failed to send event (receiver dropped)");
    }
}

/// Spawn the single feed fetch. The result arrives as `AppEvent::FeedLoaded`.
pub fn spawn_feed_load(
    client: reqwest::Client,
    source: FeedSource,
    kind: GalleryKind,
    event_tx: mpsc::Sender<AppEvent>,
) {
    tracing::info!(source = %source, ?kind, "Loading feed");

    tokio::spawn(async move {
        let outcome =
            catch_task_panic(async { fetch_dataset(&client, &source, kind).await }).await;

        match outcome {
            Ok(result) => send_event(&event_tx, AppEvent::FeedLoaded(result), "feed").await,
            Err(panic_msg) => {
                tracing::error!(error = %panic_msg, "Feed load task panicked");
                let event = AppEvent::TaskPanicked {
                    task: "feed load",
                    error: panic_msg,
                };
                send_event(&event_tx, event, "panic").await;
            }
        }
    });
}

/// Spawn thumbnail checks for every item in the loaded feed.
pub(super) fn spawn_media_probe(app: &App, event_tx: &mpsc::Sender<AppEvent>) {
    let urls = app.media_urls();
    if urls.is_empty() {
        return;
    }

    let client = app.http_client.clone();
    let concurrency = app.media_probe_concurrency;
    let timeout = app.media_timeout;
    let tx = event_tx.clone();

    tracing::debug!(count = urls.len(), concurrency, "Spawning media probe");

    tokio::spawn(async move {
        let outcome = catch_task_panic(media::probe_all(
            client,
            urls,
            concurrency,
            timeout,
            tx.clone(),
        ))
        .await;

        if let Err(panic_msg) = outcome {
            tracing::error!(error = %panic_msg, "Media probe task panicked");
            let event = AppEvent::TaskPanicked {
                task: "media probe",
                error: panic_msg,
            };
            send_event(&tx, event, "panic").await;
        }
    });
}
