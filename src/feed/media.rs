//! Thumbnail probing.
//!
//! A terminal cannot load images, so each card's media URL is requested once
//! to learn whether it would load. Every failure is reported as its own
//! [`AppEvent::MediaFailed`]; successes are silent.

use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::app::AppEvent;

/// Why a media URL is considered broken.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Invalid media URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Unsupported scheme: {0}")]
    UnsupportedScheme(String),
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("Request timed out")]
    Timeout,
    #[error("Not an image: {0}")]
    NotAnImage(String),
}

/// Check a single media URL.
pub async fn probe_one(
    client: &reqwest::Client,
    raw_url: &str,
    timeout: Duration,
) -> Result<(), MediaError> {
    let url = url::Url::parse(raw_url)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(MediaError::UnsupportedScheme(url.scheme().to_owned()));
    }

    let response = tokio::time::timeout(timeout, client.get(url).send())
        .await
        .map_err(|_| MediaError::Timeout)?
        .map_err(MediaError::Network)?;

    if !response.status().is_success() {
        return Err(MediaError::HttpStatus(response.status().as_u16()));
    }

    // Servers that omit Content-Type get the benefit of the doubt
    if let Some(content_type) = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    {
        if !content_type.starts_with("image/") {
            return Err(MediaError::NotAnImage(content_type.to_owned()));
        }
    }

    Ok(())
}

/// Probe every distinct URL with bounded concurrency.
///
/// Sends one `MediaFailed` event per broken URL and returns how many failed.
pub async fn probe_all(
    client: reqwest::Client,
    urls: Vec<String>,
    concurrency: usize,
    timeout: Duration,
    event_tx: mpsc::Sender<AppEvent>,
) -> usize {
    let mut seen = HashSet::with_capacity(urls.len());
    let unique: Vec<String> = urls.into_iter().filter(|u| seen.insert(u.clone())).collect();
    let total = unique.len();

    let failures: usize = stream::iter(unique)
        .map(|url| {
            let client = client.clone();
            let event_tx = event_tx.clone();
            async move {
                match probe_one(&client, &url, timeout).await {
                    Ok(()) => 0,
                    Err(e) => {
                        tracing::warn!(url = %url, error = %e, "Thumbnail failed to load");
                        let event = AppEvent::MediaFailed {
                            url,
                            reason: e.to_string(),
                        };
                        if let Err(e) = event_tx.send(event).await {
                            tracing::warn!(error = %e, "Failed to send media failure (receiver dropped)");
                        }
                        1
                    }
                }
            }
        })
        .buffer_unordered(concurrency.max(1))
        .fold(0, |acc, failed| async move { acc + failed })
        .await;

    tracing::debug!(total, failures, "Media probing finished");
    failures
}

/// Probe every distinct URL and collect the broken ones.
///
/// Used where no event loop is running, such as plain-text listing.
pub async fn failed_media(
    client: reqwest::Client,
    urls: Vec<String>,
    concurrency: usize,
    timeout: Duration,
) -> HashSet<String> {
    // Room for every failure, so probing never waits on the receiver
    let (tx, mut rx) = mpsc::channel(urls.len().max(1));
    probe_all(client, urls, concurrency, timeout, tx).await;

    let mut failed = HashSet::new();
    while let Some(event) = rx.recv().await {
        if let AppEvent::MediaFailed { url, .. } = event {
            failed.insert(url);
        }
    }
    failed
}
