use futures::StreamExt;
use std::path::Path;
use thiserror::Error;

use super::types::{Dataset, GalleryKind};

const MAX_DOCUMENT_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Errors that can occur while loading the feed document.
///
/// Every variant is terminal for the page: nothing is retried.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Local document could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// Body is not the expected JSON shape
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Body exceeded the 10MB size limit
    #[error("Response too large")]
    ResponseTooLarge,
}

/// Where the feed document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Url(url::Url),
    File(String),
}

impl FeedSource {
    /// `http(s)://` strings are URLs; anything else is a filesystem path.
    pub fn parse(raw: &str) -> Self {
        match url::Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Url(url),
            _ => Self::File(raw.to_string()),
        }
    }
}

impl std::fmt::Display for FeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{}", url),
            Self::File(path) => write!(f, "{}", path),
        }
    }
}

/// Load and parse the feed document once.
///
/// The request carries no timeout: the page stays in its loading state
/// until the server answers or the connection fails.
///
/// # Errors
///
/// - [`FetchError::Network`] - request did not complete
/// - [`FetchError::HttpStatus`] - non-2xx response
/// - [`FetchError::Io`] - local file unreadable
/// - [`FetchError::ResponseTooLarge`] - body over 10MB
/// - [`FetchError::Parse`] - body is not the expected JSON shape
pub async fn fetch_dataset(
    client: &reqwest::Client,
    source: &FeedSource,
    kind: GalleryKind,
) -> Result<Dataset, FetchError> {
    let bytes = match source {
        FeedSource::Url(url) => fetch_bytes(client, url.as_str()).await?,
        FeedSource::File(path) => read_file(Path::new(path)).await?,
    };

    let dataset = Dataset::from_json(kind, &bytes)?;
    tracing::info!(
        source = %source,
        items = dataset.items.len(),
        categories = dataset.categories.len(),
        "Feed data loaded"
    );
    Ok(dataset)
}

async fn fetch_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, FetchError> {
    let response = client.get(url).send().await.map_err(FetchError::Network)?;

    if !response.status().is_success() {
        return Err(FetchError::HttpStatus(response.status().as_u16()));
    }

    read_limited_bytes(response, MAX_DOCUMENT_SIZE).await
}

async fn read_file(path: &Path) -> Result<Vec<u8>, FetchError> {
    let io_err = |source| FetchError::Io {
        path: path.display().to_string(),
        source,
    };

    let meta = tokio::fs::metadata(path).await.map_err(io_err)?;
    if meta.len() > MAX_DOCUMENT_SIZE as u64 {
        return Err(FetchError::ResponseTooLarge);
    }
    tokio::fs::read(path).await.map_err(io_err)
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FetchError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
