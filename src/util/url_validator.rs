use thiserror::Error;
use url::Url;

/// Why a card link was refused.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL has no host to open.
    #[error("URL has no host")]
    MissingHost,
}

/// Validate a card link before handing it to the system browser.
///
/// Only `http` and `https` URLs with a host are accepted, so feed data
/// cannot make the opener launch `file://` or custom-scheme handlers.
///
/// # Examples
///
/// ```
/// use holofeed::util::validate_url_for_open;
///
/// assert!(validate_url_for_open("https://www.youtube.com/watch?v=abc").is_ok());
/// assert!(validate_url_for_open("file:///etc/passwd").is_err());
/// assert!(validate_url_for_open("javascript:alert(1)").is_err());
/// ```
pub fn validate_url_for_open(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url)
}
