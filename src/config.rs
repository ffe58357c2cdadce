//! Configuration file parser for ~/.config/holofeed/config.toml.
//!
//! The config file is optional: a missing file yields `Config::default()`.
//! Unknown keys are accepted but logged as a warning to catch typos.
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::feed::GalleryKind;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Feed document location: an `http(s)` URL or a filesystem path.
    pub source: String,

    /// Gallery layout for the document: "videos" or "channels".
    pub gallery: GalleryKind,

    /// Theme variant name ("dark" or "light").
    pub theme: String,

    /// Whether to check thumbnails and hide cards whose media is broken.
    pub probe_media: bool,

    /// Maximum thumbnail checks in flight.
    pub media_probe_concurrency: usize,

    /// Timeout for each thumbnail check. The feed fetch itself has none.
    pub media_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: "feed/config/data.json".to_string(),
            gallery: GalleryKind::Videos,
            theme: "dark".to_string(),
            probe_media: true,
            media_probe_concurrency: 8,
            media_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 6] = [
        "source",
        "gallery",
        "theme",
        "probe_media",
        "media_probe_concurrency",
        "media_timeout_secs",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            source = %config.source,
            gallery = ?config.gallery,
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn media_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.media_timeout_secs.max(1))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(name: &str, content: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("holofeed_config_test_{}", name));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    fn cleanup(path: &Path) {
        if let Some(dir) = path.parent() {
            std::fs::remove_dir_all(dir).ok();
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.source, "feed/config/data.json");
        assert_eq!(config.gallery, GalleryKind::Videos);
        assert_eq!(config.theme, "dark");
        assert!(config.probe_media);
        assert_eq!(config.media_probe_concurrency, 8);
        assert_eq!(config.media_timeout_secs, 30);
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/holofeed_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_whitespace_only_file_returns_default() {
        let path = write_config("whitespace", "   \n  \n  ");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.gallery, GalleryKind::Videos);
        cleanup(&path);
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let path = write_config("partial", "gallery = \"channels\"\n");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.gallery, GalleryKind::Channels);
        assert_eq!(config.source, "feed/config/data.json");
        assert!(config.probe_media);
        cleanup(&path);
    }

    #[test]
    fn test_full_config() {
        let content = r#"
source = "https://example.com/feed/config/data.json"
gallery = "videos"
theme = "light"
probe_media = false
media_probe_concurrency = 2
media_timeout_secs = 5
"#;
        let path = write_config("full", content);
        let config = Config::load(&path).unwrap();
        assert_eq!(config.source, "https://example.com/feed/config/data.json");
        assert_eq!(config.theme, "light");
        assert!(!config.probe_media);
        assert_eq!(config.media_probe_concurrency, 2);
        assert_eq!(config.media_timeout(), std::time::Duration::from_secs(5));
        cleanup(&path);
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let path = write_config("invalid", "this is not [valid toml");
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));
        cleanup(&path);
    }

    #[test]
    fn test_unknown_gallery_is_error() {
        let path = write_config("bad_gallery", "gallery = \"photos\"\n");
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
        cleanup(&path);
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let path = write_config("unknown", "theme = \"dark\"\ntotally_fake_key = 1\n");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.theme, "dark");
        cleanup(&path);
    }

    #[test]
    fn test_too_large_file_rejected() {
        let path = write_config("too_large", &"a".repeat(1_048_577));
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        assert!(err.to_string().contains("too large"));
        cleanup(&path);
    }

    #[test]
    fn test_zero_timeout_clamped() {
        let config = Config {
            media_timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.media_timeout(), std::time::Duration::from_secs(1));
    }
}
