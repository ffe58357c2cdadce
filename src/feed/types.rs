use serde::Deserialize;

/// Reserved category id that always matches every item.
pub const ALL_CATEGORY: &str = "all";

/// A single media entry in the gallery.
///
/// Items are immutable once fetched; every filtered or shuffled sequence is
/// a fresh `Vec` of clones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
    pub platform: String,
    /// Raw label, possibly compound (`"Underwater / Marine"`).
    pub category: Option<String>,
}

/// A filter pill definition from the feed document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryDefinition {
    pub id: String,
    pub name: String,
}

impl CategoryDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Video entry as it appears in the feed document.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoEntry {
    pub title: String,
    pub url: String,
    pub thumbnail: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl From<VideoEntry> for Item {
    fn from(v: VideoEntry) -> Self {
        Item {
            title: v.title,
            url: v.url,
            thumbnail_url: v.thumbnail,
            platform: v.platform,
            category: v.category,
        }
    }
}

/// Channel entry for the flat channels gallery.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelEntry {
    pub name: String,
    pub url: String,
    pub logo: String,
    #[serde(default)]
    pub source: String,
}

impl From<ChannelEntry> for Item {
    fn from(c: ChannelEntry) -> Self {
        Item {
            title: c.name,
            url: c.url,
            thumbnail_url: c.logo,
            platform: c.source,
            category: None,
        }
    }
}

/// The categorized feed document: `{ categories: [...], videos: [...] }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoFeedDocument {
    #[serde(default)]
    pub categories: Vec<CategoryDefinition>,
    #[serde(default)]
    pub videos: Vec<VideoEntry>,
}

/// Which gallery layout a feed document feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GalleryKind {
    /// Categorized videos with an hour-stable shuffle.
    #[default]
    Videos,
    /// Flat channel list shuffled on every load.
    Channels,
}

impl GalleryKind {
    /// Placeholder text for an empty grid.
    pub fn empty_message(self) -> &'static str {
        match self {
            Self::Videos => "No videos in this category",
            Self::Channels => "No channels available",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Videos => "Holo Hub Feed",
            Self::Channels => "Holo Hub Channels",
        }
    }
}

/// A parsed feed document, normalized to items plus category definitions.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub kind: GalleryKind,
    pub categories: Vec<CategoryDefinition>,
    pub items: Vec<Item>,
}

impl Dataset {
    /// Parse a raw JSON body for the given gallery kind.
    pub fn from_json(kind: GalleryKind, bytes: &[u8]) -> Result<Self, serde_json::Error> {
        match kind {
            GalleryKind::Videos => {
                let doc: VideoFeedDocument = serde_json::from_slice(bytes)?;
                Ok(Self {
                    kind,
                    categories: doc.categories,
                    items: doc.videos.into_iter().map(Item::from).collect(),
                })
            }
            GalleryKind::Channels => {
                let channels: Vec<ChannelEntry> = serde_json::from_slice(bytes)?;
                Ok(Self {
                    kind,
                    categories: Vec::new(),
                    items: channels.into_iter().map(Item::from).collect(),
                })
            }
        }
    }
}
