use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::sync::mpsc;

use holofeed::app::{build_http_client, App, AppEvent};
use holofeed::config::Config;
use holofeed::feed::{fetch_dataset, media, FeedSource, FeedState, GalleryKind};
use holofeed::gallery::{render_cards, render_categories, render_plain};
use holofeed::storage::{FileStore, SeedStore};

/// Get the config directory path (~/.config/holofeed/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("holofeed"))
}

fn ensure_config_dir(config_dir: &Path) -> Result<()> {
    if !config_dir.exists() {
        std::fs::create_dir_all(config_dir).context("Failed to create config directory")?;
    }

    // User-only access; the directory holds the state file
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        match std::fs::metadata(config_dir) {
            Ok(metadata) => {
                let mut perms = metadata.permissions();
                perms.set_mode(0o700);
                if let Err(e) = std::fs::set_permissions(config_dir, perms) {
                    tracing::warn!(
                        path = %config_dir.display(),
                        error = %e,
                        "Failed to set config directory permissions to 0700"
                    );
                }
            }
            Err(e) => {
                tracing::warn!(
                    path = %config_dir.display(),
                    error = %e,
                    "Failed to read config directory metadata"
                );
            }
        }
    }
    Ok(())
}

/// Send tracing output to `holofeed.log`, since the TUI owns the terminal.
///
/// Falls back to stderr when the log file cannot be opened.
fn init_tracing(config_dir: &Path) {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    let log_path = config_dir.join("holofeed.log");

    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            tracing::warn!(path = %log_path.display(), error = %e, "Failed to open log file");
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "holofeed", about = "Terminal gallery for the Holo Hub video feed")]
struct Args {
    /// Config file (default: ~/.config/holofeed/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Feed document URL or path, overriding the config file
    #[arg(long, value_name = "URL|PATH")]
    source: Option<String>,

    /// Gallery layout for the document
    #[arg(long, value_enum)]
    gallery: Option<GalleryKind>,

    /// Category to select on start
    #[arg(long, value_name = "ID")]
    category: Option<String>,

    /// Print the gallery to stdout and exit.
    ///
    /// Thumbnails are checked as in the TUI unless `probe_media = false`.
    #[arg(long)]
    list: bool,

    /// Discard the cached shuffle seed before starting
    #[arg(long)]
    reset_seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_dir = get_config_dir()?;
    ensure_config_dir(&config_dir)?;
    init_tracing(&config_dir);

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    if let Some(source) = &args.source {
        config.source = source.clone();
    }
    if let Some(gallery) = args.gallery {
        config.gallery = gallery;
    }

    let store = FileStore::new(config_dir.join("state.json"));
    let mut seeds = SeedStore::new(Box::new(store));
    if args.reset_seed {
        seeds.reset();
        tracing::info!("Shuffle seed reset");
    }

    let source = FeedSource::parse(&config.source);

    if args.list {
        return list(&config, &source, seeds, args.category.as_deref()).await;
    }

    let mut app = App::new(&config, seeds).context("Failed to create application")?;
    app.initial_category = args.category;

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(64);
    holofeed::ui::spawn_feed_load(
        app.http_client.clone(),
        source,
        config.gallery,
        event_tx.clone(),
    );

    holofeed::ui::run(&mut app, event_tx, event_rx).await?;
    Ok(())
}

/// `--list`: fetch, filter and print the gallery without the TUI.
async fn list(
    config: &Config,
    source: &FeedSource,
    mut seeds: SeedStore,
    category: Option<&str>,
) -> Result<()> {
    let client = build_http_client()?;
    let dataset = fetch_dataset(&client, source, config.gallery)
        .await
        .with_context(|| format!("Failed to load feed from {}", source))?;

    let mut feed = FeedState::new(dataset);
    if let Some(id) = category {
        if !feed.select_visible_category(id) {
            eprintln!("No items in category '{}', showing all", id);
        }
    }

    let items = feed.visible_items(&mut seeds);
    let pills = render_categories(&feed.visible_categories(), feed.active_category());
    let mut grid = render_cards(&items, config.gallery);

    if config.probe_media {
        let urls = items.iter().map(|item| item.thumbnail_url.clone()).collect();
        let failed = media::failed_media(
            client,
            urls,
            config.media_probe_concurrency,
            config.media_timeout(),
        )
        .await;
        grid.apply_failures(&failed);
    }

    print!("{}", render_plain(&pills, &grid));
    Ok(())
}
