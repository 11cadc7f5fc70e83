//! newsdesk: a terminal news reader with a reading list and offline cache.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌──────────┐  PollMsg   ┌──────────┐  draw()  ┌──────────┐
//! │  poll.rs │ ─────────► │  app.rs  │ ───────► │  ui.rs   │
//! │ (thread) │  (channel) │ (state)  │          │ (render) │
//! └──────────┘            └──────────┘          └──────────┘
//!      ▲ PollCommand        ▲     │
//!      │                    │     ├──► reading_list.rs ─┐
//!      │   handle_key_event │     └──► cache.rs ────────┴─► store.rs
//!      │              ┌──────────┐
//!      └───────────── │ input.rs │
//!                     └──────────┘
//! ```
//!
//! * **`source/`**: the `ArticleSource` trait, the NewsData API client and
//!   RSS feeds, behind an `HttpClient` seam.
//! * **`poll`**: background thread that checks connectivity and fetches
//!   on a timer or on demand.
//! * **`app`**: all application state: headlines, search, views, and the
//!   fetch / cache-fallback orchestration.
//! * **`reading_list`**, **`cache`**: persisted bookmarks and the TTL
//!   headline snapshot, both single blobs in a `store::Store`.
//! * **`ui`**: pure rendering: reads `App` state and draws widgets.
//! * **`input`**: maps key events to `App` mutations.
//! * **`main`**: wires everything together: config, logging, terminal,
//!   and the event loop.

mod app;
mod cache;
mod cli;
mod config;
mod connectivity;
mod detail;
mod error;
mod input;
mod logging;
mod poll;
mod reading_list;
mod source;
mod store;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use app::App;
use cache::NewsCache;
use cli::Args;
use config::Config;
use connectivity::{AlwaysOnline, Connectivity, TcpProbe};
use reading_list::ReadingList;
use source::{ArticleSource, NewsApi, ReqwestClient, RssSource};
use store::{FileStore, Store};

// ---------------------------------------------------------------------------
// RAII terminal guard
// ---------------------------------------------------------------------------

/// Enters raw mode and the alternate screen on construction and restores
/// the terminal on [`Drop`], including during unwinding.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Restore the terminal before the default hook prints the panic message.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

// ---------------------------------------------------------------------------
// Wiring
// ---------------------------------------------------------------------------

fn build_sources(config: &Config) -> Result<Vec<Box<dyn ArticleSource>>> {
    let mut sources: Vec<Box<dyn ArticleSource>> = Vec::new();

    if let Some(key) = config.api_key() {
        let api = NewsApi::new(Box::new(ReqwestClient::new()?), &config.base_url, key)
            .with_query(config.news_query());
        sources.push(Box::new(api));
    }
    for feed in &config.feeds {
        sources.push(Box::new(RssSource::new(
            Box::new(ReqwestClient::new()?),
            &feed.url,
            &feed.label,
        )));
    }
    Ok(sources)
}

/// Probe the API host, or the first feed's host when there is no API key.
fn build_connectivity(config: &Config, assume_online: bool) -> Box<dyn Connectivity> {
    if assume_online {
        return Box::new(AlwaysOnline);
    }
    let target = match config.api_key() {
        Some(_) => Some(config.base_url.as_str()),
        None => config.feeds.first().map(|f| f.url.as_str()),
    };
    match target.and_then(TcpProbe::for_url) {
        Some(probe) => Box::new(probe),
        None => {
            tracing::warn!("no probe target, assuming the network is up");
            Box::new(AlwaysOnline)
        }
    }
}

/// `--sources`: list the API's publishers on stdout.
fn print_publishers(config: &Config) -> Result<()> {
    let key = config
        .api_key()
        .context("--sources needs a NewsData API key")?;
    let api = NewsApi::new(Box::new(ReqwestClient::new()?), &config.base_url, key);
    let response = api
        .fetch_sources()
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    for publisher in &response.sources {
        let url = publisher.url.as_deref().unwrap_or("");
        println!("{:<24} {:<32} {}", publisher.id, publisher.name, url);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(&args)?;

    let data_dir = config.data_dir();
    let _log_guard = logging::init(&data_dir).context("failed to set up logging")?;
    tracing::info!(data_dir = %data_dir.display(), "starting newsdesk");

    if args.sources {
        return print_publishers(&config);
    }

    let store: Arc<dyn Store> = Arc::new(
        FileStore::open(&data_dir)
            .with_context(|| format!("failed to open data directory '{}'", data_dir.display()))?,
    );
    let mut cache = NewsCache::new(store.clone(), config.cache_ttl(), config.cache_max_items);
    if args.clear_cache {
        cache.clear().context("failed to clear the headline cache")?;
        tracing::info!("headline cache cleared");
    }
    let reading_list = ReadingList::new(store);

    let sources = build_sources(&config)?;
    let connectivity = build_connectivity(&config, args.assume_online);
    let poller = poll::spawn(sources, connectivity, config.refresh_interval());

    install_panic_hook();
    let mut guard = TerminalGuard::new()?;
    let mut app = App::new(reading_list, cache);
    app.start(Utc::now());

    // -- main event loop -----------------------------------------------------
    // ~10 fps.  Each iteration drains the poller, forwards a pending
    // refresh, renders, then waits up to one tick for a key.
    let tick_rate = Duration::from_millis(100);

    loop {
        while let Ok(msg) = poller.messages.try_recv() {
            app.handle_poll(msg, Utc::now());
        }
        if app.take_refresh_request() {
            poller.refresh();
        }

        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(&mut app, key);
            }
        }

        if app.quit {
            break;
        }
    }

    drop(guard);
    poller.shutdown();
    tracing::info!("bye");
    Ok(())
}
