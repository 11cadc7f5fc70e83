use std::collections::HashSet;

use chrono::{DateTime, Utc};
use ratatui::widgets::ListState;

use crate::cache::NewsCache;
use crate::error::OFFLINE_MESSAGE;
use crate::poll::PollMsg;
use crate::reading_list::ReadingList;
use crate::source::Article;

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Headlines,
    ReadingList,
    Detail,
}

/// Whether keystrokes edit the search query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

pub struct App {
    /// Latest headlines, newest first.
    articles: Vec<Article>,
    /// Indices into `articles` that match the search query.
    visible: Vec<usize>,
    query: String,
    pub input_mode: InputMode,
    view: View,
    /// The article open in the detail pane and the view to go back to.
    detail: Option<(Article, View)>,
    pub detail_scroll: u16,
    pub headlines_state: ListState,
    pub reading_state: ListState,
    /// Snapshot of the reading list for rendering.
    saved: Vec<Article>,
    saved_ids: HashSet<String>,
    reading_list: ReadingList,
    cache: NewsCache,
    pub status: String,
    pub loading: bool,
    /// `None` until the first connectivity check.
    pub online: Option<bool>,
    /// More headlines arrived while the user was scrolled down.
    pub new_headlines: bool,
    /// The headlines on screen came from the cache, not a fetch.
    pub showing_cache: bool,
    pub quit: bool,
    refresh_requested: bool,
    /// Error text from a source that failed during the current cycle.
    cycle_error: Option<String>,
}

impl App {
    pub fn new(reading_list: ReadingList, cache: NewsCache) -> Self {
        Self {
            articles: Vec::new(),
            visible: Vec::new(),
            query: String::new(),
            input_mode: InputMode::Normal,
            view: View::Headlines,
            detail: None,
            detail_scroll: 0,
            headlines_state: ListState::default(),
            reading_state: ListState::default(),
            saved: Vec::new(),
            saved_ids: HashSet::new(),
            reading_list,
            cache,
            status: "Starting…".into(),
            loading: false,
            online: None,
            new_headlines: false,
            showing_cache: false,
            quit: false,
            refresh_requested: false,
            cycle_error: None,
        }
    }

    /// Load the reading list and show cached headlines while the first
    /// fetch is in flight.
    pub fn start(&mut self, now: DateTime<Utc>) {
        self.sync_saved();
        self.fallback_to_cache(now);
    }

    // -- poll messages -------------------------------------------------------

    pub fn handle_poll(&mut self, msg: PollMsg, now: DateTime<Utc>) {
        match msg {
            PollMsg::Connectivity(online) => {
                let was_offline = self.online == Some(false);
                self.online = Some(online);
                if !online {
                    self.status = OFFLINE_MESSAGE.to_string();
                } else if was_offline {
                    self.status = "Back online, refreshing…".to_string();
                }
            }
            PollMsg::Started => {
                self.loading = true;
                self.cycle_error = None;
                self.status = "Refreshing…".to_string();
            }
            PollMsg::Articles(items) => self.apply_fetch(items, now),
            PollMsg::Failed { source, error } => {
                tracing::debug!(%source, %error, "showing fetch failure");
                let message = error.user_message();
                self.status = message.clone();
                self.cycle_error = Some(message);
                self.fallback_to_cache(now);
            }
            PollMsg::Offline => {
                self.loading = false;
                self.status = OFFLINE_MESSAGE.to_string();
                self.fallback_to_cache(now);
            }
            PollMsg::Finished => self.loading = false,
        }
    }

    fn apply_fetch(&mut self, items: Vec<Article>, now: DateTime<Utc>) {
        let previous = self.articles.len();
        let scrolled = self.headlines_state.selected().is_some_and(|i| i > 0);

        if let Err(e) = self.cache.save(&items, now) {
            tracing::warn!(error = %e, "could not cache headlines");
        }
        self.set_articles(items);
        self.showing_cache = false;
        // Another source may have failed earlier in this cycle.
        self.status = match self.cycle_error.take() {
            Some(error) => format!("Fetched {} headlines. {error}", self.articles.len()),
            None => format!("Fetched {} headlines", self.articles.len()),
        };

        if previous > 0 && scrolled && self.articles.len() > previous {
            self.new_headlines = true;
        }
    }

    /// Show the cached snapshot when nothing else is on screen and it is
    /// still within its TTL.  While cached headlines are showing, the
    /// status line always ends with their age.
    fn fallback_to_cache(&mut self, now: DateTime<Utc>) {
        if self.articles.is_empty() {
            match self.cache.fresh(now) {
                Ok(Some(items)) if !items.is_empty() => {
                    tracing::info!(count = items.len(), "showing cached headlines");
                    self.set_articles(items);
                    self.showing_cache = true;
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "could not read headline cache"),
            }
        }
        if self.showing_cache {
            let minutes = self.cache.age(now).map_or(0, |a| a.as_secs() / 60);
            self.status = format!(
                "{} Showing cached headlines from {minutes} min ago.",
                self.status
            );
        }
    }

    /// Replace the headlines, keeping the selected article selected when it
    /// is still present.
    fn set_articles(&mut self, items: Vec<Article>) {
        let selected_id = self.selected_headline().and_then(|a| a.article_id.clone());
        self.articles = items;
        self.refilter();

        let position = selected_id
            .and_then(|id| self.visible_articles().position(|a| a.id() == Some(id.as_str())));
        if position.is_some() {
            self.headlines_state.select(position);
        }
    }

    // -- accessors -----------------------------------------------------------

    pub fn view(&self) -> View {
        self.view
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn visible_articles(&self) -> impl Iterator<Item = &Article> {
        self.visible.iter().map(|&i| &self.articles[i])
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn saved_articles(&self) -> &[Article] {
        &self.saved
    }

    pub fn is_bookmarked(&self, article: &Article) -> bool {
        article.id().is_some_and(|id| self.saved_ids.contains(id))
    }

    pub fn detail(&self) -> Option<&Article> {
        self.detail.as_ref().map(|(a, _)| a)
    }

    pub fn selected_headline(&self) -> Option<&Article> {
        let i = self.headlines_state.selected()?;
        self.visible.get(i).map(|&idx| &self.articles[idx])
    }

    pub fn selected_saved(&self) -> Option<&Article> {
        self.saved.get(self.reading_state.selected()?)
    }

    /// The article the current view is pointing at.
    pub fn current_article(&self) -> Option<&Article> {
        match self.view {
            View::Headlines => self.selected_headline(),
            View::ReadingList => self.selected_saved(),
            View::Detail => self.detail(),
        }
    }

    // -- search --------------------------------------------------------------

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_searching(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refilter();
        let first = (!self.visible.is_empty()).then_some(0);
        self.headlines_state.select(first);
    }

    pub fn start_search(&mut self) {
        if self.view == View::Headlines {
            self.input_mode = InputMode::Search;
        }
    }

    pub fn push_search_char(&mut self, c: char) {
        let mut query = std::mem::take(&mut self.query);
        query.push(c);
        self.set_query(query);
    }

    pub fn pop_search_char(&mut self) {
        let mut query = std::mem::take(&mut self.query);
        query.pop();
        self.set_query(query);
    }

    /// Leave search mode keeping the filter.
    pub fn finish_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Leave search mode and drop the filter.
    pub fn clear_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.set_query(String::new());
    }

    fn refilter(&mut self) {
        self.visible = self
            .articles
            .iter()
            .enumerate()
            .filter(|(_, a)| a.matches(&self.query))
            .map(|(i, _)| i)
            .collect();
        clamp(&mut self.headlines_state, self.visible.len());
    }

    // -- reading list --------------------------------------------------------

    /// Bookmark or un-bookmark the article the current view points at.
    pub fn toggle_bookmark(&mut self) {
        let Some(article) = self.current_article().cloned() else {
            return;
        };
        if article.id().is_none() {
            self.status = "This article has no id and cannot be saved.".to_string();
            return;
        }
        match self.reading_list.toggle(&article) {
            Ok(true) => self.status = "Saved to reading list".to_string(),
            Ok(false) => self.status = "Removed from reading list".to_string(),
            Err(e) => {
                tracing::error!(error = %e, "reading list update failed");
                self.status = format!("Could not update reading list: {e}");
            }
        }
        self.sync_saved();
    }

    /// Remove the selected entry while the reading list is showing.
    pub fn remove_selected_bookmark(&mut self) {
        if self.view != View::ReadingList {
            return;
        }
        let Some(article) = self.selected_saved().cloned() else {
            return;
        };
        match self.reading_list.remove(&article) {
            Ok(_) => self.status = "Removed from reading list".to_string(),
            Err(e) => {
                tracing::error!(error = %e, "reading list update failed");
                self.status = format!("Could not update reading list: {e}");
            }
        }
        self.sync_saved();
    }

    fn sync_saved(&mut self) {
        match self.reading_list.items() {
            Ok(items) => {
                self.saved_ids = items
                    .iter()
                    .filter_map(|a| a.article_id.clone())
                    .collect();
                self.saved = items;
            }
            Err(e) => {
                tracing::error!(error = %e, "could not load reading list");
                self.status = format!("Could not load reading list: {e}");
            }
        }
        clamp(&mut self.reading_state, self.saved.len());
    }

    // -- views ---------------------------------------------------------------

    /// Flip between headlines and the reading list.
    pub fn switch_view(&mut self) {
        self.view = match self.view {
            View::Headlines => {
                // Pick up changes made by another instance.
                self.reading_list.invalidate();
                self.sync_saved();
                if self.reading_state.selected().is_none() && !self.saved.is_empty() {
                    self.reading_state.select(Some(0));
                }
                View::ReadingList
            }
            View::ReadingList => View::Headlines,
            View::Detail => View::Detail,
        };
    }

    pub fn open_detail(&mut self) {
        if self.view == View::Detail {
            return;
        }
        if let Some(article) = self.current_article().cloned() {
            self.detail = Some((article, self.view));
            self.view = View::Detail;
            self.detail_scroll = 0;
        }
    }

    pub fn close_detail(&mut self) {
        if let Some((_, back)) = self.detail.take() {
            self.view = back;
        }
    }

    pub fn scroll_detail_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(1);
    }

    pub fn scroll_detail_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }

    // -- refresh -------------------------------------------------------------

    pub fn request_refresh(&mut self) {
        self.refresh_requested = true;
    }

    /// Returns and clears the pending refresh request.
    pub fn take_refresh_request(&mut self) -> bool {
        std::mem::take(&mut self.refresh_requested)
    }

    // -- navigation ----------------------------------------------------------

    fn active_list(&mut self) -> Option<(&mut ListState, usize)> {
        match self.view {
            View::Headlines => Some((&mut self.headlines_state, self.visible.len())),
            View::ReadingList => Some((&mut self.reading_state, self.saved.len())),
            View::Detail => None,
        }
    }

    pub fn select_next(&mut self) {
        if self.view == View::Detail {
            return self.scroll_detail_down();
        }
        let Some((state, len)) = self.active_list() else {
            return;
        };
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.view == View::Detail {
            return self.scroll_detail_up();
        }
        let Some((state, len)) = self.active_list() else {
            return;
        };
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        state.select(Some(i));
        if i == 0 && self.view == View::Headlines {
            self.new_headlines = false;
        }
    }

    pub fn select_first(&mut self) {
        if self.view == View::Detail {
            self.detail_scroll = 0;
            return;
        }
        if let Some((state, len)) = self.active_list() {
            if len > 0 {
                state.select(Some(0));
            }
        }
        if self.view == View::Headlines {
            self.new_headlines = false;
        }
    }

    pub fn select_last(&mut self) {
        if let Some((state, len)) = self.active_list() {
            if len > 0 {
                state.select(Some(len - 1));
            }
        }
    }
}

/// Keep a selection inside `0..len`.
fn clamp(state: &mut ListState, len: usize) {
    match state.selected() {
        _ if len == 0 => state.select(None),
        Some(i) if i >= len => state.select(Some(len - 1)),
        _ => {}
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::cache::{DEFAULT_MAX_ITEMS, DEFAULT_TTL};
    use crate::error::FetchError;
    use crate::source::article::tests::make_article;
    use crate::store::{MemoryStore, Store};
    use chrono::TimeZone;
    use std::sync::Arc;

    pub(crate) fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 7, 12, 0, 0).unwrap()
    }

    pub(crate) fn app_with_store(store: Arc<MemoryStore>) -> App {
        let reading_list = ReadingList::new(store.clone());
        let cache = NewsCache::new(store, DEFAULT_TTL, DEFAULT_MAX_ITEMS);
        App::new(reading_list, cache)
    }

    pub(crate) fn app() -> App {
        app_with_store(Arc::new(MemoryStore::new()))
    }

    pub(crate) fn sample_items() -> Vec<Article> {
        let mut new = make_article("3", "Rust compiler news", Some("2026-01-01 00:00:00"));
        new.description = Some("Faster builds".into());
        vec![
            new,
            make_article("2", "Mid", Some("2025-06-01 00:00:00")),
            make_article("1", "Old", Some("2024-01-01 00:00:00")),
        ]
    }

    fn ids<'a>(items: impl Iterator<Item = &'a Article>) -> Vec<String> {
        items.filter_map(|a| a.article_id.clone()).collect()
    }

    // -- construction --------------------------------------------------------

    #[test]
    fn new_app_starts_empty() {
        let app = app();
        assert!(app.articles().is_empty());
        assert!(!app.quit);
        assert_eq!(app.view(), View::Headlines);
        assert!(app.headlines_state.selected().is_none());
    }

    #[test]
    fn start_shows_fresh_cache() {
        let store = Arc::new(MemoryStore::new());
        let mut cache = NewsCache::new(store.clone(), DEFAULT_TTL, DEFAULT_MAX_ITEMS);
        cache.save(&sample_items(), now() - chrono::Duration::minutes(10)).unwrap();

        let mut app = app_with_store(store);
        app.start(now());
        assert_eq!(app.articles().len(), 3);
        assert!(app.showing_cache);
        assert!(app.status.contains("10 min ago"));
    }

    #[test]
    fn start_ignores_expired_cache() {
        let store = Arc::new(MemoryStore::new());
        let mut cache = NewsCache::new(store.clone(), DEFAULT_TTL, DEFAULT_MAX_ITEMS);
        cache.save(&sample_items(), now() - chrono::Duration::hours(2)).unwrap();

        let mut app = app_with_store(store);
        app.start(now());
        assert!(app.articles().is_empty());
        assert!(!app.showing_cache);
    }

    // -- poll handling -------------------------------------------------------

    #[test]
    fn articles_replace_list_and_fill_cache() {
        let store = Arc::new(MemoryStore::new());
        let mut app = app_with_store(store.clone());
        app.handle_poll(PollMsg::Started, now());
        assert!(app.loading);

        app.handle_poll(PollMsg::Articles(sample_items()), now());
        app.handle_poll(PollMsg::Finished, now());

        assert!(!app.loading);
        assert_eq!(app.articles().len(), 3);
        assert_eq!(app.status, "Fetched 3 headlines");
        assert!(store.get("cached_news").unwrap().is_some());

        // A later fetch replaces rather than merges.
        app.handle_poll(PollMsg::Articles(vec![make_article("9", "Only", None)]), now());
        assert_eq!(ids(app.articles().iter()), ["9"]);
    }

    #[test]
    fn rate_limit_falls_back_to_cache() {
        let store = Arc::new(MemoryStore::new());
        NewsCache::new(store.clone(), DEFAULT_TTL, DEFAULT_MAX_ITEMS)
            .save(&sample_items(), now())
            .unwrap();

        let mut app = app_with_store(store);
        app.handle_poll(
            PollMsg::Failed {
                source: "NewsData".into(),
                error: FetchError::Http { status: 429 },
            },
            now(),
        );
        assert!(app.status.starts_with("API rate limit reached"));
        assert_eq!(app.articles().len(), 3);
        assert!(app.showing_cache);
    }

    #[test]
    fn rate_limit_survives_a_cycle_where_another_source_succeeds() {
        let mut app = app();
        app.handle_poll(PollMsg::Started, now());
        app.handle_poll(
            PollMsg::Failed {
                source: "NewsData".into(),
                error: FetchError::Http { status: 429 },
            },
            now(),
        );
        app.handle_poll(PollMsg::Articles(sample_items()), now());
        app.handle_poll(PollMsg::Finished, now());

        assert_eq!(app.articles().len(), 3);
        assert!(app.status.starts_with("Fetched 3 headlines."));
        assert!(app.status.contains("API rate limit reached"), "status was {:?}", app.status);

        // The next clean cycle drops the error.
        app.handle_poll(PollMsg::Started, now());
        app.handle_poll(PollMsg::Articles(sample_items()), now());
        assert_eq!(app.status, "Fetched 3 headlines");
    }

    #[test]
    fn failure_over_cached_headlines_keeps_cache_age() {
        let store = Arc::new(MemoryStore::new());
        NewsCache::new(store.clone(), DEFAULT_TTL, DEFAULT_MAX_ITEMS)
            .save(&sample_items(), now() - chrono::Duration::minutes(10))
            .unwrap();

        let mut app = app_with_store(store);
        app.start(now());
        assert!(app.showing_cache);

        app.handle_poll(
            PollMsg::Failed {
                source: "NewsData".into(),
                error: FetchError::Http { status: 500 },
            },
            now(),
        );
        assert!(app.status.starts_with("Could not load headlines"));
        assert!(app.status.ends_with("Showing cached headlines from 10 min ago."));

        app.handle_poll(PollMsg::Offline, now());
        assert!(app.status.starts_with(OFFLINE_MESSAGE));
        assert!(app.status.ends_with("from 10 min ago."));
    }

    #[test]
    fn failure_keeps_existing_headlines() {
        let mut app = app();
        app.handle_poll(PollMsg::Articles(sample_items()), now());
        app.handle_poll(
            PollMsg::Failed {
                source: "NewsData".into(),
                error: FetchError::Http { status: 500 },
            },
            now(),
        );
        assert_eq!(app.articles().len(), 3);
        assert!(!app.showing_cache);
        assert_eq!(app.status, "Could not load headlines: HTTP error: 500");
    }

    #[test]
    fn offline_sets_message_and_clears_loading() {
        let mut app = app();
        app.handle_poll(PollMsg::Connectivity(false), now());
        app.handle_poll(PollMsg::Offline, now());
        assert_eq!(app.online, Some(false));
        assert!(!app.loading);
        assert_eq!(app.status, OFFLINE_MESSAGE);

        app.handle_poll(PollMsg::Connectivity(true), now());
        assert_eq!(app.online, Some(true));
        assert!(app.status.starts_with("Back online"));
    }

    #[test]
    fn new_headlines_flag_requires_scroll_and_growth() {
        let mut app = app();
        app.handle_poll(PollMsg::Articles(sample_items()[1..].to_vec()), now());
        app.select_next();
        app.select_next(); // index 1: scrolled away from the top

        app.handle_poll(PollMsg::Articles(sample_items()), now());
        assert!(app.new_headlines);

        app.select_first();
        assert!(!app.new_headlines);
    }

    #[test]
    fn new_headlines_flag_not_set_at_top() {
        let mut app = app();
        app.handle_poll(PollMsg::Articles(sample_items()[1..].to_vec()), now());
        app.select_first();
        app.handle_poll(PollMsg::Articles(sample_items()), now());
        assert!(!app.new_headlines);
    }

    #[test]
    fn selection_follows_article_across_refresh() {
        let mut app = app();
        app.handle_poll(PollMsg::Articles(sample_items()[1..].to_vec()), now());
        app.select_next(); // "2"
        assert_eq!(app.selected_headline().and_then(Article::id), Some("2"));

        app.handle_poll(PollMsg::Articles(sample_items()), now());
        assert_eq!(app.selected_headline().and_then(Article::id), Some("2"));
    }

    // -- search --------------------------------------------------------------

    #[test]
    fn search_filters_on_title_and_description() {
        let mut app = app();
        app.handle_poll(PollMsg::Articles(sample_items()), now());

        app.set_query("RUST");
        assert!(app.is_searching());
        assert_eq!(ids(app.visible_articles()), ["3"]);

        app.set_query("faster");
        assert_eq!(ids(app.visible_articles()), ["3"]);

        app.set_query("nothing matches");
        assert_eq!(app.visible_count(), 0);
        assert!(app.headlines_state.selected().is_none());

        app.clear_search();
        assert!(!app.is_searching());
        assert_eq!(app.visible_count(), 3);
    }

    #[test]
    fn typing_edits_query() {
        let mut app = app();
        app.handle_poll(PollMsg::Articles(sample_items()), now());
        app.start_search();
        assert_eq!(app.input_mode, InputMode::Search);

        for c in "mid".chars() {
            app.push_search_char(c);
        }
        assert_eq!(app.query(), "mid");
        assert_eq!(ids(app.visible_articles()), ["2"]);

        app.pop_search_char();
        assert_eq!(app.query(), "mi");
        app.finish_search();
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.query(), "mi", "finishing keeps the filter");
    }

    #[test]
    fn search_survives_refresh() {
        let mut app = app();
        app.set_query("old");
        app.handle_poll(PollMsg::Articles(sample_items()), now());
        assert_eq!(ids(app.visible_articles()), ["1"]);
    }

    // -- reading list --------------------------------------------------------

    #[test]
    fn toggle_bookmark_from_headlines() {
        let mut app = app();
        app.handle_poll(PollMsg::Articles(sample_items()), now());
        app.select_first();

        app.toggle_bookmark();
        assert_eq!(app.status, "Saved to reading list");
        assert_eq!(app.saved_articles().len(), 1);
        assert!(app.is_bookmarked(&app.articles()[0].clone()));

        app.toggle_bookmark();
        assert_eq!(app.status, "Removed from reading list");
        assert!(app.saved_articles().is_empty());
    }

    #[test]
    fn bookmarks_persist_in_store() {
        let store = Arc::new(MemoryStore::new());
        let mut app = app_with_store(store.clone());
        app.handle_poll(PollMsg::Articles(sample_items()), now());
        app.select_first();
        app.toggle_bookmark();

        let mut reopened = app_with_store(store);
        reopened.start(now());
        assert_eq!(reopened.saved_articles().len(), 1);
    }

    #[test]
    fn remove_from_reading_list_view() {
        let mut app = app();
        app.handle_poll(PollMsg::Articles(sample_items()), now());
        app.select_first();
        app.toggle_bookmark();
        app.select_next();
        app.toggle_bookmark();

        app.switch_view();
        assert_eq!(app.view(), View::ReadingList);
        assert_eq!(app.reading_state.selected(), Some(0));

        app.select_last();
        app.remove_selected_bookmark();
        assert_eq!(app.saved_articles().len(), 1);
        assert_eq!(app.reading_state.selected(), Some(0), "selection clamped");
    }

    #[test]
    fn remove_is_ignored_outside_reading_list() {
        let mut app = app();
        app.handle_poll(PollMsg::Articles(sample_items()), now());
        app.select_first();
        app.toggle_bookmark();
        app.remove_selected_bookmark();
        assert_eq!(app.saved_articles().len(), 1);
    }

    #[test]
    fn article_without_id_cannot_be_saved() {
        let mut app = app();
        app.handle_poll(
            PollMsg::Articles(vec![Article {
                title: Some("anon".into()),
                ..Article::default()
            }]),
            now(),
        );
        app.select_first();
        app.toggle_bookmark();
        assert!(app.saved_articles().is_empty());
        assert!(app.status.contains("cannot be saved"));
    }

    // -- detail --------------------------------------------------------------

    #[test]
    fn detail_opens_and_returns_to_origin() {
        let mut app = app();
        app.handle_poll(PollMsg::Articles(sample_items()), now());
        app.select_next();
        app.select_next();

        app.open_detail();
        assert_eq!(app.view(), View::Detail);
        assert_eq!(app.detail().and_then(Article::id), Some("2"));

        app.select_next();
        assert_eq!(app.detail_scroll, 1, "j scrolls in detail");

        app.toggle_bookmark();
        assert_eq!(app.saved_articles().len(), 1);

        app.close_detail();
        assert_eq!(app.view(), View::Headlines);
        assert!(app.detail().is_none());
    }

    #[test]
    fn open_detail_without_selection_is_noop() {
        let mut app = app();
        app.open_detail();
        assert_eq!(app.view(), View::Headlines);
    }

    #[test]
    fn switch_view_is_ignored_in_detail() {
        let mut app = app();
        app.handle_poll(PollMsg::Articles(sample_items()), now());
        app.select_first();
        app.open_detail();
        app.switch_view();
        assert_eq!(app.view(), View::Detail);
    }

    // -- refresh -------------------------------------------------------------

    #[test]
    fn refresh_request_is_taken_once() {
        let mut app = app();
        assert!(!app.take_refresh_request());
        app.request_refresh();
        assert!(app.take_refresh_request());
        assert!(!app.take_refresh_request());
    }

    // -- navigation ----------------------------------------------------------

    #[test]
    fn navigation_on_empty_is_noop() {
        let mut app = app();
        app.select_next();
        app.select_previous();
        app.select_first();
        app.select_last();
        assert!(app.headlines_state.selected().is_none());
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        let mut app = app();
        app.handle_poll(PollMsg::Articles(sample_items()), now());

        app.select_next();
        assert_eq!(app.headlines_state.selected(), Some(0));
        app.select_last();
        app.select_next();
        assert_eq!(app.headlines_state.selected(), Some(2));
        app.select_first();
        app.select_previous();
        assert_eq!(app.headlines_state.selected(), Some(0));
    }
}
