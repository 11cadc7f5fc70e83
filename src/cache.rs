//! Time-boxed snapshot of the latest headlines.
//!
//! Used as the fallback when the network is down or the API rate-limits
//! us.  The snapshot is one JSON array plus a timestamp, each under its own
//! [`Store`] key.  Only the first `max_items` articles are kept.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::source::Article;
use crate::store::{Result, Store};

const CACHE_KEY: &str = "cached_news";
const TIMESTAMP_KEY: &str = "cached_news_timestamp";

pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);
pub const DEFAULT_MAX_ITEMS: usize = 50;

pub struct NewsCache {
    store: Arc<dyn Store>,
    ttl: Duration,
    max_items: usize,
    /// Last snapshot written or read, with its timestamp.
    memory: Option<(Vec<Article>, DateTime<Utc>)>,
}

impl NewsCache {
    pub fn new(store: Arc<dyn Store>, ttl: Duration, max_items: usize) -> Self {
        Self {
            store,
            ttl,
            max_items,
            memory: None,
        }
    }

    /// Replace the snapshot with (at most `max_items` of) `articles`.
    pub fn save(&mut self, articles: &[Article], now: DateTime<Utc>) -> Result<()> {
        let kept = &articles[..articles.len().min(self.max_items)];
        let encoded = serde_json::to_vec(kept)?;
        self.store.set(CACHE_KEY, &encoded)?;
        self.store.set(TIMESTAMP_KEY, now.to_rfc3339().as_bytes())?;
        self.memory = Some((kept.to_vec(), now));
        tracing::debug!(count = kept.len(), "headlines cached");
        Ok(())
    }

    /// The snapshot regardless of age.  An undecodable blob reads as `None`.
    pub fn load(&mut self) -> Result<Option<Vec<Article>>> {
        if let Some((articles, _)) = &self.memory {
            return Ok(Some(articles.clone()));
        }
        let Some(bytes) = self.store.get(CACHE_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_slice::<Vec<Article>>(&bytes) {
            Ok(articles) => {
                if let Some(ts) = self.timestamp()? {
                    self.memory = Some((articles.clone(), ts));
                }
                Ok(Some(articles))
            }
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable headline cache");
                Ok(None)
            }
        }
    }

    /// Whether the snapshot is younger than the TTL.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.age(now).is_some_and(|age| age < self.ttl)
    }

    /// The snapshot, but only while it is still valid.
    pub fn fresh(&mut self, now: DateTime<Utc>) -> Result<Option<Vec<Article>>> {
        if !self.is_valid(now) {
            return Ok(None);
        }
        self.load()
    }

    /// Time since the snapshot was written.  A timestamp in the future
    /// counts as age zero.
    pub fn age(&self, now: DateTime<Utc>) -> Option<Duration> {
        let saved = match &self.memory {
            Some((_, ts)) => *ts,
            None => self.timestamp().ok().flatten()?,
        };
        Some((now - saved).to_std().unwrap_or(Duration::ZERO))
    }

    pub fn clear(&mut self) -> Result<()> {
        self.memory = None;
        self.store.remove(CACHE_KEY)?;
        self.store.remove(TIMESTAMP_KEY)?;
        Ok(())
    }

    fn timestamp(&self) -> Result<Option<DateTime<Utc>>> {
        let Some(bytes) = self.store.get(TIMESTAMP_KEY)? else {
            return Ok(None);
        };
        let parsed = std::str::from_utf8(&bytes)
            .ok()
            .and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
            .map(|dt| dt.with_timezone(&Utc));
        Ok(parsed)
    }
}
