//! The core data types shared by every article source.
//!
//! [`Article`] mirrors the NewsData API's article record field for field,
//! including its JSON names, so the same type decodes API responses and
//! encodes the reading list and cache blobs.  RSS items are converted into
//! it too, leaving the API-only fields empty.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A single news article.
///
/// Every field is optional because the API omits or nulls them freely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Stable identifier, used for de-duplication and bookmarks.
    pub article_id: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
    pub keywords: Option<Vec<String>>,
    /// Authors.
    pub creator: Option<Vec<String>>,
    pub video_url: Option<String>,
    pub description: Option<String>,
    /// Full body; only some API plans return it.
    pub content: Option<String>,
    /// Publication date as the source sent it.  See [`Article::published`].
    #[serde(rename = "pubDate")]
    pub pub_date: Option<String>,
    pub image_url: Option<String>,
    pub source_id: Option<String>,
    pub source_priority: Option<i64>,
    pub source_url: Option<String>,
    pub source_icon: Option<String>,
    pub language: Option<String>,
    pub country: Option<Vec<String>>,
    pub category: Option<Vec<String>>,
}

impl Article {
    pub fn id(&self) -> Option<&str> {
        self.article_id.as_deref()
    }

    /// Parsed publication timestamp, `None` when missing or unparseable.
    pub fn published(&self) -> Option<DateTime<Utc>> {
        self.pub_date.as_deref().and_then(parse_pub_date)
    }

    /// Case-insensitive substring match against title and description.
    ///
    /// An empty query matches every article.
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        let hit = |field: &Option<String>| {
            field
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(&needle))
        };
        hit(&self.title) || hit(&self.description)
    }
}

/// Sort newest first.  Undated articles sink to the bottom; the sort is
/// stable so equal dates keep their incoming order.
pub fn sort_newest_first(articles: &mut [Article]) {
    // `None < Some(_)`, so under `Reverse` undated items come last.
    articles.sort_by_key(|a| std::cmp::Reverse(a.published()));
}

/// Accepts RFC 3339, the API's `YYYY-MM-DD HH:MM:SS` (UTC), a bare date,
/// and RFC 2822 as RSS feeds send it.
pub fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|n| Utc.from_utc_datetime(&n));
    }
    DateTime::parse_from_rfc2822(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

// ---------------------------------------------------------------------------
// API envelopes
// ---------------------------------------------------------------------------

/// Response of `GET /news`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsResponse {
    pub status: String,
    #[serde(rename = "totalResults")]
    pub total_results: u64,
    pub results: Vec<Article>,
    #[serde(rename = "nextPage")]
    pub next_page: Option<String>,
}

/// A publisher as listed by `GET /sources`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub category: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub language: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub country: Vec<String>,
}

/// Response of `GET /sources`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcesResponse {
    pub status: String,
    #[serde(rename = "results", alias = "sources")]
    pub sources: Vec<Publisher>,
}

/// The API is inconsistent about whether these are a string or a list.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
        None => Vec::new(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
