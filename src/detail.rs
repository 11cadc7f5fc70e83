//! Presentation of a single article for the detail pane.

use reqwest::Url;

use crate::source::Article;

const UNKNOWN: &str = "Unknown";

/// Read-only view over an [`Article`] with display fallbacks applied.
pub struct ArticleDetail<'a> {
    article: &'a Article,
}

impl<'a> ArticleDetail<'a> {
    pub fn new(article: &'a Article) -> Self {
        Self { article }
    }

    pub fn title(&self) -> &'a str {
        self.article.title.as_deref().unwrap_or("(untitled)")
    }

    pub fn creator(&self) -> String {
        match self.article.creator.as_deref() {
            Some(names) if !names.is_empty() => names.join(", "),
            _ => UNKNOWN.to_string(),
        }
    }

    /// Formatted date, else the raw string the source sent, else "Unknown".
    pub fn published(&self) -> String {
        if let Some(dt) = self.article.published() {
            return dt.format("%d %b %Y %H:%M").to_string();
        }
        self.article
            .pub_date
            .clone()
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// Full content when available, otherwise the description.
    pub fn content(&self) -> Option<&'a str> {
        self.article
            .content
            .as_deref()
            .or(self.article.description.as_deref())
    }

    pub fn image_url(&self) -> Option<Url> {
        self.article
            .image_url
            .as_deref()
            .and_then(|s| Url::parse(s).ok())
    }

    pub fn source(&self) -> &'a str {
        self.article.source_id.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn link(&self) -> Option<&'a str> {
        self.article.link.as_deref()
    }
}
