//! The NewsData REST API (`https://newsdata.io`).

use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;

use super::{ArticleSource, HttpClient, NewsResponse, SourcesResponse};
use crate::error::FetchError;
use crate::source::Article;

pub const DEFAULT_BASE_URL: &str = "https://newsdata.io/api/1";

/// Optional filters appended to the `/news` query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsQuery {
    pub language: Option<String>,
    pub country: Option<String>,
    pub category: Option<String>,
    /// Free-text search on the API side.
    pub q: Option<String>,
}

impl NewsQuery {
    fn pairs(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("language", self.language.as_deref()),
            ("country", self.country.as_deref()),
            ("category", self.category.as_deref()),
            ("q", self.q.as_deref()),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.filter(|v| !v.is_empty()).map(|v| (k, v)))
    }
}

pub struct NewsApi {
    http: Box<dyn HttpClient>,
    base_url: String,
    api_key: String,
    query: NewsQuery,
}

impl NewsApi {
    pub fn new(
        http: Box<dyn HttpClient>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
            query: NewsQuery::default(),
        }
    }

    pub fn with_query(mut self, query: NewsQuery) -> Self {
        self.query = query;
        self
    }

    pub fn news_url(&self) -> Result<Url, FetchError> {
        self.endpoint("news", self.query.pairs())
    }

    pub fn sources_url(&self) -> Result<Url, FetchError> {
        self.endpoint("sources", std::iter::empty())
    }

    fn endpoint<'a>(
        &self,
        path: &str,
        extra: impl Iterator<Item = (&'static str, &'a str)>,
    ) -> Result<Url, FetchError> {
        let raw = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let mut url = Url::parse(&raw).map_err(|_| FetchError::InvalidUrl(raw.clone()))?;
        if url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(raw));
        }
        url.query_pairs_mut()
            .append_pair("apikey", &self.api_key)
            .extend_pairs(extra);
        Ok(url)
    }

    pub fn fetch_news(&self) -> Result<NewsResponse, FetchError> {
        let url = self.news_url()?;
        tracing::debug!(endpoint = "news", "requesting headlines");
        let body = self.http.get(&url).inspect_err(|e| {
            tracing::warn!(endpoint = "news", error = %e, "request failed");
        })?;
        decode(&body)
    }

    pub fn fetch_sources(&self) -> Result<SourcesResponse, FetchError> {
        let url = self.sources_url()?;
        tracing::debug!(endpoint = "sources", "requesting publishers");
        let body = self.http.get(&url).inspect_err(|e| {
            tracing::warn!(endpoint = "sources", error = %e, "request failed");
        })?;
        decode(&body)
    }
}

impl ArticleSource for NewsApi {
    fn name(&self) -> &str {
        "NewsData"
    }

    fn fetch(&self) -> Result<Vec<Article>, FetchError> {
        Ok(self.fetch_news()?.results)
    }
}

/// Decode a response body, turning `{"status": "error", ...}` into
/// [`FetchError::Api`] instead of a confusing decode error.
fn decode<T: for<'de> Deserialize<'de>>(body: &[u8]) -> Result<T, FetchError> {
    let value: Value = serde_json::from_slice(body).inspect_err(|e| {
        tracing::warn!(error = %e, "response is not JSON");
    })?;

    if value.get("status").and_then(Value::as_str) == Some("error") {
        let message = value
            .pointer("/results/message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(FetchError::Api { message });
    }

    Ok(serde_json::from_value(value)?)
}
