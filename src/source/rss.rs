//! RSS 2.0 feeds as an additional article source.

use reqwest::Url;

use super::{Article, ArticleSource, HttpClient};
use crate::error::FetchError;

/// An RSS feed listed under `[[feeds]]` in the config.
pub struct RssSource {
    http: Box<dyn HttpClient>,
    url: String,
    label: String,
}

impl RssSource {
    /// * `url`: full URL of the feed.
    /// * `label`: stored as the article's `source_id`.
    pub fn new(http: Box<dyn HttpClient>, url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            label: label.into(),
        }
    }

    /// Convert an already-parsed channel.  Pure, so tests skip the network.
    pub fn parse_channel(channel: &rss::Channel, label: &str) -> Vec<Article> {
        channel
            .items()
            .iter()
            .map(|item| {
                // Prefer <guid>, fall back to <link>.
                let article_id = item
                    .guid()
                    .map(|g| g.value().to_string())
                    .or_else(|| item.link().map(String::from));

                // Normalise to RFC 3339 when the date parses; keep the raw
                // text otherwise so the detail pane can still show it.
                let pub_date = item.pub_date().map(|raw| {
                    super::article::parse_pub_date(raw)
                        .map(|dt| dt.to_rfc3339())
                        .unwrap_or_else(|| raw.to_string())
                });

                let creator = item
                    .author()
                    .or_else(|| item.dublin_core_ext().and_then(|dc| dc.creators().first().map(String::as_str)))
                    .map(|a| vec![a.to_string()]);

                let category = Some(item.categories())
                    .filter(|c| !c.is_empty())
                    .map(|c| c.iter().map(|c| c.name().to_string()).collect());

                Article {
                    article_id,
                    title: item.title().map(String::from),
                    link: item.link().map(String::from),
                    creator,
                    description: item.description().map(String::from),
                    content: item.content().map(String::from),
                    pub_date,
                    image_url: item
                        .enclosure()
                        .filter(|e| e.mime_type().starts_with("image/"))
                        .map(|e| e.url().to_string()),
                    source_id: Some(label.to_string()),
                    source_url: channel_link(channel),
                    category,
                    ..Article::default()
                }
            })
            .collect()
    }
}

fn channel_link(channel: &rss::Channel) -> Option<String> {
    Some(channel.link()).filter(|l| !l.is_empty()).map(String::from)
}

impl ArticleSource for RssSource {
    fn name(&self) -> &str {
        &self.label
    }

    fn fetch(&self) -> Result<Vec<Article>, FetchError> {
        let url = Url::parse(&self.url).map_err(|_| FetchError::InvalidUrl(self.url.clone()))?;
        let body = self.http.get(&url)?;
        let channel = rss::Channel::read_from(body.as_slice())
            .map_err(|e| FetchError::Feed(e.to_string()))?;
        Ok(Self::parse_channel(&channel, &self.label))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
