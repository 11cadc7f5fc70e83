//! Article sources.
//!
//! This module defines the [`ArticleSource`] trait that the refresh worker
//! polls, the [`HttpClient`] seam every HTTP-backed source goes through, and
//! the shared [`Article`] type.  Concrete sources live in sub-modules:
//!
//! * [`newsdata`]: the NewsData REST API (the primary source).
//! * [`rss`]: plain RSS 2.0 feeds listed in the config.
//!
//! ## Adding a new source
//!
//! 1. Create a new file in this directory.
//! 2. Implement [`ArticleSource`] for your struct, converting whatever the
//!    source returns into [`Article`]s.
//! 3. Re-export it below and construct it in `main.rs`.
//!
//! De-duplication, caching and bookmarking are all source-agnostic.

pub mod article;
mod http;
mod newsdata;
mod rss;

pub use article::{sort_newest_first, Article, NewsResponse, Publisher, SourcesResponse};
pub use http::{HttpClient, ReqwestClient};
pub use newsdata::{NewsApi, NewsQuery, DEFAULT_BASE_URL};
pub use rss::RssSource;

use crate::error::FetchError;

/// Trait that every article source must implement.
///
/// The refresh worker calls [`fetch()`](ArticleSource::fetch) on a
/// background thread, so implementations must be [`Send`].
pub trait ArticleSource: Send {
    /// Human-readable label used in status messages and logs.
    fn name(&self) -> &str;

    /// Fetch the latest batch of articles.
    ///
    /// Errors are not retried; they reach the UI as a status message.
    fn fetch(&self) -> Result<Vec<Article>, FetchError>;
}
