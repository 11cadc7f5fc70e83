//! Error types for fetching and persistence.
//!
//! Fetch failures are never retried: they are turned into a single status
//! line via [`FetchError::user_message`] and the UI falls back to the cache.

use thiserror::Error;

/// Everything that can go wrong while fetching articles from a source.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error: {status}")]
    Http { status: u16 },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The API answered with `"status": "error"`.
    #[error("API error: {message}")]
    Api { message: String },

    #[error("could not parse feed: {0}")]
    Feed(String),
}

impl FetchError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FetchError::Http { status: 429 })
    }

    /// The string shown to the user in the status bar.
    pub fn user_message(&self) -> String {
        match self {
            e if e.is_rate_limited() => {
                "API rate limit reached. Try again in a few minutes (daily limit is 200 requests)."
                    .to_string()
            }
            e => format!("Could not load headlines: {e}"),
        }
    }
}

/// Shown while the refresh worker reports the network as down.
pub const OFFLINE_MESSAGE: &str =
    "No internet connection. Headlines will load automatically once the connection is back.";

/// Failures of the key/value [`Store`](crate::store::Store).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode value: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("invalid store key: {0:?}")]
    InvalidKey(String),
}
