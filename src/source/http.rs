//! The HTTP seam.
//!
//! Sources never talk to `reqwest` directly; they go through
//! [`HttpClient`] so tests can script responses.

use std::time::Duration;

use reqwest::Url;

use crate::error::FetchError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// A blocking `GET` that yields the response body.
pub trait HttpClient: Send {
    /// Non-2xx statuses come back as [`FetchError::Http`].
    fn get(&self, url: &Url) -> Result<Vec<u8>, FetchError>;
}

/// [`HttpClient`] backed by `reqwest`'s blocking client.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("newsdesk/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url.clone()).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }
        Ok(response.bytes()?.to_vec())
    }
}
