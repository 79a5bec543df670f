// src/fetch/http.rs
// =============================================================================
// HTTP fetcher built on reqwest.
//
// Key functionality:
// - One reqwest Client reused for every request (connection pooling)
// - Per-request timeout and a browser-like User-Agent
// - Follows up to 5 redirects
// - Sorts reqwest failures into FetchError kinds (timeout, redirect loop,
//   connection problems, ...)
//
// Rust concepts:
// - async/await: the request is awaited, but the crawl sends one at a time
// - Result<T, E>: every failure is returned, never panicked on
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::Fetcher;
use crate::crawl::NormalizedUrl;
use crate::error::{CrawlError, FetchError};

const MAX_REDIRECTS: usize = 5;

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, CrawlError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(HttpFetcher { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &NormalizedUrl) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.as_url().clone())
            .send()
            .await
            .map_err(categorize_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))
    }
}

// Categorizes the reqwest error types we care about
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_redirect() {
        FetchError::TooManyRedirects
    } else if error.is_connect() {
        FetchError::Connect(error.to_string())
    } else {
        FetchError::Other(error.to_string())
    }
}
