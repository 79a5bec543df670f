// src/fetch/mod.rs
// =============================================================================
// Page retrieval.
//
// The crawl loop only knows the `Fetcher` trait: give it a URL, get back the
// page markup or a FetchError. The real implementation is HttpFetcher (reqwest);
// tests plug in an in-memory site instead.
// =============================================================================

mod http;

use async_trait::async_trait;

use crate::crawl::NormalizedUrl;
use crate::error::FetchError;

pub use http::HttpFetcher;

/// Something that can turn a URL into page markup.
///
/// Implementations must follow redirects and report non-2xx responses as
/// errors.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &NormalizedUrl) -> Result<String, FetchError>;
}
