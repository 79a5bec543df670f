// src/crawl/normalize.rs
// =============================================================================
// URL normalization and domain confinement.
//
// Every link we find goes through `Scope` before it can reach the frontier or
// the rewriter. A normalized URL is:
// - absolute (relative links are resolved against the page they came from)
// - fragment-free (#section is dropped)
// - credential-free (user:password@ is dropped)
// - on the origin host (same host and same explicit port as the seed)
//
// Two links that resolve to the same scheme/host/path/query produce the same
// `NormalizedUrl`, so it doubles as the deduplication key.
// =============================================================================

use std::fmt;
use url::Url;

use crate::error::CrawlError;

/// An absolute, fragment-free URL on the origin domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedUrl(Url);

impl NormalizedUrl {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn path(&self) -> &str {
        self.0.path()
    }

    pub fn query(&self) -> Option<&str> {
        self.0.query()
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a raw `href` value turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// A page on the origin domain
    InScope(NormalizedUrl),
    /// Another host, another scheme (mailto:, javascript:) or unparseable
    OutOfScope,
    /// An in-page anchor such as `#section`
    Anchor,
}

/// The crawl boundary: the host (and explicit port) of the seed URL.
#[derive(Debug, Clone)]
pub struct Scope {
    host: String,
    port: Option<u16>,
}

impl Scope {
    /// Builds the scope from the seed URL and returns the normalized seed.
    pub fn from_seed(seed: &str) -> Result<(Self, NormalizedUrl), CrawlError> {
        let invalid = |reason: String| CrawlError::InvalidSeed {
            url: seed.to_string(),
            reason,
        };

        let parsed = Url::parse(seed.trim()).map_err(|e| invalid(e.to_string()))?;
        if !is_web_scheme(&parsed) {
            return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
        }
        let host = parsed
            .host_str()
            .ok_or_else(|| invalid("URL has no host".to_string()))?
            .to_string();

        let scope = Scope {
            host,
            port: parsed.port(),
        };
        let normalized = scope
            .normalize(parsed.as_str(), &parsed)
            .ok_or_else(|| invalid("URL could not be normalized".to_string()))?;

        Ok((scope, normalized))
    }

    /// The origin domain, as shown in logs and the index page.
    pub fn domain(&self) -> String {
        match self.port {
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        }
    }

    /// Resolves `raw` against `base` and confines it to the origin domain.
    ///
    /// Returns `None` for empty input, unparseable links and anything that
    /// leaves the origin.
    pub fn normalize(&self, raw: &str, base: &Url) -> Option<NormalizedUrl> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let mut url = base.join(raw).ok()?;
        url.set_fragment(None);
        // Only fails for URLs that cannot carry credentials, which have none
        let _ = url.set_username("");
        let _ = url.set_password(None);
        if url.query() == Some("") {
            url.set_query(None);
        }

        if !is_web_scheme(&url) || url.host_str() != Some(self.host.as_str()) || url.port() != self.port {
            return None;
        }

        Some(NormalizedUrl(url))
    }

    /// Three-way classification used by the link rewriter.
    pub fn classify(&self, raw: &str, base: &Url) -> LinkTarget {
        if raw.trim_start().starts_with('#') {
            return LinkTarget::Anchor;
        }
        match self.normalize(raw, base) {
            Some(url) => LinkTarget::InScope(url),
            None => LinkTarget::OutOfScope,
        }
    }
}

fn is_web_scheme(url: &Url) -> bool {
    url.scheme() == "http" || url.scheme() == "https"
}
