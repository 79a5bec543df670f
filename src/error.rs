// src/error.rs
// =============================================================================
// Error types for the archiver.
//
// Two families:
// - FetchError: one page could not be retrieved. The crawl logs it, skips the
//   page and keeps going.
// - CrawlError: something that must stop the run (bad seed URL, HTTP client
//   could not be built, the archive could not be written).
//
// Links that point outside the origin domain are NOT errors. They are the
// `LinkTarget::OutOfScope` variant in crawl/normalize.rs.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Why a single page fetch failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("HTTP {0}")]
    Status(u16),

    #[error("too many redirects")]
    TooManyRedirects,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("{0}")]
    Other(String),
}

/// Fatal errors that abort the crawl.
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("invalid seed URL '{url}': {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize rewritten page {url}: {source}")]
    Serialize {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CrawlError>;
