// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Same-domain restriction (never leaves the seed's host)
// - Hard page budget
// - Deterministic URL -> filename mapping for the archive
//
// Submodules, in dependency order:
// - normalize: URL canonicalization and scope checks
// - filename: URL -> archive filename
// - frontier: FIFO queue + visited set
// - crawler: the loop that ties fetch, rewrite and archive together
// =============================================================================

mod crawler;
mod filename;
mod frontier;
mod normalize;

pub use crawler::{CrawlConfig, CrawlReport, Crawler};
pub use filename::{filename_href, to_filename};
pub use normalize::{LinkTarget, NormalizedUrl, Scope};
