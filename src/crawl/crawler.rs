// src/crawl/crawler.rs
// =============================================================================
// The crawl loop.
//
// How it works:
// 1. Start with the seed URL in the frontier
// 2. Take the next URL (this marks it visited)
// 3. Fetch it; on failure log, optionally retry, then move on
// 4. Queue every same-domain link the page contains
// 5. Rewrite the page's links and write it to the archive
// 6. Repeat until the frontier is empty or the page budget is used up
// 7. Write the index page
//
// One request at a time: each fetch finishes before the next one starts.
// The frontier and the archive writer are owned by the Crawler and only the
// loop in `run` touches them.
// =============================================================================

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use super::frontier::Frontier;
use super::normalize::{NormalizedUrl, Scope};
use crate::archive::{ArchiveWriter, PageRecord, WriteOutcome};
use crate::error::{FetchError, Result};
use crate::fetch::Fetcher;
use crate::html::{extract_links, HtmlTree, RcDocument};
use crate::rewrite::LinkRewriter;

/// Everything the crawl controller needs to know up front.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub seed: String,
    pub output: PathBuf,
    pub max_pages: usize,
    /// Extra attempts after a failed fetch
    pub retries: u32,
    pub retry_backoff: Duration,
    /// Pause after each successful fetch
    pub delay: Duration,
}

/// Result of a finished crawl.
#[derive(Debug, Serialize)]
pub struct CrawlReport {
    pub domain: String,
    pub records: Vec<PageRecord>,
    pub visited: usize,
    pub failed: usize,
    pub collisions: usize,
    pub links_discovered: usize,
    pub index: PathBuf,
}

pub struct Crawler<F> {
    fetcher: F,
    scope: Scope,
    frontier: Frontier,
    archive: ArchiveWriter,
    config: CrawlConfig,
    failed: usize,
    collisions: usize,
    links_discovered: usize,
}

impl<F: Fetcher> Crawler<F> {
    /// Validates the seed and prepares the archive directory.
    pub fn new(fetcher: F, config: CrawlConfig) -> Result<Self> {
        let (scope, seed) = Scope::from_seed(&config.seed)?;
        let frontier = Frontier::new(seed, config.max_pages);
        let archive = ArchiveWriter::create(&config.output)?;

        Ok(Crawler {
            fetcher,
            scope,
            frontier,
            archive,
            config,
            failed: 0,
            collisions: 0,
            links_discovered: 0,
        })
    }

    /// Runs the crawl to completion. Fetch failures are skipped; the only
    /// errors returned are fatal ones (writing the archive).
    pub async fn run(mut self) -> Result<CrawlReport> {
        tracing::info!(
            "Starting crawl of {} (budget: {} pages)",
            self.scope.domain(),
            self.frontier.max_pages()
        );

        while let Some(url) = self.frontier.next() {
            tracing::info!(
                "Downloading ({}/{}): {}",
                self.frontier.visited_count(),
                self.frontier.max_pages(),
                url
            );

            let html = match self.fetch_with_retry(&url).await {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!("Error downloading {}: {}", url, e);
                    self.failed += 1;
                    continue;
                }
            };

            self.process_page(&html, &url)?;

            if !self.config.delay.is_zero() {
                tokio::time::sleep(self.config.delay).await;
            }
        }

        if self.frontier.budget_exhausted() && self.frontier.pending_count() > 0 {
            tracing::info!(
                "Page budget reached; {} discovered URLs left unvisited",
                self.frontier.pending_count()
            );
        }

        let domain = self.scope.domain();
        let index = self.archive.write_index(&domain)?;
        tracing::info!("Crawl complete! Archived {} pages", self.archive.records().len());

        Ok(CrawlReport {
            domain,
            visited: self.frontier.visited_count(),
            failed: self.failed,
            collisions: self.collisions,
            links_discovered: self.links_discovered,
            index,
            records: self.archive.into_records(),
        })
    }

    async fn fetch_with_retry(&self, url: &NormalizedUrl) -> std::result::Result<String, FetchError> {
        let mut attempt = 0;
        loop {
            match self.fetcher.fetch(url).await {
                Ok(html) => return Ok(html),
                Err(e) if attempt < self.config.retries => {
                    let backoff = self.config.retry_backoff.saturating_mul(2u32.saturating_pow(attempt));
                    tracing::debug!("Retrying {} in {:?} after error: {}", url, backoff, e);
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    // Parses once, queues the page's links, then rewrites and archives it.
    // Kept synchronous so the (non-Send) parse tree never lives across an await.
    fn process_page(&mut self, html: &str, url: &NormalizedUrl) -> Result<()> {
        let document = RcDocument::parse(html);
        self.enqueue_links(&document, url);
        self.archive_page(&document, url)
    }

    fn enqueue_links(&mut self, document: &RcDocument, page_url: &NormalizedUrl) {
        for href in extract_links(document) {
            match self.scope.normalize(&href, page_url.as_url()) {
                Some(link) => {
                    if self.frontier.push(link) {
                        self.links_discovered += 1;
                    }
                }
                None => tracing::debug!("Skipping out-of-scope link {} on {}", href, page_url),
            }
        }
    }

    fn archive_page(&mut self, document: &RcDocument, url: &NormalizedUrl) -> Result<()> {
        let title = document.title();
        let markup = LinkRewriter::new(&self.scope).rewrite(document, url)?;

        if let WriteOutcome::Collision { .. } = self.archive.write_page(url, title, &markup)? {
            self.collisions += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CrawlError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use url::Position;

    type RequestLog = Arc<Mutex<Vec<String>>>;

    // An in-memory website: path -> markup. Paths not listed return 404.
    #[derive(Default)]
    struct FakeSite {
        pages: HashMap<String, String>,
        failing: HashMap<String, usize>,
        requests: RequestLog,
        // Fetching this path replaces the pages directory with a plain file
        breaks_archive: Option<(String, PathBuf)>,
    }

    impl FakeSite {
        fn page(mut self, path: &str, links: &[&str]) -> Self {
            let anchors: String = links
                .iter()
                .map(|l| format!(r#"<a href="{l}">{l}</a>"#))
                .collect();
            self.pages.insert(
                path.to_string(),
                format!("<html><head><title>Page {path}</title></head><body>{anchors}</body></html>"),
            );
            self
        }

        // Fails the first `times` requests for `path` with a timeout
        fn flaky(mut self, path: &str, times: usize) -> Self {
            self.failing.insert(path.to_string(), times);
            self
        }

        fn breaks_archive(mut self, path: &str, pages_dir: &Path) -> Self {
            self.breaks_archive = Some((path.to_string(), pages_dir.to_path_buf()));
            self
        }

        fn log(&self) -> RequestLog {
            self.requests.clone()
        }
    }

    fn requests(log: &RequestLog) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    #[async_trait]
    impl Fetcher for FakeSite {
        async fn fetch(&self, url: &NormalizedUrl) -> std::result::Result<String, FetchError> {
            let path = url.as_url()[Position::BeforePath..].to_string();
            let earlier = {
                let mut requests = self.requests.lock().unwrap();
                let earlier = requests.iter().filter(|p| **p == path).count();
                requests.push(path.clone());
                earlier
            };

            if let Some((trigger, pages_dir)) = &self.breaks_archive {
                if *trigger == path {
                    std::fs::remove_dir_all(pages_dir).unwrap();
                    std::fs::write(pages_dir, "not a directory").unwrap();
                }
            }

            if let Some(&times) = self.failing.get(&path) {
                if earlier < times {
                    return Err(FetchError::Timeout);
                }
            }
            self.pages.get(&path).cloned().ok_or(FetchError::Status(404))
        }
    }

    fn config(output: &std::path::Path, max_pages: usize) -> CrawlConfig {
        CrawlConfig {
            seed: "https://example.com/".to_string(),
            output: output.to_path_buf(),
            max_pages,
            retries: 0,
            retry_backoff: Duration::ZERO,
            delay: Duration::ZERO,
        }
    }

    fn filenames(report: &CrawlReport) -> Vec<&str> {
        report.records.iter().map(|r| r.filename.as_str()).collect()
    }

    #[tokio::test]
    async fn test_budget_truncates_breadth_first() {
        let site = FakeSite::default()
            .page("/", &["/a", "/b"])
            .page("/a", &["/", "/c"])
            .page("/b", &[])
            .page("/c", &[]);
        let log = site.log();
        let dir = tempfile::tempdir().unwrap();

        let report = Crawler::new(site, config(dir.path(), 3)).unwrap().run().await.unwrap();

        assert_eq!(requests(&log), vec!["/", "/a", "/b"]);
        assert_eq!(filenames(&report), vec!["index.html", "a.html", "b.html"]);
        assert_eq!(report.visited, 3);
        assert!(dir.path().join("pages/index.html").exists());
        assert!(dir.path().join("pages/a.html").exists());
        assert!(dir.path().join("pages/b.html").exists());
        assert!(!dir.path().join("pages/c.html").exists());
        assert!(dir.path().join("index.html").exists());
    }

    #[tokio::test]
    async fn test_never_refetches_a_url() {
        let site = FakeSite::default()
            .page("/", &["/a", "/b", "/a", "/#top", "/"])
            .page("/a", &["/", "/b", "/a?", "/b#x"])
            .page("/b", &["/a", "/"]);
        let log = site.log();
        let dir = tempfile::tempdir().unwrap();

        let report = Crawler::new(site, config(dir.path(), 100)).unwrap().run().await.unwrap();

        assert_eq!(requests(&log), vec!["/", "/a", "/b"]);
        assert_eq!(report.visited, 3);
        assert_eq!(report.links_discovered, 2);
    }

    #[tokio::test]
    async fn test_stays_on_origin_domain() {
        let site = FakeSite::default()
            .page("/", &["https://other.com/x", "mailto:a@b.c", "/local"])
            .page("/local", &[]);
        let log = site.log();
        let dir = tempfile::tempdir().unwrap();

        let report = Crawler::new(site, config(dir.path(), 10)).unwrap().run().await.unwrap();

        assert_eq!(requests(&log), vec!["/", "/local"]);
        assert_eq!(report.records.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_skips_page_and_continues() {
        let site = FakeSite::default()
            .page("/", &["/a", "/b"])
            .page("/a", &[])
            .page("/b", &[])
            .flaky("/a", usize::MAX);
        let log = site.log();
        let dir = tempfile::tempdir().unwrap();

        let report = Crawler::new(site, config(dir.path(), 3)).unwrap().run().await.unwrap();

        assert_eq!(requests(&log), vec!["/", "/a", "/b"]);
        assert_eq!(filenames(&report), vec!["index.html", "b.html"]);
        assert_eq!(report.failed, 1);
        assert_eq!(report.visited, 3);
    }

    #[tokio::test]
    async fn test_retry_recovers_flaky_page() {
        let site = FakeSite::default().page("/", &[]).flaky("/", 2);
        let dir = tempfile::tempdir().unwrap();
        let log = site.log();
        let mut config = config(dir.path(), 1);
        config.retries = 2;

        let report = Crawler::new(site, config).unwrap().run().await.unwrap();

        assert_eq!(requests(&log).len(), 3);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.failed, 0);
    }

    #[tokio::test]
    async fn test_archived_page_links_are_rewritten() {
        let site = FakeSite::default()
            .page("/", &["/a", "#section", "https://other.com/x"])
            .page("/a", &[]);
        let log = site.log();
        let dir = tempfile::tempdir().unwrap();

        let report = Crawler::new(site, config(dir.path(), 10)).unwrap().run().await.unwrap();

        let home = std::fs::read_to_string(dir.path().join("pages/index.html")).unwrap();
        assert!(home.contains(r#"href="../pages/a.html""#));
        assert!(home.contains(r##"href="#section""##));
        assert!(home.contains(r#"href="https://other.com/x""#));
        assert_eq!(report.records[0].title, "Page /");
        assert_eq!(requests(&log), vec!["/", "/a"]);
    }

    #[tokio::test]
    async fn test_links_are_queued_in_document_order() {
        let site = FakeSite::default()
            .page("/", &["/z", "/m", "/a"])
            .page("/z", &[])
            .page("/m", &[])
            .page("/a", &[]);
        let log = site.log();
        let dir = tempfile::tempdir().unwrap();

        let report = Crawler::new(site, config(dir.path(), 10)).unwrap().run().await.unwrap();

        // Discovery sees the original hrefs, not the rewritten ../pages/ ones
        assert_eq!(requests(&log), vec!["/", "/z", "/m", "/a"]);
        assert_eq!(report.links_discovered, 3);
        let home = std::fs::read_to_string(dir.path().join("pages/index.html")).unwrap();
        assert!(home.contains(r#"href="../pages/z.html""#));
    }

    #[tokio::test]
    async fn test_write_failure_aborts_crawl() {
        let dir = tempfile::tempdir().unwrap();
        let site = FakeSite::default()
            .page("/", &["/a", "/b"])
            .page("/a", &[])
            .page("/b", &[])
            .breaks_archive("/a", &dir.path().join("pages"));
        let log = site.log();

        let result = Crawler::new(site, config(dir.path(), 10)).unwrap().run().await;

        assert!(matches!(result, Err(CrawlError::Write { .. })));
        assert_eq!(requests(&log), vec!["/", "/a"]);
        assert!(!dir.path().join("index.html").exists());
    }

    #[tokio::test]
    async fn test_unreachable_seed_still_writes_index() {
        let site = FakeSite::default();
        let log = site.log();
        let dir = tempfile::tempdir().unwrap();

        let report = Crawler::new(site, config(dir.path(), 10)).unwrap().run().await.unwrap();

        assert!(report.records.is_empty());
        assert_eq!(requests(&log), vec!["/"]);
        assert_eq!(report.failed, 1);
        assert!(dir.path().join("index.html").exists());
    }

    #[test]
    fn test_invalid_seed_is_rejected() {
        let site = FakeSite::default();
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(dir.path(), 10);
        config.seed = "not a url".to_string();

        let result = Crawler::new(site, config);

        assert!(matches!(result, Err(CrawlError::InvalidSeed { .. })));
    }
}
