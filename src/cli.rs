// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is a single command: archive one website. Everything the crawl needs
// (seed, output directory, page budget, timeouts) comes from these flags and
// is turned into a CrawlConfig by `Cli::crawl_config`.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::crawl::CrawlConfig;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Parser, Debug)]
#[command(
    name = "site-archiver",
    version,
    about = "Mirror a single website into a browsable local archive",
    long_about = "site-archiver crawls one website breadth-first, saves every reachable page under \
                  <output>/pages/, rewrites links between those pages to point at the local copies \
                  and writes an index.html listing everything it archived."
)]
pub struct Cli {
    /// Seed URL; its host is the only domain that will be crawled
    ///
    /// Example: site-archiver https://example.com/ -o archive
    pub seed_url: String,

    /// Directory the archive is written to
    #[arg(short, long, default_value = "archive")]
    pub output: PathBuf,

    /// Maximum number of pages to visit (failed fetches count too)
    #[arg(short = 'n', long, default_value_t = 200)]
    pub max_pages: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// How many times to retry a page that failed to download
    #[arg(long, default_value_t = 0)]
    pub retries: u32,

    /// Delay before the first retry in milliseconds; doubles on each retry
    #[arg(long, default_value_t = 500)]
    pub retry_backoff_ms: u64,

    /// Pause between page downloads in milliseconds
    #[arg(long, default_value_t = 100)]
    pub delay_ms: u64,

    /// User-Agent header sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Print the archived pages as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// More log output (-v debug, -vv trace). RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig {
            seed: self.seed_url.clone(),
            output: self.output.clone(),
            max_pages: self.max_pages,
            retries: self.retries,
            retry_backoff: Duration::from_millis(self.retry_backoff_ms),
            delay: Duration::from_millis(self.delay_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
