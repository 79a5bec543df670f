// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing) on stderr
// 3. Crawl the site and write the archive
// 4. Print a summary (table or JSON)
// 5. Exit with proper code (0 = archived, 1 = nothing archived, 2 = error)
// =============================================================================

mod archive;    // src/archive/ - page files and index.html
mod cli;        // src/cli.rs - command-line parsing
mod crawl;      // src/crawl/ - normalization, frontier, crawl loop
mod error;      // src/error.rs - error types
mod fetch;      // src/fetch/ - HTTP retrieval
mod html;       // src/html/ - parsing, link discovery, serialization
mod rewrite;    // src/rewrite.rs - link rewriting

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use crawl::{CrawlReport, Crawler};
use fetch::HttpFetcher;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = at least one page archived
//   Ok(1) = crawl finished but nothing could be archived
//   Err   = fatal error (bad seed, filesystem failure, ...)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    let config = cli.crawl_config();
    if !cli.json {
        println!("🔍 Archiving website: {}", config.seed);
        println!("📊 Page budget: {}", config.max_pages);
        println!("📁 Output: {}", config.output.display());
    }

    let fetcher = HttpFetcher::new(cli.request_timeout(), &cli.user_agent)?;
    let report = Crawler::new(fetcher, config)?
        .run()
        .await
        .context("crawl aborted")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_table(&report);
    }

    if report.records.is_empty() {
        Ok(1)
    } else {
        Ok(0)
    }
}

fn init_logging(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

// Prints the archived pages and crawl counters as a human-readable table
fn print_table(report: &CrawlReport) {
    println!();
    println!("{:<50} {:<40}", "FILE", "URL");
    println!("{}", "=".repeat(90));

    for record in &report.records {
        println!("{:<50} {:<40}", record.filename, record.url);
    }

    println!();
    println!("📊 Summary:");
    println!("   ✅ Archived: {}", report.records.len());
    println!("   🌐 Visited: {}", report.visited);
    println!("   ❌ Failed: {}", report.failed);
    if report.collisions > 0 {
        println!("   ⚠️  Filename collisions: {}", report.collisions);
    }
    println!("   🔗 Links queued: {}", report.links_discovered);
    println!("   📄 Index: {}", report.index.display());
}
