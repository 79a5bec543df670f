// src/archive/writer.rs
// =============================================================================
// Persists rewritten pages and remembers what was archived.
//
// Layout on disk:
//   <output>/index.html          (written last, by write_index)
//   <output>/pages/<filename>    (one per archived page)
//
// Each page is written exactly once. If a second URL maps to a filename that
// is already taken this run, the collision is logged and the second page is
// skipped rather than overwriting the first.
//
// Any filesystem failure is returned as CrawlError::Write and ends the crawl.
// =============================================================================

use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use super::index::render_index;
use crate::crawl::{to_filename, NormalizedUrl};
use crate::error::{CrawlError, Result};

pub const PAGES_DIR: &str = "pages";
pub const INDEX_FILE: &str = "index.html";

/// One archived page, as listed in the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    pub url: String,
    pub filename: String,
    pub title: String,
}

/// What happened to a page handed to `write_page`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(PathBuf),
    /// The filename already belongs to this other URL
    Collision { existing: String },
}

#[derive(Debug)]
pub struct ArchiveWriter {
    root: PathBuf,
    pages_dir: PathBuf,
    records: Vec<PageRecord>,
    owners: HashMap<String, String>,
}

impl ArchiveWriter {
    /// Creates `<root>/pages/` (and `root`) if needed.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let pages_dir = root.join(PAGES_DIR);
        fs::create_dir_all(&pages_dir).map_err(|source| CrawlError::Write {
            path: pages_dir.clone(),
            source,
        })?;

        Ok(ArchiveWriter {
            root,
            pages_dir,
            records: Vec::new(),
            owners: HashMap::new(),
        })
    }

    pub fn records(&self) -> &[PageRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<PageRecord> {
        self.records
    }

    /// Writes one page and records it for the index. A missing title falls
    /// back to the URL.
    pub fn write_page(&mut self, url: &NormalizedUrl, title: Option<String>, markup: &str) -> Result<WriteOutcome> {
        let filename = to_filename(url);

        if let Some(existing) = self.owners.get(&filename) {
            tracing::warn!(
                "Filename collision: {} and {} both map to {}; keeping the first",
                existing,
                url,
                filename
            );
            return Ok(WriteOutcome::Collision {
                existing: existing.clone(),
            });
        }

        let path = self.pages_dir.join(&filename);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| CrawlError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, markup).map_err(|source| CrawlError::Write {
            path: path.clone(),
            source,
        })?;

        self.owners.insert(filename.clone(), url.to_string());
        self.records.push(PageRecord {
            url: url.to_string(),
            filename,
            title: title.unwrap_or_else(|| url.to_string()),
        });

        Ok(WriteOutcome::Written(path))
    }

    /// Renders `<root>/index.html` from the pages written so far.
    pub fn write_index(&self, domain: &str) -> Result<PathBuf> {
        let path = self.root.join(INDEX_FILE);
        let html = render_index(domain, &self.records);
        fs::write(&path, html).map_err(|source| CrawlError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::info!("Generated {}", path.display());
        Ok(path)
    }
}
