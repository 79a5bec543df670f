// src/archive/mod.rs
// =============================================================================
// The on-disk archive: rewritten pages under pages/ and a browsable index.
// =============================================================================

mod index;
mod writer;

pub use writer::{ArchiveWriter, PageRecord, WriteOutcome};
