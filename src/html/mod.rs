// src/html/mod.rs
// =============================================================================
// HTML handling.
//
// Submodules:
// - dom: the HtmlTree capability trait and its html5ever implementation, used
//   to read the title, rewrite attributes and serialize the page back out
// - links: link discovery on top of HtmlTree
//
// The rest of the crate talks to parsed pages only through HtmlTree, so the
// parser behind it can be swapped.
// =============================================================================

mod dom;
mod links;

pub use dom::{HtmlTree, RcDocument};
pub use links::extract_links;
