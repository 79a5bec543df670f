// src/rewrite.rs
// =============================================================================
// Rewrites hyperlinks in a fetched page so they point into the local archive.
//
// For every <a href>:
// - "#section"            -> left alone (in-page anchor)
// - link on our domain    -> "../pages/<filename>"
// - anything else         -> left alone (external sites, mailto:, ...)
//
// Images, scripts and stylesheets keep their original URLs.
// =============================================================================

use crate::crawl::{filename_href, to_filename, LinkTarget, NormalizedUrl, Scope};
use crate::error::CrawlError;
use crate::html::HtmlTree;

/// Prefix of a rewritten link, relative to a page stored in `pages/`.
pub const PAGE_LINK_PREFIX: &str = "../pages/";

pub struct LinkRewriter<'a> {
    scope: &'a Scope,
}

impl<'a> LinkRewriter<'a> {
    pub fn new(scope: &'a Scope) -> Self {
        LinkRewriter { scope }
    }

    /// Rewrites the in-scope links of `page` (fetched from `page_url`) and
    /// returns the serialized markup.
    pub fn rewrite<D: HtmlTree>(&self, page: &D, page_url: &NormalizedUrl) -> Result<String, CrawlError> {
        let base = page_url.as_url();

        page.rewrite_attr("a", "href", &mut |href| match self.scope.classify(href, base) {
            LinkTarget::InScope(target) => Some(local_link(&target)),
            LinkTarget::Anchor | LinkTarget::OutOfScope => None,
        });

        page.serialize().map_err(|source| CrawlError::Serialize {
            url: page_url.to_string(),
            source,
        })
    }
}

/// The href an archived page uses to reach `target`'s archived copy.
pub fn local_link(target: &NormalizedUrl) -> String {
    format!("{PAGE_LINK_PREFIX}{}", filename_href(&to_filename(target)))
}
