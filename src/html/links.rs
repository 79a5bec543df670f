// src/html/links.rs
// =============================================================================
// Extracts hyperlink targets from a parsed page.
//
// Only <a href> counts as a hyperlink. Images, scripts and stylesheets are
// not followed. The values come back raw, exactly as written in the page;
// resolving and scoping them is the Scope's job.
//
// Discovery reads the same HtmlTree the rewriter later edits, so each page is
// parsed once. Call it before rewriting, while the hrefs are still original.
// =============================================================================

use super::HtmlTree;

// Returns every <a href="..."> value in document order
//
// Example:
//   html = "<a href='/docs'>Docs</a><a href='#top'>Top</a>"
//   result = ["/docs", "#top"]
pub fn extract_links<D: HtmlTree>(page: &D) -> Vec<String> {
    let mut links = Vec::new();

    // Returning None leaves every attribute as it is
    page.rewrite_attr("a", "href", &mut |href| {
        links.push(href.to_string());
        None
    });

    links
}
