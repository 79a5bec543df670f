// src/crawl/filename.rs
// =============================================================================
// Maps a normalized URL to the name of its file under <output>/pages/.
//
// The mapping is a pure function of the URL (no counters, no randomness), so
// the same page lands in the same file on every run:
//   https://example.com/            -> index.html
//   https://example.com/a           -> a.html
//   https://example.com/docs/       -> docs_index.html
//   https://example.com/a/b?x=1&y=2 -> a_b_x-1_y-2.html
//
// Known limitation: distinct URLs can flatten to the same name
// (/a/b and /a_b both become a_b.html). The archive writer detects and logs
// this; the mapping itself stays as is.
//
// Filenames keep the URL's percent-escapes literally (/caf%C3%A9 is stored as
// caf%C3%A9.html). A browser decodes escapes in an href before opening the
// file, so any href pointing at an archived file must go through
// `filename_href`, which escapes the '%' again.
// =============================================================================

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use super::normalize::NormalizedUrl;

const INDEX_SEGMENT: &str = "index";
const EXTENSION: &str = ".html";

/// Flattens the URL path (and query) into a single file name.
pub fn to_filename(url: &NormalizedUrl) -> String {
    let path = url.path().trim_start_matches('/');
    let path = if path.is_empty() || path.ends_with('/') {
        format!("{path}{INDEX_SEGMENT}")
    } else {
        path.to_string()
    };

    let mut filename = path.replace('/', "_");

    if let Some(query) = url.query().filter(|q| !q.is_empty()) {
        filename.push('_');
        filename.push_str(&query.replace('=', "-").replace(['&', '/'], "_"));
    }

    if !filename.ends_with(EXTENSION) {
        filename.push_str(EXTENSION);
    }

    filename
}

// Characters a browser would interpret in a relative href
const HREF_ESCAPES: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`');

/// The href text that makes a browser open `filename` exactly as written.
pub fn filename_href(filename: &str) -> String {
    utf8_percent_encode(filename, HREF_ESCAPES).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::normalize::Scope;

    fn filename_for(raw: &str) -> String {
        let (scope, seed) = Scope::from_seed("https://example.com/").unwrap();
        let url = scope.normalize(raw, seed.as_url()).unwrap();
        to_filename(&url)
    }

    #[test]
    fn test_root_is_index() {
        assert_eq!(filename_for("https://example.com/"), "index.html");
        assert_eq!(filename_for("https://example.com"), "index.html");
    }

    #[test]
    fn test_simple_paths() {
        assert_eq!(filename_for("/a"), "a.html");
        assert_eq!(filename_for("/b"), "b.html");
    }

    #[test]
    fn test_nested_path_is_flattened() {
        assert_eq!(filename_for("/blog/2024/post"), "blog_2024_post.html");
    }

    #[test]
    fn test_trailing_slash_gets_index() {
        assert_eq!(filename_for("/docs/"), "docs_index.html");
    }

    #[test]
    fn test_query_is_appended() {
        assert_eq!(filename_for("/list?page=2&sort=asc"), "list_page-2_sort-asc.html");
    }

    #[test]
    fn test_existing_extension_is_kept() {
        assert_eq!(filename_for("/about.html"), "about.html");
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let first = filename_for("/x/y?z=1");
        for _ in 0..5 {
            assert_eq!(filename_for("/x/y?z=1"), first);
        }
    }

    #[test]
    fn test_percent_escapes_stay_in_filename() {
        assert_eq!(filename_for("/café"), "caf%C3%A9.html");
        assert_eq!(filename_for("/a%20b"), "a%20b.html");
    }

    #[test]
    fn test_filename_href_escapes_percent() {
        assert_eq!(filename_href("a.html"), "a.html");
        assert_eq!(filename_href("caf%C3%A9.html"), "caf%25C3%25A9.html");
        assert_eq!(filename_href("q_x-a?b.html"), "q_x-a%3Fb.html");
    }

    #[test]
    fn test_known_collision() {
        assert_eq!(filename_for("/a/b"), filename_for("/a_b"));
    }
}
