// src/archive/index.rs
// =============================================================================
// Renders <output>/index.html: a card grid with one entry per archived page,
// in the order the pages were crawled. Pure presentation; styling is inline.
// =============================================================================

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::writer::{PageRecord, PAGES_DIR};
use crate::crawl::filename_href;

const TITLE_LIMIT: usize = 50;
const URL_LIMIT: usize = 80;

const STYLE: &str = r#"
        * { margin: 0; padding: 0; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            min-height: 100vh;
            padding: 20px;
        }
        .container {
            max-width: 1200px;
            margin: 0 auto;
            background: white;
            border-radius: 10px;
            padding: 40px;
            box-shadow: 0 20px 60px rgba(0, 0, 0, 0.3);
        }
        h1 { color: #333; margin-bottom: 10px; text-align: center; }
        .stats { text-align: center; color: #666; margin-bottom: 30px; font-size: 14px; }
        .pages-grid {
            display: grid;
            grid-template-columns: repeat(auto-fill, minmax(300px, 1fr));
            gap: 15px;
        }
        .page-card {
            background: #f8f9fa;
            padding: 20px;
            border-radius: 8px;
            border-left: 4px solid #667eea;
            text-decoration: none;
            color: #333;
        }
        .page-card:hover { background: #e9ecef; }
        .page-card h3 { color: #667eea; margin-bottom: 8px; font-size: 16px; word-break: break-word; }
        .page-card p { font-size: 12px; color: #999; word-break: break-all; }
"#;

pub fn render_index(domain: &str, records: &[PageRecord]) -> String {
    let domain = encode_text(domain);
    let mut html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Archived: {domain}</title>
    <style>{STYLE}    </style>
</head>
<body>
    <div class="container">
        <h1>Archived: {domain}</h1>
        <div class="stats">
            <p><strong>{count}</strong> pages archived</p>
        </div>
        <div class="pages-grid">
"#,
        count = records.len(),
    );

    for record in records {
        html.push_str(&format!(
            r#"            <a href="{dir}/{href}" class="page-card">
                <h3>{title}</h3>
                <p>{url}</p>
            </a>
"#,
            dir = PAGES_DIR,
            href = encode_double_quoted_attribute(&filename_href(&record.filename)),
            title = encode_text(&truncate(&record.title, TITLE_LIMIT)),
            url = encode_text(&truncate(&record.url, URL_LIMIT)),
        ));
    }

    html.push_str(
        r#"        </div>
    </div>
</body>
</html>
"#,
    );

    html
}

// Char-based so multi-byte titles are never cut mid-character
fn truncate(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
