//! Paragraph extraction from fetched HTML.
//!
//! Synchronous on purpose: `scraper::Html` is not `Send`, so the parsed
//! document must never cross an await point. Callers fetch the page, hand
//! the raw HTML here, and get owned strings back.

use scraper::{Html, Selector};

/// Text content of every `<p>` element in document order, skipping elements
/// with no text content.
pub fn extract_paragraphs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = match Selector::parse("p") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    document
        .select(&selector)
        .map(|el| el.text().collect::<String>())
        .filter(|text| !text.trim().is_empty())
        .collect()
}
