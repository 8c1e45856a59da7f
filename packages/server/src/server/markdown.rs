//! Markdown rendering with heading-anchor augmentation.
//!
//! Every heading gets a slugified `id` and a self-link so sections of the
//! rendered document are directly addressable.

use pulldown_cmark::{html, Event, HeadingLevel, Parser, Tag};

/// Render markdown to an HTML fragment. Headings become
/// `<hN id="slug"><a href="#slug">text</a><span>🔗</span></hN>`; everything
/// else is rendered normally.
pub fn render(markdown: &str) -> String {
    let mut out = String::new();
    let mut pending: Vec<Event> = Vec::new();
    let mut heading: Option<(HeadingLevel, String)> = None;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading(level, _, _)) => {
                html::push_html(&mut out, pending.drain(..));
                heading = Some((level, String::new()));
            }
            Event::End(Tag::Heading(..)) => {
                if let Some((level, text)) = heading.take() {
                    let slug = slugify(&text);
                    let text = escape_html(&text);
                    out.push_str(&format!(
                        "<{level} id=\"{slug}\"><a href=\"#{slug}\">{text}</a><span>🔗</span></{level}>"
                    ));
                }
            }
            // Inline formatting inside a heading is flattened to its text.
            Event::Text(t) | Event::Code(t) if heading.is_some() => {
                if let Some((_, buffer)) = heading.as_mut() {
                    buffer.push_str(&t);
                }
            }
            Event::SoftBreak | Event::HardBreak if heading.is_some() => {
                if let Some((_, buffer)) = heading.as_mut() {
                    buffer.push(' ');
                }
            }
            // Formatting markers inside a heading are dropped with it.
            _ if heading.is_some() => {}
            other => pending.push(other),
        }
    }

    html::push_html(&mut out, pending.into_iter());
    out
}

/// Lowercase the text and collapse every run of non-word characters into a
/// single `-`.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut previous_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            slug.push(c.to_ascii_lowercase());
            previous_dash = false;
        } else if !previous_dash {
            slug.push('-');
            previous_dash = true;
        }
    }
    slug
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_collapses_non_word_runs() {
        assert_eq!(slugify("Data We Collect"), "data-we-collect");
        assert_eq!(slugify("Cookies & Tracking"), "cookies-tracking");
        assert_eq!(slugify("What's   new?"), "what-s-new-");
    }

    #[test]
    fn test_headings_get_id_and_self_link() {
        let html = render("# Privacy Policy\n\nSome text.");
        assert!(html.contains("<h1 id=\"privacy-policy\">"));
        assert!(html.contains("<a href=\"#privacy-policy\">Privacy Policy</a>"));
        assert!(html.contains("<span>🔗</span></h1>"));
        assert!(html.contains("<p>Some text.</p>"));
    }

    #[test]
    fn test_heading_levels_preserved() {
        let html = render("## Second Level");
        assert!(html.contains("<h2 id=\"second-level\">"));
        assert!(html.ends_with("</h2>"));
    }

    #[test]
    fn test_heading_text_is_escaped() {
        let html = render("# a < b");
        assert!(html.contains(">a &lt; b</a>"));
    }

    #[test]
    fn test_inline_formatting_in_heading_flattened() {
        let html = render("# *Styled* Heading");
        assert!(html.contains("<h1 id=\"styled-heading\">"));
        assert!(html.contains(">Styled Heading</a>"));
        assert!(!html.contains("<em>"));
    }

    #[test]
    fn test_body_markdown_renders_normally() {
        let html = render("plain *emphasis* text");
        assert!(html.contains("<em>emphasis</em>"));
    }
}
