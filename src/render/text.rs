//! HTML-to-text projection for the preview pane

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

/// Block-level elements the preview knows how to present
static BLOCK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h1, h2, h3, h4, h5, h6, p, li, pre, blockquote").unwrap()
});

static BODY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());

static H1_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());

/// Collapses runs of whitespace the way an HTML renderer would
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

const BLOCK_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "li", "pre", "blockquote",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// h1-h6, with the heading level
    Heading(u8),
    Paragraph,
    ListItem,
    Preformatted,
    Quote,
}

/// One renderable block of text, in document order
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub kind: BlockKind,
    pub text: String,
}

/// Title shown above the preview: first h1, else <title>
pub fn document_title(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let text = doc
        .select(&H1_SELECTOR)
        .next()
        .or_else(|| doc.select(&TITLE_SELECTOR).next())
        .map(|el| collapse(&el.text().collect::<String>()))?;
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Project an HTML string onto a flat list of text blocks.
///
/// Nested block elements are attributed to the outermost match so text is
/// never emitted twice. When the document contains no block elements at all
/// (bare text), the whole body text becomes a single paragraph.
pub fn extract_blocks(html: &str) -> Vec<TextBlock> {
    let doc = Html::parse_document(html);
    let mut blocks = Vec::new();

    for el in doc.select(&BLOCK_SELECTOR) {
        if has_block_ancestor(&el) {
            continue;
        }
        let kind = match el.value().name() {
            "h1" => BlockKind::Heading(1),
            "h2" => BlockKind::Heading(2),
            "h3" => BlockKind::Heading(3),
            "h4" => BlockKind::Heading(4),
            "h5" => BlockKind::Heading(5),
            "h6" => BlockKind::Heading(6),
            "li" => BlockKind::ListItem,
            "pre" => BlockKind::Preformatted,
            "blockquote" => BlockKind::Quote,
            _ => BlockKind::Paragraph,
        };

        let raw: String = el.text().collect();
        let text = if kind == BlockKind::Preformatted {
            raw.trim_matches('\n').to_string()
        } else {
            collapse(&raw)
        };
        if text.is_empty() {
            continue;
        }
        blocks.push(TextBlock { kind, text });
    }

    if blocks.is_empty() {
        if let Some(body) = doc.select(&BODY_SELECTOR).next() {
            let text = collapse(&body.text().collect::<String>());
            if !text.is_empty() {
                blocks.push(TextBlock {
                    kind: BlockKind::Paragraph,
                    text,
                });
            }
        }
    }

    blocks
}

/// Greedy word wrap, width-aware for wide (CJK) characters
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
            continue;
        }
        if UnicodeWidthStr::width(current.as_str()) + 1 + UnicodeWidthStr::width(word) > width {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        } else {
            current.push(' ');
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn collapse(raw: &str) -> String {
    WHITESPACE.replace_all(raw.trim(), " ").to_string()
}

fn has_block_ancestor(el: &ElementRef) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| BLOCK_TAGS.contains(&a.value().name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_appear_in_document_order() {
        let html = "<html><body><h1>Title</h1><p>First</p><ul><li>One</li><li>Two</li></ul><p>Last</p></body></html>";
        let blocks = extract_blocks(html);
        let texts: Vec<&str> = blocks.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, vec!["Title", "First", "One", "Two", "Last"]);
        assert_eq!(blocks[0].kind, BlockKind::Heading(1));
        assert_eq!(blocks[2].kind, BlockKind::ListItem);
    }

    #[test]
    fn nested_blocks_are_not_emitted_twice() {
        let html = "<li><p>inner</p></li>";
        let blocks = extract_blocks(html);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "inner");
        assert_eq!(blocks[0].kind, BlockKind::ListItem);
    }

    #[test]
    fn bare_text_round_trips_as_a_paragraph() {
        let source = "just some plain text";
        let blocks = extract_blocks(source);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, source);
    }

    #[test]
    fn whitespace_collapses_like_a_renderer() {
        let blocks = extract_blocks("<p>  hello\n   world </p>");
        assert_eq!(blocks[0].text, "hello world");
    }

    #[test]
    fn preformatted_keeps_line_structure() {
        let blocks = extract_blocks("<pre>line one\n  line two</pre>");
        assert_eq!(blocks[0].kind, BlockKind::Preformatted);
        assert_eq!(blocks[0].text, "line one\n  line two");
    }

    #[test]
    fn malformed_html_renders_best_effort() {
        let blocks = extract_blocks("<p>unclosed <b>bold");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "unclosed bold");
    }

    #[test]
    fn title_prefers_h1_over_title_tag() {
        let html = "<html><head><title>Doc</title></head><body><h1>Big</h1></body></html>";
        assert_eq!(document_title(html), Some("Big".to_string()));
        assert_eq!(
            document_title("<html><head><title>Doc</title></head><body></body></html>"),
            Some("Doc".to_string())
        );
        assert_eq!(document_title("<p>no title</p>"), None);
    }

    #[test]
    fn wrap_respects_display_width() {
        let lines = wrap("aaa bbb ccc", 7);
        assert_eq!(lines, vec!["aaa bbb", "ccc"]);

        // CJK characters are double width
        let lines = wrap("中文 中文", 4);
        assert_eq!(lines, vec!["中文", "中文"]);
    }
}
