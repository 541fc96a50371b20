//! Preview rendering
//!
//! Projects the HTML source into terminal text. This is a best-effort text
//! rendition (headings, paragraphs, list items, preformatted blocks), not a
//! layout engine; malformed HTML renders as whatever the parser recovers.

pub mod text;

pub use text::{document_title, extract_blocks, wrap, BlockKind, TextBlock};
