//! Live preview pane
//!
//! Renders the document's block structure as styled terminal text. Layout is
//! recomputed only when the document revision or the pane width changes; the
//! document revision counter makes that cheap to detect.

use crate::action::Action;
use crate::component::Component;
use crate::model::HtmlDocument;
use crate::render::{document_title, extract_blocks, wrap, BlockKind, TextBlock};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// One laid-out preview row
#[derive(Debug, Clone, PartialEq)]
struct PreviewLine {
    kind: BlockKind,
    text: String,
    /// First row of its block; list bullets only go on the first row
    first: bool,
}

struct PreviewCache {
    revision: u64,
    width: u16,
    title: Option<String>,
    lines: Vec<PreviewLine>,
}

/// Preview pane state
#[derive(Default)]
pub struct PreviewComponent {
    pub scroll: usize,
    cache: Option<PreviewCache>,
    viewport_rows: usize,
}

impl PreviewComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn page_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(self.viewport_rows.max(1));
    }

    pub fn page_down(&mut self) {
        self.scroll = self.scroll.saturating_add(self.viewport_rows.max(1));
    }

    fn ensure_cache(&mut self, doc: &HtmlDocument, width: u16) {
        let fresh = self
            .cache
            .as_ref()
            .is_some_and(|c| c.revision == doc.revision() && c.width == width);
        if fresh {
            return;
        }
        let source = doc.source();
        self.cache = Some(PreviewCache {
            revision: doc.revision(),
            width,
            title: document_title(&source),
            lines: layout_blocks(&extract_blocks(&source), width as usize),
        });
    }

    pub fn draw_with_document(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        doc: &HtmlDocument,
        focused: bool,
    ) -> Result<()> {
        let border_color = if focused { Color::Cyan } else { Color::DarkGray };
        let inner_width = area.width.saturating_sub(2);
        self.ensure_cache(doc, inner_width);

        // Pull owned data out of the cache before touching scroll state
        let (title, total, lines) = {
            let cache = self.cache.as_ref().unwrap();
            let title = match &cache.title {
                Some(t) => format!(" Preview: {} ", t),
                None => " Preview ".to_string(),
            };
            let lines: Vec<Line> = cache.lines.iter().map(styled_line).collect();
            (title, cache.lines.len(), lines)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(title)
            .title_style(Style::default().fg(border_color).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        self.viewport_rows = inner.height.max(1) as usize;

        let max_scroll = total.saturating_sub(self.viewport_rows);
        if self.scroll > max_scroll {
            self.scroll = max_scroll;
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((self.scroll as u16, 0));
        frame.render_widget(paragraph, area);

        if total > self.viewport_rows {
            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(self.scroll);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                area.inner(ratatui::layout::Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

impl Component for PreviewComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Tab => Some(Action::FocusNextPane),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs document data, so we use draw_with_document
        Ok(())
    }
}

/// Flatten the blocks into rows at the given width, with a blank separator
/// row between blocks
fn layout_blocks(blocks: &[TextBlock], width: usize) -> Vec<PreviewLine> {
    let width = width.max(4);
    let mut rows = Vec::new();

    for block in blocks {
        if !rows.is_empty() {
            rows.push(PreviewLine {
                kind: BlockKind::Paragraph,
                text: String::new(),
                first: false,
            });
        }

        match block.kind {
            BlockKind::Preformatted => {
                for (i, line) in block.text.split('\n').enumerate() {
                    rows.push(PreviewLine {
                        kind: block.kind,
                        text: line.to_string(),
                        first: i == 0,
                    });
                }
            }
            BlockKind::ListItem | BlockKind::Quote => {
                // Two columns reserved for the bullet or quote marker
                for (i, line) in wrap(&block.text, width - 2).into_iter().enumerate() {
                    rows.push(PreviewLine {
                        kind: block.kind,
                        text: line,
                        first: i == 0,
                    });
                }
            }
            _ => {
                for (i, line) in wrap(&block.text, width).into_iter().enumerate() {
                    rows.push(PreviewLine {
                        kind: block.kind,
                        text: line,
                        first: i == 0,
                    });
                }
            }
        }
    }

    rows
}

fn styled_line(row: &PreviewLine) -> Line<'static> {
    match row.kind {
        BlockKind::Heading(1) => Line::from(Span::styled(
            row.text.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        BlockKind::Heading(_) => Line::from(Span::styled(
            row.text.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        BlockKind::ListItem => {
            let marker = if row.first { "• " } else { "  " };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Yellow)),
                Span::raw(row.text.clone()),
            ])
        }
        BlockKind::Quote => Line::from(vec![
            Span::styled("│ ", Style::default().fg(Color::DarkGray)),
            Span::styled(row.text.clone(), Style::default().fg(Color::Gray)),
        ]),
        BlockKind::Preformatted => Line::from(Span::styled(
            row.text.clone(),
            Style::default().fg(Color::Green),
        )),
        BlockKind::Paragraph => Line::from(row.text.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(kind: BlockKind, text: &str) -> TextBlock {
        TextBlock {
            kind,
            text: text.to_string(),
        }
    }

    #[test]
    fn blocks_are_separated_by_blank_rows() {
        let rows = layout_blocks(
            &[
                block(BlockKind::Heading(1), "Title"),
                block(BlockKind::Paragraph, "Body"),
            ],
            40,
        );
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].text, "Title");
        assert_eq!(rows[1].text, "");
        assert_eq!(rows[2].text, "Body");
    }

    #[test]
    fn list_items_mark_only_their_first_row() {
        let rows = layout_blocks(&[block(BlockKind::ListItem, "one two three four")], 10);
        assert!(rows.len() > 1);
        assert!(rows[0].first);
        assert!(rows[1..].iter().all(|r| !r.first));
    }

    #[test]
    fn preformatted_rows_are_not_wrapped() {
        let text = "a very long preformatted line that exceeds the pane width";
        let rows = layout_blocks(&[block(BlockKind::Preformatted, text)], 10);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text, text);
    }

    #[test]
    fn paragraph_wraps_to_width() {
        let rows = layout_blocks(&[block(BlockKind::Paragraph, "aaa bbb ccc")], 7);
        let texts: Vec<&str> = rows.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["aaa bbb", "ccc"]);
    }
}
