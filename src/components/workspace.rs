//! Workspace screen: editor and preview side by side
//!
//! Pure rendering over the app state; the pieces are handed in through
//! `WorkspaceRenderContext` so this stays free of business logic.

use crate::components::{calculate_workspace_layout, EditorComponent, PreviewComponent};
use crate::model::{BusyState, HtmlDocument};
use anyhow::Result;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Which pane receives keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Editor,
    Preview,
}

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Everything the workspace needs from the app to render one frame
pub struct WorkspaceRenderContext<'a> {
    pub busy: BusyState,
    /// Drives the busy spinner; bumped every tick
    pub spinner_frame: u64,
    pub status_message: Option<&'a str>,
    pub focus: Focus,
}

pub fn draw_workspace(
    frame: &mut Frame,
    area: Rect,
    editor: &mut EditorComponent,
    preview: &mut PreviewComponent,
    doc: &HtmlDocument,
    ctx: &WorkspaceRenderContext,
) -> Result<()> {
    let layout = calculate_workspace_layout(area);

    editor.draw_with_document(frame, layout.editor, doc, ctx.focus == Focus::Editor)?;
    preview.draw_with_document(frame, layout.preview, doc, ctx.focus == Focus::Preview)?;

    draw_status_line(frame, layout.status, doc, ctx);
    draw_help_bar(frame, layout.help);

    Ok(())
}

fn draw_status_line(frame: &mut Frame, area: Rect, doc: &HtmlDocument, ctx: &WorkspaceRenderContext) {
    let mut spans = vec![Span::styled(
        format!(" {} bytes, {} lines ", doc.byte_len(), doc.line_count()),
        Style::default().fg(Color::DarkGray),
    )];

    if !ctx.busy.is_idle() {
        let spinner = SPINNER_FRAMES[(ctx.spinner_frame as usize) % SPINNER_FRAMES.len()];
        spans.push(Span::styled(
            format!(" {} {} ", spinner, ctx.busy.label()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }

    if let Some(message) = ctx.status_message {
        spans.push(Span::styled(
            format!(" {} ", message),
            Style::default().fg(Color::Green),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_help_bar(frame: &mut Frame, area: Rect) {
    let hint = |key: &'static str, label: &'static str| {
        vec![
            Span::styled(
                format!(" {} ", key),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(label),
            Span::raw(" "),
        ]
    };

    let mut spans = Vec::new();
    spans.extend(hint("Tab", "Switch pane"));
    spans.extend(hint("^P", "Print"));
    spans.extend(hint("^D", "PDF"));
    spans.extend(hint("^U", "URL"));
    spans.extend(hint("^O", "File"));
    spans.extend(hint("^E", "$EDITOR"));
    spans.extend(hint("F1", "Help"));
    spans.extend(hint("F2", "History"));
    spans.extend(hint("^Q", "Quit"));

    let help = Paragraph::new(Line::from(spans))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}
