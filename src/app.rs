//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components. All
//! long-running work (rasterization, proxy fetches) runs through JobRunners
//! and is gated on the busy state, so only one operation is in flight at a
//! time and the event loop never blocks.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    centered_popup, draw_workspace, EditorComponent, Focus, HelpDialog, HistoryDialog,
    PreviewComponent, QuitDialog, SplashComponent, WorkspaceRenderContext,
};
use crate::config::Config;
use crate::model::{
    BusyState, History, HistoryEntry, HtmlDocument, JobKind, JobStatus, Modal, ModalStack,
    HISTORY_LIMIT,
};
use crate::services::{
    self, default_proxies, normalize_url, ChromeRasterizer, ExportReport, JobRunner,
    EXPORT_FILE_NAME,
};
use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::path::PathBuf;

/// Current application screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Splash,
    Running,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Current application mode
    pub mode: AppMode,

    /// The document being authored
    pub document: HtmlDocument,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// What the app is currently occupied with
    pub busy: BusyState,

    /// Background runner for the screenshot PDF export
    pub export_runner: JobRunner<ExportReport>,

    /// Background runner for URL imports
    pub import_runner: JobRunner<String>,

    /// Target URL of the import in flight, for history and messages
    pending_import_url: Option<String>,

    /// Export/import history, newest first
    pub history: Vec<HistoryEntry>,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: Option<String>,

    /// Which pane has keyboard focus
    pub focus: Focus,

    /// Pending external editor file (set by OpenExternalEditor, handled by
    /// the main loop because it has to suspend the terminal)
    pub pending_editor_file: Option<PathBuf>,

    /// Bumped every tick; drives the busy spinner
    tick_count: u64,

    /// Current config
    pub config: Config,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub splash: SplashComponent,
    pub editor: EditorComponent,
    pub preview: PreviewComponent,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
    pub history_dialog: HistoryDialog,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new App instance
    pub fn new() -> App {
        App {
            mode: AppMode::Splash,
            document: HtmlDocument::default(),
            modals: ModalStack::new(),
            busy: BusyState::Idle,
            export_runner: JobRunner::new(),
            import_runner: JobRunner::new(),
            pending_import_url: None,
            history: History::load(),
            should_quit: false,
            status_message: None,
            focus: Focus::Editor,
            pending_editor_file: None,
            tick_count: 0,
            config: Config::load().unwrap_or_default(),
            splash: SplashComponent::new(),
            editor: EditorComponent::new(),
            preview: PreviewComponent::new(),
            quit_dialog: QuitDialog,
            help_dialog: HelpDialog::default(),
            history_dialog: HistoryDialog::default(),
        }
    }

    /// Replace the document from an import or $EDITOR round trip
    pub fn replace_document(&mut self, source: &str) {
        self.document.set_source(source);
        self.editor.clamp_cursor(&self.document);
        self.preview.scroll = 0;
    }

    /// Prepend a history entry and persist the log
    fn record_history(&mut self, kind: JobKind, detail: String, status: JobStatus, secs: f64) {
        let entry = HistoryEntry {
            timestamp: Local::now(),
            kind,
            detail,
            status,
            duration_secs: secs,
        };
        self.history.insert(0, entry);
        if self.history.len() > HISTORY_LIMIT {
            self.history.truncate(HISTORY_LIMIT);
        }
        let _ = History::save(&self.history);
    }

    /// Check both runners for completed work
    fn poll_jobs(&mut self) {
        let export_secs = self.export_runner.elapsed_secs();
        if let Some(outcome) = self.export_runner.poll() {
            self.busy = BusyState::Idle;
            match outcome {
                Ok(report) => {
                    self.status_message = Some(format!("Saved {}", report.path.display()));
                    self.record_history(
                        JobKind::PdfExport,
                        report.path.display().to_string(),
                        JobStatus::Success,
                        export_secs,
                    );
                }
                Err(msg) => {
                    self.record_history(
                        JobKind::PdfExport,
                        EXPORT_FILE_NAME.to_string(),
                        JobStatus::Failed,
                        export_secs,
                    );
                    self.modals.push(Modal::Alert {
                        message: format!(
                            "PDF export failed: {}\n\nThe print route (Ctrl+p) works without a local browser.",
                            msg
                        ),
                    });
                }
            }
        }

        let import_secs = self.import_runner.elapsed_secs();
        if let Some(outcome) = self.import_runner.poll() {
            self.busy = BusyState::Idle;
            let url = self.pending_import_url.take().unwrap_or_default();
            match outcome {
                Ok(content) => {
                    self.replace_document(&content);
                    if matches!(self.modals.top(), Some(Modal::UrlImport { .. })) {
                        self.modals.pop();
                    }
                    self.status_message = Some(format!("Imported {}", url));
                    self.record_history(JobKind::UrlImport, url, JobStatus::Success, import_secs);
                }
                Err(msg) => {
                    self.record_history(
                        JobKind::UrlImport,
                        url.clone(),
                        JobStatus::Failed,
                        import_secs,
                    );
                    self.modals.push(Modal::Alert {
                        message: format!("Could not fetch {}: {}", url, msg),
                    });
                }
            }
        }
    }

    fn start_pdf_export(&mut self) {
        if !self.busy.is_idle() {
            self.status_message = Some(format!("Busy: {}", self.busy.label()));
            return;
        }

        let html = self.document.source();
        let out_dir = self.config.output_dir();
        let settle = self.config.settle_delay();

        self.busy = BusyState::Exporting;
        self.status_message = Some("Exporting PDF...".to_string());
        self.export_runner.spawn(move || {
            services::export_pdf(&ChromeRasterizer, &html, &out_dir, settle)
                .map_err(|e| e.to_string())
        });
    }

    fn submit_url_import(&mut self) {
        if !self.busy.is_idle() {
            return;
        }
        let typed = match self.modals.top() {
            Some(Modal::UrlImport { url }) => url.trim().to_string(),
            _ => return,
        };
        if typed.is_empty() {
            return;
        }

        let target = normalize_url(&typed);
        self.pending_import_url = Some(target.clone());
        self.busy = BusyState::Importing;
        self.status_message = Some(format!("Fetching {}...", target));
        self.import_runner
            .spawn(move || services::fetch_url(&default_proxies(), &target).map_err(|e| e.to_string()));
    }

    fn submit_file_import(&mut self, path: PathBuf) {
        match services::read_file(&path) {
            Ok(content) => {
                self.replace_document(&content);
                if matches!(self.modals.top(), Some(Modal::FileImport { .. })) {
                    self.modals.pop();
                }
                self.status_message = Some(format!("Imported {}", path.display()));
                self.record_history(
                    JobKind::FileImport,
                    path.display().to_string(),
                    JobStatus::Success,
                    0.0,
                );
            }
            Err(e) => {
                self.record_history(
                    JobKind::FileImport,
                    path.display().to_string(),
                    JobStatus::Failed,
                    0.0,
                );
                self.modals.push(Modal::Alert {
                    message: format!("Could not read {}: {}", path.display(), e),
                });
            }
        }
    }

    fn start_print(&mut self) {
        match services::open_in_viewer(&self.document.source()) {
            Some(path) => {
                self.status_message =
                    Some("Opened in the system viewer; print or save as PDF from there".to_string());
                self.record_history(
                    JobKind::PrintHandoff,
                    path.display().to_string(),
                    JobStatus::Success,
                    0.0,
                );
            }
            None => {
                self.modals.push(Modal::Alert {
                    message: "Could not stage the document for the system viewer.".to_string(),
                });
            }
        }
    }

    fn open_external_editor(&mut self) {
        let path = std::env::temp_dir().join("html2pdf-tui-edit.html");
        match std::fs::write(&path, self.document.source()) {
            Ok(()) => self.pending_editor_file = Some(path),
            Err(e) => {
                self.modals.push(Modal::Alert {
                    message: format!("Could not stage the document for $EDITOR: {}", e),
                });
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.splash.init()?;
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.mode {
            AppMode::Splash => self.splash.handle_key_event(key),
            AppMode::Running => {
                if let Some(modal) = self.modals.top().cloned() {
                    return self.handle_modal_key_event(&modal, key);
                }

                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    match key.code {
                        KeyCode::Char('q') => return Ok(Some(Action::OpenQuitDialog)),
                        KeyCode::Char('p') => return Ok(Some(Action::StartPrint)),
                        KeyCode::Char('d') => return Ok(Some(Action::StartPdfExport)),
                        KeyCode::Char('u') => return Ok(Some(Action::OpenUrlImport)),
                        KeyCode::Char('o') => return Ok(Some(Action::OpenFileImport)),
                        KeyCode::Char('e') => return Ok(Some(Action::OpenExternalEditor)),
                        _ => {}
                    }
                }

                match key.code {
                    KeyCode::F(1) => Ok(Some(Action::OpenHelp)),
                    KeyCode::F(2) => Ok(Some(Action::OpenHistory)),
                    _ => match self.focus {
                        Focus::Editor => self.editor.handle_key_event(key),
                        Focus::Preview => self.preview.handle_key_event(key),
                    },
                }
            }
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                self.tick_count = self.tick_count.wrapping_add(1);
                if self.mode == AppMode::Splash && self.splash.is_complete() {
                    return Ok(Some(Action::SplashComplete));
                }
                self.poll_jobs();
            }
            Action::SplashComplete => {
                self.mode = AppMode::Running;
            }
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}
            Action::FocusNextPane => {
                self.focus = match self.focus {
                    Focus::Editor => Focus::Preview,
                    Focus::Preview => Focus::Editor,
                };
            }

            // ─────────────────────────────────────────────────────────────────
            // Editor (delegate to EditorComponent against the document)
            // ─────────────────────────────────────────────────────────────────
            Action::EditorInput(c) => self.editor.insert(&mut self.document, c),
            Action::EditorNewline => self.editor.newline(&mut self.document),
            Action::EditorBackspace => self.editor.backspace(&mut self.document),
            Action::EditorDelete => self.editor.delete(&mut self.document),
            Action::EditorUp => self.editor.move_up(&self.document),
            Action::EditorDown => self.editor.move_down(&self.document),
            Action::EditorLeft => self.editor.move_left(&self.document),
            Action::EditorRight => self.editor.move_right(&self.document),
            Action::EditorHome => self.editor.move_home(),
            Action::EditorEnd => self.editor.move_end(&self.document),
            Action::EditorPageUp => self.editor.page_up(&self.document),
            Action::EditorPageDown => self.editor.page_down(&self.document),
            Action::OpenExternalEditor => self.open_external_editor(),

            // ─────────────────────────────────────────────────────────────────
            // Preview scrolling
            // ─────────────────────────────────────────────────────────────────
            Action::ScrollUp => self.preview.scroll_up(),
            Action::ScrollDown => self.preview.scroll_down(),
            Action::PageUp => self.preview.page_up(),
            Action::PageDown => self.preview.page_down(),

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenUrlImport => {
                self.modals.push(Modal::UrlImport { url: String::new() });
            }
            Action::OpenFileImport => {
                self.modals.push(Modal::FileImport {
                    path: String::new(),
                });
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help { scroll_offset: 0 });
            }
            Action::OpenHistory => {
                self.history_dialog.selected_index = 0;
                if matches!(self.modals.top(), Some(Modal::History { .. })) {
                    self.modals.pop();
                } else {
                    self.modals.push(Modal::History { selected_index: 0 });
                }
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ModalUp => {
                if matches!(self.modals.top(), Some(Modal::History { .. })) {
                    self.history_dialog.update(Action::ModalUp)?;
                    if let Some(Modal::History { selected_index }) = self.modals.top_mut() {
                        *selected_index = self.history_dialog.selected_index;
                    }
                }
            }
            Action::ModalDown => {
                if matches!(self.modals.top(), Some(Modal::History { .. })) {
                    // Clamp before incrementing
                    let max = self.history.len().saturating_sub(1);
                    if self.history_dialog.selected_index < max {
                        self.history_dialog.update(Action::ModalDown)?;
                    }
                    if let Some(Modal::History { selected_index }) = self.modals.top_mut() {
                        *selected_index = self.history_dialog.selected_index;
                    }
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Export / Import operations
            // ─────────────────────────────────────────────────────────────────
            Action::StartPrint => self.start_print(),
            Action::StartPdfExport => self.start_pdf_export(),
            Action::SubmitUrlImport => self.submit_url_import(),
            Action::SubmitFileImport(path) => self.submit_file_import(path),
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        match self.mode {
            AppMode::Splash => self.splash.draw(frame, area)?,
            AppMode::Running => {
                let ctx = WorkspaceRenderContext {
                    busy: self.busy,
                    spinner_frame: self.tick_count,
                    status_message: self.status_message.as_deref(),
                    focus: self.focus,
                };

                draw_workspace(
                    frame,
                    area,
                    &mut self.editor,
                    &mut self.preview,
                    &self.document,
                    &ctx,
                )?;

                if let Some(modal) = self.modals.top().cloned() {
                    self.draw_modal(frame, area, &modal)?;
                }
            }
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::Help { .. } => self.help_dialog.handle_key_event(key),
            Modal::History { .. } => self.history_dialog.handle_key_event(key),
            Modal::Alert { .. } => {
                let action = match key.code {
                    KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(Action::CloseModal),
                    _ => None,
                };
                Ok(action)
            }
            Modal::UrlImport { .. } => {
                // Input is frozen while the fetch is in flight; an export
                // running in the background does not lock the dialog
                if self.busy == BusyState::Importing {
                    return Ok(None);
                }
                let action = match key.code {
                    KeyCode::Esc => Some(Action::CloseModal),
                    KeyCode::Enter => Some(Action::SubmitUrlImport),
                    KeyCode::Backspace => {
                        if let Some(Modal::UrlImport { url }) = self.modals.top_mut() {
                            url.pop();
                        }
                        None
                    }
                    KeyCode::Char(c) => {
                        if let Some(Modal::UrlImport { url }) = self.modals.top_mut() {
                            url.push(c);
                        }
                        None
                    }
                    _ => None,
                };
                Ok(action)
            }
            Modal::FileImport { path } => {
                let action = match key.code {
                    KeyCode::Esc => Some(Action::CloseModal),
                    KeyCode::Enter => Some(Action::SubmitFileImport(PathBuf::from(path))),
                    KeyCode::Backspace => {
                        if let Some(Modal::FileImport { path }) = self.modals.top_mut() {
                            path.pop();
                        }
                        None
                    }
                    KeyCode::Char(c) => {
                        if let Some(Modal::FileImport { path }) = self.modals.top_mut() {
                            path.push(c);
                        }
                        None
                    }
                    _ => None,
                };
                Ok(action)
            }
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::Help { .. } => self.help_dialog.draw(frame, area)?,
            Modal::History { .. } => {
                self.history_dialog.draw_with_history(frame, area, &self.history)?;
            }
            Modal::UrlImport { url } => {
                self.draw_input_modal(
                    frame,
                    area,
                    " Import from URL ",
                    "Fetch a page through the relay proxies:",
                    url,
                    self.busy == BusyState::Importing,
                );
            }
            Modal::FileImport { path } => {
                self.draw_input_modal(
                    frame,
                    area,
                    " Import from file ",
                    "Path of the HTML file to load:",
                    path,
                    false,
                );
            }
            Modal::Alert { message } => {
                self.draw_alert(frame, area, message);
            }
        }
        Ok(())
    }

    /// One-line text input popup shared by the URL and file import dialogs
    fn draw_input_modal(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        prompt: &str,
        input: &str,
        fetching: bool,
    ) {
        let popup_area = centered_popup(area, 64, 9);
        frame.render_widget(Clear, popup_area);

        let footer = if fetching {
            Line::from(Span::styled(
                "Trying relay proxies in order, please wait...",
                Style::default().fg(Color::Yellow),
            ))
        } else {
            Line::from(vec![
                Span::styled(
                    " Enter ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Import  "),
                Span::styled(
                    " Esc ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Cancel"),
            ])
        };

        let content = vec![
            Line::from(""),
            Line::from(Span::styled(
                prompt.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("> {}_", input),
                Style::default().fg(Color::Cyan),
            )),
            Line::from(""),
            footer,
        ];

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green))
                    .title(title.to_string())
                    .title_style(
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .alignment(ratatui::layout::Alignment::Center);

        frame.render_widget(paragraph, popup_area);
    }

    /// Blocking alert; dismissed with Enter or Esc
    fn draw_alert(&self, frame: &mut Frame, area: Rect, message: &str) {
        let height = (message.lines().count() as u16 + 6).min(area.height);
        let popup_area = centered_popup(area, 64, height);
        frame.render_widget(Clear, popup_area);

        let mut content = vec![Line::from("")];
        for line in message.lines() {
            content.push(Line::from(line.to_string()));
        }
        content.push(Line::from(""));
        content.push(Line::from(vec![
            Span::styled(
                " Enter/Esc ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Dismiss"),
        ]));

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Problem ")
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            )
            .alignment(ratatui::layout::Alignment::Center)
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_app() -> App {
        let mut app = App::new();
        app.mode = AppMode::Running;
        app
    }

    #[test]
    fn export_is_rejected_while_busy() {
        let mut app = running_app();
        app.busy = BusyState::Importing;
        app.update(Action::StartPdfExport).unwrap();
        assert!(!app.export_runner.is_running());
        assert_eq!(app.busy, BusyState::Importing);
    }

    #[test]
    fn url_submit_needs_a_nonempty_address() {
        let mut app = running_app();
        app.modals.push(Modal::UrlImport {
            url: "   ".to_string(),
        });
        app.update(Action::SubmitUrlImport).unwrap();
        assert!(!app.import_runner.is_running());
        assert!(app.busy.is_idle());
    }

    #[test]
    fn failed_file_import_leaves_document_untouched() {
        let mut app = running_app();
        let before = app.document.source();
        app.modals.push(Modal::FileImport {
            path: "/definitely/not/here.html".to_string(),
        });
        app.update(Action::SubmitFileImport(PathBuf::from(
            "/definitely/not/here.html",
        )))
        .unwrap();
        assert_eq!(app.document.source(), before);
        assert!(matches!(app.modals.top(), Some(Modal::Alert { .. })));
    }

    #[test]
    fn focus_toggles_between_panes() {
        let mut app = running_app();
        assert_eq!(app.focus, Focus::Editor);
        app.update(Action::FocusNextPane).unwrap();
        assert_eq!(app.focus, Focus::Preview);
        app.update(Action::FocusNextPane).unwrap();
        assert_eq!(app.focus, Focus::Editor);
    }

    #[test]
    fn quit_flows_through_the_confirmation_dialog() {
        let mut app = running_app();
        app.update(Action::OpenQuitDialog).unwrap();
        assert!(matches!(app.modals.top(), Some(Modal::QuitConfirm)));
        app.update(Action::CloseModal).unwrap();
        assert!(app.modals.is_empty());
        assert!(!app.should_quit);
        app.update(Action::ForceQuit).unwrap();
        assert!(app.should_quit);
    }

    /// Drive ticks until the runners have delivered their outcome
    fn tick_until_idle(app: &mut App) {
        for _ in 0..200 {
            app.update(Action::Tick).unwrap();
            if app.busy.is_idle() && !app.export_runner.is_running() {
                return;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        panic!("job did not complete in time");
    }

    #[test]
    fn busy_resets_after_a_successful_export() {
        let mut app = running_app();
        app.busy = BusyState::Exporting;
        app.export_runner.spawn(|| {
            Ok(ExportReport {
                path: PathBuf::from("/tmp/html-export.pdf"),
            })
        });

        tick_until_idle(&mut app);

        assert!(app.busy.is_idle());
        assert!(app
            .status_message
            .as_deref()
            .unwrap()
            .contains("html-export.pdf"));
        assert!(app.modals.is_empty());
    }

    #[test]
    fn failed_export_resets_busy_and_offers_the_print_route() {
        let mut app = running_app();
        app.busy = BusyState::Exporting;
        app.export_runner.spawn(|| Err("no browser".to_string()));

        tick_until_idle(&mut app);

        assert!(app.busy.is_idle());
        match app.modals.top() {
            Some(Modal::Alert { message }) => {
                assert!(message.contains("no browser"));
                assert!(message.contains("Ctrl+p"));
            }
            other => panic!("expected an alert, got {:?}", other),
        }
    }

    #[test]
    fn background_export_does_not_freeze_the_url_dialog() {
        let mut app = running_app();
        app.busy = BusyState::Exporting;
        app.modals.push(Modal::UrlImport { url: String::new() });

        let action = app.handle_key_event(KeyEvent::from(KeyCode::Esc)).unwrap();
        assert_eq!(action, Some(Action::CloseModal));
        app.update(Action::CloseModal).unwrap();
        assert!(app.modals.is_empty());
    }

    #[test]
    fn import_dialog_input_is_frozen_while_fetching() {
        let mut app = running_app();
        app.modals.push(Modal::UrlImport {
            url: "example.com".to_string(),
        });
        app.busy = BusyState::Importing;

        let action = app
            .handle_key_event(KeyEvent::from(KeyCode::Esc))
            .unwrap();
        assert!(action.is_none());
        assert!(matches!(app.modals.top(), Some(Modal::UrlImport { .. })));
    }

    #[test]
    fn editor_actions_mutate_the_document() {
        let mut app = running_app();
        app.document.set_source("x");
        app.editor.cursor_row = 0;
        app.editor.cursor_col = 1;
        app.update(Action::EditorInput('y')).unwrap();
        assert_eq!(app.document.source(), "xy");
    }
}
