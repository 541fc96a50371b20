//! Action enum - All possible application actions
//!
//! Components emit Actions in response to key events; the App processes
//! them to update state. Long-running operations only ever start through
//! an explicit Start* action, which is where busy-state gating happens.

use std::fmt;
use std::path::PathBuf;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick; drives job polling and the splash timer
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,
    /// Transition from splash to the workspace
    SplashComplete,
    /// Switch focus between editor and preview pane
    FocusNextPane,

    // ─────────────────────────────────────────────────────────────────────────
    // Editor
    // ─────────────────────────────────────────────────────────────────────────
    /// Type a character at the cursor
    EditorInput(char),
    /// Split the current line at the cursor
    EditorNewline,
    /// Delete the character before the cursor
    EditorBackspace,
    /// Delete the character under the cursor
    EditorDelete,
    /// Cursor movement
    EditorUp,
    EditorDown,
    EditorLeft,
    EditorRight,
    EditorHome,
    EditorEnd,
    EditorPageUp,
    EditorPageDown,
    /// Hand the source to $EDITOR (suspends the TUI)
    OpenExternalEditor,

    // ─────────────────────────────────────────────────────────────────────────
    // Preview scrolling
    // ─────────────────────────────────────────────────────────────────────────
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenUrlImport,
    OpenFileImport,
    OpenHistory,
    OpenHelp,
    /// Close the current modal
    CloseModal,
    /// Navigate inside the active modal
    ModalUp,
    ModalDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Export / Import operations
    // ─────────────────────────────────────────────────────────────────────────
    /// Hand the document to the system viewer for printing
    StartPrint,
    /// Start the screenshot PDF export in the background
    StartPdfExport,
    /// Submit the URL typed into the import dialog
    SubmitUrlImport,
    /// Submit the path typed into the import dialog
    SubmitFileImport(PathBuf),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::SplashComplete => write!(f, "SplashComplete"),
            Action::FocusNextPane => write!(f, "FocusNextPane"),
            Action::EditorInput(c) => write!(f, "EditorInput('{}')", c),
            Action::EditorNewline => write!(f, "EditorNewline"),
            Action::EditorBackspace => write!(f, "EditorBackspace"),
            Action::EditorDelete => write!(f, "EditorDelete"),
            Action::EditorUp => write!(f, "EditorUp"),
            Action::EditorDown => write!(f, "EditorDown"),
            Action::EditorLeft => write!(f, "EditorLeft"),
            Action::EditorRight => write!(f, "EditorRight"),
            Action::EditorHome => write!(f, "EditorHome"),
            Action::EditorEnd => write!(f, "EditorEnd"),
            Action::EditorPageUp => write!(f, "EditorPageUp"),
            Action::EditorPageDown => write!(f, "EditorPageDown"),
            Action::OpenExternalEditor => write!(f, "OpenExternalEditor"),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::PageUp => write!(f, "PageUp"),
            Action::PageDown => write!(f, "PageDown"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenUrlImport => write!(f, "OpenUrlImport"),
            Action::OpenFileImport => write!(f, "OpenFileImport"),
            Action::OpenHistory => write!(f, "OpenHistory"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ModalUp => write!(f, "ModalUp"),
            Action::ModalDown => write!(f, "ModalDown"),
            Action::StartPrint => write!(f, "StartPrint"),
            Action::StartPdfExport => write!(f, "StartPdfExport"),
            Action::SubmitUrlImport => write!(f, "SubmitUrlImport"),
            Action::SubmitFileImport(p) => write!(f, "SubmitFileImport({})", p.display()),
        }
    }
}
