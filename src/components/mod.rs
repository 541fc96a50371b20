//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod editor;
pub mod help_dialog;
pub mod history_dialog;
pub mod layout;
pub mod preview;
pub mod quit_dialog;
pub mod splash;
pub mod workspace;

pub use editor::EditorComponent;
pub use help_dialog::HelpDialog;
pub use history_dialog::HistoryDialog;
pub use layout::{calculate_workspace_layout, centered_popup};
pub use preview::PreviewComponent;
pub use quit_dialog::QuitDialog;
pub use splash::SplashComponent;
pub use workspace::{draw_workspace, Focus, WorkspaceRenderContext};
