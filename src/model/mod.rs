//! Model layer - centralized state management
//!
//! - `HtmlDocument` - the HTML source under edit (single source of truth)
//! - `BusyState` - explicit idle/exporting/importing state machine
//! - `ModalStack` - modal overlay management
//! - `History` - persisted record of exports and imports

pub mod document;
pub mod history;
pub mod modal;
pub mod status;

pub use document::{HtmlDocument, DEFAULT_HTML};
pub use history::{History, HistoryEntry, HISTORY_LIMIT};
pub use modal::{Modal, ModalStack};
pub use status::{BusyState, JobKind, JobStatus};
