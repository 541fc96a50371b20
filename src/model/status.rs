//! Busy-state machine gating long-running operations
//!
//! A single explicit state value instead of separate `is_exporting` and
//! `is_importing` flags. Actions that start background work are only
//! accepted while `Idle`, which is what prevents re-entrant exports.

use serde::{Deserialize, Serialize};

/// What the application is currently occupied with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BusyState {
    #[default]
    Idle,
    /// Screenshot PDF export running in the background
    Exporting,
    /// URL import running in the background
    Importing,
}

impl BusyState {
    pub fn is_idle(&self) -> bool {
        matches!(self, BusyState::Idle)
    }

    /// Short label for the status bar
    pub fn label(&self) -> &'static str {
        match self {
            BusyState::Idle => "ready",
            BusyState::Exporting => "exporting…",
            BusyState::Importing => "importing…",
        }
    }
}

/// Outcome of a finished job, kept in the history log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Success,
    Failed,
}

/// Which operation a history entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobKind {
    PdfExport,
    PrintHandoff,
    UrlImport,
    FileImport,
}

impl JobKind {
    pub fn label(&self) -> &'static str {
        match self {
            JobKind::PdfExport => "pdf export",
            JobKind::PrintHandoff => "print handoff",
            JobKind::UrlImport => "url import",
            JobKind::FileImport => "file import",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_idle_is_idle() {
        assert!(BusyState::Idle.is_idle());
        assert!(!BusyState::Exporting.is_idle());
        assert!(!BusyState::Importing.is_idle());
    }
}
