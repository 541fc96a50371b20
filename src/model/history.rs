//! Persistence for the export/import history log

use super::status::{JobKind, JobStatus};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Cap on retained entries; oldest entries fall off
pub const HISTORY_LIMIT: usize = 100;

/// A single completed operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Local>,
    pub kind: JobKind,
    /// Target of the operation: output path, source URL or file
    pub detail: String,
    pub status: JobStatus,
    pub duration_secs: f64,
}

impl HistoryEntry {
    pub fn status_icon(&self) -> &str {
        match self.status {
            JobStatus::Success => "✓",
            JobStatus::Failed => "✗",
        }
    }

    pub fn formatted_time(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }

    pub fn formatted_duration(&self) -> String {
        if self.duration_secs < 60.0 {
            format!("{:.1}s", self.duration_secs)
        } else {
            let mins = (self.duration_secs / 60.0).floor();
            let secs = self.duration_secs % 60.0;
            format!("{}m {:.0}s", mins, secs)
        }
    }
}

/// Wrapper for persisting the history file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History {
    pub entries: Vec<HistoryEntry>,
}

impl History {
    fn history_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".html2pdf-tui"))
    }

    fn history_path() -> Option<PathBuf> {
        Self::history_dir().map(|dir| dir.join("history.json"))
    }

    pub fn load() -> Vec<HistoryEntry> {
        let history_path = match Self::history_path() {
            Some(p) => p,
            None => return Vec::new(),
        };

        if !history_path.exists() {
            return Vec::new();
        }

        let contents = match fs::read_to_string(&history_path) {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_str::<History>(&contents) {
            Ok(history) => history.entries,
            Err(_) => Vec::new(),
        }
    }

    pub fn save(entries: &[HistoryEntry]) -> Result<(), String> {
        let history_dir = Self::history_dir().ok_or("Could not determine home directory")?;

        if !history_dir.exists() {
            fs::create_dir_all(&history_dir)
                .map_err(|e| format!("Failed to create history directory: {}", e))?;
        }

        let history_path = Self::history_path().ok_or("Could not determine history path")?;

        let history = History {
            entries: entries.to_vec(),
        };

        let json = serde_json::to_string_pretty(&history)
            .map_err(|e| format!("Failed to serialize history: {}", e))?;

        fs::write(&history_path, json)
            .map_err(|e| format!("Failed to write history file: {}", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_formats_duration() {
        let entry = HistoryEntry {
            timestamp: Local::now(),
            kind: JobKind::PdfExport,
            detail: "html-export.pdf".to_string(),
            status: JobStatus::Success,
            duration_secs: 3.25,
        };
        assert_eq!(entry.formatted_duration(), "3.2s");
        assert_eq!(entry.status_icon(), "✓");

        let slow = HistoryEntry {
            duration_secs: 75.0,
            ..entry
        };
        assert_eq!(slow.formatted_duration(), "1m 15s");
    }
}
