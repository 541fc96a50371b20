//! Print-path export: hand the document to the platform's own viewer
//!
//! Writes the HTML to a stable temp file and asks the OS opener to display
//! it; the user prints (or saves as PDF) from the viewer's own dialog.
//! Fire-and-forget: a missing or blocked opener is silently ignored.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Stdio};

const PRINT_FILE_NAME: &str = "html2pdf-tui-print.html";

/// Write the HTML to the handoff file. Returns `None` when the write fails;
/// there is nothing useful to tell the user in that case.
pub fn stage_print_file(html: &str) -> Option<PathBuf> {
    let path = env::temp_dir().join(PRINT_FILE_NAME);
    fs::write(&path, html).ok()?;
    Some(path)
}

/// Stage the document and launch the platform opener on it. Returns the
/// staged path when the handoff was at least attempted; all opener errors
/// are swallowed, this is a one-way handoff.
pub fn open_in_viewer(html: &str) -> Option<PathBuf> {
    let path = stage_print_file(html)?;

    #[cfg(target_os = "macos")]
    let mut command = {
        let mut c = Command::new("open");
        c.arg(&path);
        c
    };

    #[cfg(target_os = "windows")]
    let mut command = {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]).arg(&path);
        c
    };

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = {
        let mut c = Command::new("xdg-open");
        c.arg(&path);
        c
    };

    let _ = command.stdout(Stdio::null()).stderr(Stdio::null()).spawn();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staged_file_carries_the_full_source() {
        let html = "<!DOCTYPE html><p>print me</p>";
        let path = stage_print_file(html).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), html);

        // Overwritten wholesale on the next handoff
        let path2 = stage_print_file("<p>second</p>").unwrap();
        assert_eq!(path, path2);
        assert_eq!(fs::read_to_string(&path2).unwrap(), "<p>second</p>");
        let _ = fs::remove_file(&path);
    }
}
