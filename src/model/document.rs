//! The HTML document being authored
//!
//! `HtmlDocument` is the single source of truth for the tool: the editor
//! mutates it, the preview re-renders from it, and both exporters read it.
//! The source is stored line-wise so the editor can edit in place, but the
//! external contract is a plain string: `source()` and `set_source()` round
//! trip any text exactly.

/// Starting template shown on first launch
pub const DEFAULT_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
  <style>
    body {
      font-family: Helvetica, Arial, sans-serif;
      padding: 40px;
      color: #333;
      line-height: 1.6;
      background: white;
    }
    .header { text-align: center; border-bottom: 2px solid #3b82f6; padding-bottom: 20px; margin-bottom: 30px; }
    h1 { color: #1e40af; margin: 0; font-size: 28px; }
    h2 { color: #1e3a8a; border-left: 4px solid #3b82f6; padding-left: 10px; }
    .footer { margin-top: 50px; text-align: center; font-size: 12px; color: #64748b; border-top: 1px solid #eee; padding-top: 20px; }
  </style>
</head>
<body>
  <div class="header">
    <h1>Document Title</h1>
    <p>Author professional PDFs straight from HTML</p>
  </div>

  <h2>About this tool</h2>
  <p>Edit the HTML on the left and watch the preview refresh on the right.</p>
  <p>The print path produces the smallest files with selectable text; the
  screenshot path captures the page exactly as rendered.</p>

  <h3>What you can do</h3>
  <ul>
    <li><strong>Import:</strong> load a local HTML file or fetch a page by URL.</li>
    <li><strong>Preview:</strong> every edit re-renders the preview pane.</li>
    <li><strong>Export:</strong> system print dialog or screenshot-based PDF.</li>
  </ul>

  <div class="footer">
    Produced with html2pdf-tui
  </div>
</body>
</html>"#;

/// The HTML source under edit
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    lines: Vec<String>,
    /// Bumped on every mutation so consumers can cache render output
    revision: u64,
}

impl Default for HtmlDocument {
    fn default() -> Self {
        Self::from_source(DEFAULT_HTML)
    }
}

impl HtmlDocument {
    pub fn from_source(source: &str) -> Self {
        Self {
            lines: split_lines(source),
            revision: 0,
        }
    }

    /// The full source as one string
    pub fn source(&self) -> String {
        self.lines.join("\n")
    }

    /// Replace the source wholesale (imports, external editor)
    pub fn set_source(&mut self, source: &str) {
        self.lines = split_lines(source);
        self.touch();
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Length of the source in bytes, for the status bar
    pub fn byte_len(&self) -> usize {
        let newlines = self.lines.len().saturating_sub(1);
        self.lines.iter().map(|l| l.len()).sum::<usize>() + newlines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, idx: usize) -> &str {
        self.lines.get(idx).map(|l| l.as_str()).unwrap_or("")
    }

    /// Character count of a line (chars, not bytes - the editor cursor
    /// addresses characters)
    pub fn line_char_len(&self, idx: usize) -> usize {
        self.line(idx).chars().count()
    }

    pub fn insert_char(&mut self, row: usize, col: usize, c: char) {
        if row >= self.lines.len() {
            return;
        }
        let byte = char_to_byte(&self.lines[row], col);
        self.lines[row].insert(byte, c);
        self.touch();
    }

    /// Split the line at the cursor, carrying the tail to a new line
    pub fn insert_newline(&mut self, row: usize, col: usize) {
        if row >= self.lines.len() {
            return;
        }
        let byte = char_to_byte(&self.lines[row], col);
        let tail = self.lines[row].split_off(byte);
        self.lines.insert(row + 1, tail);
        self.touch();
    }

    /// Remove the character before (row, col); joins lines at col 0.
    /// Returns the new cursor position.
    pub fn backspace(&mut self, row: usize, col: usize) -> (usize, usize) {
        if col > 0 {
            let byte = char_to_byte(&self.lines[row], col - 1);
            self.lines[row].remove(byte);
            self.touch();
            (row, col - 1)
        } else if row > 0 {
            let tail = self.lines.remove(row);
            let new_col = self.line_char_len(row - 1);
            self.lines[row - 1].push_str(&tail);
            self.touch();
            (row - 1, new_col)
        } else {
            (row, col)
        }
    }

    /// Remove the character at (row, col); joins with the next line at EOL
    pub fn delete(&mut self, row: usize, col: usize) {
        if row >= self.lines.len() {
            return;
        }
        if col < self.line_char_len(row) {
            let byte = char_to_byte(&self.lines[row], col);
            self.lines[row].remove(byte);
            self.touch();
        } else if row + 1 < self.lines.len() {
            let tail = self.lines.remove(row + 1);
            self.lines[row].push_str(&tail);
            self.touch();
        }
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

fn split_lines(source: &str) -> Vec<String> {
    source.split('\n').map(|l| l.to_string()).collect()
}

fn char_to_byte(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_round_trips_exactly() {
        for s in ["", "plain", "a\nb\nc", "trailing\n", "\n\n", "中文段落\n<p>x</p>"] {
            let doc = HtmlDocument::from_source(s);
            assert_eq!(doc.source(), s);
        }
    }

    #[test]
    fn set_source_replaces_and_bumps_revision() {
        let mut doc = HtmlDocument::default();
        let before = doc.revision();
        doc.set_source("<p>replaced</p>");
        assert_eq!(doc.source(), "<p>replaced</p>");
        assert_ne!(doc.revision(), before);
    }

    #[test]
    fn byte_len_matches_source() {
        let doc = HtmlDocument::from_source("ab\ncd\n");
        assert_eq!(doc.byte_len(), doc.source().len());
    }

    #[test]
    fn edit_ops_keep_lines_consistent() {
        let mut doc = HtmlDocument::from_source("hello");
        doc.insert_char(0, 5, '!');
        assert_eq!(doc.source(), "hello!");

        doc.insert_newline(0, 5);
        assert_eq!(doc.source(), "hello\n!");

        let (row, col) = doc.backspace(1, 0);
        assert_eq!((row, col), (0, 5));
        assert_eq!(doc.source(), "hello!");

        doc.delete(0, 5);
        assert_eq!(doc.source(), "hello");
    }

    #[test]
    fn multibyte_editing_is_char_addressed() {
        let mut doc = HtmlDocument::from_source("héllo");
        doc.insert_char(0, 2, 'x');
        assert_eq!(doc.source(), "héxllo");
        doc.backspace(0, 3);
        assert_eq!(doc.source(), "héllo");
    }
}
