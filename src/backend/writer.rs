//! Line-oriented code writer with brace-driven indentation.
//!
//! Renderers hand the writer logical lines without leading whitespace; the writer decides the
//! indentation. A line whose trimmed content is `}`, `};` or `},` closes a level before it is
//! written, and a line that is exactly `{` opens one after it is written. Appended text still
//! pending when the lines are read is kept verbatim as one final line.

/// Accumulates indented lines of generated source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeWriter {
    lines: Vec<String>,
    /// Current indentation level, never below zero
    depth: usize,
    /// Text collected by [`append`](Self::append) that has not become a line yet
    pending: String,
    indent: String,
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeWriter {
    /// A writer indenting with one tab per level.
    pub fn new() -> Self {
        Self::with_indent("\t")
    }

    pub fn with_indent(indent: impl Into<String>) -> Self {
        Self {
            lines: Vec::new(),
            depth: 0,
            pending: String::new(),
            indent: indent.into(),
        }
    }

    /// Add one or more lines.
    ///
    /// Pending appended text is prepended to `text` and cleared. The combined text is split on
    /// `\r\n`, `\r` and `\n`, and each piece is written as its own line.
    pub fn add(&mut self, text: &str) {
        let text = if self.pending.is_empty() {
            text.to_string()
        } else {
            let mut combined = std::mem::take(&mut self.pending);
            combined.push_str(text);
            combined
        };
        for line in split_lines(&text) {
            self.push_line(line);
        }
    }

    /// Accumulate text that becomes part of the next line.
    pub fn append(&mut self, text: &str) {
        self.pending.push_str(text);
    }

    /// Add an empty line.
    pub fn blank(&mut self) {
        self.add("");
    }

    /// The lines written so far, flushing pending text as a final line first.
    pub fn lines(&mut self) -> &[String] {
        self.flush();
        &self.lines
    }

    /// All lines, each terminated by `\n`.
    pub fn source(&mut self) -> String {
        self.flush();
        self.lines.iter().fold(String::new(), |mut out, line| {
            out.push_str(line);
            out.push('\n');
            out
        })
    }

    /// Reset to the state of a new writer (the indent unit is kept).
    pub fn clear(&mut self) {
        self.lines.clear();
        self.depth = 0;
        self.pending.clear();
    }

    /// Current indentation level
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    fn flush(&mut self) {
        if !self.pending.is_empty() {
            let tail = std::mem::take(&mut self.pending);
            self.lines.push(tail);
        }
    }

    fn push_line(&mut self, line: &str) {
        let trimmed = line.trim();
        if matches!(trimmed, "}" | "};" | "},") {
            self.depth = self.depth.saturating_sub(1);
        }
        let mut out = self.indent.repeat(self.depth);
        out.push_str(line);
        self.lines.push(out);
        if line == "{" {
            self.depth += 1;
        }
    }
}

/// Split on `\r\n`, `\r` or `\n`. An empty input is one empty line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                lines.push(&text[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            b'\n' => {
                lines.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    lines.push(&text[start..]);
    lines
}
