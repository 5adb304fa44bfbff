use std::fs;
use std::io;
use std::path::Path;

/// The document content: an ordered sequence of text lines.
///
/// The buffer is never empty; an empty document is represented as a single
/// empty line. Columns throughout the crate are counted in `char`s, each
/// assumed to occupy one display cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        let mut buf = Self { lines };
        buf.ensure_non_empty();
        buf
    }

    /// Reads a file line-by-line, stripping trailing newlines.
    ///
    /// A missing or unreadable file yields the initial single-empty-line
    /// buffer; no error is surfaced.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let lines = match fs::read_to_string(path.as_ref()) {
            Ok(text) => text.lines().map(str::to_string).collect(),
            Err(err) => {
                log::debug!("load {:?}: {err}, starting empty", path.as_ref());
                Vec::new()
            }
        };
        Self::from_lines(lines)
    }

    /// Writes each line followed by a newline, overwriting the target.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        fs::write(path, out)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, idx: usize) -> &str {
        &self.lines[idx]
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Length of a line in columns.
    pub fn line_len(&self, idx: usize) -> usize {
        self.lines[idx].chars().count()
    }

    /// Length of the longest line; upper bound for virtual columns.
    pub fn max_line_len(&self) -> usize {
        self.lines.iter().map(|l| l.chars().count()).max().unwrap_or(0)
    }

    /// Replaces the whole content, used when restoring a history snapshot.
    pub fn replace_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
        self.ensure_non_empty();
    }

    /// Inserts `text` into a line at the given column.
    pub fn insert_text(&mut self, line: usize, col: usize, text: &str) {
        let at = byte_of(&self.lines[line], col);
        self.lines[line].insert_str(at, text);
    }

    /// Splits a line at the given column; the suffix becomes the next line.
    pub fn split_line(&mut self, line: usize, col: usize) {
        let at = byte_of(&self.lines[line], col);
        let rest = self.lines[line].split_off(at);
        self.lines.insert(line + 1, rest);
    }

    /// Inserts a new empty line at the given index.
    pub fn insert_empty_line(&mut self, at: usize) {
        self.lines.insert(at, String::new());
    }

    /// Deletes the span from `begin` to `end`, both `(line, col)` pairs with
    /// the end column inclusive: the character under `end` is removed.
    ///
    /// Across lines, the begin line keeps its prefix before `begin.col`, the
    /// end line keeps its content past the inclusive boundary, and the fully
    /// enclosed lines are removed. The two remainder fragments stay separate
    /// lines.
    pub fn delete_range(&mut self, begin: (usize, usize), end: (usize, usize)) {
        let (bl, bc) = begin;
        let (el, ec) = end;
        if bl != el {
            let cut = byte_of(&self.lines[bl], bc);
            self.lines[bl].truncate(cut);
            let keep = byte_of(&self.lines[el], ec + 1);
            let rest = self.lines[el][keep..].to_string();
            self.lines[el] = rest;
            self.lines.drain(bl + 1..el);
        } else {
            let from = byte_of(&self.lines[bl], bc);
            let to = byte_of(&self.lines[bl], ec + 1);
            self.lines[bl].replace_range(from..to, "");
        }
        self.ensure_non_empty();
    }

    /// A column-addressed slice of a line, with both bounds clamped to the
    /// line length.
    pub fn slice(&self, line: usize, from: usize, to: usize) -> &str {
        let s = &self.lines[line];
        let a = byte_of(s, from);
        let b = byte_of(s, to.max(from));
        &s[a..b]
    }

    fn ensure_non_empty(&mut self) {
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte offset of a column, saturating at the end of the line.
fn byte_of(s: &str, col: usize) -> usize {
    s.char_indices().nth(col).map_or(s.len(), |(i, _)| i)
}
