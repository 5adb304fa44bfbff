use crate::buffer::TextBuffer;

/// The current mode of the editor.
///
/// The same keys perform different actions depending on the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal mode - for navigation and commands.
    Normal,
    /// Insert mode - for typing text.
    Insert,
    /// Visual mode - for selecting text.
    Visual,
}

/// A position within the buffer with sticky virtual-column memory.
///
/// `line` is always clamped to the buffer. `vcol` stores the furthest
/// intended column independent of the current line's length; the effective
/// column exposed to callers is `min(vcol, line length)`. Keeping the two
/// apart is what makes the cursor snap back out when moving from a short
/// line onto a longer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pointer {
    /// Zero-based line index.
    pub line: usize,
    /// Virtual (unclamped) column.
    pub vcol: usize,
}

impl Pointer {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, vcol: col }
    }

    /// The effective column: the virtual column clamped to the current line.
    pub fn col(&self, buf: &TextBuffer) -> usize {
        self.vcol.min(buf.line_len(self.line))
    }

    /// Shifts the position by the given deltas, then re-normalizes.
    ///
    /// The column delta is applied to the effective column, not the virtual
    /// one, so a plain left/right step always moves one visible cell. A pure
    /// vertical move leaves `vcol` untouched, which is what keeps the column
    /// sticky across short lines. Excess deltas saturate at the buffer
    /// edges.
    pub fn move_by(&mut self, buf: &TextBuffer, dline: isize, dcol: isize) {
        self.line = self
            .line
            .saturating_add_signed(dline)
            .min(buf.line_count() - 1);
        if dcol != 0 {
            let col = self.col(buf).saturating_add_signed(dcol);
            self.vcol = col.min(buf.max_line_len());
        }
    }

    pub fn move_start(&mut self) {
        self.vcol = 0;
    }

    pub fn move_end(&mut self, buf: &TextBuffer) {
        self.vcol = buf.line_len(self.line);
    }

    pub fn set_col(&mut self, buf: &TextBuffer, col: usize) {
        self.vcol = col.min(buf.max_line_len());
    }

    /// Re-normalizes after the buffer shrank underneath the pointer.
    pub fn clamp(&mut self, buf: &TextBuffer) {
        self.line = self.line.min(buf.line_count() - 1);
        self.vcol = self.vcol.min(buf.max_line_len());
    }

    /// Lexicographic order on `(line, effective column)`.
    pub fn at_or_before(&self, other: &Pointer, buf: &TextBuffer) -> bool {
        (self.line, self.col(buf)) <= (other.line, other.col(buf))
    }
}

/// An anchor/active pair of pointers defining an ordered span.
///
/// Only `active` moves during cursor motion; the anchor stays fixed for the
/// lifetime of a Visual-mode span. Outside Visual mode the pair is kept
/// degenerate (anchor == active).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Pointer,
    pub active: Pointer,
}

impl Selection {
    /// A degenerate selection at the given position.
    pub fn at(p: Pointer) -> Self {
        Self {
            anchor: p,
            active: p,
        }
    }

    /// The lexicographically smaller end of the span, recomputed on access.
    pub fn begin(&self, buf: &TextBuffer) -> Pointer {
        if self.anchor.at_or_before(&self.active, buf) {
            self.anchor
        } else {
            self.active
        }
    }

    /// The lexicographically larger end of the span.
    pub fn end(&self, buf: &TextBuffer) -> Pointer {
        if self.anchor.at_or_before(&self.active, buf) {
            self.active
        } else {
            self.anchor
        }
    }

    /// Re-pins the anchor onto the active pointer.
    pub fn sync_anchor(&mut self) {
        self.anchor = self.active;
    }

    /// Collapses the span onto its begin position.
    pub fn collapse_to_begin(&mut self, buf: &TextBuffer) {
        let b = self.begin(buf);
        self.anchor = b;
        self.active = b;
    }

    pub fn clamp(&mut self, buf: &TextBuffer) {
        self.anchor.clamp(buf);
        self.active.clamp(buf);
    }
}
