//! `TextBuffer`: the ordered, mutable sequence of text lines.
//!
//! All edits to the document go through this type. Columns are character
//! indices (grapheme-naive). Lines never contain embedded newlines; a newline
//! splits into two lines.
//!
//! # Invariant
//!
//! At least one line always exists (an empty line is permitted). Every
//! operation preserves this.
//!
//! # Bounds
//!
//! Out-of-range row/column arguments are a caller bug: the cursor is
//! responsible for clamping before mutation. Operations assert rather than
//! silently clamping.

/// An ordered sequence of text lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
}

impl TextBuffer {
    /// Create a buffer containing a single empty line.
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }

    /// Number of lines in the buffer. Always at least 1.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get the text of a line.
    ///
    /// # Panics
    /// Panics if `row` is out of range.
    #[inline]
    pub fn line(&self, row: usize) -> &str {
        assert!(row < self.lines.len(), "line row {row} out of range");
        &self.lines[row]
    }

    /// Length of a line in characters.
    ///
    /// # Panics
    /// Panics if `row` is out of range.
    #[inline]
    pub fn line_len(&self, row: usize) -> usize {
        self.line(row).chars().count()
    }

    /// Insert a character at `(row, col)`.
    ///
    /// # Panics
    /// Panics if `row` is out of range or `col` exceeds the line length.
    pub fn insert_char(&mut self, row: usize, col: usize, ch: char) {
        assert!(row < self.lines.len(), "insert row {row} out of range");
        let byte = char_to_byte(&self.lines[row], col);
        self.lines[row].insert(byte, ch);
    }

    /// Delete the character before `(row, col)` with backspace semantics.
    ///
    /// With `col > 0` the character to the left is removed. With `col == 0`
    /// and `row > 0` the line is joined onto the previous one. At `(0, 0)`
    /// this is a no-op.
    ///
    /// # Panics
    /// Panics if `row` is out of range or `col` exceeds the line length.
    pub fn delete_char_before(&mut self, row: usize, col: usize) {
        assert!(row < self.lines.len(), "delete row {row} out of range");
        if col > 0 {
            let byte = char_to_byte(&self.lines[row], col - 1);
            self.lines[row].remove(byte);
        } else if row > 0 {
            let tail = self.lines.remove(row);
            self.lines[row - 1].push_str(&tail);
        }
    }

    /// Split the line at `(row, col)`: the text at and after `col` becomes a
    /// new line at `row + 1`.
    ///
    /// # Panics
    /// Panics if `row` is out of range or `col` exceeds the line length.
    pub fn split_line(&mut self, row: usize, col: usize) {
        assert!(row < self.lines.len(), "split row {row} out of range");
        let byte = char_to_byte(&self.lines[row], col);
        let tail = self.lines[row].split_off(byte);
        self.lines.insert(row + 1, tail);
    }

    /// Replace the whole buffer with `text`, split on newline boundaries.
    ///
    /// The split is exact: `replace_all(s)` followed by [`contents`] returns
    /// `s` unchanged, including trailing newlines (a trailing newline yields
    /// a final empty line).
    ///
    /// [`contents`]: TextBuffer::contents
    pub fn replace_all(&mut self, text: &str) {
        self.lines = text.split('\n').map(str::to_string).collect();
        // split() on an empty string yields one empty element, so the
        // at-least-one-line invariant holds without a special case.
        debug_assert!(!self.lines.is_empty());
    }

    /// Reconstruct the full text by joining lines with newlines.
    pub fn contents(&self) -> String {
        self.lines.join("\n")
    }

    /// Iterate over all lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a character column to a byte offset within `line`.
///
/// A column equal to the character count maps to the end of the line.
fn char_to_byte(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map_or_else(
            || {
                assert!(
                    col == line.chars().count(),
                    "column {col} out of range for line of length {}",
                    line.chars().count()
                );
                line.len()
            },
            |(byte, _)| byte,
        )
}
