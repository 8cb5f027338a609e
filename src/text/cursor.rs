//! Cursor: logical position within the text buffer.

use super::buffer::TextBuffer;

/// Navigation directions understood by the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// One row up, column clamped to the destination line.
    Up,
    /// One row down, column clamped to the destination line.
    Down,
    /// One column left; stays put at column 0 (no line wrap).
    Left,
    /// One column right; stays put at end of line (no line wrap).
    Right,
    /// Column 0 of the current line.
    LineStart,
    /// One past the last character of the current line.
    LineEnd,
    /// Row 0, column 0.
    BufferStart,
    /// Last row, end of line.
    BufferEnd,
}

/// A `(row, column)` position into a [`TextBuffer`], 0-indexed.
///
/// The column may equal the line length, meaning "after the last character".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Row index into the buffer.
    pub row: usize,
    /// Column index into the line (character units).
    pub col: usize,
}

impl Cursor {
    /// Cursor at the buffer origin.
    pub const fn origin() -> Self {
        Self { row: 0, col: 0 }
    }

    /// Move one step in `direction`.
    ///
    /// Horizontal moves are intra-line: left at column 0 and right at the end
    /// of a line stay put. Vertical moves clamp the column to the destination
    /// line's length.
    pub fn step(&mut self, direction: Direction, buffer: &TextBuffer) {
        match direction {
            Direction::Up => {
                if self.row > 0 {
                    self.row -= 1;
                    self.col = self.col.min(buffer.line_len(self.row));
                }
            }
            Direction::Down => {
                if self.row + 1 < buffer.line_count() {
                    self.row += 1;
                    self.col = self.col.min(buffer.line_len(self.row));
                }
            }
            Direction::Left => {
                if self.col > 0 {
                    self.col -= 1;
                }
            }
            Direction::Right => {
                if self.col < buffer.line_len(self.row) {
                    self.col += 1;
                }
            }
            Direction::LineStart => self.col = 0,
            Direction::LineEnd => self.col = buffer.line_len(self.row),
            Direction::BufferStart => {
                self.row = 0;
                self.col = 0;
            }
            Direction::BufferEnd => {
                self.row = buffer.line_count() - 1;
                self.col = buffer.line_len(self.row);
            }
        }
    }

    /// Clamp the cursor into the valid range for `buffer`.
    ///
    /// Called after any buffer mutation that may have shortened the current
    /// line or removed lines.
    pub fn clamp(&mut self, buffer: &TextBuffer) {
        self.row = self.row.min(buffer.line_count() - 1);
        self.col = self.col.min(buffer.line_len(self.row));
    }
}
