//! Viewport: the visible window into the text buffer.

use super::buffer::TextBuffer;
use super::cursor::Cursor;

/// The visible sub-window of the buffer mapped to the terminal screen.
///
/// `top_row` is kept such that the cursor row is always on screen
/// (`top_row <= cursor.row < top_row + height`), restored by [`reconcile`]
/// after every cursor move or buffer mutation.
///
/// [`reconcile`]: Viewport::reconcile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// First buffer row shown on screen.
    pub top_row: usize,
    /// Visible height in rows.
    pub height: usize,
    /// Visible width in columns.
    pub width: usize,
}

impl Viewport {
    /// Create a viewport starting at the top of the buffer.
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            top_row: 0,
            height,
            width,
        }
    }

    /// Update the viewport dimensions after a terminal resize.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    /// Recompute `top_row` so the cursor is visible (scroll-to-follow).
    ///
    /// Must run after every keystroke, including once before the first
    /// render at startup. Idempotent: a second call with no intervening
    /// mutation leaves `top_row` unchanged.
    pub fn reconcile(&mut self, cursor: &Cursor, buffer: &TextBuffer) {
        if self.height == 0 {
            self.top_row = 0;
            return;
        }
        if cursor.row < self.top_row {
            self.top_row = cursor.row;
        } else if cursor.row >= self.top_row + self.height {
            self.top_row = cursor.row - self.height + 1;
        }
        let max_top = buffer.line_count().saturating_sub(self.height);
        self.top_row = self.top_row.min(max_top);
    }

    /// Rows of the buffer currently visible, as a `top_row..end` range.
    pub fn visible_rows(&self, buffer: &TextBuffer) -> std::ops::Range<usize> {
        let end = (self.top_row + self.height).min(buffer.line_count());
        self.top_row..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_with_lines(n: usize) -> TextBuffer {
        let text = (0..n).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let mut buffer = TextBuffer::new();
        buffer.replace_all(&text);
        buffer
    }

    #[test]
    fn test_scroll_down_to_follow_cursor() {
        let buffer = buffer_with_lines(50);
        let mut viewport = Viewport::new(80, 10);
        let cursor = Cursor { row: 25, col: 0 };
        viewport.reconcile(&cursor, &buffer);
        assert_eq!(viewport.top_row, 16);
    }

    #[test]
    fn test_scroll_up_to_follow_cursor() {
        let buffer = buffer_with_lines(50);
        let mut viewport = Viewport::new(80, 10);
        viewport.top_row = 20;
        let cursor = Cursor { row: 5, col: 0 };
        viewport.reconcile(&cursor, &buffer);
        assert_eq!(viewport.top_row, 5);
    }

    #[test]
    fn test_reconcile_idempotent() {
        let buffer = buffer_with_lines(50);
        let mut viewport = Viewport::new(80, 10);
        let cursor = Cursor { row: 33, col: 0 };
        viewport.reconcile(&cursor, &buffer);
        let first = viewport.top_row;
        viewport.reconcile(&cursor, &buffer);
        assert_eq!(viewport.top_row, first);
    }

    #[test]
    fn test_top_row_clamped_when_buffer_shrinks() {
        let buffer = buffer_with_lines(5);
        let mut viewport = Viewport::new(80, 10);
        viewport.top_row = 40;
        let cursor = Cursor { row: 2, col: 0 };
        viewport.reconcile(&cursor, &buffer);
        assert_eq!(viewport.top_row, 0);
    }

    #[test]
    fn test_cursor_on_last_visible_row_does_not_scroll() {
        let buffer = buffer_with_lines(50);
        let mut viewport = Viewport::new(80, 10);
        let cursor = Cursor { row: 9, col: 0 };
        viewport.reconcile(&cursor, &buffer);
        assert_eq!(viewport.top_row, 0);
    }

    #[test]
    fn test_visible_rows_clipped_to_buffer() {
        let buffer = buffer_with_lines(3);
        let viewport = Viewport::new(80, 10);
        assert_eq!(viewport.visible_rows(&buffer), 0..3);
    }
}
