//! `OutputBuffer`: Single-syscall output buffer for ANSI sequences.
//!
//! A whole frame is accumulated here and flushed in one `write()` syscall,
//! which keeps repaints flicker-free.

use super::screen::{CellAttrs, Rgb, Screen};
use std::io::Write;

/// Pre-allocated buffer for building ANSI escape sequences.
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical frame (16KB).
    pub fn new() -> Self {
        Self::with_capacity(16 * 1024)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Move cursor to (x, y) position (0-indexed; ANSI is 1-indexed).
    #[inline]
    pub fn cursor_move(&mut self, x: u16, y: u16) {
        // CSI row ; col H
        let _ = write!(self.data, "\x1b[{};{}H", y + 1, x + 1);
    }

    /// Hide the hardware cursor (the renderer draws its own).
    #[inline]
    pub fn cursor_hide(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25l");
    }

    /// Show the hardware cursor.
    #[inline]
    pub fn cursor_show(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25h");
    }

    /// Set foreground color (true color).
    #[inline]
    pub fn set_fg(&mut self, color: Rgb) {
        let _ = write!(self.data, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b);
    }

    /// Apply display attributes.
    #[inline]
    pub fn set_attrs(&mut self, attrs: CellAttrs) {
        if attrs.contains(CellAttrs::BOLD) {
            self.data.extend_from_slice(b"\x1b[1m");
        }
        if attrs.contains(CellAttrs::DIM) {
            self.data.extend_from_slice(b"\x1b[2m");
        }
        if attrs.contains(CellAttrs::REVERSE) {
            self.data.extend_from_slice(b"\x1b[7m");
        }
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.extend_from_slice(b"\x1b[0m");
    }

    /// Clear the entire screen.
    #[inline]
    pub fn clear_screen(&mut self) {
        self.data.extend_from_slice(b"\x1b[2J");
    }

    /// Encode a full frame from a screen grid.
    ///
    /// Color and attribute changes are only emitted when they differ from
    /// the previous cell, keeping the frame small.
    pub fn encode_frame(&mut self, screen: &Screen) {
        self.clear();
        self.cursor_hide();

        let mut current_fg: Option<Rgb> = None;
        let mut current_attrs = CellAttrs::empty();

        for (y, row) in screen.rows().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            self.cursor_move(0, y as u16);
            for cell in row {
                if cell.attrs != current_attrs {
                    self.reset_attrs();
                    current_fg = None;
                    self.set_attrs(cell.attrs);
                    current_attrs = cell.attrs;
                }
                if current_fg != Some(cell.fg) {
                    self.set_fg(cell.fg);
                    current_fg = Some(cell.fg);
                }
                let mut utf8 = [0u8; 4];
                self.data
                    .extend_from_slice(cell.ch.encode_utf8(&mut utf8).as_bytes());
            }
        }
        self.reset_attrs();
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::screen::Cell;

    #[test]
    fn test_cursor_move_is_one_indexed() {
        let mut out = OutputBuffer::new();
        out.cursor_move(0, 0);
        assert_eq!(out.as_bytes(), b"\x1b[1;1H");
    }

    #[test]
    fn test_encode_frame_contains_text() {
        let mut screen = Screen::new(4, 1);
        screen.put_str(0, 0, "ab", Rgb::WHITE, CellAttrs::empty());
        let mut out = OutputBuffer::new();
        out.encode_frame(&screen);
        let frame = String::from_utf8_lossy(out.as_bytes()).into_owned();
        assert!(frame.contains("ab"));
    }

    #[test]
    fn test_encode_frame_emits_reverse_for_cursor_cell() {
        let mut screen = Screen::new(2, 1);
        screen.set(0, 0, Cell::new('x', Rgb::WHITE).with_attrs(CellAttrs::REVERSE));
        let mut out = OutputBuffer::new();
        out.encode_frame(&screen);
        let frame = String::from_utf8_lossy(out.as_bytes()).into_owned();
        assert!(frame.contains("\x1b[7m"));
    }

    #[test]
    fn test_color_changes_are_deduplicated() {
        let mut screen = Screen::new(8, 1);
        screen.put_str(0, 0, "aaaa", Rgb::WHITE, CellAttrs::empty());
        let mut out = OutputBuffer::new();
        out.encode_frame(&screen);
        let frame = String::from_utf8_lossy(out.as_bytes()).into_owned();
        assert_eq!(frame.matches("38;2;255;255;255").count(), 1);
    }
}
