//! The modal input state machine.
//!
//! One raw key event is fully processed (buffer or cursor mutated, or mode
//! switched) before the next is read; there is no input queue. Insert mode
//! edits the text buffer directly. Command mode edits a separate single-line
//! [`CommandLine`] which is created empty on entry and discarded on exit,
//! whether by submission (Enter) or cancellation (Esc).

use super::keys::{Key, KeyCode};
use crate::text::{Cursor, Direction, TextBuffer};

/// Editing mode. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Direct text editing.
    Insert,
    /// Typing a command on the command line.
    Command,
}

impl Default for Mode {
    fn default() -> Self {
        Self::Insert
    }
}

/// A single mutable text line with its own cursor column, used for the
/// command line and for modal prompts.
#[derive(Debug, Clone, Default)]
pub struct CommandLine {
    text: String,
    cursor: usize,
}

impl CommandLine {
    /// Create an empty command line.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor column in characters.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Insert a character at the cursor.
    pub fn insert(&mut self, c: char) {
        let byte = self.byte_at(self.cursor);
        self.text.insert(byte, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor. No-op when empty or at 0.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let byte = self.byte_at(self.cursor - 1);
            self.text.remove(byte);
            self.cursor -= 1;
        }
    }

    /// Move the cursor one column left.
    pub const fn left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move the cursor one column right.
    pub fn right(&mut self) {
        if self.cursor < self.text.chars().count() {
            self.cursor += 1;
        }
    }

    /// Move the cursor to the start.
    pub const fn home(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to the end.
    pub fn end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    /// Take the text, leaving the line empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    fn byte_at(&self, col: usize) -> usize {
        self.text
            .char_indices()
            .nth(col)
            .map_or(self.text.len(), |(byte, _)| byte)
    }
}

/// Result of feeding one key into the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// The key was consumed (mutation, move, or mode switch).
    Consumed,
    /// A completed command string was submitted from command mode.
    Submitted(String),
    /// The key has no binding in the current mode.
    Ignored,
}

/// Modal key processor: consumes key events, produces buffer mutations,
/// cursor moves, or a completed command string.
#[derive(Debug, Default)]
pub struct InputStateMachine {
    mode: Mode,
    command: CommandLine,
}

impl InputStateMachine {
    /// Create a state machine starting in Insert mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// The active mode.
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// The command line, visible while in command mode.
    pub const fn command_line(&self) -> &CommandLine {
        &self.command
    }

    /// Process one key event against the buffer and cursor.
    ///
    /// The caller reconciles the viewport afterwards.
    pub fn process(
        &mut self,
        key: Key,
        buffer: &mut TextBuffer,
        cursor: &mut Cursor,
    ) -> InputOutcome {
        match self.mode {
            Mode::Insert => self.process_insert(key, buffer, cursor),
            Mode::Command => self.process_command(key),
        }
    }

    /// Insert a pasted block through the regular buffer operations.
    ///
    /// Newlines split lines exactly as if Enter had been pressed.
    pub fn paste(&mut self, text: &str, buffer: &mut TextBuffer, cursor: &mut Cursor) {
        if self.mode != Mode::Insert {
            return;
        }
        for c in text.chars() {
            match c {
                '\n' => {
                    buffer.split_line(cursor.row, cursor.col);
                    cursor.row += 1;
                    cursor.col = 0;
                }
                '\r' => {}
                _ => {
                    buffer.insert_char(cursor.row, cursor.col, c);
                    cursor.col += 1;
                }
            }
        }
    }

    fn process_insert(
        &mut self,
        key: Key,
        buffer: &mut TextBuffer,
        cursor: &mut Cursor,
    ) -> InputOutcome {
        if key.modifiers.control || key.modifiers.alt {
            return InputOutcome::Ignored;
        }
        match key.code {
            KeyCode::Char(';') => {
                self.mode = Mode::Command;
                self.command = CommandLine::new();
            }
            KeyCode::Char(c) => {
                buffer.insert_char(cursor.row, cursor.col, c);
                cursor.col += 1;
            }
            KeyCode::Tab => {
                // YAML forbids tabs in indentation; insert two spaces.
                buffer.insert_char(cursor.row, cursor.col, ' ');
                buffer.insert_char(cursor.row, cursor.col + 1, ' ');
                cursor.col += 2;
            }
            KeyCode::Enter => {
                buffer.split_line(cursor.row, cursor.col);
                cursor.row += 1;
                cursor.col = 0;
            }
            KeyCode::Backspace => {
                if cursor.col > 0 {
                    buffer.delete_char_before(cursor.row, cursor.col);
                    cursor.col -= 1;
                } else if cursor.row > 0 {
                    let target_col = buffer.line_len(cursor.row - 1);
                    buffer.delete_char_before(cursor.row, 0);
                    cursor.row -= 1;
                    cursor.col = target_col;
                }
                // Backspace at (0, 0) is an explicit no-op.
            }
            KeyCode::Up => cursor.step(Direction::Up, buffer),
            KeyCode::Down => cursor.step(Direction::Down, buffer),
            KeyCode::Left => cursor.step(Direction::Left, buffer),
            KeyCode::Right => cursor.step(Direction::Right, buffer),
            KeyCode::Home => cursor.step(Direction::LineStart, buffer),
            KeyCode::End => cursor.step(Direction::LineEnd, buffer),
            KeyCode::PageUp => cursor.step(Direction::BufferStart, buffer),
            KeyCode::PageDown => cursor.step(Direction::BufferEnd, buffer),
            KeyCode::Esc => return InputOutcome::Ignored,
        }
        InputOutcome::Consumed
    }

    fn process_command(&mut self, key: Key) -> InputOutcome {
        match key.code {
            KeyCode::Char(c) => self.command.insert(c),
            KeyCode::Backspace => self.command.backspace(),
            KeyCode::Left => self.command.left(),
            KeyCode::Right => self.command.right(),
            KeyCode::Home => self.command.home(),
            KeyCode::End => self.command.end(),
            KeyCode::Enter => {
                let submitted = self.command.take();
                self.mode = Mode::Insert;
                return InputOutcome::Submitted(submitted);
            }
            KeyCode::Esc => {
                self.command = CommandLine::new();
                self.mode = Mode::Insert;
            }
            _ => return InputOutcome::Ignored,
        }
        InputOutcome::Consumed
    }
}
