//! The editor session: single owner of all mutable editor state.
//!
//! Replaces ambient globals with one explicit object passed into the input
//! machine, dispatcher, and renderer.

use crate::backend::Artifact;
use crate::input::{InputOutcome, InputStateMachine, Key, Mode};
use crate::text::{Cursor, TextBuffer, Viewport};

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Informational (saves, key updates).
    Info,
    /// A recovered failure.
    Error,
}

/// A one-line message shown on the bottom bar until the next keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// Message text.
    pub text: String,
    /// Severity, which selects the color.
    pub kind: StatusKind,
}

impl StatusLine {
    /// An informational status.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Info,
        }
    }

    /// An error status.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }
}

/// A full-screen message (compile results, run output, help).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Title drawn on the first row.
    pub title: String,
    /// Body lines.
    pub body: Vec<String>,
    /// Footer drawn on the last row.
    pub footer: String,
    /// When set, only this character dismisses the notice; otherwise any key.
    pub dismiss: Option<char>,
}

impl Notice {
    /// A notice dismissed by any key.
    pub fn new(title: impl Into<String>, body: Vec<String>, footer: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body,
            footer: footer.into(),
            dismiss: None,
        }
    }
}

/// All state owned by one editing session.
#[derive(Debug)]
pub struct Session {
    /// The document being edited.
    pub buffer: TextBuffer,
    /// Logical cursor position.
    pub cursor: Cursor,
    /// Visible window into the buffer.
    pub viewport: Viewport,
    /// Modal input state (mode + command line).
    pub input: InputStateMachine,
    /// Last successful generator output, if any.
    pub artifact: Option<Artifact>,
    /// Transient status message.
    pub status: Option<StatusLine>,
}

impl Session {
    /// Create a session sized to an editor area of `width` x `height` rows.
    ///
    /// `height` is the text area only; the caller reserves the bottom bar.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            buffer: TextBuffer::new(),
            cursor: Cursor::origin(),
            viewport: Viewport::new(width, height),
            input: InputStateMachine::new(),
            artifact: None,
            status: None,
        }
    }

    /// The active input mode.
    pub const fn mode(&self) -> Mode {
        self.input.mode()
    }

    /// Feed one key event through the input machine.
    ///
    /// Clears any pending status, applies the key, and reconciles the
    /// viewport. Returns the completed command string when command mode
    /// submitted one.
    pub fn handle_key(&mut self, key: Key) -> Option<String> {
        self.status = None;
        let outcome = self.input.process(key, &mut self.buffer, &mut self.cursor);
        self.reconcile();
        match outcome {
            InputOutcome::Submitted(command) => Some(command),
            InputOutcome::Consumed | InputOutcome::Ignored => None,
        }
    }

    /// Insert pasted text through the buffer operations.
    pub fn handle_paste(&mut self, text: &str) {
        self.status = None;
        self.input.paste(text, &mut self.buffer, &mut self.cursor);
        self.reconcile();
    }

    /// Restore cursor and viewport invariants against the current buffer.
    ///
    /// Runs after every keystroke and buffer mutation, and once before the
    /// first render at startup.
    pub fn reconcile(&mut self) {
        self.cursor.clamp(&self.buffer);
        self.viewport.reconcile(&self.cursor, &self.buffer);
    }

    /// Resize the editor text area.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.viewport.resize(width, height);
        self.reconcile();
    }

    /// Replace the document (open / paste-all), resetting the cursor to the
    /// origin.
    pub fn load(&mut self, text: &str) {
        self.buffer.replace_all(text);
        self.cursor = Cursor::origin();
        self.viewport.top_row = 0;
        self.reconcile();
    }

    /// Set the transient status line.
    pub fn set_status(&mut self, status: StatusLine) {
        self.status = Some(status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, KeyCode};

    #[test]
    fn test_handle_key_reconciles_viewport() {
        let mut session = Session::new(80, 3);
        session.load(&vec!["x"; 10].join("\n"));
        for _ in 0..6 {
            session.handle_key(Key::plain(KeyCode::Down));
        }
        assert_eq!(session.cursor.row, 6);
        assert_eq!(session.viewport.top_row, 4);
    }

    #[test]
    fn test_keystroke_clears_status() {
        let mut session = Session::new(80, 10);
        session.set_status(StatusLine::error("boom"));
        session.handle_key(Key::char('a'));
        assert!(session.status.is_none());
    }

    #[test]
    fn test_command_submission_round_trip() {
        let mut session = Session::new(80, 10);
        session.handle_key(Key::char(';'));
        for c in "help".chars() {
            session.handle_key(Key::char(c));
        }
        let submitted = session.handle_key(Key::plain(KeyCode::Enter));
        assert_eq!(submitted.as_deref(), Some("help"));
    }

    #[test]
    fn test_resize_reclamps_scroll() {
        let mut session = Session::new(80, 3);
        session.load(&vec!["x"; 10].join("\n"));
        for _ in 0..9 {
            session.handle_key(Key::plain(KeyCode::Down));
        }
        assert_eq!(session.viewport.top_row, 7);
        // A taller text area pulls the scroll back so no rows are wasted.
        session.resize(80, 20);
        assert_eq!(session.viewport.top_row, 0);
        assert_eq!(session.viewport.height, 20);
    }

    #[test]
    fn test_load_resets_cursor_and_scroll() {
        let mut session = Session::new(80, 3);
        session.load(&vec!["x"; 10].join("\n"));
        for _ in 0..9 {
            session.handle_key(Key::plain(KeyCode::Down));
        }
        session.load("fresh");
        assert_eq!(session.cursor, Cursor::origin());
        assert_eq!(session.viewport.top_row, 0);
    }
}
