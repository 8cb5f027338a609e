//! Renderer: turns session state into a frame of screen cells.
//!
//! Rendering is idempotent and never mutates the model. The highlighter is
//! consulted every frame; spans are not cached across edits.

use super::screen::{CellAttrs, Screen};
use super::theme::Theme;
use crate::highlight::Highlighter;
use crate::input::{CommandLine, Mode};
use crate::session::{Notice, Session, StatusKind};
use unicode_width::UnicodeWidthChar;

/// Hint shown on the bottom bar in insert mode.
const INSERT_HINT: &str =
    "Insert mode -- ';' for commands | arrows: navigate | Enter: new line | Backspace: delete";

/// Disclaimer appended after the live command line.
const COMMAND_DISCLAIMER: &str = "   (command mode: type ;help for commands)";

/// Draws the editor frame: gutter, highlighted text, cursor, bottom bar.
pub struct Renderer {
    highlighter: Highlighter,
    theme: Theme,
    gutter_width: usize,
}

impl Renderer {
    /// Create a renderer with the default theme.
    pub fn new(gutter_width: usize) -> Self {
        Self {
            highlighter: Highlighter::new(),
            theme: Theme::default(),
            gutter_width,
        }
    }

    /// The theme in use.
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Columns taken by the gutter, including its trailing space.
    const fn text_origin(&self) -> usize {
        self.gutter_width + 1
    }

    /// Render a full editor frame into `screen`.
    ///
    /// The bottom row is the command/status bar; everything above is the
    /// text area described by the session's viewport.
    pub fn draw(&self, session: &Session, screen: &mut Screen) {
        screen.clear();
        let text_rows = screen.height().saturating_sub(1);
        self.draw_text_area(session, screen, text_rows);
        self.draw_cursor(session, screen, text_rows);
        self.draw_bottom_bar(session, screen);
    }

    fn draw_text_area(&self, session: &Session, screen: &mut Screen, text_rows: usize) {
        let origin = self.text_origin();
        for (y, row) in session.viewport.visible_rows(&session.buffer).enumerate() {
            if y >= text_rows {
                break;
            }
            // Right-aligned 1-based line number in the gutter.
            let number = format!("{:>width$} ", row + 1, width = self.gutter_width);
            screen.put_str(0, y, &number, self.theme.gutter, CellAttrs::DIM);

            let line = session.buffer.line(row);
            let spans = self.highlighter.classify(line);
            let mut x = origin;
            for span in spans {
                let fg = self.theme.for_class(span.class);
                x = screen.put_str(x, y, &line[span.start..span.end], fg, CellAttrs::empty());
                if x >= screen.width() {
                    break;
                }
            }
        }
    }

    /// Draw the buffer cursor as a reverse-video cell at its screen position.
    ///
    /// Drawn in every mode; the command line carries its own marker.
    fn draw_cursor(&self, session: &Session, screen: &mut Screen, text_rows: usize) {
        let cursor = session.cursor;
        if cursor.row < session.viewport.top_row {
            return;
        }
        let y = cursor.row - session.viewport.top_row;
        if y >= text_rows {
            return;
        }
        let line = session.buffer.line(cursor.row);
        let x = self.text_origin()
            + line
                .chars()
                .take(cursor.col)
                .map(|c| UnicodeWidthChar::width(c).unwrap_or(1).max(1))
                .sum::<usize>();
        screen.add_attrs(x, y, CellAttrs::REVERSE);
    }

    fn draw_bottom_bar(&self, session: &Session, screen: &mut Screen) {
        let y = screen.height().saturating_sub(1);
        match session.mode() {
            Mode::Command => {
                self.draw_command_line(session.input.command_line(), screen, y);
            }
            Mode::Insert => {
                if let Some(status) = &session.status {
                    let fg = match status.kind {
                        StatusKind::Info => self.theme.info,
                        StatusKind::Error => self.theme.error,
                    };
                    screen.put_str(0, y, &status.text, fg, CellAttrs::BOLD);
                } else {
                    screen.put_str(0, y, INSERT_HINT, self.theme.hint, CellAttrs::empty());
                }
            }
        }
    }

    fn draw_command_line(&self, command: &CommandLine, screen: &mut Screen, y: usize) {
        let mut x = screen.put_str(0, y, ";", self.theme.hint, CellAttrs::BOLD);
        x = screen.put_str(x, y, command.text(), self.theme.plain, CellAttrs::empty());
        screen.put_str(x, y, COMMAND_DISCLAIMER, self.theme.hint, CellAttrs::DIM);
        // The command line has its own cursor marker.
        screen.add_attrs(1 + command.cursor(), y, CellAttrs::REVERSE);
    }

    /// Render a full-screen notice (compile result, run output, help).
    pub fn draw_notice(&self, notice: &Notice, screen: &mut Screen) {
        screen.clear();
        screen.put_str(0, 0, &notice.title, self.theme.info, CellAttrs::BOLD);
        let last = screen.height().saturating_sub(1);
        for (i, line) in notice.body.iter().enumerate() {
            let y = i + 2;
            if y >= last {
                break;
            }
            screen.put_str(0, y, line, self.theme.plain, CellAttrs::empty());
        }
        screen.put_str(0, last, &notice.footer, self.theme.hint, CellAttrs::BOLD);
    }

    /// Render a modal single-line prompt (credential entry).
    pub fn draw_prompt(&self, prompt: &str, line: &CommandLine, screen: &mut Screen) {
        screen.clear();
        let y = screen.height() / 2;
        let x = screen.put_str(0, y, prompt, self.theme.hint, CellAttrs::BOLD);
        screen.put_str(x, y, line.text(), self.theme.plain, CellAttrs::empty());
        screen.add_attrs(x + line.cursor(), y, CellAttrs::REVERSE);
    }
}
