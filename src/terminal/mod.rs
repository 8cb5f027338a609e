//! Terminal backend: raw-mode guard, blocking event reads, frame output.

mod prompt;

pub use prompt::TerminalPrompt;

use crate::input::{convert_event, Event};
use crate::render::{OutputBuffer, Screen};
use crossterm::{
    cursor,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;

/// Owns the terminal for the lifetime of the session.
///
/// Construction enters raw mode and the alternate screen; `Drop` restores
/// the terminal even when the session ends with an error.
pub struct Terminal {
    output: OutputBuffer,
    width: u16,
    height: u16,
}

impl Terminal {
    /// Take over the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails (raw mode, alternate
    /// screen); this is the one unrecoverable startup failure.
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste, cursor::Hide)?;
        Ok(Self {
            output: OutputBuffer::new(),
            width,
            height,
        })
    }

    /// Current terminal width in columns.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Current terminal height in rows.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Record a new terminal size after a resize event.
    pub const fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Encode and flush a full frame in a single write.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn present(&mut self, screen: &Screen) -> io::Result<()> {
        self.output.encode_frame(screen);
        self.output.flush_to(&mut io::stdout())
    }

    /// Block until the next event the editor cares about.
    ///
    /// Events the editor ignores (mouse, focus, key release) are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying event read fails.
    pub fn read_event(&mut self) -> io::Result<Event> {
        loop {
            if let Some(event) = convert_event(crossterm::event::read()?) {
                if let Event::Resize { width, height } = event {
                    self.set_size(width, height);
                }
                return Ok(event);
            }
        }
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show, DisableBracketedPaste, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
