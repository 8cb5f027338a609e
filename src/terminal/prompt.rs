//! Modal line prompt drawn over the editor.

use super::Terminal;
use crate::backend::CredentialPrompt;
use crate::error::Result;
use crate::input::{CommandLine, Event, KeyCode};
use crate::render::{Renderer, Screen};

/// A synchronous single-line prompt using the session's terminal.
///
/// Used for credential entry at startup and on `rekey`. Enter submits, Esc
/// cancels.
pub struct TerminalPrompt<'a> {
    terminal: &'a mut Terminal,
    renderer: &'a Renderer,
    screen: &'a mut Screen,
}

impl<'a> TerminalPrompt<'a> {
    /// Create a prompt over the given terminal and screen.
    pub fn new(terminal: &'a mut Terminal, renderer: &'a Renderer, screen: &'a mut Screen) -> Self {
        Self {
            terminal,
            renderer,
            screen,
        }
    }
}

impl CredentialPrompt for TerminalPrompt<'_> {
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        let mut line = CommandLine::new();
        loop {
            self.renderer.draw_prompt(prompt, &line, self.screen);
            self.terminal.present(self.screen)?;
            match self.terminal.read_event()? {
                Event::Key(key) => match key.code {
                    KeyCode::Enter => return Ok(Some(line.take())),
                    KeyCode::Esc => return Ok(None),
                    KeyCode::Char(c) => line.insert(c),
                    KeyCode::Backspace => line.backspace(),
                    KeyCode::Left => line.left(),
                    KeyCode::Right => line.right(),
                    KeyCode::Home => line.home(),
                    KeyCode::End => line.end(),
                    _ => {}
                },
                Event::Resize { width, height } => {
                    self.screen.resize(width as usize, height as usize);
                }
                Event::Paste(text) => {
                    for c in text.chars().filter(|c| !c.is_control()) {
                        line.insert(c);
                    }
                }
            }
        }
    }
}
