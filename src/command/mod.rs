//! Typed command language.
//!
//! A completed command string is parsed into a [`Command`] variant at the
//! dispatch boundary, so the dispatcher's match is exhaustive and argument
//! validation happens in exactly one place.

mod dispatch;

pub use dispatch::{Dispatcher, Outcome};

use crate::error::{Error, Result};

/// A parsed command verb with its validated argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send the buffer to the generator and keep the result.
    Compile,
    /// Compile, then immediately run the generated code.
    Execute,
    /// Run the code from the last compile.
    Run,
    /// Save the generated code to a file.
    SavePy(String),
    /// Load a file into the buffer.
    Open(String),
    /// Save the buffer to a file.
    Save(String),
    /// Delete the stored API key.
    DeleteKey,
    /// Prompt for and store a new API key.
    Rekey,
    /// Show the command list.
    Help,
    /// Leave the editor.
    Exit,
}

impl Command {
    /// Parse a command string into a typed command.
    ///
    /// The verb is everything up to the first whitespace run
    /// (case-insensitive); the argument is everything after it. An empty
    /// string parses to `None` (no-op). Verbs that take no argument ignore
    /// any extra text.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownCommand`] for an unrecognized verb;
    /// [`Error::MissingArgument`] when a filename verb lacks its argument.
    pub fn parse(input: &str) -> Result<Option<Self>> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }
        let (verb, argument) = match input.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (input, ""),
        };

        let require = |name: &'static str| -> Result<String> {
            if argument.is_empty() {
                Err(Error::MissingArgument(name))
            } else {
                Ok(argument.to_string())
            }
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "compile" => Self::Compile,
            "execute" => Self::Execute,
            "run" => Self::Run,
            "savepy" => Self::SavePy(require("savepy")?),
            "open" => Self::Open(require("open")?),
            "save" => Self::Save(require("save")?),
            "deletekey" => Self::DeleteKey,
            "rekey" => Self::Rekey,
            "help" => Self::Help,
            "exit" => Self::Exit,
            _ => return Err(Error::UnknownCommand(verb.to_string())),
        };
        Ok(Some(command))
    }
}
