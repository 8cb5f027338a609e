//! Error taxonomy for the editor.
//!
//! Collaborator failures (generator, runner, file I/O, credentials) and user
//! input errors are all recovered at the dispatcher boundary into a visible
//! status message; nothing below the dispatcher terminates the process.
//! Out-of-range buffer access is a caller bug and asserts instead of
//! returning an error.

use thiserror::Error;

/// All recoverable failures surfaced to the user as a status message.
#[derive(Debug, Error)]
pub enum Error {
    /// The code generator request failed (network, auth, malformed response).
    #[error("generator request failed: {0}")]
    Generator(String),

    /// The generated code could not be executed.
    #[error("failed to run generated code: {0}")]
    Runner(String),

    /// Credential storage failed.
    #[error("credential store error: {0}")]
    Credential(String),

    /// File or terminal I/O failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The command verb is not recognized.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The command requires a filename argument.
    #[error("'{0}' requires a filename argument")]
    MissingArgument(&'static str),

    /// A command needs generated code but no compile has succeeded yet.
    #[error("no generated code available from last compile")]
    NoArtifact,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
