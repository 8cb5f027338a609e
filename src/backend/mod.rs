//! Collaborator boundaries: code generation, execution, credentials.
//!
//! The editor core only sees the traits defined here. The concrete
//! implementations ([`openai`], [`runner`], [`keystore`]) are thin I/O glue
//! with no editor logic in them.

mod artifact;
mod keystore;
mod openai;
mod runner;

pub use artifact::{comment_header_lines, split_response, strip_code_fences, Artifact};
pub use keystore::FileKeyStore;
pub use openai::ChatGenerator;
pub use runner::SubprocessRunner;

use crate::error::Result;
use std::time::Duration;

/// Output of a successful generation: the code plus an explanatory status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutput {
    /// Raw generated code, possibly still fenced in markdown.
    pub code: String,
    /// The generator's status/description header.
    pub status: String,
}

/// Output of executing generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Whether the process was killed at the timeout ceiling.
    pub terminated_by_timeout: bool,
    /// Exit code, when the process exited normally.
    pub exit_code: Option<i32>,
}

/// Translates buffer text into another language's source.
pub trait Generator {
    /// Generate code from `source`, authenticating with `api_key`.
    fn generate(&self, source: &str, api_key: &str) -> Result<GenerateOutput>;
}

/// Executes generated code with a bounded timeout.
pub trait Runner {
    /// Run `code`, killing the process if it exceeds `timeout`.
    fn run(&self, code: &str, timeout: Duration) -> Result<RunOutput>;
}

/// Lifecycle of the stored API credential.
pub trait CredentialStore {
    /// Load the credential, if one is stored. Empty values read as `None`.
    fn load(&self) -> Option<String>;
    /// Persist the credential.
    fn save(&self, credential: &str) -> Result<()>;
    /// Delete the stored credential. Returns `false` if none existed.
    fn delete(&self) -> Result<bool>;
}

/// Synchronous modal prompt for a credential, supplied by the frontend.
pub trait CredentialPrompt {
    /// Ask the user for a value. `None` means the prompt was cancelled.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>>;
}
