//! Editor configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for an editor session.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Width of the line-number gutter (digits only; a space separates it
    /// from the text).
    pub gutter_width: usize,
    /// Ceiling for executing generated code.
    pub run_timeout: Duration,
    /// Interpreter used to run generated code.
    pub interpreter: String,
    /// Chat-completion endpoint for the generator.
    pub endpoint: String,
    /// Model name sent to the generator.
    pub model: String,
    /// Where the API key is persisted.
    pub credential_path: PathBuf,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            gutter_width: 5,
            run_timeout: Duration::from_secs(10),
            interpreter: String::from("python3"),
            endpoint: String::from("https://api.openai.com/v1/chat/completions"),
            model: String::from("gpt-4o-mini"),
            credential_path: default_credential_path(),
        }
    }
}

/// Per-user config directory, falling back to the working directory when the
/// platform has none.
fn default_credential_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("forge"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("apikey.txt")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.gutter_width, 5);
        assert_eq!(config.run_timeout, Duration::from_secs(10));
        assert!(config.credential_path.ends_with("apikey.txt"));
    }
}
