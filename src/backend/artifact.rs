//! The generated-code artifact and its text transforms.
//!
//! The generator's response is a header (`Status:` / `Desc:` / `Next:`
//! lines) followed by a `Code:` section, with the code often wrapped in
//! markdown fences. The artifact stores the code with fences already
//! stripped; header lines that leak into the code section are
//! comment-prefixed only when persisting to a file, never when running.

use regex::Regex;
use std::sync::OnceLock;

/// The last successful generator output, held until overwritten by the next
/// compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    code: String,
    status: String,
}

impl Artifact {
    /// Build an artifact from raw generator output, stripping markdown
    /// code fences from the code.
    pub fn new(raw_code: &str, status: impl Into<String>) -> Self {
        Self {
            code: strip_code_fences(raw_code),
            status: status.into(),
        }
    }

    /// The generated code, ready to run.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The generator's status header.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// The code prepared for persisting to a file: stray header lines are
    /// commented out rather than deleted.
    pub fn code_for_saving(&self) -> String {
        comment_header_lines(&self.code)
    }
}

fn header_line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\s*(Status:|Desc:|Next:)").expect("valid pattern"))
}

/// Remove markdown code-fence delimiter lines from generated code.
///
/// Only the fence lines themselves are dropped; fenced content is kept.
pub fn strip_code_fences(code: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for line in code.lines() {
        if line.trim_start().starts_with("```") {
            continue;
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// Comment-prefix any line that begins with a generator header marker.
pub fn comment_header_lines(code: &str) -> String {
    let pattern = header_line_pattern();
    code.lines()
        .map(|line| {
            if pattern.is_match(line) {
                format!("#{line}")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split a raw generator response into (status header, code section).
///
/// The strict form is `Status: ... Desc: ... Next: ... Code: ...`; when the
/// response doesn't match, everything before `Code:` becomes the status and
/// everything after it the code. A response with no `Code:` marker is all
/// status, with empty code.
pub fn split_response(raw: &str) -> (String, String) {
    static STRICT: OnceLock<Regex> = OnceLock::new();
    let strict = STRICT.get_or_init(|| {
        Regex::new(r"(?s)Status:\s*(.*?)\nDesc:\s*(.*?)\nNext:\s*(.*?)\nCode:\s*(.*)")
            .expect("valid pattern")
    });

    if let Some(captures) = strict.captures(raw) {
        let status = format!(
            "Status: {}\nDesc: {}\nNext: {}",
            captures[1].trim(),
            captures[2].trim(),
            captures[3].trim()
        );
        return (status, captures[4].trim().to_string());
    }

    match raw.split_once("Code:") {
        Some((head, tail)) => (head.trim().to_string(), tail.trim().to_string()),
        None => (raw.trim().to_string(), String::new()),
    }
}
