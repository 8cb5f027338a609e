//! Chat-completion glue for the code generator.
//!
//! A blocking HTTP client that sends the buffer text with a fixed system
//! prompt and splits the response into (status header, code).

use super::{artifact::split_response, GenerateOutput, Generator};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// System prompt defining the YAML-to-code contract with the model.
const SYSTEM_PROMPT: &str = "\
You are an advanced YAML-to-Python code converter. Your task is to:

1. Parse and Validate YAML: Thoroughly analyze the entire YAML input to ensure it is syntactically correct and that every specified feature is fully captured.
2. Error Reporting: If any syntax errors are found, immediately return a clear error message indicating the precise error and its corresponding line number. Do not output any Python code in this case.
3. Code Generation: If the YAML is valid, produce complete, efficient, and professionally structured Python code that runs instantly on the command line (no graphical interfaces). The generated code must fully implement all specified features without taking shortcuts or omitting any essential details, while being optimized to avoid unnecessary token overflow.
4. Strict Output Format: Your response must adhere exactly to the following format (no additional text is permitted):

Status: <state whether the YAML is correct or if errors were found; also indicate if Python code was generated>
Desc: <a one-line explanation of what the generated program does>
Next: <any required modifications such as API specifications, URLs, API keys, or module installations; if none, state 'None'>
Code: <the complete, syntactically correct Python code>";

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Blocking chat-completion generator.
pub struct ChatGenerator {
    endpoint: String,
    model: String,
    client: reqwest::blocking::Client,
}

impl ChatGenerator {
    /// Create a generator for the given endpoint and model.
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_default();
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            client,
        }
    }
}

impl Generator for ChatGenerator {
    fn generate(&self, source: &str, api_key: &str) -> Result<GenerateOutput> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Message {
                    role: "user",
                    content: source,
                },
            ],
        };

        log::info!("generate: {} bytes of source via {}", source.len(), self.model);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .map_err(|e| Error::Generator(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Generator(format!(
                "server returned {}",
                response.status()
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| Error::Generator(format!("malformed response: {e}")))?;
        let content = parsed
            .choices
            .first()
            .map(|choice| choice.message.content.trim())
            .ok_or_else(|| Error::Generator("response contained no choices".to_string()))?;

        let (status, code) = split_response(content);
        Ok(GenerateOutput { code, status })
    }
}
