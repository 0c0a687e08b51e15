//! Paper summarization through an OpenAI-compatible chat endpoint.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::http;

/// Chat completions endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Instruction appended after the paper text.
const PROMPT: &str = "Summarise the research paper";

/// Returned when the endpoint answers without any choice.
pub const NO_SUMMARY: &str = "No summary available";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Sends paper text to a chat model and returns its summary.
pub struct Summarizer {
    http: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl Summarizer {
    /// # Errors
    ///
    /// Returns error if `api_key` is blank or the HTTP client cannot be built
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            bail!("No API key configured; set one with `arxshelf settings --api-key <KEY>`");
        }

        Ok(Self {
            http: http::client(Duration::from_secs(180))?,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key,
        })
    }

    /// Summarizes raw paper text.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the endpoint rejects it, or the
    /// response is not a chat completion
    pub fn summarize(&self, text: &str) -> Result<String> {
        let request = build_request(&self.model, text);
        tracing::debug!(endpoint = %self.endpoint, model = %self.model, chars = text.len(), "requesting summary");

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .context("Summary request failed")?;
        let body = http::check_response(response)
            .context("Summary endpoint rejected the request")?
            .text()
            .context("Failed to read summary response")?;

        parse_response(&body)
    }
}

/// Extracts the text layer of a PDF document.
///
/// # Errors
///
/// Returns error if the bytes are not a readable PDF
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(bytes).context("Could not load PDF")
}

fn build_request<'a>(model: &'a str, text: &str) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: vec![ChatMessage {
            role: "user",
            content: format!("{}\n\n{}", text, PROMPT),
        }],
    }
}

fn parse_response(body: &str) -> Result<String> {
    let response: ChatResponse =
        serde_json::from_str(body).context("Unexpected summary response format")?;

    Ok(response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_else(|| NO_SUMMARY.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        // Arrange & Act
        let request = build_request(DEFAULT_MODEL, "Paper body");
        let json = serde_json::to_value(&request).expect("Should serialize");

        // Assert
        assert_eq!(json["model"], "gemini-2.0-flash");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(
            json["messages"][0]["content"],
            "Paper body\n\nSummarise the research paper"
        );
    }

    #[test]
    fn test_parse_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"**Short** summary"}},{"message":{"content":"second"}}]}"#;

        assert_eq!(parse_response(body).expect("Should parse"), "**Short** summary");
    }

    #[test]
    fn test_parse_no_choices() {
        assert_eq!(parse_response(r#"{"choices":[]}"#).expect("Should parse"), NO_SUMMARY);
        assert_eq!(parse_response("{}").expect("Should parse"), NO_SUMMARY);
    }

    #[test]
    fn test_parse_invalid_body() {
        assert!(parse_response("<html>oops</html>").is_err());
    }

    #[test]
    fn test_missing_api_key_rejected() {
        let result = Summarizer::new(DEFAULT_ENDPOINT, DEFAULT_MODEL, "  ");

        let err = result.err().expect("Blank key should fail");
        assert!(err.to_string().contains("No API key"));
    }

    #[test]
    fn test_extract_rejects_non_pdf() {
        assert!(extract_pdf_text(b"definitely not a pdf").is_err());
    }
}
