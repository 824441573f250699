//! Gemini `generateContent` response parsing.
//!
//! Only the parts we use are extracted: the concatenated answer text,
//! why a response was blocked (if it was) and token usage for logging.

use serde_json::Value;

/// Token usage statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// A parsed `generateContent` response.
#[derive(Debug, Clone, Default)]
pub struct GenerateResponse {
    /// Answer text, thought parts excluded. `None` when nothing was produced.
    pub text: Option<String>,

    /// Candidate finish reason (e.g. `STOP`, `SAFETY`).
    pub finish_reason: Option<String>,

    /// Prompt-level block reason, when the prompt itself was rejected.
    pub block_reason: Option<String>,

    pub usage: Option<TokenUsage>,
}

impl GenerateResponse {
    /// Parse a response body.
    pub fn parse(value: &Value) -> Self {
        let block_reason = value
            .get("promptFeedback")
            .and_then(|pf| pf.get("blockReason"))
            .and_then(Value::as_str)
            .map(String::from);

        let candidate = value
            .get("candidates")
            .and_then(Value::as_array)
            .and_then(|c| c.first());

        let finish_reason = candidate
            .and_then(|c| c.get("finishReason"))
            .and_then(Value::as_str)
            .map(String::from);

        let text = candidate.and_then(extract_text);

        Self {
            text,
            finish_reason,
            block_reason,
            usage: extract_usage(value),
        }
    }

    /// Short description of why no text came back, for logs.
    pub fn empty_reason(&self) -> String {
        match (&self.block_reason, &self.finish_reason) {
            (Some(block), _) => format!("prompt blocked ({block})"),
            (None, Some(finish)) => format!("finish reason: {finish}"),
            (None, None) => "no candidates returned".to_string(),
        }
    }
}

/// Join the text parts of a candidate, skipping thought parts.
fn extract_text(candidate: &Value) -> Option<String> {
    let parts = candidate
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(Value::as_array)?;

    let text: String = parts
        .iter()
        .filter(|part| !part.get("thought").and_then(Value::as_bool).unwrap_or(false))
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn extract_usage(value: &Value) -> Option<TokenUsage> {
    let usage = value.get("usageMetadata")?;

    Some(TokenUsage {
        input_tokens: usage
            .get("promptTokenCount")
            .and_then(Value::as_u64)
            .unwrap_or(0),
        output_tokens: usage
            .get("candidatesTokenCount")
            .and_then(Value::as_u64)
            .unwrap_or(0),
    })
}
