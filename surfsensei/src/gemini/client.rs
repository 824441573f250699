//! Gemini HTTP client and the model boundary trait.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use super::response::GenerateResponse;
use crate::config::Config;
use crate::error::SurfError;

/// The two model operations the advisor depends on.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Generate text from a system instruction and a user query.
    async fn generate(&self, system_instruction: &str, user_query: &str)
        -> Result<String, SurfError>;

    /// Generate text from a prompt with web search enabled.
    async fn generate_with_search(&self, prompt: &str) -> Result<String, SurfError>;
}

/// Build a `generateContent` request body.
pub fn build_request_body(system_instruction: Option<&str>, prompt: &str, search: bool) -> Value {
    let mut body = json!({
        "contents": [{"role": "user", "parts": [{"text": prompt}]}],
    });
    if let Some(system) = system_instruction {
        body["systemInstruction"] = json!({"parts": [{"text": system}]});
    }
    if search {
        body["tools"] = json!([{ "google_search": {} }]);
    }
    body
}

fn truncate_body(body: &str) -> String {
    if body.len() > 300 {
        let cut = (0..=300).rev().find(|&i| body.is_char_boundary(i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}

/// Client for the Google Generative Language API.
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client from config. A missing API key is reported on first use.
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn call(&self, body: &Value) -> Result<String, SurfError> {
        let api_key = self.api_key.as_deref().ok_or(SurfError::MissingApiKey)?;

        // Header auth keeps the key out of URLs and logs.
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        info!(model = %self.model, "Calling Gemini");

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!("Gemini HTTP request failed: {e}");
                SurfError::Transport(format!("Network error: {e}"))
            })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| {
            error!("Failed to read Gemini response body: {e}");
            SurfError::Transport(format!("Network error reading response: {e}"))
        })?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error: {}", truncate_body(&text));
            return Err(SurfError::Transport(format!(
                "Gemini API returned {status}: {}",
                truncate_body(&text)
            )));
        }

        let data: Value = serde_json::from_str(&text).map_err(|e| {
            error!("Failed to parse Gemini response JSON: {e}");
            SurfError::Transport(format!("Malformed response from Gemini: {e}"))
        })?;

        let parsed = GenerateResponse::parse(&data);
        if let Some(usage) = parsed.usage {
            debug!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "Gemini usage"
            );
        }

        match parsed.text {
            Some(text) => Ok(text),
            None => {
                warn!(reason = %parsed.empty_reason(), "Gemini returned no text");
                Err(SurfError::EmptyResponse)
            }
        }
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate(
        &self,
        system_instruction: &str,
        user_query: &str,
    ) -> Result<String, SurfError> {
        let body = build_request_body(Some(system_instruction), user_query, false);
        self.call(&body).await
    }

    async fn generate_with_search(&self, prompt: &str) -> Result<String, SurfError> {
        let body = build_request_body(None, prompt, true);
        self.call(&body).await
    }
}
