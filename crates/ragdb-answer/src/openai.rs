//! OpenAI-compatible chat-completion generator.

use anyhow::{anyhow, bail, Result};
use ragdb_core::traits::Generator;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

// Fixed low temperature for reproducible answers.
const TEMPERATURE: f32 = 0.2;

pub struct OpenAiGenerator {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
}

impl OpenAiGenerator {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

impl Generator for OpenAiGenerator {
    /// Single round trip; transport and auth failures surface to the caller
    /// unchanged, retry policy belongs to the serving layer.
    fn complete(&self, system: &str, user: &str) -> Result<String> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
            "temperature": TEMPERATURE,
        });
        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            bail!("chat completion request failed with {status}: {detail}");
        }
        let parsed: serde_json::Value = response.json()?;
        let content = parsed["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| anyhow!("chat completion response missing message content"))?;
        tracing::debug!(model = %self.model, chars = content.len(), "completion received");
        Ok(content.to_string())
    }
}
