use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

use crate::ai::providers::{ProviderError, SlideProvider};

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
// DeepSeek models routinely take longer than Gemini to first byte
const REQUEST_TIMEOUT: Duration = Duration::from_secs(50);

const SYSTEM_PROMPT: &str =
    "You are a professional presentation writer. Output ONLY valid JSON. No markdown, no explanations.";

/// OpenRouter chat-completions client (DeepSeek by default).
pub struct OpenRouterClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl OpenRouterClient {
    pub fn new(http: reqwest::Client, api_key: Option<String>, model: String) -> Self {
        Self {
            http,
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn request_body(&self, prompt: &str) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt }
            ],
            "response_format": { "type": "json_object" },
            "max_tokens": 4000,
            "temperature": 0.7
        })
    }

    fn extract_text(body: &Value) -> Option<String> {
        body.get("choices")?
            .get(0)?
            .get("message")?
            .get("content")?
            .as_str()
            .map(str::to_string)
    }
}

#[async_trait]
impl SlideProvider for OpenRouterClient {
    fn name(&self) -> &'static str {
        "openrouter"
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self.api_key.as_ref().ok_or(ProviderError::NotConfigured)?;
        let url = format!("{}/chat/completions", self.base_url);

        tracing::debug!(model = %self.model, "calling openrouter");
        let resp = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&self.request_body(prompt))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = resp.status();
        if status.as_u16() == 429 {
            return Err(ProviderError::Quota);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let body: Value = resp.json().await?;
        let text = Self::extract_text(&body).ok_or_else(|| {
            ProviderError::Malformed("missing choices[0].message.content".into())
        })?;
        tracing::debug!(chars = text.len(), "openrouter responded");
        Ok(text)
    }
}
