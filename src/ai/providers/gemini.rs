use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

use crate::ai::providers::{ProviderError, SlideProvider};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Google Gemini `generateContent` client.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
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

    fn request_body(prompt: &str) -> Value {
        json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": 0.7,
                "maxOutputTokens": 8192
            }
        })
    }

    fn extract_text(body: &Value) -> Option<String> {
        body.get("candidates")?
            .get(0)?
            .get("content")?
            .get("parts")?
            .get(0)?
            .get("text")?
            .as_str()
            .map(str::to_string)
    }
}

#[async_trait]
impl SlideProvider for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self.api_key.as_ref().ok_or(ProviderError::NotConfigured)?;
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        tracing::debug!(model = %self.model, "calling gemini");
        let resp = self
            .http
            .post(&url)
            .query(&[("key", api_key.as_str())])
            .json(&Self::request_body(prompt))
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
            ProviderError::Malformed("missing candidates[0].content.parts[0].text".into())
        })?;
        tracing::debug!(chars = text.len(), "gemini responded");
        Ok(text)
    }
}
