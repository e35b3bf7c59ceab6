pub mod gemini;
pub mod openrouter;

use async_trait::async_trait;

pub use gemini::GeminiClient;
pub use openrouter::OpenRouterClient;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("API key not configured")]
    NotConfigured,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("quota exhausted")]
    Quota,

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// One text-generation backend. Implementations return the raw response
/// text; parsing and count conformance live in the orchestrator so both
/// vendors share the same checks.
#[async_trait]
pub trait SlideProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}
