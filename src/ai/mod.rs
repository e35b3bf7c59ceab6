pub mod options;
pub mod parse;
pub mod prompt;
pub mod providers;

use std::sync::Arc;

use crate::ai::options::{AiModel, GenerateOptions};
use crate::ai::parse::RawSlide;
use crate::ai::providers::{GeminiClient, OpenRouterClient, ProviderError, SlideProvider};
use crate::config::AiConfig;
use crate::db::models::Slide;
use crate::error::AppError;

const KNOWN_LAYOUTS: &[&str] = &[
    "centered",
    "split",
    "three_col",
    "grid_4",
    "split_box",
    "roadmap",
];

/// A normalized deck plus the provider that actually produced it.
#[derive(Debug)]
pub struct GeneratedDeck {
    pub slides: Vec<Slide>,
    pub provider: &'static str,
}

/// Generation orchestrator: one prompt, primary provider, one fallback to
/// the other vendor, strict count conformance. Holds both clients behind
/// the provider trait so tests can substitute stubs.
pub struct SlideGenerator {
    gemini: Arc<dyn SlideProvider>,
    openrouter: Arc<dyn SlideProvider>,
}

impl SlideGenerator {
    pub fn from_config(config: &AiConfig) -> Self {
        if config.gemini_api_key.is_none() {
            tracing::warn!("gemini API key not configured — gemini calls will fail");
        }
        if config.openrouter_api_key.is_none() {
            tracing::warn!("openrouter API key not configured — openrouter calls will fail");
        }
        let http = reqwest::Client::new();
        Self {
            gemini: Arc::new(GeminiClient::new(
                http.clone(),
                config.gemini_api_key.clone(),
                config.gemini_model.clone(),
            )),
            openrouter: Arc::new(OpenRouterClient::new(
                http,
                config.openrouter_api_key.clone(),
                config.openrouter_model.clone(),
            )),
        }
    }

    pub fn with_providers(
        gemini: Arc<dyn SlideProvider>,
        openrouter: Arc<dyn SlideProvider>,
    ) -> Self {
        Self { gemini, openrouter }
    }

    /// Produce a normalized slide deck for validated options. Either every
    /// requested slide comes back well-formed, or this fails explicitly:
    /// a short or unparsable response from the primary triggers the single
    /// fallback, and after that the error names both providers.
    pub async fn generate(&self, opts: &GenerateOptions) -> Result<GeneratedDeck, AppError> {
        let prompt = prompt::build_prompt(opts);
        let expected = opts.slides_count as usize;

        let (primary, secondary) = match opts.ai_model {
            AiModel::Gemini => (&self.gemini, &self.openrouter),
            AiModel::Deepseek => (&self.openrouter, &self.gemini),
        };

        let primary_err = match attempt(primary.as_ref(), &prompt, expected).await {
            Ok(raw) => {
                return Ok(GeneratedDeck {
                    slides: normalize(raw, opts),
                    provider: primary.name(),
                })
            }
            Err(e) => e,
        };

        tracing::warn!(
            provider = primary.name(),
            error = %primary_err,
            "primary provider failed, trying fallback"
        );

        match attempt(secondary.as_ref(), &prompt, expected).await {
            Ok(raw) => Ok(GeneratedDeck {
                slides: normalize(raw, opts),
                provider: secondary.name(),
            }),
            Err(secondary_err) => Err(AppError::Generation {
                primary: format!("{}: {}", primary.name(), primary_err),
                secondary: format!("{}: {}", secondary.name(), secondary_err),
            }),
        }
    }
}

async fn attempt(
    provider: &dyn SlideProvider,
    prompt: &str,
    expected: usize,
) -> Result<Vec<RawSlide>, ProviderError> {
    let text = provider.complete(prompt).await?;
    parse::extract_slides(&text, expected)
}

/// Turn raw model slides into stored slides: truncate to the requested
/// count, number positions from 1, pin the layout cycle, attach image and
/// theme background.
fn normalize(raw: Vec<RawSlide>, opts: &GenerateOptions) -> Vec<Slide> {
    raw.into_iter()
        .take(opts.slides_count as usize)
        .enumerate()
        .map(|(i, r)| {
            let position = (i + 1) as i64;
            Slide {
                position,
                layout: layout_for(position, r.layout.as_deref()),
                image_url: Some(image_url(&r.title, position)),
                background: Some(opts.theme.background().to_string()),
                title: r.title,
                content: r.content,
            }
        })
        .collect()
}

/// Positions 1-7 follow the fixed cycle the renderers are built around;
/// later slides keep the model's layout tag when it is one we know.
fn layout_for(position: i64, model_layout: Option<&str>) -> String {
    let layout = match position {
        1 => "centered",
        2 | 7 => "split",
        3 => "three_col",
        4 => "grid_4",
        5 => "split_box",
        6 => "roadmap",
        _ => model_layout
            .filter(|l| KNOWN_LAYOUTS.contains(l))
            .unwrap_or("split"),
    };
    layout.to_string()
}

/// Deterministic per-slide illustration URL. The title slide asks for a
/// darker image so overlaid text stays readable.
fn image_url(title: &str, position: i64) -> String {
    let mut query = format!("{title} professional visual");
    if position == 1 {
        query.push_str(" dark hd wallpaper background");
    }
    let encoded = query.replace(' ', "%20");
    format!(
        "https://image.pollinations.ai/prompt/{encoded}?width=1280&height=720&nologo=true&seed={position}"
    )
}
