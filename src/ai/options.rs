use serde::Deserialize;

use crate::error::AppError;

pub const MIN_SLIDES: i64 = 3;
pub const MAX_SLIDES: i64 = 20;
pub const DEFAULT_SLIDES: i64 = 8;

/// Raw generation request body. Fields are loosely typed on purpose; they
/// are checked and defaulted by [`GenerateOptions::from_request`] so bad
/// values produce a validation error instead of a deserialize rejection.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
    pub slides_count: Option<i64>,
    pub language: Option<String>,
    pub theme: Option<String>,
    pub style: Option<String>,
    pub text_amount: Option<String>,
    pub ai_model: Option<String>,
    pub custom_outline: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dialogue,
    Alien,
    Wine,
    Snowball,
    Petrol,
    Piano,
    Business,
}

impl Theme {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dialogue" => Some(Theme::Dialogue),
            "alien" => Some(Theme::Alien),
            "wine" => Some(Theme::Wine),
            "snowball" => Some(Theme::Snowball),
            "petrol" => Some(Theme::Petrol),
            "piano" => Some(Theme::Piano),
            "business" => Some(Theme::Business),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dialogue => "dialogue",
            Theme::Alien => "alien",
            Theme::Wine => "wine",
            Theme::Snowball => "snowball",
            Theme::Petrol => "petrol",
            Theme::Piano => "piano",
            Theme::Business => "business",
        }
    }

    /// CSS gradient painted behind every slide of the deck.
    pub fn background(&self) -> &'static str {
        match self {
            Theme::Dialogue => "linear-gradient(135deg, #ffffff 0%, #f8f9fa 100%)",
            Theme::Alien => "linear-gradient(135deg, #1a1a2e 0%, #16213e 100%)",
            Theme::Wine => "linear-gradient(135deg, #581c3c 0%, #3d1428 100%)",
            Theme::Snowball => "linear-gradient(135deg, #e0f2fe 0%, #bae6fd 100%)",
            Theme::Petrol => "linear-gradient(135deg, #475569 0%, #334155 100%)",
            Theme::Piano => "linear-gradient(135deg, #000000 0%, #1e293b 50%, #ffffff 100%)",
            Theme::Business => "linear-gradient(135deg, #3a7bd5 0%, #00d2ff 100%)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Hindi,
    Japanese,
}

impl Language {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "english" => Some(Language::English),
            "spanish" => Some(Language::Spanish),
            "french" => Some(Language::French),
            "german" => Some(Language::German),
            "hindi" => Some(Language::Hindi),
            "japanese" => Some(Language::Japanese),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Spanish => "spanish",
            Language::French => "french",
            Language::German => "german",
            Language::Hindi => "hindi",
            Language::Japanese => "japanese",
        }
    }

    /// Name embedded in the model instruction.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Hindi => "Hindi",
            Language::Japanese => "Japanese",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Professional,
    Creative,
    Minimal,
}

impl Style {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "professional" => Some(Style::Professional),
            "creative" => Some(Style::Creative),
            "minimal" => Some(Style::Minimal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Professional => "professional",
            Style::Creative => "creative",
            Style::Minimal => "minimal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAmount {
    Minimal,
    Concise,
    Detailed,
    Extensive,
}

impl TextAmount {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "minimal" => Some(TextAmount::Minimal),
            "concise" => Some(TextAmount::Concise),
            "detailed" => Some(TextAmount::Detailed),
            "extensive" => Some(TextAmount::Extensive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TextAmount::Minimal => "minimal",
            TextAmount::Concise => "concise",
            TextAmount::Detailed => "detailed",
            TextAmount::Extensive => "extensive",
        }
    }

    /// Length instruction embedded in the model prompt.
    pub fn instruction(&self) -> &'static str {
        match self {
            TextAmount::Minimal => "Short and punchy",
            TextAmount::Concise => "Standard professional length",
            TextAmount::Detailed => "Long and descriptive",
            TextAmount::Extensive => "Very detailed analysis",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiModel {
    Gemini,
    Deepseek,
}

impl AiModel {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "gemini" => Some(AiModel::Gemini),
            "deepseek" => Some(AiModel::Deepseek),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AiModel::Gemini => "gemini",
            AiModel::Deepseek => "deepseek",
        }
    }
}

/// Validated generation options. Construction is the validation gate: no
/// provider is called with options that did not pass through here.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub prompt: String,
    pub slides_count: i64,
    pub language: Language,
    pub theme: Theme,
    pub style: Style,
    pub text_amount: TextAmount,
    pub ai_model: AiModel,
    pub outline: Vec<String>,
}

fn parse_or_default<T>(
    field: &str,
    value: Option<&str>,
    parse: impl Fn(&str) -> Option<T>,
    default: T,
) -> Result<T, AppError> {
    match value {
        None => Ok(default),
        Some(raw) => parse(raw)
            .ok_or_else(|| AppError::Validation(format!("Unknown {field} '{raw}'"))),
    }
}

impl GenerateOptions {
    pub fn from_request(req: &GenerateRequest) -> Result<Self, AppError> {
        let prompt = req.prompt.trim().to_string();
        if prompt.is_empty() {
            return Err(AppError::Validation("Prompt is required".into()));
        }

        // A custom outline overrides the requested count with its line count
        let outline: Vec<String> = req
            .custom_outline
            .as_deref()
            .unwrap_or("")
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();

        let slides_count = if outline.is_empty() {
            req.slides_count.unwrap_or(DEFAULT_SLIDES)
        } else {
            outline.len() as i64
        };
        if !(MIN_SLIDES..=MAX_SLIDES).contains(&slides_count) {
            return Err(AppError::Validation(format!(
                "slides_count must be between {MIN_SLIDES} and {MAX_SLIDES}"
            )));
        }

        Ok(GenerateOptions {
            prompt,
            slides_count,
            language: parse_or_default(
                "language",
                req.language.as_deref(),
                Language::parse,
                Language::English,
            )?,
            theme: parse_or_default("theme", req.theme.as_deref(), Theme::parse, Theme::Dialogue)?,
            style: parse_or_default(
                "style",
                req.style.as_deref(),
                Style::parse,
                Style::Professional,
            )?,
            text_amount: parse_or_default(
                "text_amount",
                req.text_amount.as_deref(),
                TextAmount::parse,
                TextAmount::Concise,
            )?,
            ai_model: parse_or_default(
                "ai_model",
                req.ai_model.as_deref(),
                AiModel::parse,
                AiModel::Gemini,
            )?,
            outline,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> GenerateRequest {
        GenerateRequest {
            prompt: "Climate Change".into(),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_applied_when_fields_omitted() {
        let opts = GenerateOptions::from_request(&base_request()).unwrap();
        assert_eq!(opts.slides_count, DEFAULT_SLIDES);
        assert_eq!(opts.language, Language::English);
        assert_eq!(opts.theme, Theme::Dialogue);
        assert_eq!(opts.style, Style::Professional);
        assert_eq!(opts.text_amount, TextAmount::Concise);
        assert_eq!(opts.ai_model, AiModel::Gemini);
        assert!(opts.outline.is_empty());
    }

    #[test]
    fn empty_prompt_is_rejected() {
        let req = GenerateRequest {
            prompt: "   ".into(),
            ..Default::default()
        };
        assert!(GenerateOptions::from_request(&req).is_err());
    }

    #[test]
    fn out_of_range_count_is_rejected() {
        for count in [2, 21, 25, 0, -1] {
            let req = GenerateRequest {
                slides_count: Some(count),
                ..base_request()
            };
            let err = GenerateOptions::from_request(&req).unwrap_err();
            assert!(err.to_string().contains("slides_count"), "count {count}");
        }
    }

    #[test]
    fn boundary_counts_are_accepted() {
        for count in [MIN_SLIDES, MAX_SLIDES] {
            let req = GenerateRequest {
                slides_count: Some(count),
                ..base_request()
            };
            let opts = GenerateOptions::from_request(&req).unwrap();
            assert_eq!(opts.slides_count, count);
        }
    }

    #[test]
    fn outline_overrides_slide_count() {
        let req = GenerateRequest {
            slides_count: Some(8),
            custom_outline: Some("Intro\n\nBackground\nFindings\nConclusion\n".into()),
            ..base_request()
        };
        let opts = GenerateOptions::from_request(&req).unwrap();
        assert_eq!(opts.slides_count, 4);
        assert_eq!(opts.outline[0], "Intro");
    }

    #[test]
    fn outline_outside_range_is_rejected() {
        let req = GenerateRequest {
            custom_outline: Some("One\nTwo".into()),
            ..base_request()
        };
        assert!(GenerateOptions::from_request(&req).is_err());
    }

    #[test]
    fn unknown_enum_values_are_rejected() {
        let req = GenerateRequest {
            theme: Some("vaporwave".into()),
            ..base_request()
        };
        let err = GenerateOptions::from_request(&req).unwrap_err();
        assert!(err.to_string().contains("vaporwave"));

        let req = GenerateRequest {
            ai_model: Some("gpt-9".into()),
            ..base_request()
        };
        assert!(GenerateOptions::from_request(&req).is_err());
    }

    #[test]
    fn enum_parsing_is_case_insensitive() {
        let req = GenerateRequest {
            language: Some("English".into()),
            theme: Some("DIALOGUE".into()),
            ..base_request()
        };
        let opts = GenerateOptions::from_request(&req).unwrap();
        assert_eq!(opts.language, Language::English);
        assert_eq!(opts.theme, Theme::Dialogue);
    }

    #[test]
    fn every_theme_has_a_background() {
        for theme in [
            Theme::Dialogue,
            Theme::Alien,
            Theme::Wine,
            Theme::Snowball,
            Theme::Petrol,
            Theme::Piano,
            Theme::Business,
        ] {
            assert!(theme.background().starts_with("linear-gradient"));
        }
    }
}
