use serde_json::Value;

use crate::ai::providers::ProviderError;

/// A slide as the model returned it, before normalization.
#[derive(Debug, Clone)]
pub struct RawSlide {
    pub title: String,
    pub content: String,
    pub layout: Option<String>,
}

/// Pull an ordered slide list out of a provider's response text.
///
/// Models wrap JSON in markdown fences or prose more often than not, so
/// this tries, in order: the whole cleaned text, a `{"slides": [...]}`
/// wrapper, and finally the outermost `[...]` span. Anything short of
/// `expected` well-formed slides is malformed; the caller falls back or
/// fails, it never pads.
pub fn extract_slides(text: &str, expected: usize) -> Result<Vec<RawSlide>, ProviderError> {
    let cleaned = text.replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();

    let items = parse_items(cleaned)
        .ok_or_else(|| ProviderError::Malformed("no JSON slide array found".into()))?;

    let mut slides = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        slides.push(raw_slide(item).ok_or_else(|| {
            ProviderError::Malformed(format!("slide {} missing title or content", i + 1))
        })?);
    }

    if slides.len() < expected {
        return Err(ProviderError::Malformed(format!(
            "expected {} slides, got {}",
            expected,
            slides.len()
        )));
    }

    Ok(slides)
}

fn parse_items(cleaned: &str) -> Option<Vec<Value>> {
    if let Ok(value) = serde_json::from_str::<Value>(cleaned) {
        if let Some(items) = as_slide_array(&value) {
            return Some(items);
        }
    }

    // Prose around the payload: slice the outermost array
    let start = cleaned.find('[')?;
    let end = cleaned.rfind(']')?;
    if end <= start {
        return None;
    }
    let value = serde_json::from_str::<Value>(&cleaned[start..=end]).ok()?;
    as_slide_array(&value)
}

fn as_slide_array(value: &Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items.clone()),
        Value::Object(map) => match map.get("slides") {
            Some(Value::Array(items)) => Some(items.clone()),
            _ => None,
        },
        _ => None,
    }
}

fn raw_slide(item: &Value) -> Option<RawSlide> {
    let title = item.get("title")?.as_str()?.trim();
    let content = item.get("content")?.as_str()?.trim();
    if title.is_empty() || content.is_empty() {
        return None;
    }
    Some(RawSlide {
        title: title.to_string(),
        content: content.to_string(),
        layout: item
            .get("layout")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}
