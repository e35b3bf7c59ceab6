use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Lifecycle of a stored presentation. Generation is synchronous and
/// atomic, so a row is born `Ready`; a failed generation leaves no row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationStatus {
    Ready,
    Edited,
}

impl PresentationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresentationStatus::Ready => "ready",
            PresentationStatus::Edited => "edited",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "edited" => PresentationStatus::Edited,
            _ => PresentationStatus::Ready,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Presentation {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub prompt: String,
    pub slides_count: i64,
    pub theme: String,
    pub language: String,
    pub style: String,
    pub text_amount: String,
    pub ai_model: String,
    pub status: PresentationStatus,
    #[serde(skip_serializing)]
    pub content_json: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Dashboard listing row; no slide payload.
#[derive(Debug, Clone, Serialize)]
pub struct PresentationSummary {
    pub id: String,
    pub title: String,
    pub prompt: String,
    pub slides_count: i64,
    pub theme: String,
    pub style: String,
    pub language: String,
    pub ai_model: String,
    pub status: PresentationStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// One ordered unit of a deck. Stored twice: serialized into
/// `presentations.content_json` for display, and as a normalized row in
/// the `slides` table for export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub position: i64,
    pub title: String,
    pub content: String,
    pub layout: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}
