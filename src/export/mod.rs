pub mod docx;
pub mod pdf;
pub mod pptx;

use crate::db::models::{Presentation, Slide};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Docx,
    Pptx,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Some(ExportFormat::Pdf),
            "docx" => Some(ExportFormat::Docx),
            "pptx" => Some(ExportFormat::Pptx),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
            ExportFormat::Pptx => "pptx",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Pptx => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no usable font found for PDF rendering")]
    FontUnavailable,

    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    #[error("archive write failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render a stored presentation into the requested binary format. Slides
/// are expected in position order; every slide's title and content appear
/// in the artifact.
pub fn render(
    format: ExportFormat,
    presentation: &Presentation,
    slides: &[Slide],
) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Pdf => pdf::render(presentation, slides),
        ExportFormat::Docx => docx::render(presentation, slides),
        ExportFormat::Pptx => pptx::render(presentation, slides),
    }
}

/// Attachment filename: the deck title with filesystem-hostile characters
/// squashed, plus the format extension.
pub fn download_filename(title: &str, format: ExportFormat) -> String {
    let safe: String = title
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let safe = safe.trim();
    let base = if safe.is_empty() { "presentation" } else { safe };
    format!("{}.{}", base, format.extension())
}

/// Minimal XML text escaping for hand-built OOXML parts.
pub(crate) fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
