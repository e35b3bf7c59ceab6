use genpdf::elements::{Break, Paragraph};
use genpdf::style::Style;
use genpdf::Element;

use crate::db::models::{Presentation, Slide};
use crate::export::ExportError;

/// Font lookup order: a local ./fonts directory wins, then the usual
/// Linux distro locations. Liberation ships the Regular/Bold/Italic/
/// BoldItalic file set genpdf expects.
const FONT_CANDIDATES: &[(&str, &str)] = &[
    ("./fonts", "Arial"),
    ("./fonts", "LiberationSans"),
    ("/usr/share/fonts/truetype/liberation", "LiberationSans"),
    ("/usr/share/fonts/truetype/liberation2", "LiberationSans"),
    ("/usr/share/fonts/liberation", "LiberationSans"),
];

fn load_font() -> Result<genpdf::fonts::FontFamily<genpdf::fonts::FontData>, ExportError> {
    for (dir, name) in FONT_CANDIDATES {
        if let Ok(family) = genpdf::fonts::from_files(dir, name, None) {
            return Ok(family);
        }
    }
    Err(ExportError::FontUnavailable)
}

/// Render the deck as a linear PDF: deck title page header, then one
/// titled section per slide with its body lines.
pub fn render(presentation: &Presentation, slides: &[Slide]) -> Result<Vec<u8>, ExportError> {
    let font_family = load_font()?;
    let mut doc = genpdf::Document::new(font_family);
    doc.set_title(presentation.title.clone());

    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(15);
    doc.set_page_decorator(decorator);

    doc.push(
        Paragraph::new(presentation.title.clone())
            .styled(Style::new().bold().with_font_size(24)),
    );
    doc.push(Break::new(1.0));

    for slide in slides {
        doc.push(
            Paragraph::new(format!("{}. {}", slide.position, slide.title))
                .styled(Style::new().bold().with_font_size(16)),
        );
        for line in slide.content.lines() {
            let line = line.trim();
            if !line.is_empty() {
                doc.push(Paragraph::new(line).styled(Style::new().with_font_size(11)));
            }
        }
        doc.push(Break::new(1.0));
    }

    let mut out = Vec::new();
    doc.render(&mut out)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    Ok(out)
}
