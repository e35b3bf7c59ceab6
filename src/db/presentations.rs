use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

use crate::db::models::{Presentation, PresentationStatus, PresentationSummary, Slide};
use crate::error::AppError;

pub struct NewPresentation<'a> {
    pub user_id: &'a str,
    pub title: &'a str,
    pub prompt: &'a str,
    pub slides_count: i64,
    pub theme: &'a str,
    pub language: &'a str,
    pub style: &'a str,
    pub text_amount: &'a str,
    pub ai_model: &'a str,
}

const PRESENTATION_COLUMNS: &str = "id, user_id, title, prompt, slides_count, theme, language, \
     style, text_amount, ai_model, status, content_json, created_at, updated_at";

fn row_to_presentation(row: &rusqlite::Row<'_>) -> Result<Presentation, rusqlite::Error> {
    let status: String = row.get(10)?;
    Ok(Presentation {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        prompt: row.get(3)?,
        slides_count: row.get(4)?,
        theme: row.get(5)?,
        language: row.get(6)?,
        style: row.get(7)?,
        text_amount: row.get(8)?,
        ai_model: row.get(9)?,
        status: PresentationStatus::parse(&status),
        content_json: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

fn insert_slide_rows(
    tx: &rusqlite::Transaction<'_>,
    presentation_id: &str,
    slides: &[Slide],
) -> Result<(), rusqlite::Error> {
    let mut stmt = tx.prepare(
        "INSERT INTO slides (id, presentation_id, position, title, body, layout, image_url, background)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;
    for slide in slides {
        stmt.execute(params![
            uuid::Uuid::now_v7().to_string(),
            presentation_id,
            slide.position,
            slide.title,
            slide.content,
            slide.layout,
            slide.image_url,
            slide.background,
        ])?;
    }
    Ok(())
}

/// Persist a presentation and its slides in one transaction. The row is
/// not visible until the slide rows are attached.
pub fn insert_with_slides(
    conn: &mut Connection,
    new: &NewPresentation<'_>,
    slides: &[Slide],
) -> Result<Presentation, AppError> {
    let id = uuid::Uuid::now_v7().to_string();
    let content_json = serde_json::to_string(slides)?;

    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO presentations
         (id, user_id, title, prompt, slides_count, theme, language, style, text_amount, ai_model, status, content_json)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 'ready', ?11)",
        params![
            id,
            new.user_id,
            new.title,
            new.prompt,
            new.slides_count,
            new.theme,
            new.language,
            new.style,
            new.text_amount,
            new.ai_model,
            content_json,
        ],
    )?;
    insert_slide_rows(&tx, &id, slides)?;
    tx.commit()?;

    let presentation = conn.query_row(
        &format!("SELECT {PRESENTATION_COLUMNS} FROM presentations WHERE id = ?1"),
        params![id],
        row_to_presentation,
    )?;
    Ok(presentation)
}

/// Owned presentations, newest first.
pub fn list_for_user(
    conn: &Connection,
    user_id: &str,
) -> Result<Vec<PresentationSummary>, rusqlite::Error> {
    let mut stmt = conn.prepare(
        "SELECT id, title, prompt, slides_count, theme, style, language, ai_model, status, created_at, updated_at
         FROM presentations WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC",
    )?;
    let rows = stmt.query_map(params![user_id], |row| {
        let status: String = row.get(8)?;
        Ok(PresentationSummary {
            id: row.get(0)?,
            title: row.get(1)?,
            prompt: row.get(2)?,
            slides_count: row.get(3)?,
            theme: row.get(4)?,
            style: row.get(5)?,
            language: row.get(6)?,
            ai_model: row.get(7)?,
            status: PresentationStatus::parse(&status),
            created_at: row.get(9)?,
            updated_at: row.get(10)?,
        })
    })?;
    rows.collect()
}

/// Fetch a presentation scoped to its owner. A non-owner gets `None`,
/// indistinguishable from a missing row.
pub fn find_for_user(
    conn: &Connection,
    id: &str,
    user_id: &str,
) -> Result<Option<Presentation>, rusqlite::Error> {
    conn.query_row(
        &format!("SELECT {PRESENTATION_COLUMNS} FROM presentations WHERE id = ?1 AND user_id = ?2"),
        params![id, user_id],
        row_to_presentation,
    )
    .optional()
}

/// Normalized slide rows in position order (export path).
pub fn slides_for(conn: &Connection, presentation_id: &str) -> Result<Vec<Slide>, rusqlite::Error> {
    let mut stmt = conn.prepare(
        "SELECT position, title, body, layout, image_url, background
         FROM slides WHERE presentation_id = ?1 ORDER BY position ASC",
    )?;
    let rows = stmt.query_map(params![presentation_id], |row| {
        Ok(Slide {
            position: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            layout: row.get(3)?,
            image_url: row.get(4)?,
            background: row.get(5)?,
        })
    })?;
    rows.collect()
}

/// Apply a manual edit: replace the slide set (JSON blob and normalized
/// rows together), optionally retitle, and mark the deck `edited`.
/// Returns false when the presentation does not exist or is not owned.
pub fn update_content(
    conn: &mut Connection,
    id: &str,
    user_id: &str,
    title: Option<&str>,
    slides: &[Slide],
) -> Result<bool, AppError> {
    let content_json = serde_json::to_string(slides)?;

    let tx = conn.transaction()?;
    let affected = match title {
        Some(title) => tx.execute(
            "UPDATE presentations
             SET title = ?1, content_json = ?2, slides_count = ?3, status = 'edited',
                 updated_at = datetime('now')
             WHERE id = ?4 AND user_id = ?5",
            params![title, content_json, slides.len() as i64, id, user_id],
        )?,
        None => tx.execute(
            "UPDATE presentations
             SET content_json = ?1, slides_count = ?2, status = 'edited',
                 updated_at = datetime('now')
             WHERE id = ?3 AND user_id = ?4",
            params![content_json, slides.len() as i64, id, user_id],
        )?,
    };
    if affected == 0 {
        return Ok(false);
    }
    tx.execute(
        "DELETE FROM slides WHERE presentation_id = ?1",
        params![id],
    )?;
    insert_slide_rows(&tx, id, slides)?;
    tx.commit()?;
    Ok(true)
}

pub fn delete_for_user(
    conn: &Connection,
    id: &str,
    user_id: &str,
) -> Result<bool, rusqlite::Error> {
    let affected = conn.execute(
        "DELETE FROM presentations WHERE id = ?1 AND user_id = ?2",
        params![id, user_id],
    )?;
    Ok(affected > 0)
}

#[derive(Debug, Serialize)]
pub struct CountByKey {
    pub key: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct UserStats {
    pub total: i64,
    pub by_theme: Vec<CountByKey>,
    pub by_model: Vec<CountByKey>,
}

pub fn stats_for_user(conn: &Connection, user_id: &str) -> Result<UserStats, rusqlite::Error> {
    let total: i64 = conn.query_row(
        "SELECT COUNT(*) FROM presentations WHERE user_id = ?1",
        params![user_id],
        |row| row.get(0),
    )?;

    let group_by = |column: &str| -> Result<Vec<CountByKey>, rusqlite::Error> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {column}, COUNT(*) AS count FROM presentations
             WHERE user_id = ?1 GROUP BY {column} ORDER BY count DESC, {column} ASC"
        ))?;
        let rows = stmt.query_map(params![user_id], |row| {
            Ok(CountByKey {
                key: row.get(0)?,
                count: row.get(1)?,
            })
        })?;
        rows.collect()
    };

    Ok(UserStats {
        total,
        by_theme: group_by("theme")?,
        by_model: group_by("ai_model")?,
    })
}
