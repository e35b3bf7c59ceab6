use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::ai::options::{GenerateOptions, GenerateRequest};
use crate::db::models::{Presentation, Slide};
use crate::db::presentations::{self, NewPresentation};
use crate::error::{AppError, AppResult};
use crate::export::{self, ExportFormat};
use crate::extractors::CurrentUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/presentations", get(list))
        .route("/api/presentations/generate", post(generate))
        .route("/api/presentations/stats", get(stats))
        .route(
            "/api/presentations/{id}",
            get(detail).put(update).delete(delete),
        )
        .route("/api/presentations/{id}/export", get(export))
}

fn presentation_json(presentation: &Presentation, slides: &[Slide]) -> AppResult<Value> {
    let mut value = serde_json::to_value(presentation)?;
    value["slides"] = serde_json::to_value(slides)?;
    Ok(value)
}

// -- Handlers --

/// POST /api/presentations/generate — validate, call the AI backends,
/// persist atomically, return the stored deck
async fn generate(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(req): Json<GenerateRequest>,
) -> AppResult<Response> {
    // Everything is checked before any provider call
    let opts = GenerateOptions::from_request(&req)?;

    tracing::info!(
        user_id = %current.id,
        prompt = %opts.prompt,
        slides = opts.slides_count,
        theme = opts.theme.as_str(),
        model = opts.ai_model.as_str(),
        "generating presentation"
    );

    let deck = state.generator.generate(&opts).await?;

    let mut conn = state.db.get()?;
    let presentation = presentations::insert_with_slides(
        &mut conn,
        &NewPresentation {
            user_id: &current.id,
            title: &opts.prompt,
            prompt: &opts.prompt,
            slides_count: opts.slides_count,
            theme: opts.theme.as_str(),
            language: opts.language.as_str(),
            style: opts.style.as_str(),
            text_amount: opts.text_amount.as_str(),
            // the provider that actually answered, not just the one asked for
            ai_model: deck.provider,
        },
        &deck.slides,
    )?;

    tracing::info!(id = %presentation.id, provider = deck.provider, "presentation created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Presentation generated successfully",
            "presentation": presentation_json(&presentation, &deck.slides)?,
        })),
    )
        .into_response())
}

/// GET /api/presentations — the caller's decks, newest first
async fn list(State(state): State<AppState>, current: CurrentUser) -> AppResult<Response> {
    let conn = state.db.get()?;
    let items = presentations::list_for_user(&conn, &current.id)?;
    Ok(Json(json!({ "success": true, "presentations": items })).into_response())
}

/// GET /api/presentations/{id} — full deck including slides
async fn detail(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let conn = state.db.get()?;
    let presentation =
        presentations::find_for_user(&conn, &id, &current.id)?.ok_or(AppError::NotFound)?;
    let slides: Vec<Slide> = serde_json::from_str(&presentation.content_json)?;

    Ok(Json(json!({
        "success": true,
        "presentation": presentation_json(&presentation, &slides)?,
    }))
    .into_response())
}

#[derive(Deserialize)]
struct SlideEdit {
    title: String,
    content: String,
    layout: Option<String>,
    image_url: Option<String>,
    background: Option<String>,
}

#[derive(Deserialize)]
struct UpdateRequest {
    title: Option<String>,
    slides: Vec<SlideEdit>,
}

/// PUT /api/presentations/{id} — save manual edits; last write wins
async fn update(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateRequest>,
) -> AppResult<Response> {
    if req.slides.is_empty() {
        return Err(AppError::Validation("slides must not be empty".into()));
    }
    if let Some(title) = &req.title {
        if title.trim().is_empty() {
            return Err(AppError::Validation("title must not be empty".into()));
        }
    }

    // Positions are reassigned contiguously from 1, whatever the client sent
    let mut slides = Vec::with_capacity(req.slides.len());
    for (i, edit) in req.slides.iter().enumerate() {
        let title = edit.title.trim();
        if title.is_empty() {
            return Err(AppError::Validation(format!(
                "slide {} is missing a title",
                i + 1
            )));
        }
        slides.push(Slide {
            position: (i + 1) as i64,
            title: title.to_string(),
            content: edit.content.clone(),
            layout: edit
                .layout
                .clone()
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| "split".to_string()),
            image_url: edit.image_url.clone(),
            background: edit.background.clone(),
        });
    }

    let mut conn = state.db.get()?;
    let updated = presentations::update_content(
        &mut conn,
        &id,
        &current.id,
        req.title.as_deref().map(str::trim),
        &slides,
    )?;
    if !updated {
        return Err(AppError::NotFound);
    }

    tracing::info!(id = %id, slides = slides.len(), "presentation updated");
    Ok(Json(json!({ "success": true, "message": "Presentation updated successfully" }))
        .into_response())
}

/// DELETE /api/presentations/{id}
async fn delete(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let conn = state.db.get()?;
    if !presentations::delete_for_user(&conn, &id, &current.id)? {
        return Err(AppError::NotFound);
    }
    tracing::info!(id = %id, "presentation deleted");
    Ok(Json(json!({ "success": true, "message": "Presentation deleted" })).into_response())
}

#[derive(Deserialize)]
struct ExportQuery {
    format: Option<String>,
}

/// GET /api/presentations/{id}/export?format=pdf|docx|pptx — binary
/// artifact rendered from the normalized slide rows
async fn export(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    let format = match query.format.as_deref() {
        None => ExportFormat::Pptx,
        Some(raw) => ExportFormat::parse(raw).ok_or_else(|| {
            AppError::Validation("Invalid format. Use 'pdf', 'docx' or 'pptx'".into())
        })?,
    };

    let conn = state.db.get()?;
    let presentation =
        presentations::find_for_user(&conn, &id, &current.id)?.ok_or(AppError::NotFound)?;
    let slides = presentations::slides_for(&conn, &presentation.id)?;

    tracing::info!(
        id = %presentation.id,
        format = format.extension(),
        slides = slides.len(),
        "exporting presentation"
    );

    let bytes = export::render(format, &presentation, &slides)?;
    let filename = export::download_filename(&presentation.title, format);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.mime().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// GET /api/presentations/stats — per-user dashboard counters
async fn stats(State(state): State<AppState>, current: CurrentUser) -> AppResult<Response> {
    let conn = state.db.get()?;
    let stats = presentations::stats_for_user(&conn, &current.id)?;
    Ok(Json(json!({ "success": true, "stats": stats })).into_response())
}
