use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::auth::password;
use crate::db::models::User;
use crate::db::users;
use crate::error::{AppError, AppResult};
use crate::extractors::CurrentUser;
use crate::state::AppState;

// -- Request types --

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

fn user_json(user: &User) -> serde_json::Value {
    json!({
        "id": user.id,
        "name": user.name,
        "email": user.email,
        "created_at": user.created_at,
    })
}

// -- Handlers --

/// POST /api/auth/register — create an account and issue a bearer token
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Response> {
    let name = req.name.trim().to_string();
    let email = req.email.trim().to_lowercase();

    if name.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "Name, email, and password required".into(),
        ));
    }
    if !email.contains('@') || !email.contains('.') {
        return Err(AppError::Validation("Invalid email format".into()));
    }
    if req.password.len() < 6 {
        return Err(AppError::Validation(
            "Password must be at least 6 characters".into(),
        ));
    }

    let conn = state.db.get()?;
    if users::find_by_email(&conn, &email)?.is_some() {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let hash = password::hash_password(&req.password)
        .map_err(|e| AppError::Internal(format!("password hash: {e}")))?;
    let user = users::create(&conn, &name, &email, &hash)?;
    let token = state
        .token_keys
        .issue(&user)
        .map_err(|e| AppError::Internal(format!("token issue: {e}")))?;

    tracing::info!(email = %user.email, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Account created successfully",
            "token": token,
            "user": user_json(&user),
        })),
    )
        .into_response())
}

/// POST /api/auth/login — verify credentials and issue a bearer token
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Response> {
    let email = req.email.trim().to_lowercase();
    if email.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation("Email and password required".into()));
    }

    let conn = state.db.get()?;
    // Same error for unknown email and wrong password
    let user = users::find_by_email(&conn, &email)?.ok_or(AppError::InvalidCredentials)?;
    if !password::verify_password(&req.password, &user.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    let token = state
        .token_keys
        .issue(&user)
        .map_err(|e| AppError::Internal(format!("token issue: {e}")))?;

    tracing::info!(email = %user.email, "user logged in");

    Ok(Json(json!({
        "success": true,
        "message": "Login successful",
        "token": token,
        "user": user_json(&user),
    }))
    .into_response())
}

/// GET /api/auth/me — the authenticated user
pub async fn me(current: CurrentUser) -> Response {
    Json(json!({
        "success": true,
        "user": {
            "id": current.id,
            "name": current.name,
            "email": current.email,
        },
    }))
    .into_response()
}

/// DELETE /api/auth/me — delete the account; presentations and slides go
/// with it (FK cascade)
pub async fn delete_me(State(state): State<AppState>, current: CurrentUser) -> AppResult<Response> {
    let conn = state.db.get()?;
    if !users::delete(&conn, &current.id)? {
        return Err(AppError::NotFound);
    }
    tracing::info!(user_id = %current.id, "account deleted");
    Ok(Json(json!({ "success": true, "message": "Account deleted" })).into_response())
}
