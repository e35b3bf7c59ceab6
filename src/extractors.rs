use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use crate::db::users;
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated user, resolved from the `Authorization: Bearer`
/// header. Rejects with 401 when the token is missing, invalid, expired,
/// or refers to a deleted account.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;
        let claims = state
            .token_keys
            .verify(token)
            .map_err(|_| AppError::Unauthorized)?;

        // The token outlives nothing: a deleted account means a dead token
        let conn = state.db.get()?;
        let user = users::find_by_id(&conn, &claims.sub)?.ok_or(AppError::Unauthorized)?;

        Ok(CurrentUser {
            id: user.id,
            name: user.name,
            email: user.email,
        })
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
