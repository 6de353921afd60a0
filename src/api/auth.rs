//! Authentication API endpoints
//!
//! Handles HTTP requests for authentication:
//! - POST /login - Exchange username/password for an access token

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};

use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::{LoginRequest, LoginResponse};

/// Build the auth router (no auth required)
pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// POST /login - Issue an access token
///
/// Wrong password and unknown username both produce the same 401.
async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::validation_error(e.body_text()))?;

    let issued = state
        .auth_service
        .authenticate(&body.username, &body.password)
        .await?;

    Ok(Json(issued.into()))
}
