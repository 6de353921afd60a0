//! User API endpoints
//!
//! Every route here sits behind `require_auth`:
//! - GET /users - List users
//! - POST /users - Create a user
//! - GET /users/{id} - Get a user
//! - PUT /users/{id} - Replace a user's name and email
//! - DELETE /users/{id} - Delete a user

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::api::middleware::{ApiError, AppState, AuthenticatedUser};
use crate::models::{User, UserPayload};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// A path id that is not an integer cannot match any record.
fn user_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::not_found("User not found"))
}

async fn list_users(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.user_service.list().await?;
    Ok(Json(users))
}

async fn get_user(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<User>, ApiError> {
    let id = user_id(path)?;
    let user = state.user_service.get_by_id(id).await?;
    Ok(Json(user))
}

async fn create_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    body: Result<Json<UserPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = body.map_err(|e| ApiError::validation_error(e.body_text()))?;

    let created = state.user_service.create(payload).await?;
    tracing::debug!(by = user.username(), id = created.id, "Create request served");

    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_user(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<UserPayload>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let id = user_id(path)?;

    let payload = match body {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            // An unknown id is reported before a bad body.
            state.user_service.get_by_id(id).await?;
            return Err(ApiError::validation_error(rejection.body_text()));
        }
    };

    let updated = state.user_service.update(id, payload).await?;
    Ok(Json(updated))
}

async fn delete_user(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = user_id(path)?;
    state.user_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
