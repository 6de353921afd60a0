//! API middleware
//!
//! Contains:
//! - Shared application state
//! - `ApiError`, the JSON error body every failed request returns
//! - Authentication (bearer token validation) for protected routes

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::models::Claims;
use crate::services::{AuthError, AuthService, UserService, UserServiceError};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(user_service: Arc<UserService>, auth_service: Arc<AuthService>) -> Self {
        Self {
            user_service,
            auth_service,
        }
    }
}

/// Verified token claims, inserted into request extensions by `require_auth`
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

impl AuthenticatedUser {
    pub fn username(&self) -> &str {
        &self.0.username
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ApiError::from(AuthError::MissingToken))
    }
}

/// Error response for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }

    pub fn missing_token(message: impl Into<String>) -> Self {
        Self::new("MISSING_TOKEN", message)
    }

    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::new("INVALID_TOKEN", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn status(&self) -> StatusCode {
        match self.error.code.as_str() {
            "UNAUTHORIZED" | "MISSING_TOKEN" | "INVALID_TOKEN" => StatusCode::UNAUTHORIZED,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<UserServiceError> for ApiError {
    fn from(e: UserServiceError) -> Self {
        match e {
            UserServiceError::ValidationError(msg) => ApiError::validation_error(msg),
            UserServiceError::NotFound(_) => ApiError::not_found("User not found"),
            UserServiceError::InternalError(e) => {
                tracing::error!("User service error: {:#}", e);
                ApiError::internal_error("Internal server error")
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Unauthorized => ApiError::unauthorized(e.to_string()),
            AuthError::MissingToken => ApiError::missing_token(e.to_string()),
            AuthError::InvalidToken => ApiError::invalid_token(e.to_string()),
            AuthError::InternalError(e) => {
                tracing::error!("Auth service error: {:#}", e);
                ApiError::internal_error("Internal server error")
            }
        }
    }
}

/// Raw `Authorization` header value, if any.
fn authorization_header(request: &Request) -> Result<Option<&str>, ApiError> {
    match request.headers().get(header::AUTHORIZATION) {
        Some(value) => value
            .to_str()
            .map(Some)
            .map_err(|_| ApiError::from(AuthError::InvalidToken)),
        None => Ok(None),
    }
}

/// Authentication middleware
///
/// Rejects the request before it reaches any handler unless it carries a
/// valid access token.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = {
        let authorization = authorization_header(&request)?;
        state.auth_service.verify(authorization)?
    };

    request.extensions_mut().insert(AuthenticatedUser(claims));
    Ok(next.run(request).await)
}

// ============================================================================
// Tests
// ============================================================================
