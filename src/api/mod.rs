//! API layer - HTTP handlers and routing
//!
//! It includes:
//! - Login endpoint (public)
//! - User CRUD endpoints (bearer token required)

pub mod auth;
pub mod middleware;
pub mod responses;
pub mod users;

use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use middleware::{ApiError, AppState, AuthenticatedUser};

/// Build the API router
pub fn build_api_router(state: AppState) -> Router<AppState> {
    // Protected routes (need a valid access token)
    let protected_routes = users::router().route_layer(axum_middleware::from_fn_with_state(
        state,
        middleware::require_auth,
    ));

    // Public routes
    Router::new().merge(auth::router()).merge(protected_routes)
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> anyhow::Result<Router> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin '{}'", cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Ok(Router::new()
        .merge(build_api_router(state.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
