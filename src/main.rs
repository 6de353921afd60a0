//! userbase - a small user registry HTTP service

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use userbase::{
    api::{self, AppState},
    config::{Config, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH},
    repositories::InMemoryUserRepository,
    services::{AuthService, StaticCredentialStore, UserService},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "userbase=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting userbase...");

    // Load configuration
    let config_path = std::env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = Config::load_with_env(&config_path)?;
    config.validate()?;
    tracing::info!("Configuration loaded from {}", config_path.display());

    if config.auth.uses_default_password() {
        tracing::warn!("Login password is the built-in default; set auth.password or USERBASE_AUTH_PASSWORD");
    }

    // Initialize services
    let credentials = StaticCredentialStore::boxed(&config.auth.username, &config.auth.password)?;
    let auth_service = Arc::new(AuthService::with_token_ttl(
        credentials,
        config.jwt_secret()?,
        config.auth.token_ttl_seconds,
    ));
    let user_service = Arc::new(UserService::new(InMemoryUserRepository::boxed()));

    // Build router
    let state = AppState::new(user_service, auth_service);
    let app = api::build_router(state, &config.server.cors_origin)?;

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
