//! userbase - a small user registry HTTP service
//!
//! This library provides the core functionality: an in-memory user store,
//! token-based authentication and the axum routes exposing both.

pub mod api;
pub mod config;
pub mod models;
pub mod repositories;
pub mod services;
