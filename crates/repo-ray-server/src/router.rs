//! Axum router setup for the Repo-Ray server

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::{
    handlers::{health_check, visualize},
    ServerState,
};

/// Largest listing body accepted. A full GitHub recursive tree tops out at
/// 100,000 entries, roughly 7 MB of JSON.
pub const MAX_LISTING_BYTES: usize = 16 * 1024 * 1024;

/// Create the axum router with all routes
pub fn create_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/api/visualize", post(visualize))
        .route("/api/health", get(health_check))
        .layer(DefaultBodyLimit::max(MAX_LISTING_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
