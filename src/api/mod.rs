//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers, the event stream and the
//! response structures.

pub mod events;
pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use events::events_handler;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/focus", post(focus_handler))
        .route("/rest", post(rest_handler))
        .route("/next", post(next_handler))
        .route("/pause", post(pause_handler))
        .route("/resume", post(resume_handler))
        .route("/toggle", post(toggle_handler))
        .route("/reset", post(reset_handler))
        .route("/status", get(status_handler))
        .route("/quote", get(quote_handler))
        .route("/quote/next", post(next_quote_handler))
        .route("/sounds/toggle", post(sounds_toggle_handler))
        .route("/events", get(events_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
