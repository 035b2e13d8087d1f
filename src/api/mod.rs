//! HTTP API module
//! 
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/messages", post(message_handler))
        .route("/open", post(open_handler))
        .route("/close", post(close_handler))
        .route("/config", put(config_handler))
        .route("/events/pointer-enter", post(pointer_enter_handler))
        .route("/events/pointer-leave", post(pointer_leave_handler))
        .route("/events/window-blur", post(window_blur_handler))
        .route("/events/window-focus", post(window_focus_handler))
        .route("/events/click", post(click_handler))
        .route("/snackbar", delete(unmount_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
