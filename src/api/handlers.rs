//! HTTP endpoint handlers

use std::{sync::Arc, time::Duration};
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::state::{AppState, ClickEvent, DismissConfig, SnackbarCommand};
use super::responses::{
    ApiResponse, ClickRequest, ConfigRequest, HealthResponse, MessageRequest, StatusResponse,
};

/// Send a command and wrap the resulting snapshot, mapping failures to 500
async fn respond(
    state: &AppState,
    command: SnackbarCommand,
    message: &str,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.dispatch(command).await {
        Ok(snapshot) => Ok(Json(ApiResponse::from_snapshot(message.to_string(), snapshot))),
        Err(e) => {
            error!("Failed to dispatch command: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /messages - Queue a message for display
pub async fn message_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    if request.message.trim().is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    info!("Message endpoint called");
    let command = SnackbarCommand::Enqueue {
        text: request.message,
        key: request.key,
    };
    respond(&state, command, "Message queued").await
}

/// Handle POST /open - Set the open flag
pub async fn open_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(&state, SnackbarCommand::SetOpen(true), "Snackbar opened").await
}

/// Handle POST /close - Clear the open flag
pub async fn close_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(&state, SnackbarCommand::SetOpen(false), "Snackbar closed").await
}

/// Handle PUT /config - Replace the auto-dismiss configuration
pub async fn config_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ConfigRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let config = DismissConfig {
        auto_hide_duration: request.auto_hide_duration_ms.map(Duration::from_millis),
        resume_hide_duration: request.resume_hide_duration_ms.map(Duration::from_millis),
        disable_window_blur_listener: request.disable_window_blur_listener,
    };
    info!("Config endpoint called: {:?}", config);
    respond(&state, SnackbarCommand::SetConfig(config), "Configuration updated").await
}

/// Handle POST /events/pointer-enter
pub async fn pointer_enter_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(&state, SnackbarCommand::PointerEnter, "Pointer entered").await
}

/// Handle POST /events/pointer-leave
pub async fn pointer_leave_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(&state, SnackbarCommand::PointerLeave, "Pointer left").await
}

/// Handle POST /events/window-blur
pub async fn window_blur_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(&state, SnackbarCommand::WindowBlur, "Window blurred").await
}

/// Handle POST /events/window-focus
pub async fn window_focus_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(&state, SnackbarCommand::WindowFocus, "Window focused").await
}

/// Handle POST /events/click - Document-level click
pub async fn click_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ClickRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let event = ClickEvent {
        x: request.x,
        y: request.y,
    };
    respond(&state, SnackbarCommand::Click(event), "Click delivered").await
}

/// Handle DELETE /snackbar - Unmount the snackbar
pub async fn unmount_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    info!("Unmount endpoint called");
    respond(&state, SnackbarCommand::Unmount, "Snackbar unmounted").await
}

/// Handle GET /status - Return current snackbar status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        snackbar: state.get_snapshot(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
