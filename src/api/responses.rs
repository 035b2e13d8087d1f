//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::SnackbarSnapshot;

/// API response structure for state change endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub snackbar: SnackbarSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, snackbar: SnackbarSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            snackbar,
        }
    }

    /// Status follows the open flag of the snapshot
    pub fn from_snapshot(message: String, snackbar: SnackbarSnapshot) -> Self {
        let status = if snackbar.open { "open" } else { "closed" };
        Self::new(status.to_string(), message, snackbar)
    }
}

/// Body of `POST /messages`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRequest {
    pub message: String,
    #[serde(default)]
    pub key: Option<u64>,
}

/// Body of `PUT /config`; absent durations mean "not configured"
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigRequest {
    #[serde(default)]
    pub auto_hide_duration_ms: Option<u64>,
    #[serde(default)]
    pub resume_hide_duration_ms: Option<u64>,
    #[serde(default)]
    pub disable_window_blur_listener: bool,
}

/// Body of `POST /events/click`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClickRequest {
    pub x: f64,
    pub y: f64,
}

/// Status response with server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub snackbar: SnackbarSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
