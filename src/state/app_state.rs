//! Shared application state handed to the HTTP handlers

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tracing::{debug, warn};

use super::{CloseRequest, CommandEnvelope, SnackbarCommand, SnackbarSnapshot};

/// Handles onto a running snackbar task
#[derive(Debug, Clone)]
pub struct SnackbarHandle {
    pub command_tx: mpsc::Sender<CommandEnvelope>,
    pub snapshot_rx: watch::Receiver<SnackbarSnapshot>,
    pub close_tx: broadcast::Sender<CloseRequest>,
}

/// Application state shared across handlers; the snackbar itself lives in
/// its own task and is only reached through channels
#[derive(Debug)]
pub struct AppState {
    pub snackbar: SnackbarHandle,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    pub fn new(port: u16, host: String, snackbar: SnackbarHandle) -> Self {
        Self {
            snackbar,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Forward a command to the snackbar task and wait for the resulting state
    pub async fn dispatch(&self, command: SnackbarCommand) -> Result<SnackbarSnapshot, String> {
        let action = command.action();
        debug!("Dispatching {}", action);

        let (reply, response) = oneshot::channel();
        self.snackbar
            .command_tx
            .send(CommandEnvelope { command, reply })
            .await
            .map_err(|e| format!("Snackbar task is gone: {}", e))?;

        let snapshot = response
            .await
            .map_err(|e| format!("Snackbar task dropped the reply: {}", e))?;

        self.record_action(action);
        Ok(snapshot)
    }

    /// Latest snapshot published by the snackbar task
    pub fn get_snapshot(&self) -> SnackbarSnapshot {
        self.snackbar.snapshot_rx.borrow().clone()
    }

    /// Receive every close request from now on
    pub fn subscribe_closes(&self) -> broadcast::Receiver<CloseRequest> {
        self.snackbar.close_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn record_action(&self, action: &str) {
        match self.last_action.lock() {
            Ok(mut last_action) => *last_action = Some(action.to_string()),
            Err(e) => warn!("Failed to lock last action: {}", e),
        }
        match self.last_action_time.lock() {
            Ok(mut last_time) => *last_time = Some(Utc::now()),
            Err(e) => warn!("Failed to lock last action time: {}", e),
        }
    }
}
