//! Snackbar Host - a headless snackbar with a pausable auto-dismiss timer
//! 
//! The core is the [`state::DismissCoordinator`], which owns one
//! [`state::TimerController`] per open session and turns elapsed countdowns
//! and click-aways into close requests. [`state::Snackbar`] hosts it with a
//! message queue and transition lifecycle, and the HTTP API drives that host
//! from a background task.

pub mod config;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{
    AppState, CloseReason, CloseRequest, DismissConfig, DismissCoordinator, Snackbar,
    SnackbarProps, TimerController, TimerStatus,
};
pub use api::create_router;
pub use tasks::spawn_snackbar_task;
pub use utils::signals::shutdown_signal;
