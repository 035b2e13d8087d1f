//! State management module
//! 
//! This module contains the auto-dismiss timer, the coordinator that drives
//! it, the snackbar host built on top and the shared state used by the API.

pub mod timer_controller;
pub mod dismiss;
pub mod props;
pub mod snackbar;
pub mod command;
pub mod app_state;

// Re-export main types
pub use timer_controller::{TimerController, TimerStatus};
pub use dismiss::{
    ClickEvent, CloseReason, CloseRequest, DismissConfig, DismissCoordinator, DismissSnapshot,
    Region,
};
pub use props::{
    AnchorOrigin, Horizontal, Message, SnackbarProps, TransitionCallback, TransitionCallbacks,
    TransitionPhase, TransitionProps, Vertical,
};
pub use snackbar::{Snackbar, SnackbarEvent, SnackbarSnapshot};
pub use command::{CommandEnvelope, SnackbarCommand};
pub use app_state::{AppState, SnackbarHandle};
