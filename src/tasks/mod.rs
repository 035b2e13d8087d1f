//! Background tasks module
//! 
//! This module contains the task that owns the snackbar alongside the HTTP server.

pub mod snackbar_task;

// Re-export main functions
pub use snackbar_task::{apply, snackbar_task, spawn_snackbar_task};
