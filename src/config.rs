//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

use crate::state::{DismissConfig, SnackbarProps};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "snackbar-host")]
#[command(about = "Headless snackbar host with a pausable auto-dismiss timer")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Auto-hide duration in milliseconds; omit to never auto-hide
    #[arg(long)]
    pub auto_hide_ms: Option<u64>,

    /// Duration in milliseconds used after the pointer leaves or the window
    /// regains focus; omit to restart the full auto-hide duration
    #[arg(long)]
    pub resume_hide_ms: Option<u64>,

    /// Ignore window blur and focus
    #[arg(long)]
    pub disable_window_blur_listener: bool,

    /// Keep the snackbar open on clicks outside of it
    #[arg(long)]
    pub ignore_click_away: bool,

    /// Enter transition duration in milliseconds
    #[arg(long, default_value = "225")]
    pub enter_ms: u64,

    /// Exit transition duration in milliseconds
    #[arg(long, default_value = "195")]
    pub exit_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn dismiss_config(&self) -> DismissConfig {
        DismissConfig {
            auto_hide_duration: self.auto_hide_ms.map(Duration::from_millis),
            resume_hide_duration: self.resume_hide_ms.map(Duration::from_millis),
            disable_window_blur_listener: self.disable_window_blur_listener,
        }
    }

    /// Build the snackbar properties this configuration describes
    pub fn snackbar_props(&self) -> SnackbarProps {
        let mut props = SnackbarProps {
            dismiss: self.dismiss_config(),
            close_on_click_away: !self.ignore_click_away,
            ..SnackbarProps::default()
        };
        props.transition_props.enter_duration = Duration::from_millis(self.enter_ms);
        props.transition_props.exit_duration = Duration::from_millis(self.exit_ms);
        props
    }
}
