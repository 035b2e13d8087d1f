//! Commands accepted by the snackbar task

use tokio::sync::oneshot;

use super::{ClickEvent, DismissConfig, SnackbarSnapshot};

/// Input forwarded from the outer surface into the snackbar
#[derive(Debug, Clone, PartialEq)]
pub enum SnackbarCommand {
    Enqueue { text: String, key: Option<u64> },
    SetOpen(bool),
    SetConfig(DismissConfig),
    PointerEnter,
    PointerLeave,
    WindowBlur,
    WindowFocus,
    Click(ClickEvent),
    Unmount,
}

impl SnackbarCommand {
    /// Short label used for last-action tracking and logs
    pub fn action(&self) -> &'static str {
        match self {
            Self::Enqueue { .. } => "enqueue",
            Self::SetOpen(true) => "open",
            Self::SetOpen(false) => "close",
            Self::SetConfig(_) => "config",
            Self::PointerEnter => "pointer-enter",
            Self::PointerLeave => "pointer-leave",
            Self::WindowBlur => "window-blur",
            Self::WindowFocus => "window-focus",
            Self::Click(_) => "click",
            Self::Unmount => "unmount",
        }
    }
}

/// A command plus the channel its resulting snapshot is sent back on
#[derive(Debug)]
pub struct CommandEnvelope {
    pub command: SnackbarCommand,
    pub reply: oneshot::Sender<SnackbarSnapshot>,
}
