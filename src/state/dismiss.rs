//! Dismiss coordination: attention signals, configuration changes and
//! open/close transitions funnel into a single close-request decision

use std::time::Duration;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{TimerController, TimerStatus};

/// Auto-dismiss configuration supplied by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DismissConfig {
    /// `None` disables auto-dismiss entirely
    pub auto_hide_duration: Option<Duration>,
    /// `None` restarts the full `auto_hide_duration` on resume
    pub resume_hide_duration: Option<Duration>,
    pub disable_window_blur_listener: bool,
}

impl DismissConfig {
    pub fn auto_hide(duration: Duration) -> Self {
        Self {
            auto_hide_duration: Some(duration),
            ..Self::default()
        }
    }
}

/// Why a close was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloseReason {
    Timeout,
    #[serde(rename = "clickaway")]
    ClickAway,
}

impl CloseReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::ClickAway => "clickaway",
        }
    }
}

/// Document-level click position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub x: f64,
    pub y: f64,
}

/// Rendered area of the widget
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    pub fn contains(&self, event: &ClickEvent) -> bool {
        event.x >= self.x
            && event.x < self.x + self.width
            && event.y >= self.y
            && event.y < self.y + self.height
    }
}

/// Outward close notification.
///
/// A timeout carries no triggering event while a click-away carries the click
/// that caused it; callers match on that difference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CloseRequest {
    pub event: Option<ClickEvent>,
    pub reason: CloseReason,
}

impl CloseRequest {
    pub fn timeout() -> Self {
        Self {
            event: None,
            reason: CloseReason::Timeout,
        }
    }

    pub fn click_away(event: ClickEvent) -> Self {
        Self {
            event: Some(event),
            reason: CloseReason::ClickAway,
        }
    }
}

/// Point-in-time view of the coordinator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DismissSnapshot {
    pub open: bool,
    pub mounted: bool,
    pub session: u64,
    pub timer_status: Option<TimerStatus>,
    pub remaining_ms: Option<u64>,
}

/// Owns at most one [`TimerController`] per open session and turns elapses
/// and click-aways into [`CloseRequest`]s.
///
/// Every operation is a no-op when it does not apply to the current state, so
/// callers may forward events in whatever order they arrive.
#[derive(Debug)]
pub struct DismissCoordinator {
    config: DismissConfig,
    open: bool,
    mounted: bool,
    session: u64,
    timer: Option<TimerController>,
}

impl DismissCoordinator {
    /// Mount the coordinator; `open` at mount begins the first session
    pub fn new(config: DismissConfig, open: bool) -> Self {
        let mut coordinator = Self {
            config,
            open: false,
            mounted: true,
            session: 0,
            timer: None,
        };
        coordinator.on_open_changed(open);
        coordinator
    }

    pub fn config(&self) -> DismissConfig {
        self.config
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn timer_status(&self) -> Option<TimerStatus> {
        self.timer.as_ref().map(TimerController::status)
    }

    pub fn on_open_changed(&mut self, is_open: bool) {
        if !self.mounted || is_open == self.open {
            return;
        }
        // The old session is always torn down before a new one can start
        self.cancel_timer();
        self.open = is_open;

        if is_open {
            self.session += 1;
            info!("Session {} opened", self.session);
            self.start_timer();
        } else {
            info!("Session {} closed", self.session);
        }
    }

    pub fn on_config_changed(
        &mut self,
        auto_hide_duration: Option<Duration>,
        resume_hide_duration: Option<Duration>,
    ) {
        let previous = self.config.auto_hide_duration;
        self.config.auto_hide_duration = auto_hide_duration;
        self.config.resume_hide_duration = resume_hide_duration;

        if !self.mounted || !self.open || previous == auto_hide_duration {
            return;
        }

        let Some(duration) = auto_hide_duration else {
            debug!("Auto-hide disabled, cancelling countdown");
            self.cancel_timer();
            return;
        };

        match self.timer.as_mut() {
            Some(timer) if timer.is_running() => {
                debug!("Auto-hide changed to {:?}, restarting countdown", duration);
                timer.start(duration);
            }
            Some(timer) if timer.is_paused() => {
                debug!("Auto-hide changed to {:?} while paused", duration);
                timer.set_duration(duration);
            }
            _ => self.start_timer(),
        }
    }

    /// Apply a full configuration, including the window blur flag
    pub fn set_config(&mut self, config: DismissConfig) {
        self.config.disable_window_blur_listener = config.disable_window_blur_listener;
        self.on_config_changed(config.auto_hide_duration, config.resume_hide_duration);
    }

    pub fn on_attention_gained(&mut self) {
        if let Some(timer) = self.timer.as_mut() {
            timer.pause();
        }
    }

    pub fn on_attention_lost(&mut self) {
        let resume = self.config.resume_hide_duration;
        if let Some(timer) = self.timer.as_mut() {
            timer.resume(resume);
        }
    }

    pub fn on_pointer_enter(&mut self) {
        self.on_attention_gained();
    }

    pub fn on_pointer_leave(&mut self) {
        self.on_attention_lost();
    }

    pub fn on_window_blur(&mut self) {
        if !self.config.disable_window_blur_listener {
            self.on_attention_gained();
        }
    }

    pub fn on_window_focus(&mut self) {
        if !self.config.disable_window_blur_listener {
            self.on_attention_lost();
        }
    }

    /// Forward a document-level click, keeping only those outside `region`
    pub fn on_document_click(&mut self, event: ClickEvent, region: &Region) -> Option<CloseRequest> {
        if region.contains(&event) {
            return None;
        }
        self.on_click_away(event)
    }

    pub fn on_click_away(&mut self, event: ClickEvent) -> Option<CloseRequest> {
        if !self.mounted || !self.open {
            return None;
        }
        info!("Click away during session {}", self.session);
        Some(CloseRequest::click_away(event))
    }

    /// Check the clock and report a timeout if the countdown just elapsed
    pub fn poll_timeout(&mut self) -> Option<CloseRequest> {
        let elapsed = self
            .timer
            .as_mut()
            .is_some_and(TimerController::poll_elapsed);
        if elapsed {
            self.on_timer_elapsed()
        } else {
            None
        }
    }

    /// Wait until the current countdown elapses.
    ///
    /// Pending forever while nothing is running; the future is cancel-safe
    /// and is meant to be raced against incoming events in `select!`.
    pub async fn timed_out(&mut self) -> CloseRequest {
        loop {
            let elapsed = match self.timer.as_ref() {
                Some(timer) => timer.elapsed(),
                None => {
                    std::future::pending::<()>().await;
                    continue;
                }
            };
            elapsed.await;
            if let Some(request) = self.poll_timeout() {
                return request;
            }
        }
    }

    pub fn on_unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.cancel_timer();
        self.mounted = false;
        info!("Unmounted during session {}", self.session);
    }

    pub fn snapshot(&self) -> DismissSnapshot {
        let timer = self.timer.as_ref();
        DismissSnapshot {
            open: self.open,
            mounted: self.mounted,
            session: self.session,
            timer_status: timer.map(TimerController::status),
            remaining_ms: timer
                .and_then(TimerController::remaining)
                .map(|remaining| remaining.as_millis() as u64),
        }
    }

    fn on_timer_elapsed(&mut self) -> Option<CloseRequest> {
        if !self.mounted || !self.open {
            return None;
        }
        info!("Auto-hide elapsed for session {}", self.session);
        Some(CloseRequest::timeout())
    }

    fn start_timer(&mut self) {
        let Some(duration) = self.config.auto_hide_duration else {
            debug!("No auto-hide duration, session {} stays open", self.session);
            self.timer = None;
            return;
        };
        let mut timer = TimerController::new(duration);
        timer.start(duration);
        self.timer = Some(timer);
    }

    fn cancel_timer(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
    }
}
