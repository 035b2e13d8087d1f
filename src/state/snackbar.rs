//! Snackbar host: single-slot message display driven by the dismiss coordinator

use std::collections::VecDeque;
use serde::{Deserialize, Serialize};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use super::{
    AnchorOrigin, ClickEvent, CloseReason, CloseRequest, DismissConfig, DismissCoordinator,
    DismissSnapshot, Message, SnackbarProps, TransitionPhase,
};

/// Where the show/hide transition currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Entering(Instant),
    Entered,
    Exiting(Instant),
    Exited,
}

impl Transition {
    fn deadline(self) -> Option<Instant> {
        match self {
            Self::Entering(until) | Self::Exiting(until) => Some(until),
            Self::Entered | Self::Exited => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Entering(_) => "entering",
            Self::Entered => "entered",
            Self::Exiting(_) => "exiting",
            Self::Exited => "exited",
        }
    }
}

/// Something observable that happened while time passed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SnackbarEvent {
    CloseRequested(CloseRequest),
    Transition { phase: TransitionPhase },
}

/// Serializable view of the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnackbarSnapshot {
    pub open: bool,
    pub message: Option<Message>,
    pub queued: usize,
    pub transition: String,
    pub anchor_origin: AnchorOrigin,
    pub auto_hide_duration_ms: Option<u64>,
    pub resume_hide_duration_ms: Option<u64>,
    pub disable_window_blur_listener: bool,
    pub dismiss: DismissSnapshot,
    pub close_count: u64,
    pub last_close: Option<CloseRequest>,
}

/// Owns the open flag and answers close requests the way a typical caller
/// does: close on request, then show the next queued message once the exit
/// transition has completed.
#[derive(Debug)]
pub struct Snackbar {
    props: SnackbarProps,
    coordinator: DismissCoordinator,
    open: bool,
    mounted: bool,
    current: Option<Message>,
    queue: VecDeque<Message>,
    next_key: u64,
    transition: Transition,
    close_count: u64,
    last_close: Option<CloseRequest>,
}

impl Snackbar {
    pub fn new(props: SnackbarProps) -> Self {
        for warning in props.deprecation_warnings() {
            warn!("{}", warning);
        }

        Self {
            coordinator: DismissCoordinator::new(props.dismiss, false),
            props,
            open: false,
            mounted: true,
            current: None,
            queue: VecDeque::new(),
            next_key: 0,
            transition: Transition::Exited,
            close_count: 0,
            last_close: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn current(&self) -> Option<&Message> {
        self.current.as_ref()
    }

    pub fn coordinator(&self) -> &DismissCoordinator {
        &self.coordinator
    }

    /// Queue a message. A message on screen is closed to make room; the new
    /// one opens once the exit transition completes.
    pub fn enqueue(&mut self, text: impl Into<String>, key: Option<u64>) -> Message {
        let key = key.unwrap_or_else(|| {
            self.next_key += 1;
            self.next_key
        });
        let message = Message {
            key,
            text: text.into(),
        };
        if !self.mounted {
            warn!("Dropping message {} for an unmounted snackbar", message.key);
            return message;
        }
        info!("Queued message {}", message.key);
        self.queue.push_back(message.clone());

        if self.open {
            debug!("Closing message to make room for {}", message.key);
            self.set_open(false);
        } else if self.transition == Transition::Exited {
            self.show_next();
        }
        message
    }

    pub fn set_open(&mut self, open: bool) {
        if !self.mounted || open == self.open {
            return;
        }
        if open && self.current.is_none() {
            self.current = self.queue.pop_front();
        }

        self.open = open;
        self.coordinator.on_open_changed(open);

        let now = Instant::now();
        let transition = &self.props.transition_props;
        let (enter, exit) = (transition.enter_duration, transition.exit_duration);
        if open {
            self.transition = Transition::Entering(now + enter);
            self.fire(TransitionPhase::Enter);
            self.fire(TransitionPhase::Entering);
        } else {
            self.transition = Transition::Exiting(now + exit);
            self.fire(TransitionPhase::Exit);
            self.fire(TransitionPhase::Exiting);
        }
    }

    /// Caller side of a close request. Returns whether the snackbar closed.
    pub fn handle_close(&mut self, request: CloseRequest) -> bool {
        self.close_count += 1;
        self.last_close = Some(request);

        if request.reason == CloseReason::ClickAway && !self.props.close_on_click_away {
            debug!("Ignoring click-away close request");
            return false;
        }
        self.set_open(false);
        true
    }

    pub fn set_config(&mut self, config: DismissConfig) {
        self.props.dismiss = config;
        self.coordinator.set_config(config);
    }

    pub fn pointer_enter(&mut self) {
        self.coordinator.on_pointer_enter();
    }

    pub fn pointer_leave(&mut self) {
        self.coordinator.on_pointer_leave();
    }

    pub fn window_blur(&mut self) {
        self.coordinator.on_window_blur();
    }

    pub fn window_focus(&mut self) {
        self.coordinator.on_window_focus();
    }

    /// Route a document-level click; clicks inside the snackbar are ignored
    pub fn document_click(&mut self, event: ClickEvent) -> Option<CloseRequest> {
        let request = self.coordinator.on_document_click(event, &self.props.region)?;
        self.handle_close(request);
        Some(request)
    }

    /// Tear everything down without waiting for any transition
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.coordinator.on_unmount();
        self.mounted = false;
        self.open = false;
        self.current = None;
        self.queue.clear();
        self.transition = Transition::Exited;
        info!("Snackbar unmounted");
    }

    /// Process everything that is due at the current instant
    pub fn advance_ready(&mut self) -> Vec<SnackbarEvent> {
        let mut events = Vec::new();
        loop {
            if let Some(request) = self.coordinator.poll_timeout() {
                self.handle_close(request);
                events.push(SnackbarEvent::CloseRequested(request));
                continue;
            }
            match self.transition.deadline() {
                Some(deadline) if Instant::now() >= deadline => {
                    let phase = self.complete_transition();
                    events.push(SnackbarEvent::Transition { phase });
                }
                _ => break,
            }
        }
        events
    }

    /// Wait for the next timeout or transition completion and apply it
    pub async fn next_event(&mut self) -> SnackbarEvent {
        let transition = self.transition.deadline();
        let transition_done = async move {
            match transition {
                Some(deadline) => sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            request = self.coordinator.timed_out() => {
                self.handle_close(request);
                SnackbarEvent::CloseRequested(request)
            }
            _ = transition_done => {
                let phase = self.complete_transition();
                SnackbarEvent::Transition { phase }
            }
        }
    }

    pub fn snapshot(&self) -> SnackbarSnapshot {
        let config = self.coordinator.config();
        SnackbarSnapshot {
            open: self.open,
            message: self.current.clone(),
            queued: self.queue.len(),
            transition: self.transition.name().to_string(),
            anchor_origin: self.props.anchor_origin,
            auto_hide_duration_ms: config.auto_hide_duration.map(|d| d.as_millis() as u64),
            resume_hide_duration_ms: config.resume_hide_duration.map(|d| d.as_millis() as u64),
            disable_window_blur_listener: config.disable_window_blur_listener,
            dismiss: self.coordinator.snapshot(),
            close_count: self.close_count,
            last_close: self.last_close,
        }
    }

    fn complete_transition(&mut self) -> TransitionPhase {
        match self.transition {
            Transition::Entering(_) => {
                self.transition = Transition::Entered;
                self.fire(TransitionPhase::Entered);
                TransitionPhase::Entered
            }
            _ => {
                self.transition = Transition::Exited;
                self.current = None;
                self.fire(TransitionPhase::Exited);
                self.show_next();
                TransitionPhase::Exited
            }
        }
    }

    fn show_next(&mut self) {
        if let Some(message) = self.queue.pop_front() {
            info!("Showing message {}", message.key);
            self.current = Some(message);
            self.set_open(true);
        }
    }

    fn fire(&mut self, phase: TransitionPhase) {
        if !self.mounted {
            return;
        }
        debug!("Transition phase {:?}", phase);
        if let Some(callback) = self.props.transition_props.callbacks.get_mut(phase) {
            callback();
        }
        if let Some(callback) = self.props.legacy_callbacks.get_mut(phase) {
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };
    use tokio::time::advance;

    const MS: Duration = Duration::from_millis(1);

    fn props(auto_hide: Option<Duration>) -> SnackbarProps {
        let mut props = SnackbarProps::default();
        props.dismiss.auto_hide_duration = auto_hide;
        props.transition_props.enter_duration = MS * 20;
        props.transition_props.exit_duration = MS * 30;
        props
    }

    fn recorder(log: &Arc<Mutex<Vec<String>>>, label: &str) -> Box<dyn FnMut() + Send> {
        let log = Arc::clone(log);
        let label = label.to_string();
        Box::new(move || log.lock().unwrap().push(label.clone()))
    }

    #[tokio::test(start_paused = true)]
    async fn first_message_opens_immediately() {
        let mut snackbar = Snackbar::new(props(None));
        let message = snackbar.enqueue("saved", None);
        assert!(snackbar.is_open());
        assert_eq!(snackbar.current(), Some(&message));
        assert_eq!(snackbar.snapshot().transition, "entering");
    }

    fn current_text(snackbar: &Snackbar) -> Option<&str> {
        snackbar.current().map(|m| m.text.as_str())
    }

    #[tokio::test(start_paused = true)]
    async fn enqueue_while_open_replaces_without_auto_hide() {
        let mut snackbar = Snackbar::new(props(None));
        snackbar.enqueue("one", None);
        advance(MS * 20).await;
        snackbar.advance_ready();

        snackbar.enqueue("two", None);
        assert!(!snackbar.is_open());
        assert_eq!(current_text(&snackbar), Some("one"));
        assert_eq!(snackbar.snapshot().transition, "exiting");
        assert_eq!(snackbar.snapshot().queued, 1);

        advance(MS * 30).await;
        snackbar.advance_ready();
        assert!(snackbar.is_open());
        assert_eq!(current_text(&snackbar), Some("two"));

        advance(Duration::from_secs(3600)).await;
        snackbar.advance_ready();
        assert!(snackbar.is_open());
        assert_eq!(current_text(&snackbar), Some("two"));
    }

    #[tokio::test(start_paused = true)]
    async fn enqueue_while_open_replaces_with_auto_hide() {
        let mut snackbar = Snackbar::new(props(Some(MS * 100)));
        snackbar.enqueue("one", None);
        advance(MS * 50).await;
        snackbar.advance_ready();

        snackbar.enqueue("two", None);
        assert!(!snackbar.is_open());
        assert_eq!(snackbar.coordinator().timer_status(), None);

        advance(MS * 30).await;
        snackbar.advance_ready();
        assert_eq!(current_text(&snackbar), Some("two"));
        assert_eq!(snackbar.coordinator().session(), 2);

        // The first message's deadline passes without closing the second one
        advance(MS * 20).await;
        assert!(snackbar.advance_ready().iter().all(|event| {
            !matches!(event, SnackbarEvent::CloseRequested(_))
        }));
        assert!(snackbar.is_open());

        advance(MS * 80).await;
        let events = snackbar.advance_ready();
        assert!(events.contains(&SnackbarEvent::CloseRequested(CloseRequest::timeout())));
        assert!(!snackbar.is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn enqueue_during_exit_waits_for_it() {
        let mut snackbar = Snackbar::new(props(Some(MS * 100)));
        snackbar.enqueue("one", None);
        advance(MS * 100).await;
        let events = snackbar.advance_ready();
        assert!(events.contains(&SnackbarEvent::CloseRequested(CloseRequest::timeout())));

        snackbar.enqueue("two", None);
        assert!(!snackbar.is_open());
        assert_eq!(current_text(&snackbar), Some("one"));

        advance(MS * 30).await;
        snackbar.advance_ready();
        assert!(snackbar.is_open());
        assert_eq!(current_text(&snackbar), Some("two"));
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn legacy_callbacks_warn_on_construction() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let mut p = props(None);
        p.legacy_callbacks.set(TransitionPhase::Exit, Box::new(|| {}));
        tracing::subscriber::with_default(subscriber, || {
            let _snackbar = Snackbar::new(p);
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("`on_exit` is deprecated"));
        assert_eq!(output.matches("is deprecated").count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn click_away_can_be_ignored() {
        let mut p = props(None);
        p.close_on_click_away = false;
        let mut snackbar = Snackbar::new(p);
        snackbar.enqueue("sticky", None);

        let click = ClickEvent { x: 900.0, y: 900.0 };
        assert_eq!(snackbar.document_click(click), Some(CloseRequest::click_away(click)));
        assert!(snackbar.is_open());
        assert_eq!(snackbar.snapshot().close_count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn transition_callbacks_fire_in_order_with_legacy_last() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut p = props(None);
        for phase in TransitionPhase::ALL {
            p.transition_props
                .callbacks
                .set(phase, recorder(&log, phase.legacy_prop()));
        }
        p.legacy_callbacks.set(TransitionPhase::Exited, recorder(&log, "legacy_on_exited"));

        let mut snackbar = Snackbar::new(p);
        snackbar.enqueue("hello", None);
        advance(MS * 20).await;
        assert_eq!(
            snackbar.next_event().await,
            SnackbarEvent::Transition { phase: TransitionPhase::Entered }
        );
        snackbar.set_open(false);
        assert_eq!(
            snackbar.next_event().await,
            SnackbarEvent::Transition { phase: TransitionPhase::Exited }
        );

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "on_enter",
                "on_entering",
                "on_entered",
                "on_exit",
                "on_exiting",
                "on_exited",
                "legacy_on_exited",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn unmount_silences_pending_transitions() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut p = props(Some(MS * 10));
        p.transition_props
            .callbacks
            .set(TransitionPhase::Entered, recorder(&log, "entered"));

        let mut snackbar = Snackbar::new(p);
        snackbar.enqueue("bye", None);
        snackbar.unmount();
        advance(MS * 1000).await;
        assert!(snackbar.advance_ready().is_empty());
        assert!(log.lock().unwrap().is_empty());

        snackbar.enqueue("ignored", None);
        assert!(!snackbar.is_open());
    }
}
