//! Auto-dismiss countdown state machine

use std::{fmt, time::Duration};
use serde::{Deserialize, Serialize};
use tokio::time::{sleep_until, Instant};
use tracing::debug;

/// Lifecycle of a single countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    Fired,
    Cancelled,
}

impl TimerStatus {
    /// `fired` and `cancelled` accept no further transitions
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Fired | Self::Cancelled)
    }
}

impl fmt::Display for TimerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Fired => "fired",
            Self::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// One-shot countdown that can be paused, resumed, restarted and cancelled.
///
/// The controller never spawns work of its own. It records a deadline on the
/// tokio clock and the owner observes the elapse either by polling
/// [`TimerController::poll_elapsed`] or by awaiting [`TimerController::elapsed`].
/// Both only report an elapse while the status is `running`, so a paused,
/// cancelled or restarted countdown can never fire a stale deadline.
#[derive(Debug, Clone)]
pub struct TimerController {
    status: TimerStatus,
    /// Full configured duration, restarted by `resume` without an override
    duration: Duration,
    deadline: Option<Instant>,
    /// Time left at the moment of the last pause
    frozen: Option<Duration>,
}

impl TimerController {
    /// Create an idle controller configured with `duration`
    pub fn new(duration: Duration) -> Self {
        Self {
            status: TimerStatus::Idle,
            duration,
            deadline: None,
            frozen: None,
        }
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn is_paused(&self) -> bool {
        self.status == TimerStatus::Paused
    }

    /// Begin counting down from `duration`, discarding any prior countdown.
    ///
    /// Returns `false` when the controller is already terminal.
    pub fn start(&mut self, duration: Duration) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.duration = duration;
        self.deadline = Some(Instant::now() + duration);
        self.frozen = None;
        self.status = TimerStatus::Running;
        debug!("Countdown started for {:?}", duration);
        true
    }

    /// Replace the stored full duration without touching a running deadline
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Freeze the countdown. Only valid while running.
    pub fn pause(&mut self) -> bool {
        if self.status != TimerStatus::Running {
            return false;
        }
        self.frozen = self.remaining();
        self.deadline = None;
        self.status = TimerStatus::Paused;
        debug!("Countdown paused with {:?} left", self.frozen);
        true
    }

    /// Restart a paused countdown.
    ///
    /// With an override the countdown restarts at that duration (zero is
    /// observed on the next poll); otherwise it restarts at the full
    /// configured duration rather than the frozen remainder.
    pub fn resume(&mut self, override_duration: Option<Duration>) -> bool {
        if self.status != TimerStatus::Paused {
            return false;
        }
        let duration = override_duration.unwrap_or(self.duration);
        self.deadline = Some(Instant::now() + duration);
        self.frozen = None;
        self.status = TimerStatus::Running;
        debug!("Countdown resumed for {:?}", duration);
        true
    }

    /// Stop counting and drop any pending elapse. Idempotent.
    pub fn cancel(&mut self) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.deadline = None;
        self.frozen = None;
        self.status = TimerStatus::Cancelled;
        debug!("Countdown cancelled");
        true
    }

    /// Time left before the elapse, `None` unless running or paused
    pub fn remaining(&self) -> Option<Duration> {
        match self.status {
            TimerStatus::Running => self
                .deadline
                .map(|deadline| deadline.saturating_duration_since(Instant::now())),
            TimerStatus::Paused => self.frozen,
            _ => None,
        }
    }

    /// Deadline of the running countdown
    pub fn deadline(&self) -> Option<Instant> {
        if self.is_running() {
            self.deadline
        } else {
            None
        }
    }

    /// Transition to `fired` if the deadline has been reached.
    ///
    /// Returns `true` exactly once per countdown.
    pub fn poll_elapsed(&mut self) -> bool {
        match self.deadline() {
            Some(deadline) if Instant::now() >= deadline => {
                self.status = TimerStatus::Fired;
                self.deadline = None;
                debug!("Countdown elapsed");
                true
            }
            _ => false,
        }
    }

    /// Resolve once the running deadline is reached; pending forever otherwise.
    ///
    /// The future borrows nothing, so the caller must re-check with
    /// [`TimerController::poll_elapsed`] after it resolves.
    pub fn elapsed(&self) -> impl std::future::Future<Output = ()> + Send + 'static {
        let deadline = self.deadline();
        async move {
            match deadline {
                Some(deadline) => sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    const SECOND: Duration = Duration::from_secs(1);

    #[tokio::test(start_paused = true)]
    async fn fires_exactly_once_at_deadline() {
        let mut timer = TimerController::new(SECOND);
        assert!(timer.start(SECOND));

        advance(SECOND - Duration::from_millis(1)).await;
        assert!(!timer.poll_elapsed());

        advance(Duration::from_millis(1)).await;
        assert!(timer.poll_elapsed());
        assert_eq!(timer.status(), TimerStatus::Fired);
        assert!(!timer.poll_elapsed());
    }

    #[tokio::test(start_paused = true)]
    async fn idle_timer_never_elapses() {
        let mut timer = TimerController::new(SECOND);
        advance(SECOND * 10).await;
        assert!(!timer.poll_elapsed());
        assert_eq!(timer.status(), TimerStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_freezes_and_resume_restarts_full_duration() {
        let mut timer = TimerController::new(SECOND * 2);
        timer.start(SECOND * 2);
        advance(SECOND).await;

        assert!(timer.pause());
        assert_eq!(timer.remaining(), Some(SECOND));
        advance(SECOND * 5).await;
        assert!(!timer.poll_elapsed());

        assert!(timer.resume(None));
        advance(SECOND * 2 - Duration::from_millis(1)).await;
        assert!(!timer.poll_elapsed());
        advance(Duration::from_millis(1)).await;
        assert!(timer.poll_elapsed());
    }

    #[tokio::test(start_paused = true)]
    async fn resume_with_zero_override_fires_on_next_poll() {
        let mut timer = TimerController::new(SECOND);
        timer.start(SECOND);
        timer.pause();
        assert!(timer.resume(Some(Duration::ZERO)));
        assert_eq!(timer.status(), TimerStatus::Running);
        assert!(timer.poll_elapsed());
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_transitions_are_ignored() {
        let mut timer = TimerController::new(SECOND);
        assert!(!timer.pause());
        assert!(!timer.resume(None));

        timer.start(SECOND);
        assert!(!timer.resume(None));
        assert!(timer.cancel());
        assert!(!timer.cancel());
        assert!(!timer.start(SECOND));
        assert!(!timer.pause());
        assert_eq!(timer.status(), TimerStatus::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_suppresses_a_passed_deadline() {
        let mut timer = TimerController::new(SECOND);
        timer.start(SECOND);
        advance(SECOND * 2).await;
        timer.cancel();
        assert!(!timer.poll_elapsed());
    }

    #[tokio::test(start_paused = true)]
    async fn restart_replaces_prior_countdown() {
        let mut timer = TimerController::new(SECOND);
        timer.start(SECOND);
        advance(SECOND / 2).await;
        timer.start(SECOND * 3);
        assert_eq!(timer.duration(), SECOND * 3);

        advance(SECOND).await;
        assert!(!timer.poll_elapsed());
        advance(SECOND * 2).await;
        assert!(timer.poll_elapsed());
    }

    #[tokio::test(start_paused = true)]
    async fn elapsed_future_resolves_at_deadline() {
        let mut timer = TimerController::new(SECOND);
        timer.start(SECOND);
        let started = Instant::now();
        timer.elapsed().await;
        assert!(started.elapsed() >= SECOND);
        assert!(timer.poll_elapsed());
    }

    #[tokio::test(start_paused = true)]
    async fn elapsed_future_pends_while_paused() {
        let mut timer = TimerController::new(SECOND);
        timer.start(SECOND);
        timer.pause();
        let waited = tokio::time::timeout(SECOND * 10, timer.elapsed()).await;
        assert!(waited.is_err());
    }
}
