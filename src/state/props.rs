//! Snackbar properties and construction-time validation

use std::{fmt, time::Duration};
use serde::{Deserialize, Serialize};

use super::{DismissConfig, Region};

/// Callback invoked for a single transition phase
pub type TransitionCallback = Box<dyn FnMut() + Send + 'static>;

/// Transition lifecycle phases, in the order they fire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPhase {
    Enter,
    Entering,
    Entered,
    Exit,
    Exiting,
    Exited,
}

impl TransitionPhase {
    pub const ALL: [TransitionPhase; 6] = [
        Self::Enter,
        Self::Entering,
        Self::Entered,
        Self::Exit,
        Self::Exiting,
        Self::Exited,
    ];

    /// Name of the legacy per-phase property
    pub fn legacy_prop(self) -> &'static str {
        match self {
            Self::Enter => "on_enter",
            Self::Entering => "on_entering",
            Self::Entered => "on_entered",
            Self::Exit => "on_exit",
            Self::Exiting => "on_exiting",
            Self::Exited => "on_exited",
        }
    }
}

/// Per-phase callbacks forwarded to the transition
#[derive(Default)]
pub struct TransitionCallbacks {
    pub on_enter: Option<TransitionCallback>,
    pub on_entering: Option<TransitionCallback>,
    pub on_entered: Option<TransitionCallback>,
    pub on_exit: Option<TransitionCallback>,
    pub on_exiting: Option<TransitionCallback>,
    pub on_exited: Option<TransitionCallback>,
}

impl TransitionCallbacks {
    pub fn get_mut(&mut self, phase: TransitionPhase) -> Option<&mut TransitionCallback> {
        match phase {
            TransitionPhase::Enter => self.on_enter.as_mut(),
            TransitionPhase::Entering => self.on_entering.as_mut(),
            TransitionPhase::Entered => self.on_entered.as_mut(),
            TransitionPhase::Exit => self.on_exit.as_mut(),
            TransitionPhase::Exiting => self.on_exiting.as_mut(),
            TransitionPhase::Exited => self.on_exited.as_mut(),
        }
    }

    pub fn set(&mut self, phase: TransitionPhase, callback: TransitionCallback) {
        let slot = match phase {
            TransitionPhase::Enter => &mut self.on_enter,
            TransitionPhase::Entering => &mut self.on_entering,
            TransitionPhase::Entered => &mut self.on_entered,
            TransitionPhase::Exit => &mut self.on_exit,
            TransitionPhase::Exiting => &mut self.on_exiting,
            TransitionPhase::Exited => &mut self.on_exited,
        };
        *slot = Some(callback);
    }

    /// Phases with a callback attached
    pub fn phases(&self) -> Vec<TransitionPhase> {
        TransitionPhase::ALL
            .into_iter()
            .filter(|phase| self.is_set(*phase))
            .collect()
    }

    fn is_set(&self, phase: TransitionPhase) -> bool {
        match phase {
            TransitionPhase::Enter => self.on_enter.is_some(),
            TransitionPhase::Entering => self.on_entering.is_some(),
            TransitionPhase::Entered => self.on_entered.is_some(),
            TransitionPhase::Exit => self.on_exit.is_some(),
            TransitionPhase::Exiting => self.on_exiting.is_some(),
            TransitionPhase::Exited => self.on_exited.is_some(),
        }
    }
}

impl fmt::Debug for TransitionCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionCallbacks")
            .field("phases", &self.phases())
            .finish()
    }
}

/// Unified transition configuration
#[derive(Debug)]
pub struct TransitionProps {
    pub enter_duration: Duration,
    pub exit_duration: Duration,
    pub callbacks: TransitionCallbacks,
}

impl Default for TransitionProps {
    fn default() -> Self {
        Self {
            enter_duration: Duration::from_millis(225),
            exit_duration: Duration::from_millis(195),
            callbacks: TransitionCallbacks::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vertical {
    Top,
    #[default]
    Bottom,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Horizontal {
    #[default]
    Left,
    Center,
    Right,
}

/// Where the snackbar sits on screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorOrigin {
    pub vertical: Vertical,
    pub horizontal: Horizontal,
}

/// A queued or displayed message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub key: u64,
    pub text: String,
}

/// Everything the snackbar host is configured with
#[derive(Debug)]
pub struct SnackbarProps {
    pub dismiss: DismissConfig,
    pub anchor_origin: AnchorOrigin,
    pub region: Region,
    pub close_on_click_away: bool,
    pub transition_props: TransitionProps,
    /// Deprecated per-phase callbacks, superseded by `transition_props`
    pub legacy_callbacks: TransitionCallbacks,
}

impl Default for SnackbarProps {
    fn default() -> Self {
        Self {
            dismiss: DismissConfig::default(),
            anchor_origin: AnchorOrigin::default(),
            region: Region {
                x: 0.0,
                y: 0.0,
                width: 344.0,
                height: 48.0,
            },
            close_on_click_away: true,
            transition_props: TransitionProps::default(),
            legacy_callbacks: TransitionCallbacks::default(),
        }
    }
}

impl SnackbarProps {
    /// Advisory messages for every deprecated callback that is set
    pub fn deprecation_warnings(&self) -> Vec<String> {
        self.legacy_callbacks
            .phases()
            .into_iter()
            .map(|phase| {
                format!(
                    "`{}` is deprecated, use `transition_props.callbacks.{}` instead",
                    phase.legacy_prop(),
                    phase.legacy_prop()
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ClickEvent;

    #[test]
    fn no_warnings_without_legacy_callbacks() {
        let mut props = SnackbarProps::default();
        props
            .transition_props
            .callbacks
            .set(TransitionPhase::Exited, Box::new(|| {}));
        assert!(props.deprecation_warnings().is_empty());
    }

    #[test]
    fn one_warning_per_legacy_callback() {
        let mut props = SnackbarProps::default();
        props.legacy_callbacks.set(TransitionPhase::Enter, Box::new(|| {}));
        props.legacy_callbacks.set(TransitionPhase::Exited, Box::new(|| {}));

        let warnings = props.deprecation_warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("`on_enter`"));
        assert!(warnings[1].contains("transition_props.callbacks.on_exited"));
    }

    #[test]
    fn region_bounds_are_half_open() {
        let region = SnackbarProps::default().region;
        assert!(region.contains(&ClickEvent { x: 0.0, y: 0.0 }));
        assert!(!region.contains(&ClickEvent { x: 344.0, y: 10.0 }));
    }
}
