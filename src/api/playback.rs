//! Playback control state
//!
//! Holds what the player UI needs: whether the loop is playing, which source
//! drives the control value, and the last values from each source. The audio
//! engine reads `effective_value()` and applies it.

use crate::algorithms::mapping::ControlKind;
use crate::api::types::TrackingState;
use serde::{Deserialize, Serialize};

/// Which input drives the control value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlSource {
    /// The on-screen slider
    Manual,
    /// The displacement tracker
    Displacement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackController {
    kind: ControlKind,
    source: ControlSource,
    playing: bool,
    manual_value: f64,
    tracked_value: f64,
}

impl PlaybackController {
    pub fn new(kind: ControlKind) -> Self {
        Self {
            kind,
            source: ControlSource::Manual,
            playing: false,
            manual_value: kind.neutral(),
            tracked_value: kind.neutral(),
        }
    }

    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Flip between playing and stopped, returning the new state
    pub fn toggle(&mut self) -> bool {
        self.playing = !self.playing;
        log::debug!("playback {}", if self.playing { "started" } else { "stopped" });
        self.playing
    }

    pub fn source(&self) -> ControlSource {
        self.source
    }

    pub fn set_source(&mut self, source: ControlSource) {
        self.source = source;
    }

    /// Set the slider value, clamped to the control's range
    pub fn set_manual(&mut self, value: f64) -> f64 {
        let (lo, hi) = self.kind.bounds();
        self.manual_value = if value.is_finite() {
            value.clamp(lo, hi)
        } else {
            self.kind.neutral()
        };
        self.manual_value
    }

    pub fn manual_value(&self) -> f64 {
        self.manual_value
    }

    /// Take the control value from a tracker snapshot
    ///
    /// Only active snapshots update the value; while the tracker reports an
    /// error the last-known value keeps playing. Returns whether it changed.
    pub fn apply(&mut self, state: &TrackingState) -> bool {
        if !state.is_active() || self.tracked_value == state.control {
            return false;
        }
        self.tracked_value = state.control;
        true
    }

    pub fn tracked_value(&self) -> f64 {
        self.tracked_value
    }

    /// Value the player should use right now
    pub fn effective_value(&self) -> f64 {
        match self.source {
            ControlSource::Manual => self.manual_value,
            ControlSource::Displacement => self.tracked_value,
        }
    }

    /// Display label: `"1.25x"` for rates, `"+0.50"` for balance
    pub fn label(&self) -> String {
        format_control(self.kind, self.effective_value())
    }
}

/// Render a control value the way the player UI shows it
pub fn format_control(kind: ControlKind, value: f64) -> String {
    match kind {
        ControlKind::RateMultiplier { .. } => format!("{:.2}x", value),
        ControlKind::BipolarBalance => format!("{:+.2}", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::TrackingStatus;

    fn rate() -> ControlKind {
        ControlKind::RateMultiplier { min: 0.25, max: 2.0 }
    }

    fn snapshot(status: TrackingStatus, control: f64) -> TrackingState {
        let mut state = TrackingState::idle(1.0);
        state.status = status;
        state.control = control;
        state
    }

    #[test]
    fn test_initial_state() {
        let controller = PlaybackController::new(rate());
        assert!(!controller.is_playing());
        assert_eq!(controller.source(), ControlSource::Manual);
        assert_eq!(controller.effective_value(), 1.0);
        assert_eq!(controller.label(), "1.00x");
    }

    #[test]
    fn test_toggle() {
        let mut controller = PlaybackController::new(rate());
        assert!(controller.toggle());
        assert!(controller.is_playing());
        assert!(!controller.toggle());
    }

    #[test]
    fn test_manual_value_is_clamped() {
        let mut controller = PlaybackController::new(rate());
        assert_eq!(controller.set_manual(1.5), 1.5);
        assert_eq!(controller.set_manual(5.0), 2.0);
        assert_eq!(controller.set_manual(0.0), 0.25);
        assert_eq!(controller.set_manual(f64::NAN), 1.0);

        let mut balance = PlaybackController::new(ControlKind::BipolarBalance);
        assert_eq!(balance.set_manual(-3.0), -1.0);
    }

    #[test]
    fn test_displacement_source() {
        let mut controller = PlaybackController::new(rate());
        controller.set_manual(0.5);
        controller.set_source(ControlSource::Displacement);

        assert!(controller.apply(&snapshot(TrackingStatus::Active, 1.75)));
        assert_eq!(controller.effective_value(), 1.75);
        assert_eq!(controller.label(), "1.75x");

        controller.set_source(ControlSource::Manual);
        assert_eq!(controller.effective_value(), 0.5);
    }

    #[test]
    fn test_error_snapshot_keeps_last_value() {
        let mut controller = PlaybackController::new(rate());
        controller.set_source(ControlSource::Displacement);
        controller.apply(&snapshot(TrackingStatus::Active, 1.4));

        assert!(!controller.apply(&snapshot(TrackingStatus::Error, 1.0)));
        assert!(!controller.apply(&snapshot(TrackingStatus::Acquiring, 1.0)));
        assert_eq!(controller.effective_value(), 1.4);
    }

    #[test]
    fn test_balance_label() {
        assert_eq!(format_control(ControlKind::BipolarBalance, 0.5), "+0.50");
        assert_eq!(format_control(ControlKind::BipolarBalance, -0.25), "-0.25");
        assert_eq!(format_control(rate(), 0.25), "0.25x");
    }
}
