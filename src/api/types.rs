//! Snapshot types emitted by the tracker

use crate::core::{GeoPoint, LocalOffset, PositionSample};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tracking session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingStatus {
    /// No session started
    Idle,
    /// Subscribed, waiting for the first fix
    Acquiring,
    /// At least one fix received and the last delivery succeeded
    Active,
    /// The last delivery was a location failure
    Error,
}

impl TrackingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackingStatus::Idle => "idle",
            TrackingStatus::Acquiring => "acquiring",
            TrackingStatus::Active => "active",
            TrackingStatus::Error => "error",
        }
    }
}

impl fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a tracking session, emitted on every change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingState {
    pub status: TrackingStatus,
    /// First fix of the session; never changes once set
    pub origin: Option<GeoPoint>,
    /// Most recent fix
    pub current: Option<PositionSample>,
    /// Great-circle distance from origin to current (meters)
    pub raw_distance: f64,
    /// Exponentially smoothed distance (meters)
    pub smoothed_distance: f64,
    /// Playback-rate multiplier or spectral balance
    pub control: f64,
    /// Displacement of current from origin, east/north
    pub offset: Option<LocalOffset>,
    /// Successful fixes received this session
    pub sample_count: u32,
    /// Source failure message, empty unless status is `Error`
    pub error_message: String,
}

impl TrackingState {
    /// State before any session has started
    pub fn idle(neutral: f64) -> Self {
        Self {
            status: TrackingStatus::Idle,
            origin: None,
            current: None,
            raw_distance: 0.0,
            smoothed_distance: 0.0,
            control: neutral,
            offset: None,
            sample_count: 0,
            error_message: String::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == TrackingStatus::Active
    }

    pub fn has_error(&self) -> bool {
        self.status == TrackingStatus::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_state() {
        let state = TrackingState::idle(1.0);
        assert_eq!(state.status, TrackingStatus::Idle);
        assert!(state.origin.is_none());
        assert!(state.current.is_none());
        assert_eq!(state.control, 1.0);
        assert!(state.error_message.is_empty());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TrackingStatus::Acquiring).unwrap(), "\"acquiring\"");
        assert_eq!(TrackingStatus::Error.to_string(), "error");
    }
}
