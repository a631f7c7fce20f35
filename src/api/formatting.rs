//! Snapshot output formatting
//!
//! Renders tracker snapshots as a status line for display, as JSON for
//! structured output, or as CSV rows for recording a walk.

use crate::algorithms::mapping::ControlKind;
use crate::api::playback::format_control;
use crate::api::types::{TrackingState, TrackingStatus};
use serde::{Deserialize, Serialize};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Snapshot with values rounded for presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedSnapshot {
    pub status: TrackingStatus,
    pub latitude_deg: Option<f64>,
    pub longitude_deg: Option<f64>,
    pub accuracy_m: Option<f64>,
    pub east_m: Option<f64>,
    pub north_m: Option<f64>,
    pub raw_distance_m: f64,
    pub smoothed_distance_m: f64,
    pub control: f64,
    pub control_label: String,
    pub sample_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Converts snapshots into [`FormattedSnapshot`]s
pub struct SnapshotFormatter {
    pub kind: ControlKind,
    /// Decimal places kept for distances
    pub precision: u8,
}

impl SnapshotFormatter {
    pub fn new(kind: ControlKind) -> Self {
        Self { kind, precision: 2 }
    }

    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    pub fn format(&self, state: &TrackingState) -> FormattedSnapshot {
        let current = state.current.as_ref();
        let offset = state.offset.as_ref();

        FormattedSnapshot {
            status: state.status,
            latitude_deg: current.map(|c| c.lat),
            longitude_deg: current.map(|c| c.lon),
            accuracy_m: current.map(|c| self.round(c.accuracy)),
            east_m: offset.map(|o| self.round(o.east_m)),
            north_m: offset.map(|o| self.round(o.north_m)),
            raw_distance_m: self.round(state.raw_distance),
            smoothed_distance_m: self.round(state.smoothed_distance),
            control: state.control,
            control_label: format_control(self.kind, state.control),
            sample_count: state.sample_count,
            error: if state.error_message.is_empty() {
                None
            } else {
                Some(state.error_message.clone())
            },
        }
    }

    fn round(&self, value: f64) -> f64 {
        let multiplier = 10_f64.powi(self.precision as i32);
        (value * multiplier).round() / multiplier
    }
}

/// One-line status badge
#[derive(Default)]
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_text(&self, snapshot: &FormattedSnapshot) -> String {
        let badge = format!("[{}]", snapshot.status.as_str().to_uppercase());

        match (&snapshot.error, snapshot.latitude_deg, snapshot.longitude_deg) {
            (Some(error), _, _) => format!("{} {} | {}", badge, error, snapshot.control_label),
            (None, Some(lat), Some(lon)) => format!(
                "{} {:.6}, {:.6} ±{:.0}m | dist {:.1}m (raw {:.1}m) | {}",
                badge,
                lat,
                lon,
                snapshot.accuracy_m.unwrap_or(0.0),
                snapshot.smoothed_distance_m,
                snapshot.raw_distance_m,
                snapshot.control_label
            ),
            _ => format!("{} waiting for position | {}", badge, snapshot.control_label),
        }
    }
}

/// JSON formatter for structured output
#[derive(Default)]
pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn format_json(&self, snapshot: &FormattedSnapshot) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(snapshot)
        } else {
            serde_json::to_string(snapshot)
        }
    }
}

/// CSV formatter for recording sessions
pub struct CsvFormatter {
    pub include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self { include_header: true }
    }
}

impl CsvFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(&self) -> String {
        concat!(
            "sample,status,latitude,longitude,accuracy,east,north,",
            "raw_distance,smoothed_distance,control"
        )
        .to_string()
    }

    pub fn format_csv(&self, snapshot: &FormattedSnapshot) -> String {
        fn opt(value: Option<f64>, decimals: usize) -> String {
            value.map(|v| format!("{:.*}", decimals, v)).unwrap_or_default()
        }

        format!(
            "{},{},{},{},{},{},{},{:.2},{:.2},{:.4}",
            snapshot.sample_count,
            snapshot.status,
            opt(snapshot.latitude_deg, 7),
            opt(snapshot.longitude_deg, 7),
            opt(snapshot.accuracy_m, 1),
            opt(snapshot.east_m, 2),
            opt(snapshot.north_m, 2),
            snapshot.raw_distance_m,
            snapshot.smoothed_distance_m,
            snapshot.control
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GeoPoint, LocalOffset, PositionSample};

    fn active_state() -> TrackingState {
        let mut state = TrackingState::idle(1.0);
        state.status = TrackingStatus::Active;
        state.origin = Some(GeoPoint::new(35.0, 135.0));
        state.current = Some(PositionSample::new(35.0009, 135.0, 5.0));
        state.raw_distance = 100.0749;
        state.smoothed_distance = 30.0213;
        state.control = 1.5;
        state.offset = Some(LocalOffset { east_m: 0.0, north_m: 100.0749 });
        state.sample_count = 2;
        state
    }

    fn rate() -> ControlKind {
        ControlKind::RateMultiplier { min: 0.25, max: 2.0 }
    }

    #[test]
    fn test_format_rounds_distances() {
        let snapshot = SnapshotFormatter::new(rate()).format(&active_state());
        assert_eq!(snapshot.raw_distance_m, 100.07);
        assert_eq!(snapshot.smoothed_distance_m, 30.02);
        assert_eq!(snapshot.north_m, Some(100.07));
        assert_eq!(snapshot.control_label, "1.50x");
        assert!(snapshot.error.is_none());
    }

    #[test]
    fn test_custom_precision() {
        let formatter = SnapshotFormatter::new(rate()).with_precision(0);
        let snapshot = formatter.format(&active_state());
        assert_eq!(snapshot.raw_distance_m, 100.0);
        assert_eq!(snapshot.smoothed_distance_m, 30.0);

        let snapshot = SnapshotFormatter::new(rate()).with_precision(3).format(&active_state());
        assert_eq!(snapshot.raw_distance_m, 100.075);
    }

    #[test]
    fn test_text_active() {
        let snapshot = SnapshotFormatter::new(rate()).format(&active_state());
        let text = TextFormatter::new().format_text(&snapshot);
        assert!(text.starts_with("[ACTIVE] 35.000900, 135.000000"));
        assert!(text.ends_with("| 1.50x"));
    }

    #[test]
    fn test_text_acquiring_and_error() {
        let formatter = SnapshotFormatter::new(rate());

        let mut state = TrackingState::idle(1.0);
        state.status = TrackingStatus::Acquiring;
        let text = TextFormatter::new().format_text(&formatter.format(&state));
        assert_eq!(text, "[ACQUIRING] waiting for position | 1.00x");

        state.status = TrackingStatus::Error;
        state.error_message = "User denied Geolocation".to_string();
        let text = TextFormatter::new().format_text(&formatter.format(&state));
        assert_eq!(text, "[ERROR] User denied Geolocation | 1.00x");
    }

    #[test]
    fn test_json_output() {
        let snapshot = SnapshotFormatter::new(rate()).format(&active_state());
        let json = JsonFormatter::new().format_json(&snapshot).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["status"], "active");
        assert_eq!(value["sample_count"], 2);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_pretty_json_output() {
        let snapshot = SnapshotFormatter::new(rate()).format(&active_state());
        let compact = JsonFormatter::new().format_json(&snapshot).unwrap();
        let pretty = JsonFormatter::pretty().format_json(&snapshot).unwrap();

        assert!(!compact.contains('\n'));
        assert!(pretty.contains("\n  \"status\": \"active\""));
        let a: serde_json::Value = serde_json::from_str(&compact).unwrap();
        let b: serde_json::Value = serde_json::from_str(&pretty).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_csv_output() {
        let csv = CsvFormatter::new();
        let row = csv.format_csv(&SnapshotFormatter::new(rate()).format(&active_state()));

        assert_eq!(csv.header().split(',').count(), row.split(',').count());
        assert!(row.starts_with("2,active,35.0009000,135.0000000,5.0,"));
        assert!(row.ends_with(",100.07,30.02,1.5000"));
    }
}
