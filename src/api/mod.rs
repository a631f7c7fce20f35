//! Tracking API
//!
//! Session start/stop, the snapshots it emits, playback control state and
//! snapshot formatting.

pub mod tracker;
pub mod types;
pub mod playback;
pub mod formatting;

pub use types::{TrackingState, TrackingStatus};
pub use tracker::{DisplacementTracker, StopHandle, StateCallback, start_tracking};
pub use playback::{PlaybackController, ControlSource, format_control};
pub use formatting::{
    SnapshotFormatter, FormattedSnapshot, OutputFormat, TextFormatter, JsonFormatter, CsvFormatter,
};
