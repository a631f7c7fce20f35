//! Displacement Tracker
//!
//! Turns a listener's walking displacement, measured from a stream of
//! geolocation fixes, into a playback-rate multiplier or a spectral balance
//! for a looping audio player.

pub mod core;
pub mod algorithms;
pub mod processing;
pub mod utils;
pub mod hardware;
pub mod api;

// Re-export commonly used types
pub use crate::core::{GeoPoint, PositionSample, LocalOffset, EARTH_RADIUS_M};
pub use algorithms::{
    haversine_distance, distance_to_speed, distance_to_balance, ControlKind, WaveMapping,
};
pub use processing::ExponentialSmoother;
pub use hardware::{
    LocationSource, LocationError, LocationErrorKind, WatchOptions, WatchId, MockLocationSource,
};
pub use utils::{TrackerConfig, ConfigError, ConfigResult};
pub use api::{
    DisplacementTracker, StopHandle, TrackingState, TrackingStatus, start_tracking,
    PlaybackController, ControlSource, SnapshotFormatter, OutputFormat,
};
