//! Physical constants and default tracking parameters

/// Mean Earth radius used by the haversine formula (meters)
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Default exponential smoothing factor
pub const DEFAULT_SMOOTHING_FACTOR: f64 = 0.3;

/// Default jitter floor (meters)
pub const DEFAULT_DEAD_ZONE_M: f64 = 3.0;

/// Default distance for one full wave cycle (meters)
pub const DEFAULT_PERIOD_M: f64 = 20.0;

/// Playback rate bounds, shared with the manual slider
pub const SPEED_MIN: f64 = 0.25;
pub const SPEED_MAX: f64 = 2.0;

/// Neutral values of the two control variants
pub const NEUTRAL_SPEED: f64 = 1.0;
pub const NEUTRAL_BALANCE: f64 = 0.0;
