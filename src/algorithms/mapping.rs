//! Periodic distance-to-control mapping
//!
//! Past the dead zone the control value follows one sine cycle every
//! `period_m` meters, so walking away and back sweeps the value smoothly
//! through both extremes and returns it to neutral.

use crate::core::{
    DEFAULT_DEAD_ZONE_M, DEFAULT_PERIOD_M, NEUTRAL_BALANCE, NEUTRAL_SPEED, SPEED_MAX, SPEED_MIN,
};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Which control signal a mapping produces
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlKind {
    /// Playback-rate multiplier oscillating between `min` and `max`
    RateMultiplier { min: f64, max: f64 },
    /// Spectral tilt in [-1, +1]
    BipolarBalance,
}

impl ControlKind {
    pub fn neutral(&self) -> f64 {
        match self {
            ControlKind::RateMultiplier { .. } => NEUTRAL_SPEED,
            ControlKind::BipolarBalance => NEUTRAL_BALANCE,
        }
    }

    /// Inclusive bounds of the values this kind can produce
    pub fn bounds(&self) -> (f64, f64) {
        match *self {
            ControlKind::RateMultiplier { min, max } => (min, max),
            ControlKind::BipolarBalance => (-1.0, 1.0),
        }
    }
}

impl Default for ControlKind {
    fn default() -> Self {
        ControlKind::RateMultiplier {
            min: SPEED_MIN,
            max: SPEED_MAX,
        }
    }
}

/// Dead zone, wavelength and output kind of the mapping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveMapping {
    /// Displacement below which the neutral value is held (meters)
    pub dead_zone_m: f64,
    /// Distance covered by one full wave cycle (meters)
    pub period_m: f64,
    pub kind: ControlKind,
}

impl Default for WaveMapping {
    fn default() -> Self {
        Self {
            dead_zone_m: DEFAULT_DEAD_ZONE_M,
            period_m: DEFAULT_PERIOD_M,
            kind: ControlKind::default(),
        }
    }
}

impl WaveMapping {
    pub fn rate(dead_zone_m: f64, period_m: f64, min: f64, max: f64) -> Self {
        Self {
            dead_zone_m,
            period_m,
            kind: ControlKind::RateMultiplier { min, max },
        }
    }

    pub fn balance(dead_zone_m: f64, period_m: f64) -> Self {
        Self {
            dead_zone_m,
            period_m,
            kind: ControlKind::BipolarBalance,
        }
    }

    pub fn neutral(&self) -> f64 {
        self.kind.neutral()
    }

    /// Map a smoothed displacement to the control value
    pub fn map(&self, distance: f64) -> f64 {
        match self.kind {
            ControlKind::RateMultiplier { min, max } => {
                distance_to_speed(distance, self.dead_zone_m, self.period_m, min, max)
            }
            ControlKind::BipolarBalance => {
                distance_to_balance(distance, self.dead_zone_m, self.period_m)
            }
        }
    }
}

fn wave_phase(distance: f64, dead_zone_m: f64, period_m: f64) -> f64 {
    ((distance - dead_zone_m) / period_m) * 2.0 * PI
}

/// Playback-rate multiplier for `distance`: 1.0 inside the dead zone, otherwise
/// `mid + amp * sin(phase)` swinging between `min` and `max`
pub fn distance_to_speed(
    distance: f64,
    dead_zone_m: f64,
    period_m: f64,
    min: f64,
    max: f64,
) -> f64 {
    if distance < dead_zone_m {
        return NEUTRAL_SPEED;
    }

    let mid = (max + min) / 2.0;
    let amp = (max - min) / 2.0;
    mid + amp * wave_phase(distance, dead_zone_m, period_m).sin()
}

/// Bipolar balance for `distance`: 0.0 inside the dead zone, otherwise `sin(phase)`
pub fn distance_to_balance(distance: f64, dead_zone_m: f64, period_m: f64) -> f64 {
    if distance < dead_zone_m {
        return NEUTRAL_BALANCE;
    }

    wave_phase(distance, dead_zone_m, period_m).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_neutral_inside_dead_zone() {
        let rate = WaveMapping::default();
        let balance = WaveMapping::balance(2.0, 8.0);

        for d in [0.0, 0.5, 1.0, 2.5, 2.999] {
            assert_eq!(rate.map(d), 1.0);
        }
        for d in [0.0, 1.0, 1.999] {
            assert_eq!(balance.map(d), 0.0);
        }
    }

    #[test]
    fn test_rate_extremes_at_quarter_phases() {
        let mapping = WaveMapping::rate(3.0, 20.0, 0.25, 2.0);

        assert!((mapping.map(3.0 + 5.0) - 2.0).abs() < EPS);
        assert!((mapping.map(3.0 + 15.0) - 0.25).abs() < EPS);
    }

    #[test]
    fn test_rate_starts_at_midpoint_past_dead_zone() {
        // At the dead-zone edge the wave starts at `mid`, not at the neutral 1.0
        let mapping = WaveMapping::rate(3.0, 20.0, 0.25, 2.0);
        assert!((mapping.map(3.0) - 1.125).abs() < EPS);
        assert!((mapping.map(13.0) - 1.125).abs() < EPS);
    }

    #[test]
    fn test_mapping_is_periodic() {
        let mappings = [WaveMapping::default(), WaveMapping::balance(2.0, 8.0)];

        for mapping in &mappings {
            for x in [0.0, 1.3, 4.7, 9.9, 17.2] {
                let d = mapping.dead_zone_m + x;
                let a = mapping.map(d);
                let b = mapping.map(d + mapping.period_m);
                assert!((a - b).abs() < 1e-9, "{:?} at {}: {} vs {}", mapping.kind, d, a, b);
            }
        }
    }

    #[test]
    fn test_balance_range() {
        let mapping = WaveMapping::balance(1.0, 10.0);

        assert!((mapping.map(1.0 + 2.5) - 1.0).abs() < EPS);
        assert!((mapping.map(1.0 + 7.5) + 1.0).abs() < EPS);

        let mut d = 0.0;
        while d < 50.0 {
            let v = mapping.map(d);
            assert!((-1.0..=1.0).contains(&v));
            d += 0.37;
        }
    }

    #[test]
    fn test_free_functions_match_mapping() {
        let mapping = WaveMapping::rate(5.0, 12.0, 0.5, 1.5);
        assert_eq!(mapping.map(9.0), distance_to_speed(9.0, 5.0, 12.0, 0.5, 1.5));
        assert_eq!(
            WaveMapping::balance(5.0, 12.0).map(9.0),
            distance_to_balance(9.0, 5.0, 12.0)
        );
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&ControlKind::BipolarBalance).unwrap();
        assert_eq!(json, r#"{"type":"bipolar_balance"}"#);

        let kind: ControlKind =
            serde_json::from_str(r#"{"type":"rate_multiplier","min":0.5,"max":1.5}"#).unwrap();
        assert_eq!(kind, ControlKind::RateMultiplier { min: 0.5, max: 1.5 });
    }
}
