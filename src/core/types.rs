//! Core data types for displacement tracking

use serde::{Deserialize, Serialize};

/// Geodetic point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A single fix delivered by a location source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
    /// Horizontal accuracy radius (meters)
    pub accuracy: f64,
}

impl PositionSample {
    pub fn new(lat: f64, lon: f64, accuracy: f64) -> Self {
        Self { lat, lon, accuracy }
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

/// East/North displacement from the session origin (meters)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalOffset {
    pub east_m: f64,
    pub north_m: f64,
}
