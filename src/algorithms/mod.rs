//! Geodesy and distance-to-control mapping

pub mod geodesy;
pub mod mapping;

pub use geodesy::{haversine_distance, distance_between, local_offset};
pub use mapping::{ControlKind, WaveMapping, distance_to_speed, distance_to_balance};
