//! Spherical geodesy for short walking displacements
//!
//! Distances use the haversine great-circle formula on a sphere of radius
//! [`EARTH_RADIUS_M`]. The local offset helpers use an equirectangular
//! approximation around a reference point, which is accurate to well under a
//! centimeter over the few hundred meters a walking session covers.

use crate::core::{GeoPoint, LocalOffset, EARTH_RADIUS_M};
use nalgebra::Vector2;

/// Great-circle distance between two points given in decimal degrees (meters)
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push `a` marginally past 1 for near-antipodal points
    let a = a.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Haversine distance between two [`GeoPoint`]s
pub fn distance_between(a: &GeoPoint, b: &GeoPoint) -> f64 {
    haversine_distance(a.lat, a.lon, b.lat, b.lon)
}

/// East/North vector of `point` relative to `reference` (meters)
pub fn local_offset_vector(reference: &GeoPoint, point: &GeoPoint) -> Vector2<f64> {
    let lat_diff = (point.lat - reference.lat).to_radians();
    let lon_diff = (point.lon - reference.lon).to_radians();
    let ref_lat_rad = reference.lat.to_radians();

    Vector2::new(
        EARTH_RADIUS_M * ref_lat_rad.cos() * lon_diff,
        EARTH_RADIUS_M * lat_diff,
    )
}

/// East/North offset of `point` relative to `reference`
pub fn local_offset(reference: &GeoPoint, point: &GeoPoint) -> LocalOffset {
    let v = local_offset_vector(reference, point);
    LocalOffset {
        east_m: v.x,
        north_m: v.y,
    }
}

/// Inverse of [`local_offset_vector`]: the point `offset` meters east/north of `reference`
pub fn offset_point(reference: &GeoPoint, offset: &Vector2<f64>) -> GeoPoint {
    let ref_lat_rad = reference.lat.to_radians();
    let lat_diff = offset.y / EARTH_RADIUS_M;
    let lon_diff = offset.x / (EARTH_RADIUS_M * ref_lat_rad.cos());

    GeoPoint::new(
        reference.lat + lat_diff.to_degrees(),
        reference.lon + lon_diff.to_degrees(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_self_is_zero() {
        for &(lat, lon) in &[(0.0, 0.0), (35.0, 135.0), (-33.86, 151.21), (89.9, -179.9)] {
            assert_eq!(haversine_distance(lat, lon, lat, lon), 0.0);
        }
    }

    #[test]
    fn test_distance_is_symmetric() {
        let forward = haversine_distance(35.0, 135.0, 35.0123, 135.0456);
        let backward = haversine_distance(35.0123, 135.0456, 35.0, 135.0);
        assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn test_one_degree_latitude_at_equator() {
        let distance = haversine_distance(0.0, 0.0, 1.0, 0.0);
        let expected = 111_195.0;
        assert!((distance - expected).abs() < expected * 0.005);
    }

    #[test]
    fn test_hundred_meters_north() {
        let distance = haversine_distance(35.0, 135.0, 35.0009, 135.0);
        assert!((distance - 100.0).abs() < 1.0);
    }

    #[test]
    fn test_antipodal_points() {
        let distance = haversine_distance(0.0, 0.0, 0.0, 180.0);
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_M;
        assert!((distance - half_circumference).abs() < 1.0);
    }

    #[test]
    fn test_local_offset_directions() {
        let origin = GeoPoint::new(35.0, 135.0);

        let north = local_offset(&origin, &GeoPoint::new(35.0009, 135.0));
        assert!((north.north_m - 100.0).abs() < 1.0);
        assert!(north.east_m.abs() < 1e-9);

        let west = local_offset(&origin, &GeoPoint::new(35.0, 134.999));
        assert!(west.east_m < 0.0);
        assert!(west.north_m.abs() < 1e-9);
    }

    #[test]
    fn test_offset_agrees_with_haversine_over_short_range() {
        let origin = GeoPoint::new(48.85, 2.35);
        let point = GeoPoint::new(48.8512, 2.3521);

        let planar = local_offset_vector(&origin, &point).norm();
        let great_circle = distance_between(&origin, &point);
        assert!((planar - great_circle).abs() < 0.01);
    }

    #[test]
    fn test_offset_point_inverts_local_offset() {
        let origin = GeoPoint::new(35.0, 135.0);
        let target = offset_point(&origin, &Vector2::new(12.0, -30.0));
        let back = local_offset_vector(&origin, &target);

        assert!((back.x - 12.0).abs() < 1e-6);
        assert!((back.y + 30.0).abs() < 1e-6);
    }
}
