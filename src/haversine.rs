//! Haversine directions provider (fallback when OSRM is unavailable).
//!
//! Uses great-circle distance and an assumed speed to estimate travel time.
//! Ignores the road network, but never fails.

use crate::error::DirectionsError;
use crate::traits::{Coordinate, DirectionsProvider, TravelSegment};

/// Average driving speed assumption for time estimation.
const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Straight-line estimator for travel segments.
#[derive(Debug, Clone)]
pub struct HaversineDirections {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
}

impl Default for HaversineDirections {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl HaversineDirections {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    /// Great-circle distance between two points in kilometers.
    pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
        let (lat1, lng1) = from;
        let (lat2, lng2) = to;

        let delta_lat = (lat2 - lat1).to_radians();
        let delta_lng = (lng2 - lng1).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.to_radians().cos() * lat2.to_radians().cos() * (delta_lng / 2.0).sin().powi(2);

        EARTH_RADIUS_KM * 2.0 * a.sqrt().asin()
    }

    fn km_to_seconds(&self, km: f64) -> f64 {
        (km / self.speed_kmh * 3600.0).round()
    }
}

impl DirectionsProvider for HaversineDirections {
    fn travel_segment(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<TravelSegment, DirectionsError> {
        let km = Self::haversine_km(from, to);
        Ok(TravelSegment::new(
            (km * 1000.0).round(),
            self.km_to_seconds(km),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_same_point() {
        let dist = HaversineDirections::haversine_km((-6.2, 106.8), (-6.2, 106.8));
        assert!(dist < 0.001, "Same point should have ~0 distance");
    }

    #[test]
    fn test_haversine_known_distance() {
        // Jakarta (-6.2088, 106.8456) to Bandung (-6.9175, 107.6191), ~117 km.
        let dist = HaversineDirections::haversine_km((-6.2088, 106.8456), (-6.9175, 107.6191));
        assert!(dist > 110.0 && dist < 125.0, "Jakarta to Bandung should be ~117km, got {}", dist);
    }

    #[test]
    fn test_segment_is_symmetric() {
        let provider = HaversineDirections::default();
        let a = (-6.20, 106.81);
        let b = (-6.25, 106.85);
        let there = provider.travel_segment(a, b).unwrap();
        let back = provider.travel_segment(b, a).unwrap();
        assert_eq!(there, back);
    }

    #[test]
    fn test_reasonable_travel_time() {
        let provider = HaversineDirections::new(40.0);
        // 10 km at 40 km/h = 0.25 hours = 900 seconds
        assert_eq!(provider.km_to_seconds(10.0), 900.0);
    }
}
