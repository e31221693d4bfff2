//! Straight-line distance on raw coordinates.
//!
//! This is a ranking metric for tour construction only. It treats
//! `(lat, lng)` as a flat plane and is never reported as a travel distance;
//! real distances come from a [`DirectionsProvider`](crate::traits::DirectionsProvider).

use crate::traits::Coordinate;

/// Euclidean norm between two `(lat, lng)` pairs.
pub fn straight_line_distance(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = a.0 - b.0;
    let d_lng = a.1 - b.1;
    (d_lat * d_lat + d_lng * d_lng).sqrt()
}
