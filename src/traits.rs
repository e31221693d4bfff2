//! Seams between the allocation core and its external collaborators.
//!
//! The core only needs coordinates and a way to ask for real travel data
//! between two of them. Concrete providers (OSRM, haversine) live in their
//! own modules.

use serde::{Deserialize, Serialize};

use crate::error::DirectionsError;

/// Latitude/longitude pair.
pub type Coordinate = (f64, f64);

/// Real travel distance and duration for one consecutive pair of stops.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TravelSegment {
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

impl TravelSegment {
    pub fn new(distance_meters: f64, duration_seconds: f64) -> Self {
        Self {
            distance_meters,
            duration_seconds,
        }
    }
}

/// Provides road distance and travel time between two coordinates.
///
/// Implementations must be shareable across worker threads; lookups for a
/// single route are issued concurrently.
pub trait DirectionsProvider: Sync {
    fn travel_segment(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<TravelSegment, DirectionsError>;
}

impl<P: DirectionsProvider + ?Sized> DirectionsProvider for &P {
    fn travel_segment(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<TravelSegment, DirectionsError> {
        (**self).travel_segment(from, to)
    }
}

impl<P: DirectionsProvider + ?Sized> DirectionsProvider for Box<P> {
    fn travel_segment(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<TravelSegment, DirectionsError> {
        (**self).travel_segment(from, to)
    }
}
