//! outlet-router core
//!
//! Splits a catalog of outlets across a fixed fleet of vehicles that leave
//! from and return to a shared depot, using nearest-neighbor tours capped at
//! a maximum number of stops, then prices each route with real travel data.

pub mod traits;
pub mod error;
pub mod geometry;
pub mod catalog;
pub mod pool;
pub mod tour;
pub mod allocator;
pub mod aggregate;
pub mod osrm;
pub mod haversine;
pub mod report;
