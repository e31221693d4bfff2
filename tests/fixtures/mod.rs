//! Test fixtures for outlet-router.
//!
//! Provides a small set of real-looking Jakarta outlet locations and helpers
//! to turn them into a catalog.

pub mod jakarta_outlets;

pub use jakarta_outlets::*;
