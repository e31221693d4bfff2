//! Error types for the planner.
//!
//! Only configuration and input-loading problems are fatal. Data
//! inconsistencies found during allocation and provider failures during
//! aggregation are logged and degraded, so they never surface here as a
//! returned error from those stages.

use std::io;

/// Rejected before any allocation work starts.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max outlets per route must be at least 1")]
    NoCapacity,

    #[error("total routes must be at least 1")]
    NoRoutes,

    #[error("location catalog is empty")]
    EmptyCatalog,

    #[error("depot '{0}' not found in catalog")]
    UnknownDepot(String),
}

/// Problems building a [`LocationCatalog`](crate::catalog::LocationCatalog).
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate location name '{0}' (names are case-insensitive)")]
    DuplicateName(String),

    #[error("location '{name}' has an invalid coordinate ({lat}, {lng})")]
    InvalidCoordinate { name: String, lat: f64, lng: f64 },

    #[error("row {row}: '{value}' is not a number")]
    InvalidNumber { row: usize, value: String },

    #[error("missing column for {0} in catalog header")]
    MissingColumn(&'static str),

    #[error("I/O error reading catalog: {0}")]
    Io(#[from] io::Error),

    #[error("malformed catalog row: {0}")]
    Csv(#[from] csv::Error),
}

/// A single failed directions lookup.
#[derive(Debug, thiserror::Error)]
pub enum DirectionsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned no route ({0})")]
    NoRoute(String),
}

/// Problems writing a run report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("I/O error writing report: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
