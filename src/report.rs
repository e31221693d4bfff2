//! Run report: route sequences with per-leg distance and travel time.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::aggregate::RouteSummary;
use crate::allocator::{AllocateOptions, RouteSet};
use crate::error::ReportError;

#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Multiplier applied to travel durations before they are reported,
    /// for fleets that move slower than the provider assumes.
    pub duration_scale: f64,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { duration_scale: 1.0 }
    }
}

/// Whole hours plus the leftover whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TravelTime {
    pub hours: u64,
    pub minutes: u64,
}

impl TravelTime {
    pub fn from_seconds(seconds: f64) -> Self {
        let seconds = seconds.max(0.0) as u64;
        Self {
            hours: seconds / 3600,
            minutes: (seconds % 3600) / 60,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LegReport {
    pub outlet_pair: String,
    pub distance_meters: f64,
    pub travel_time: TravelTime,
    /// False when the leg's lookup failed and it was counted as zero.
    pub resolved: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteReport {
    /// One-based, as shown to dispatchers.
    pub route_number: usize,
    pub sequence: Vec<String>,
    pub legs: Vec<LegReport>,
    pub total_distance_meters: f64,
    pub total_travel_time: TravelTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub depot: String,
    pub max_outlets_per_route: usize,
    pub total_routes: usize,
    pub routes: Vec<RouteReport>,
    pub unassigned: Vec<String>,
}

impl RunReport {
    /// `summaries` are matched to routes by vehicle index.
    pub fn build(
        options: &AllocateOptions,
        route_set: &RouteSet,
        summaries: &[RouteSummary],
        report_options: &ReportOptions,
    ) -> Self {
        let scale = report_options.duration_scale;
        let routes = route_set
            .routes
            .iter()
            .map(|route| {
                let summary = summaries.iter().find(|summary| summary.vehicle == route.vehicle());
                let legs: Vec<LegReport> = summary
                    .map(|summary| {
                        summary
                            .legs
                            .iter()
                            .map(|leg| {
                                let segment = leg.segment.unwrap_or_default();
                                LegReport {
                                    outlet_pair: leg.label(),
                                    distance_meters: segment.distance_meters,
                                    travel_time: TravelTime::from_seconds(segment.duration_seconds * scale),
                                    resolved: leg.segment.is_some(),
                                }
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                let (distance, duration) = summary.map(RouteSummary::totals).unwrap_or((0.0, 0.0));

                RouteReport {
                    route_number: route.vehicle() + 1,
                    sequence: route.sequence().to_vec(),
                    legs,
                    total_distance_meters: distance,
                    total_travel_time: TravelTime::from_seconds(duration * scale),
                }
            })
            .collect();

        Self {
            depot: route_set
                .routes
                .first()
                .map(|route| route.depot().to_string())
                .unwrap_or_else(|| options.depot.clone()),
            max_outlets_per_route: options.max_outlets_per_route,
            total_routes: options.total_routes,
            routes,
            unassigned: route_set.unassigned.clone(),
        }
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), ReportError> {
        let mut writer = BufWriter::new(writer);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        self.write_json(File::create(path.as_ref())?)
    }
}
