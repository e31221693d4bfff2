//! Real travel distance and time for finished routes.
//!
//! Every leg of a route is an independent directions lookup. Lookups run on a
//! bounded rayon pool and come back in leg order. A leg whose endpoints are
//! missing from the catalog, or whose lookup still fails after the retry
//! budget, is logged and counted as zero.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::Serialize;
use tracing::{debug, warn};

use crate::allocator::{Route, RouteSet};
use crate::catalog::LocationCatalog;
use crate::traits::{DirectionsProvider, TravelSegment};

#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// Concurrent directions lookups per route.
    pub workers: usize,
    /// Extra attempts after a failed lookup before it counts as zero.
    pub retries: usize,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            workers: 4,
            retries: 1,
        }
    }
}

/// Outcome of one consecutive pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegResult {
    pub from: String,
    pub to: String,
    /// `None` when the lookup could not be completed.
    pub segment: Option<TravelSegment>,
}

impl LegResult {
    pub fn label(&self) -> String {
        format!("{} to {}", self.from, self.to)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub vehicle: usize,
    pub legs: Vec<LegResult>,
    pub total_distance_meters: f64,
    pub total_duration_seconds: f64,
}

impl RouteSummary {
    pub fn totals(&self) -> (f64, f64) {
        (self.total_distance_meters, self.total_duration_seconds)
    }

    pub fn failed_legs(&self) -> usize {
        self.legs.iter().filter(|leg| leg.segment.is_none()).count()
    }
}

/// Looks up every leg of `route` and sums distance and duration.
pub fn aggregate<P>(
    route: &Route,
    catalog: &LocationCatalog,
    provider: &P,
    options: &AggregateOptions,
) -> RouteSummary
where
    P: DirectionsProvider + ?Sized,
{
    let pool = lookup_pool(options.workers);
    summarize(route, catalog, provider, options, pool.as_ref())
}

/// Aggregates each route of a set in vehicle order. All routes share one
/// lookup pool.
pub fn aggregate_all<P>(
    route_set: &RouteSet,
    catalog: &LocationCatalog,
    provider: &P,
    options: &AggregateOptions,
) -> Vec<RouteSummary>
where
    P: DirectionsProvider + ?Sized,
{
    let pool = lookup_pool(options.workers);
    route_set
        .routes
        .iter()
        .map(|route| summarize(route, catalog, provider, options, pool.as_ref()))
        .collect()
}

/// `None` means legs are resolved on the calling thread.
fn lookup_pool(workers: usize) -> Option<ThreadPool> {
    ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .build()
        .inspect_err(|err| warn!(%err, "could not start lookup pool; resolving legs sequentially"))
        .ok()
}

fn summarize<P>(
    route: &Route,
    catalog: &LocationCatalog,
    provider: &P,
    options: &AggregateOptions,
    pool: Option<&ThreadPool>,
) -> RouteSummary
where
    P: DirectionsProvider + ?Sized,
{
    let pairs: Vec<(&str, &str)> = route.legs().collect();
    let lookup = |&(from, to): &(&str, &str)| LegResult {
        from: from.to_string(),
        to: to.to_string(),
        segment: lookup_leg(from, to, catalog, provider, options.retries),
    };

    let legs: Vec<LegResult> = match pool {
        Some(pool) => pool.install(|| pairs.par_iter().map(lookup).collect()),
        None => pairs.iter().map(lookup).collect(),
    };

    let (total_distance_meters, total_duration_seconds) = legs
        .iter()
        .filter_map(|leg| leg.segment)
        .fold((0.0, 0.0), |(distance, duration), segment| {
            (
                distance + segment.distance_meters,
                duration + segment.duration_seconds,
            )
        });

    debug!(
        vehicle = route.vehicle(),
        legs = legs.len(),
        total_distance_meters,
        total_duration_seconds,
        "route aggregated"
    );

    RouteSummary {
        vehicle: route.vehicle(),
        legs,
        total_distance_meters,
        total_duration_seconds,
    }
}

fn lookup_leg<P>(
    from: &str,
    to: &str,
    catalog: &LocationCatalog,
    provider: &P,
    retries: usize,
) -> Option<TravelSegment>
where
    P: DirectionsProvider + ?Sized,
{
    let (Some(origin), Some(destination)) = (catalog.coords(from), catalog.coords(to)) else {
        warn!(from, to, "location not found in catalog; leg counts as zero");
        return None;
    };

    let mut attempt = 0;
    loop {
        match provider.travel_segment(origin, destination) {
            Ok(segment) => return Some(segment),
            Err(err) if attempt < retries => {
                attempt += 1;
                debug!(%err, from, to, attempt, "directions lookup failed; retrying");
            }
            Err(err) => {
                warn!(%err, from, to, "directions lookup failed; leg counts as zero");
                return None;
            }
        }
    }
}
