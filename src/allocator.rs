//! Route allocation across a fixed fleet.
//!
//! Each vehicle in turn takes a snapshot of the unvisited pool, grows a
//! nearest-neighbor tour from the depot until it holds
//! `max_outlets_per_route` stops or the snapshot runs dry, and then commits
//! its stops back to the pool. Vehicles that find the pool empty get the
//! minimal `[depot, depot]` route.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::LocationCatalog;
use crate::error::ConfigError;
use crate::pool::UnvisitedPool;
use crate::tour::TourBuilder;

/// The three run parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocateOptions {
    /// Depot name, matched case-insensitively against the catalog.
    pub depot: String,
    pub max_outlets_per_route: usize,
    pub total_routes: usize,
}

impl AllocateOptions {
    pub fn new(depot: impl Into<String>, max_outlets_per_route: usize, total_routes: usize) -> Self {
        Self {
            depot: depot.into(),
            max_outlets_per_route,
            total_routes,
        }
    }

    /// Pre-flight checks. Returns the depot's name as stored in the catalog.
    pub fn validate<'c>(&self, catalog: &'c LocationCatalog) -> Result<&'c str, ConfigError> {
        if self.max_outlets_per_route == 0 {
            return Err(ConfigError::NoCapacity);
        }
        if self.total_routes == 0 {
            return Err(ConfigError::NoRoutes);
        }
        if catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        catalog
            .canonical_name(&self.depot)
            .ok_or_else(|| ConfigError::UnknownDepot(self.depot.clone()))
    }
}

/// One vehicle's closed visitation sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    vehicle: usize,
    sequence: Vec<String>,
}

impl Route {
    /// Returns `None` unless `sequence` leaves from and returns to the same
    /// point, i.e. has at least two entries with equal first and last.
    pub fn new(vehicle: usize, sequence: Vec<String>) -> Option<Self> {
        if sequence.len() < 2 || sequence.first() != sequence.last() {
            return None;
        }
        Some(Self { vehicle, sequence })
    }

    /// Zero-based vehicle index.
    pub fn vehicle(&self) -> usize {
        self.vehicle
    }

    /// Full sequence including the depot at both ends.
    pub fn sequence(&self) -> &[String] {
        &self.sequence
    }

    pub fn depot(&self) -> &str {
        &self.sequence[0]
    }

    /// Outlets between leaving and returning to the depot.
    pub fn stops(&self) -> &[String] {
        &self.sequence[1..self.sequence.len() - 1]
    }

    /// Consecutive `(from, to)` pairs in visiting order.
    pub fn legs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sequence
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }
}

/// Routes in vehicle order plus whatever no vehicle had room for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSet {
    pub routes: Vec<Route>,
    pub unassigned: Vec<String>,
}

impl RouteSet {
    pub fn assigned_count(&self) -> usize {
        self.routes.iter().map(|route| route.stops().len()).sum()
    }
}

/// Allocates every catalog outlet to `total_routes` vehicles.
pub fn allocate(
    depot: &str,
    max_outlets_per_route: usize,
    total_routes: usize,
    catalog: &LocationCatalog,
) -> Result<RouteSet, ConfigError> {
    let options = AllocateOptions::new(depot, max_outlets_per_route, total_routes);
    let mut pool = UnvisitedPool::from_catalog(catalog);
    allocate_from_pool(&options, catalog, &mut pool)
}

/// Allocates from a caller-supplied pool, committing assigned outlets to it.
///
/// Pool entries are first rewritten to their catalog names, so `"a"` and
/// `"A"` count as one outlet. On return `pool` holds the unassigned outlets
/// (and the depot, if it was there to begin with).
pub fn allocate_from_pool(
    options: &AllocateOptions,
    catalog: &LocationCatalog,
    pool: &mut UnvisitedPool,
) -> Result<RouteSet, ConfigError> {
    let depot = options.validate(catalog)?;
    let capacity = options.max_outlets_per_route;
    pool.canonicalize(catalog);

    info!(
        depot,
        outlets = pool.len(),
        max_outlets_per_route = capacity,
        total_routes = options.total_routes,
        "allocating routes"
    );

    let mut routes = Vec::with_capacity(options.total_routes);
    for vehicle in 0..options.total_routes {
        let mut working = pool.working_copy();
        if !working.remove(depot) {
            warn!(depot, vehicle, "depot not in unvisited pool");
        }

        let mut builder = TourBuilder::new(depot, catalog);
        while !working.is_empty() && builder.stops() < capacity {
            if builder.extend(&mut working, capacity - builder.stops()) == 0 {
                break;
            }
        }

        let route = Route {
            vehicle,
            sequence: builder.finish(),
        };
        let committed = pool.commit(&route);
        debug!(vehicle, stops = committed, remaining = pool.len(), "route finalized");
        routes.push(route);
    }

    let unassigned: Vec<String> = pool
        .names()
        .filter(|name| *name != depot)
        .map(str::to_string)
        .collect();
    if !unassigned.is_empty() {
        info!(count = unassigned.len(), "outlets left unassigned after all routes");
    }

    Ok(RouteSet { routes, unassigned })
}
