//! Greedy nearest-neighbor tour construction.
//!
//! A tour starts at a fixed point, repeatedly moves to the closest remaining
//! candidate by [`straight_line_distance`], and closes back to the start.
//! Distance ties go to the lexicographically smaller name so the same inputs
//! always give the same tour.

use std::collections::{BTreeSet, HashSet};

use tracing::warn;

use crate::catalog::{key_of, LocationCatalog};
use crate::geometry::straight_line_distance;

/// An open tour that can be extended several times before it is closed.
#[derive(Debug, Clone)]
pub struct TourBuilder<'a> {
    catalog: &'a LocationCatalog,
    start: String,
    tour: Vec<String>,
    /// Catalog keys of every point in `tour`.
    placed: HashSet<String>,
}

impl<'a> TourBuilder<'a> {
    pub fn new(start: impl Into<String>, catalog: &'a LocationCatalog) -> Self {
        let start = start.into();
        Self {
            catalog,
            tour: vec![start.clone()],
            placed: HashSet::from([key_of(&start)]),
            start,
        }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    /// Last point appended; the next extension continues from here.
    pub fn current(&self) -> &str {
        self.tour.last().map(String::as_str).unwrap_or(&self.start)
    }

    /// Stops placed so far, not counting the start.
    pub fn stops(&self) -> usize {
        self.tour.len() - 1
    }

    /// Appends up to `remaining_capacity` nearest-neighbor stops drawn from
    /// `pool`, removing each one from `pool` as it is placed.
    ///
    /// Names match the catalog case-insensitively: candidates already in the
    /// tour under any spelling are dropped from `pool` without being placed
    /// again, and placed stops are recorded under their catalog spelling.
    /// Candidates missing from the catalog are dropped with a warning.
    /// Returns the number of stops added.
    pub fn extend(&mut self, pool: &mut BTreeSet<String>, remaining_capacity: usize) -> usize {
        pool.retain(|name| !self.placed.contains(&key_of(name)));

        let mut added = 0;
        while added < remaining_capacity && !pool.is_empty() {
            let Some(from) = self.catalog.coords(self.current()) else {
                warn!(point = %self.current(), "tour point not in catalog; cannot extend");
                break;
            };

            let mut nearest: Option<(&String, f64)> = None;
            let mut unknown = Vec::new();
            for name in pool.iter() {
                let Some(to) = self.catalog.coords(name) else {
                    unknown.push(name.clone());
                    continue;
                };
                let dist = straight_line_distance(from, to);
                // Ascending iteration keeps the first of equal distances.
                if nearest.is_none_or(|(_, best)| dist < best) {
                    nearest = Some((name, dist));
                }
            }
            let next = nearest.map(|(name, _)| name.clone());

            for name in unknown {
                warn!(outlet = %name, "outlet not in catalog; leaving it unrouted");
                pool.remove(&name);
            }

            let Some(next) = next else {
                break;
            };
            let key = key_of(&next);
            pool.retain(|name| key_of(name) != key);
            let stop = self.catalog.canonical_name(&next).unwrap_or(&next).to_string();
            self.placed.insert(key);
            self.tour.push(stop);
            added += 1;
        }

        added
    }

    /// Closes the tour back to its start.
    pub fn finish(mut self) -> Vec<String> {
        self.tour.push(self.start);
        self.tour
    }
}

/// Builds a closed nearest-neighbor tour of at most `max_length` stops.
///
/// The result starts and ends with `start` and has at most `max_length + 2`
/// entries. An empty candidate set yields `[start, start]`.
pub fn build_tour(
    start: &str,
    mut candidates: BTreeSet<String>,
    max_length: usize,
    catalog: &LocationCatalog,
) -> Vec<String> {
    let mut builder = TourBuilder::new(start, catalog);
    builder.extend(&mut candidates, max_length);
    builder.finish()
}
