//! The set of outlets still waiting for a vehicle.

use std::collections::BTreeSet;

use crate::allocator::Route;
use crate::catalog::LocationCatalog;

/// Unvisited outlet names shared across one allocation run.
///
/// The allocator takes a working copy per vehicle and only mutates the pool
/// through [`UnvisitedPool::commit`], once per finalized route. The depot is
/// never removed by a commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnvisitedPool {
    names: BTreeSet<String>,
}

impl UnvisitedPool {
    /// Every catalog name, depot included.
    pub fn from_catalog(catalog: &LocationCatalog) -> Self {
        Self {
            names: catalog.names().map(str::to_string).collect(),
        }
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Rewrites entries to the catalog's spelling, merging entries that
    /// differ only in case. Entries the catalog does not know are kept as
    /// given.
    pub fn canonicalize(&mut self, catalog: &LocationCatalog) {
        let names = std::mem::take(&mut self.names);
        self.names = names
            .into_iter()
            .map(|name| match catalog.canonical_name(&name) {
                Some(canonical) => canonical.to_string(),
                None => name,
            })
            .collect();
    }

    /// Snapshot for one vehicle's turn.
    pub fn working_copy(&self) -> BTreeSet<String> {
        self.names.clone()
    }

    /// Removes every stop of a finalized route. Returns how many were removed.
    pub fn commit(&mut self, route: &Route) -> usize {
        route
            .stops()
            .iter()
            .filter(|stop| self.names.remove(stop.as_str()))
            .count()
    }
}
