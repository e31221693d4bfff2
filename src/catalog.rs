//! Read-only catalog of named outlet locations.
//!
//! Names are unique ignoring case. Every lookup goes through the lowercase
//! key, but routes carry the name exactly as it was loaded so reports read
//! the way the input did.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CatalogError;
use crate::traits::Coordinate;

/// A named outlet (or depot) with its coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
        }
    }

    pub fn coords(&self) -> Coordinate {
        (self.lat, self.lng)
    }
}

/// Case-insensitive mapping from outlet name to [`Location`].
#[derive(Debug, Clone, Default)]
pub struct LocationCatalog {
    entries: BTreeMap<String, Location>,
}

/// Lookup key; names compare equal when their keys do.
pub(crate) fn key_of(name: &str) -> String {
    name.to_lowercase()
}

impl LocationCatalog {
    /// Builds a catalog, rejecting duplicate names and non-finite or
    /// out-of-range coordinates.
    pub fn new(locations: impl IntoIterator<Item = Location>) -> Result<Self, CatalogError> {
        let mut entries = BTreeMap::new();
        for location in locations {
            let valid = location.lat.is_finite()
                && location.lng.is_finite()
                && (-90.0..=90.0).contains(&location.lat)
                && (-180.0..=180.0).contains(&location.lng);
            if !valid {
                return Err(CatalogError::InvalidCoordinate {
                    name: location.name,
                    lat: location.lat,
                    lng: location.lng,
                });
            }

            let key = key_of(&location.name);
            if entries.contains_key(&key) {
                return Err(CatalogError::DuplicateName(location.name));
            }
            entries.insert(key, location);
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&Location> {
        self.entries.get(&key_of(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&key_of(name))
    }

    pub fn coords(&self, name: &str) -> Option<Coordinate> {
        self.get(name).map(Location::coords)
    }

    /// Name as stored in the catalog for a case-insensitive query.
    pub fn canonical_name(&self, name: &str) -> Option<&str> {
        self.get(name).map(|location| location.name.as_str())
    }

    /// Catalog names, as loaded.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|location| location.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.entries.values()
    }

    /// Loads a catalog from a CSV file. See [`LocationCatalog::from_csv_reader`].
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let file = File::open(path.as_ref())?;
        Self::from_csv_reader(file)
    }

    /// Loads a catalog from CSV with a header row.
    ///
    /// Header matching ignores case and surrounding whitespace. Accepted
    /// columns are `name`, `outlet` or `nama outlet` for the name,
    /// `lat`/`latitude`, and `lng`/`lon`/`long`/`longitude`. Rows with a
    /// blank name are skipped.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let headers = reader.headers()?.clone();

        let name_col = find_column(&headers, &["name", "outlet", "nama outlet"], "name")?;
        let lat_col = find_column(&headers, &["lat", "latitude"], "latitude")?;
        let lng_col = find_column(&headers, &["lng", "lon", "long", "longitude"], "longitude")?;

        let mut locations = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            // Header is line 1.
            let row = index + 2;

            let name = record.get(name_col).unwrap_or_default();
            if name.is_empty() {
                warn!(row, "skipping catalog row with blank name");
                continue;
            }

            let lat = parse_number(record.get(lat_col).unwrap_or_default(), row)?;
            let lng = parse_number(record.get(lng_col).unwrap_or_default(), row)?;
            locations.push(Location::new(name, lat, lng));
        }

        let catalog = Self::new(locations)?;
        debug!(locations = catalog.len(), "loaded location catalog");
        Ok(catalog)
    }
}

fn find_column(
    headers: &csv::StringRecord,
    aliases: &[&str],
    label: &'static str,
) -> Result<usize, CatalogError> {
    headers
        .iter()
        .position(|header| aliases.contains(&header.trim().to_lowercase().as_str()))
        .ok_or(CatalogError::MissingColumn(label))
}

fn parse_number(value: &str, row: usize) -> Result<f64, CatalogError> {
    value.parse::<f64>().map_err(|_| CatalogError::InvalidNumber {
        row,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case() {
        let catalog = LocationCatalog::new(vec![Location::new("Toko Maju", -6.2, 106.8)]).unwrap();
        assert_eq!(catalog.coords("toko maju"), Some((-6.2, 106.8)));
        assert_eq!(catalog.coords("TOKO MAJU"), Some((-6.2, 106.8)));
        assert_eq!(catalog.canonical_name("tOKO mAJU"), Some("Toko Maju"));
        assert!(catalog.get("Toko Jaya").is_none());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = LocationCatalog::new(vec![
            Location::new("Depot", 0.0, 0.0),
            Location::new("DEPOT", 1.0, 1.0),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateName(name)) if name == "DEPOT"));
    }

    #[test]
    fn test_invalid_coordinate_rejected() {
        let result = LocationCatalog::new(vec![Location::new("Nowhere", f64::NAN, 0.0)]);
        assert!(matches!(result, Err(CatalogError::InvalidCoordinate { .. })));

        let result = LocationCatalog::new(vec![Location::new("Too far north", 91.0, 0.0)]);
        assert!(matches!(result, Err(CatalogError::InvalidCoordinate { .. })));
    }

    #[test]
    fn test_names_are_sorted_by_key() {
        let catalog = LocationCatalog::new(vec![
            Location::new("beta", 0.0, 1.0),
            Location::new("Alpha", 0.0, 2.0),
            Location::new("gamma", 0.0, 3.0),
        ])
        .unwrap();
        let names = catalog.names().collect::<Vec<_>>();
        assert_eq!(names, vec!["Alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_csv_with_long_headers() {
        let data = "NAMA OUTLET,Latitude,Longitude\n\
                    Depot,-6.200,106.816\n\
                    Toko Sinar,-6.210,106.820\n\
                    ,-6.0,106.0\n";
        let catalog = LocationCatalog::from_csv_reader(data.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.coords("toko sinar"), Some((-6.210, 106.820)));
    }

    #[test]
    fn test_csv_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"Outlet,Lat,Lon\nDepot,-6.2,106.8\n").unwrap();
        let catalog = LocationCatalog::from_csv_path(file.path()).unwrap();
        assert_eq!(catalog.canonical_name("depot"), Some("Depot"));
    }

    #[test]
    fn test_csv_short_headers() {
        let data = "name,lat,lng\nA,0,1\nB,0,2\n";
        let catalog = LocationCatalog::from_csv_reader(data.as_bytes()).unwrap();
        assert_eq!(catalog.coords("b"), Some((0.0, 2.0)));
    }

    #[test]
    fn test_csv_missing_column() {
        let data = "name,lat\nA,0\n";
        let result = LocationCatalog::from_csv_reader(data.as_bytes());
        assert!(matches!(result, Err(CatalogError::MissingColumn("longitude"))));
    }

    #[test]
    fn test_csv_bad_number_reports_row() {
        let data = "name,lat,lng\nA,0,1\nB,north,2\n";
        let result = LocationCatalog::from_csv_reader(data.as_bytes());
        match result {
            Err(CatalogError::InvalidNumber { row, value }) => {
                assert_eq!(row, 3);
                assert_eq!(value, "north");
            }
            other => panic!("expected InvalidNumber, got {:?}", other),
        }
    }
}
