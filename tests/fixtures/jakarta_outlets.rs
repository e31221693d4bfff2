//! Central/South Jakarta outlets used as a realistic catalog.
//!
//! Coordinates are approximate street-level positions; close enough for
//! OSRM Java data to snap them onto roads.

use outlet_router::catalog::{Location, LocationCatalog};

/// A named outlet with coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Outlet {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Outlet {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn location(&self) -> Location {
        Location::new(self.name, self.lat, self.lng)
    }
}

pub const DEPOT: Outlet = Outlet::new("Gudang Cikini", -6.1898, 106.8405);

pub const OUTLETS: &[Outlet] = &[
    Outlet::new("Toko Sinar Menteng", -6.1955, 106.8330),
    Outlet::new("Warung Bu Sri", -6.1862, 106.8451),
    Outlet::new("Minimarket Salemba", -6.1930, 106.8507),
    Outlet::new("Toko Berkah Matraman", -6.2033, 106.8577),
    Outlet::new("Kios Manggarai", -6.2101, 106.8502),
    Outlet::new("Toko Jaya Tebet", -6.2264, 106.8549),
    Outlet::new("Warung Kemang", -6.2607, 106.8141),
    Outlet::new("Toko Makmur Blok M", -6.2443, 106.7998),
    Outlet::new("Mart Senopati", -6.2335, 106.8094),
    Outlet::new("Kios Setiabudi", -6.2152, 106.8290),
    Outlet::new("Toko Senen Raya", -6.1757, 106.8425),
    Outlet::new("Warung Gambir", -6.1766, 106.8304),
    Outlet::new("Toko Harmoni", -6.1657, 106.8197),
    Outlet::new("Kios Sawah Besar", -6.1601, 106.8288),
    Outlet::new("Toko Kemayoran", -6.1628, 106.8553),
];

/// Depot plus every outlet.
pub fn catalog() -> LocationCatalog {
    LocationCatalog::new(
        std::iter::once(DEPOT)
            .chain(OUTLETS.iter().copied())
            .map(|outlet| outlet.location()),
    )
    .expect("fixture catalog is valid")
}

/// `D` at the origin with `A`, `B`, `C` one unit apart along the longitude axis.
pub fn line_catalog() -> LocationCatalog {
    LocationCatalog::new(vec![
        Location::new("D", 0.0, 0.0),
        Location::new("A", 0.0, 1.0),
        Location::new("B", 0.0, 2.0),
        Location::new("C", 0.0, 3.0),
    ])
    .expect("line catalog is valid")
}
