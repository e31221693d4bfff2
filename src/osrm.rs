//! OSRM HTTP adapter for point-to-point directions.

use serde::Deserialize;
use tracing::debug;

use crate::error::DirectionsError;
use crate::traits::{Coordinate, DirectionsProvider, TravelSegment};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    /// Per-request timeout; a timed-out request counts as a failed lookup.
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// OSRM takes `lng,lat` pairs.
    fn route_url(&self, from: Coordinate, to: Coordinate) -> String {
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=false",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            from.1,
            from.0,
            to.1,
            to.0
        )
    }
}

impl DirectionsProvider for OsrmClient {
    fn travel_segment(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<TravelSegment, DirectionsError> {
        let url = self.route_url(from, to);
        debug!(%url, "requesting OSRM route");

        let body = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmRouteResponse>())?;

        body.into_segment()
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
}

impl OsrmRouteResponse {
    fn into_segment(self) -> Result<TravelSegment, DirectionsError> {
        if self.code != "Ok" {
            let detail = match self.message {
                Some(message) => format!("{}: {}", self.code, message),
                None => self.code,
            };
            return Err(DirectionsError::NoRoute(detail));
        }

        self.routes
            .into_iter()
            .next()
            .map(|route| TravelSegment::new(route.distance, route.duration))
            .ok_or_else(|| DirectionsError::NoRoute("empty route list".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_url_swaps_to_lng_lat() {
        let client = OsrmClient::new(OsrmConfig {
            base_url: "http://osrm.local:5000/".to_string(),
            ..OsrmConfig::default()
        })
        .unwrap();
        let url = client.route_url((-6.2, 106.8), (-6.25, 106.85));
        assert_eq!(
            url,
            "http://osrm.local:5000/route/v1/car/106.800000,-6.200000;106.850000,-6.250000?overview=false"
        );
    }

    #[test]
    fn test_ok_response_takes_first_route() {
        let body: OsrmRouteResponse = serde_json::from_str(
            r#"{"code":"Ok","routes":[{"distance":1520.4,"duration":210.7},{"distance":9.0,"duration":9.0}]}"#,
        )
        .unwrap();
        let segment = body.into_segment().unwrap();
        assert_eq!(segment, TravelSegment::new(1520.4, 210.7));
    }

    #[test]
    fn test_no_route_code_is_error() {
        let body: OsrmRouteResponse = serde_json::from_str(
            r#"{"code":"NoRoute","message":"Impossible route between points"}"#,
        )
        .unwrap();
        match body.into_segment() {
            Err(DirectionsError::NoRoute(detail)) => assert!(detail.starts_with("NoRoute")),
            other => panic!("expected NoRoute, got {:?}", other),
        }
    }

    #[test]
    fn test_ok_without_routes_is_error() {
        let body: OsrmRouteResponse = serde_json::from_str(r#"{"code":"Ok","routes":[]}"#).unwrap();
        assert!(matches!(body.into_segment(), Err(DirectionsError::NoRoute(_))));
    }
}
