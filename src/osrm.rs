//! OSRM HTTP adapter for driving directions.

use serde::Deserialize;

use crate::directions::{DirectionsError, Route};
use crate::geo::LatLng;
use crate::polyline::Polyline;
use crate::traits::DirectionsProvider;

/// Precision of OSRM's `geometries=polyline` encoding.
const GEOMETRY_PRECISION: u32 = 5;

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
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

    fn route_url(&self, from: LatLng, to: LatLng) -> String {
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=full&geometries=polyline",
            self.config.base_url, self.config.profile, from.lng, from.lat, to.lng, to.lat
        )
    }
}

impl DirectionsProvider for OsrmClient {
    fn route(&self, from: LatLng, to: LatLng) -> Result<Route, DirectionsError> {
        let url = self.route_url(from, to);
        tracing::debug!(%url, "requesting route");

        // OSRM reports routing failures as JSON bodies on 400 responses.
        let body: OsrmRouteResponse = self.client.get(url).send()?.json()?;
        route_from_response(body)
    }
}

fn route_from_response(body: OsrmRouteResponse) -> Result<Route, DirectionsError> {
    if body.code != "Ok" {
        return Err(DirectionsError::Status {
            code: body.code,
            message: body.message.unwrap_or_default(),
        });
    }

    let route = body
        .routes
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or(DirectionsError::NoRoute)?;

    Ok(Route {
        polyline: Polyline::decode(&route.geometry, GEOMETRY_PRECISION)?,
        distance_m: route.distance,
        duration_s: route.duration,
    })
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    message: Option<String>,
    routes: Option<Vec<OsrmRoute>>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: String,
    distance: f64,
    duration: f64,
}
