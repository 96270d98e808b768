//! The user's starting point and the raw IP-lookup shape it can come from.

use serde::{Deserialize, Serialize};

use crate::geo::LatLng;

/// Geocoder accuracy at which a result is pinned to a town.
pub const TOWN_PRECISION: u8 = 4;

/// A resolved user location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub point: LatLng,
    pub city: Option<String>,
    pub state: Option<String>,
    pub street: Option<String>,
    pub zip: Option<String>,
    /// Geocoder accuracy, 0-9. Absent for IP and default locations.
    pub precision: Option<u8>,
}

impl Location {
    pub fn at(point: LatLng) -> Self {
        Self {
            point,
            city: None,
            state: None,
            street: None,
            zip: None,
            precision: None,
        }
    }

    pub fn with_locality(mut self, city: impl Into<String>, state: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self.state = Some(state.into());
        self
    }

    /// Display text for the location, `"City, State"` when both are known.
    pub fn address_text(&self) -> String {
        match (&self.city, &self.state) {
            (Some(city), Some(state)) => format!("{}, {}", city, state),
            (Some(part), None) | (None, Some(part)) => part.clone(),
            (None, None) => format!("{:.4}, {:.4}", self.point.lat, self.point.lng),
        }
    }
}

/// What an IP geolocation service reports about the client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub city: Option<String>,
    pub region: Option<String>,
}

impl From<ClientLocation> for Location {
    fn from(client: ClientLocation) -> Self {
        Self {
            point: LatLng::new(client.latitude, client.longitude),
            city: client.city,
            state: client.region,
            street: None,
            zip: None,
            precision: None,
        }
    }
}
