//! Address geocoding: the provider's placemark schema, the acceptance
//! filter, and an HTTP adapter.

use serde::Deserialize;
use thiserror::Error;

use crate::geo::LatLng;
use crate::location::{Location, TOWN_PRECISION};
use crate::report::ErrorReport;
use crate::traits::{ErrorReporter, Geocoder};

/// Provider status code for a successful lookup.
pub const STATUS_OK: u16 = 200;

/// Countries whose addresses the site understands.
const SUPPORTED_COUNTRIES: &[&str] = &["USA", "Canada"];

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoder request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("geocoder response was not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("geocoder returned status {0}")]
    Status(u16),
    #[error("geocoder returned no placemark")]
    NoPlacemark,
    #[error("placemark point has {0} coordinates")]
    MalformedPoint(usize),
    #[error("placemark has no locality")]
    MissingLocality,
}

impl GeocodeError {
    /// Status value sent along with error reports.
    fn status(&self) -> String {
        match self {
            GeocodeError::Status(code) => code.to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeocodeResponse {
    pub status: Option<GeocodeStatus>,
    #[serde(default)]
    pub placemark: Vec<Placemark>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeStatus {
    pub code: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Placemark {
    pub point: PlacemarkPoint,
    pub address_details: AddressDetails,
}

/// `[lng, lat, altitude]`, the provider's KML ordering.
#[derive(Debug, Clone, Deserialize)]
pub struct PlacemarkPoint {
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddressDetails {
    pub accuracy: u8,
    pub country: Option<Country>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Country {
    pub country_name: Option<String>,
    pub administrative_area: Option<AdministrativeArea>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AdministrativeArea {
    pub administrative_area_name: Option<String>,
    pub sub_administrative_area: Option<SubAdministrativeArea>,
    pub locality: Option<Locality>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubAdministrativeArea {
    pub locality: Option<Locality>,
}

/// A locality, or the dependent locality nested inside one.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Locality {
    #[serde(alias = "DependentLocalityName")]
    pub locality_name: Option<String>,
    pub dependent_locality: Option<Box<Locality>>,
    pub thoroughfare: Option<Thoroughfare>,
    pub postal_code: Option<PostalCode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Thoroughfare {
    pub thoroughfare_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PostalCode {
    pub postal_code_number: Option<String>,
}

/// Geocodes `address` into a town-precise USA/Canada location.
///
/// Every failure mode collapses to `None`. Provider and decoding failures
/// are reported; imprecise and foreign results are silently rejected.
pub fn geocode<G, R>(geocoder: &G, address: &str, reporter: &R) -> Option<Location>
where
    G: Geocoder + ?Sized,
    R: ErrorReporter + ?Sized,
{
    if address.trim().is_empty() {
        return None;
    }

    let result = geocoder
        .geocode(address)
        .and_then(|response| placemark_location(&response));

    match result {
        Ok(Some(location)) => {
            tracing::debug!(address, city = ?location.city, state = ?location.state, "geocoded");
            Some(location)
        }
        Ok(None) => {
            tracing::info!(address, "geocode result rejected");
            None
        }
        Err(err) => {
            tracing::warn!(address, error = %err, "geocoding failed");
            reporter.report(
                &ErrorReport::new("Geocoding failed")
                    .with("status", err.status())
                    .with("search", address),
            );
            None
        }
    }
}

/// Interprets the first placemark of a response.
///
/// `Ok(None)` means the result was understood but is below town precision
/// or outside the supported countries.
pub fn placemark_location(response: &GeocodeResponse) -> Result<Option<Location>, GeocodeError> {
    if let Some(status) = &response.status {
        if status.code != STATUS_OK {
            return Err(GeocodeError::Status(status.code));
        }
    }

    let placemark = response.placemark.first().ok_or(GeocodeError::NoPlacemark)?;
    let point = match placemark.point.coordinates.as_slice() {
        [lng, lat, ..] => LatLng::new(*lat, *lng),
        other => return Err(GeocodeError::MalformedPoint(other.len())),
    };

    let details = &placemark.address_details;
    if details.accuracy < TOWN_PRECISION {
        return Ok(None);
    }

    let Some(country) = &details.country else {
        return Ok(None);
    };
    let supported = country
        .country_name
        .as_deref()
        .is_some_and(|name| SUPPORTED_COUNTRIES.contains(&name));
    if !supported {
        return Ok(None);
    }

    let area = country
        .administrative_area
        .as_ref()
        .ok_or(GeocodeError::MissingLocality)?;

    // Some responses put the locality straight under the administrative area.
    let locality = area
        .sub_administrative_area
        .as_ref()
        .and_then(|sub| sub.locality.as_ref())
        .or(area.locality.as_ref())
        .ok_or(GeocodeError::MissingLocality)?;

    let detail = locality.dependent_locality.as_deref().unwrap_or(locality);

    Ok(Some(Location {
        point,
        city: locality.locality_name.clone(),
        state: area.administrative_area_name.clone(),
        street: detail
            .thoroughfare
            .as_ref()
            .and_then(|t| t.thoroughfare_name.clone()),
        zip: detail
            .postal_code
            .as_ref()
            .and_then(|p| p.postal_code_number.clone()),
        precision: Some(details.accuracy),
    }))
}

#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://maps.google.com/maps/geo".to_string(),
            api_key: None,
            timeout_secs: 10,
        }
    }
}

/// Geocoder backed by an HTTP endpoint speaking the placemark schema.
#[derive(Debug, Clone)]
pub struct HttpGeocoder {
    config: GeocoderConfig,
    client: reqwest::blocking::Client,
}

impl HttpGeocoder {
    pub fn new(config: GeocoderConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl Geocoder for HttpGeocoder {
    fn geocode(&self, address: &str) -> Result<GeocodeResponse, GeocodeError> {
        let mut params = vec![("q", address), ("output", "json"), ("sensor", "false")];
        if let Some(key) = &self.config.api_key {
            params.push(("key", key.as_str()));
        }

        let text = self
            .client
            .get(&self.config.base_url)
            .query(&params)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())?;

        Ok(serde_json::from_str(&text)?)
    }
}
