//! Test fixtures for bar-locator.
//!
//! Provides:
//! - Bars around Falls Church, VA
//! - A builder for venue records
//! - Mock capabilities that record what the session asked of them
//! - OSRM dataset preparation for the container-backed test

#![allow(dead_code)]

pub mod falls_church_bars;
pub mod osrm_dataset;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use bar_locator::directions::{DirectionsError, Route};
use bar_locator::geo::LatLng;
use bar_locator::geocode::{GeocodeError, GeocodeResponse};
use bar_locator::location::ClientLocation;
use bar_locator::polyline::Polyline;
use bar_locator::report::ErrorReport;
use bar_locator::store::StoreError;
use bar_locator::traits::{
    DirectionsProvider, ErrorReporter, Geocoder, IpLocator, LocationStore, SearchRecorder, VenueSource,
};
use bar_locator::venue::{SearchError, VenueRecord};

pub use falls_church_bars::*;

// ============================================================================
// Venue records
// ============================================================================

/// Builder for venue records with sensible defaults.
#[derive(Clone, Debug)]
pub struct TestBar {
    record: VenueRecord,
}

impl TestBar {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            record: VenueRecord {
                lat: 0.0,
                lng: 0.0,
                name: name.to_string(),
                street: String::new(),
                city: String::new(),
                state: Some("VA".to_string()),
                phone: None,
                url: None,
                restrictions: None,
                indoor_smoking: false,
                id: Some(id.to_string()),
            },
        }
    }

    pub fn at(mut self, lat: f64, lng: f64) -> Self {
        self.record.lat = lat;
        self.record.lng = lng;
        self
    }

    pub fn address(mut self, street: &str, city: &str) -> Self {
        self.record.street = street.to_string();
        self.record.city = city.to_string();
        self
    }

    pub fn indoor(mut self) -> Self {
        self.record.indoor_smoking = true;
        self
    }

    pub fn phone(mut self, phone: &str) -> Self {
        self.record.phone = Some(phone.to_string());
        self
    }

    pub fn build(self) -> VenueRecord {
        self.record
    }
}

impl From<&Bar> for TestBar {
    fn from(bar: &Bar) -> Self {
        let builder = TestBar::new(bar.id, bar.name)
            .at(bar.lat, bar.lng)
            .address(bar.street, bar.city);
        if bar.indoor_smoking { builder.indoor() } else { builder }
    }
}

pub fn records(bars: &[Bar]) -> Vec<VenueRecord> {
    bars.iter().map(|bar| TestBar::from(bar).build()).collect()
}

// ============================================================================
// Geocoding
// ============================================================================

/// Geocoder with canned placemarks; unknown addresses answer status 602.
#[derive(Clone, Default)]
pub struct MockGeocoder {
    placemarks: HashMap<String, String>,
    lookups: Rc<RefCell<Vec<String>>>,
}

impl MockGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `address` with a street-accurate US placemark.
    pub fn with_place(mut self, address: &str, point: (f64, f64), city: &str, state: &str) -> Self {
        self.placemarks
            .insert(address.to_string(), placemark_json(point, city, state, "USA", 8));
        self
    }

    pub fn with_body(mut self, address: &str, body: &str) -> Self {
        self.placemarks.insert(address.to_string(), body.to_string());
        self
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.borrow().clone()
    }
}

impl Geocoder for MockGeocoder {
    fn geocode(&self, address: &str) -> Result<GeocodeResponse, GeocodeError> {
        self.lookups.borrow_mut().push(address.to_string());
        let body = self
            .placemarks
            .get(address)
            .map(String::as_str)
            .unwrap_or(r#"{"Status": {"code": 602}}"#);
        Ok(serde_json::from_str(body)?)
    }
}

pub fn placemark_json(point: (f64, f64), city: &str, state: &str, country: &str, accuracy: u8) -> String {
    format!(
        r#"{{
            "Status": {{"code": 200}},
            "Placemark": [{{
                "AddressDetails": {{
                    "Accuracy": {accuracy},
                    "Country": {{
                        "CountryName": "{country}",
                        "AdministrativeArea": {{
                            "AdministrativeAreaName": "{state}",
                            "Locality": {{"LocalityName": "{city}"}}
                        }}
                    }}
                }},
                "Point": {{"coordinates": [{lng}, {lat}, 0]}}
            }}]
        }}"#,
        lat = point.0,
        lng = point.1,
    )
}

pub struct MockIp(pub Option<ClientLocation>);

impl IpLocator for MockIp {
    fn client_location(&self) -> Option<ClientLocation> {
        self.0.clone()
    }
}

/// Location store whose contents the test can still read once boxed.
#[derive(Clone, Default)]
pub struct SharedStore {
    point: Rc<Cell<Option<LatLng>>>,
}

impl SharedStore {
    pub fn holding(point: LatLng) -> Self {
        let store = Self::default();
        store.point.set(Some(point));
        store
    }

    pub fn point(&self) -> Option<LatLng> {
        self.point.get()
    }
}

impl LocationStore for SharedStore {
    fn load(&self) -> Result<Option<LatLng>, StoreError> {
        Ok(self.point.get())
    }

    fn store(&mut self, point: LatLng) -> Result<(), StoreError> {
        self.point.set(Some(point));
        Ok(())
    }
}

// ============================================================================
// Venue search
// ============================================================================

#[derive(Clone, Default)]
pub struct MockVenues {
    records: Rc<RefCell<Vec<VenueRecord>>>,
    fail: bool,
    searched: Rc<RefCell<Vec<LatLng>>>,
}

impl MockVenues {
    pub fn new(records: Vec<VenueRecord>) -> Self {
        Self {
            records: Rc::new(RefCell::new(records)),
            ..Self::default()
        }
    }

    /// Changes what later searches return, as if the neighborhood changed.
    pub fn replace(&self, records: Vec<VenueRecord>) {
        *self.records.borrow_mut() = records;
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn searched(&self) -> Vec<LatLng> {
        self.searched.borrow().clone()
    }
}

impl VenueSource for MockVenues {
    fn nearby(&self, point: LatLng) -> Result<Vec<VenueRecord>, SearchError> {
        self.searched.borrow_mut().push(point);
        if self.fail {
            return Err(SearchError::Decode(
                serde_json::from_str::<Vec<VenueRecord>>("<b>Fatal error</b>").unwrap_err(),
            ));
        }
        Ok(self.records.borrow().clone())
    }
}

// ============================================================================
// Directions
// ============================================================================

/// Straight-line routes at a fixed 50 km/h.
#[derive(Clone, Default)]
pub struct MockDirections {
    fail: bool,
    calls: Rc<Cell<usize>>,
}

impl MockDirections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl DirectionsProvider for MockDirections {
    fn route(&self, from: LatLng, to: LatLng) -> Result<Route, DirectionsError> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(DirectionsError::Status {
                code: "NoSegment".to_string(),
                message: "Could not find a matching segment for any coordinate.".to_string(),
            });
        }
        let distance_m = from.distance_to(&to);
        Ok(Route {
            polyline: Polyline::new(vec![from, to]),
            distance_m,
            duration_s: distance_m / (50_000.0 / 3600.0),
        })
    }
}

// ============================================================================
// Reporting
// ============================================================================

#[derive(Clone, Default)]
pub struct RecordingSite {
    reports: Rc<RefCell<Vec<ErrorReport>>>,
    searches: Rc<RefCell<Vec<String>>>,
}

impl RecordingSite {
    pub fn reports(&self) -> Vec<ErrorReport> {
        self.reports.borrow().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.reports.borrow().iter().map(|r| r.message.clone()).collect()
    }

    pub fn searches(&self) -> Vec<String> {
        self.searches.borrow().clone()
    }
}

impl ErrorReporter for RecordingSite {
    fn report(&self, report: &ErrorReport) {
        self.reports.borrow_mut().push(report.clone());
    }
}

impl SearchRecorder for RecordingSite {
    fn record_search(&self, query: &str) {
        self.searches.borrow_mut().push(query.to_string());
    }
}
