//! In-memory capabilities for unit tests.
//!
//! Doubles share their state through `Rc`, so a clone handed to a session
//! still reports back to the test.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::directions::{DirectionsError, Route};
use crate::geo::LatLng;
use crate::geocode::{GeocodeError, GeocodeResponse};
use crate::location::ClientLocation;
use crate::polyline::Polyline;
use crate::report::ErrorReport;
use crate::traits::{DirectionsProvider, ErrorReporter, Geocoder, IpLocator, SearchRecorder, VenueSource};
use crate::venue::{SearchError, VenueRecord};

#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    reports: Rc<RefCell<Vec<ErrorReport>>>,
    searches: Rc<RefCell<Vec<String>>>,
}

impl RecordingReporter {
    pub fn reports(&self) -> Vec<ErrorReport> {
        self.reports.borrow().clone()
    }

    pub fn searches(&self) -> Vec<String> {
        self.searches.borrow().clone()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, report: &ErrorReport) {
        self.reports.borrow_mut().push(report.clone());
    }
}

impl SearchRecorder for RecordingReporter {
    fn record_search(&self, query: &str) {
        self.searches.borrow_mut().push(query.to_string());
    }
}

/// Answers every lookup with the same JSON body.
#[derive(Clone)]
pub struct StaticGeocoder {
    body: String,
    calls: Rc<Cell<usize>>,
}

impl StaticGeocoder {
    pub fn json(body: &str) -> Self {
        Self {
            body: body.to_string(),
            calls: Rc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Geocoder for StaticGeocoder {
    fn geocode(&self, _address: &str) -> Result<GeocodeResponse, GeocodeError> {
        self.calls.set(self.calls.get() + 1);
        Ok(serde_json::from_str(&self.body)?)
    }
}

pub struct FixedIp(pub Option<ClientLocation>);

impl IpLocator for FixedIp {
    fn client_location(&self) -> Option<ClientLocation> {
        self.0.clone()
    }
}

/// The same venue list for every search.
pub struct StaticVenues(pub Vec<VenueRecord>);

impl VenueSource for StaticVenues {
    fn nearby(&self, _point: LatLng) -> Result<Vec<VenueRecord>, SearchError> {
        Ok(self.0.clone())
    }
}

pub fn venue_record(id: &str, name: &str, lat: f64, lng: f64, indoor_smoking: bool) -> VenueRecord {
    VenueRecord {
        lat,
        lng,
        name: name.to_string(),
        street: format!("{id} Main St"),
        city: "Falls Church".to_string(),
        state: Some("VA".to_string()),
        phone: None,
        url: None,
        restrictions: None,
        indoor_smoking,
        id: Some(id.to_string()),
    }
}

/// Straight-line routes, or a failure when `fail` is set.
#[derive(Clone, Default)]
pub struct StraightLine {
    pub fail: bool,
    calls: Rc<Cell<usize>>,
}

impl StraightLine {
    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: Rc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl DirectionsProvider for StraightLine {
    fn route(&self, from: LatLng, to: LatLng) -> Result<Route, DirectionsError> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(DirectionsError::NoRoute);
        }
        Ok(Route {
            polyline: Polyline::new(vec![from, to]),
            distance_m: from.distance_to(&to),
            duration_s: 0.0,
        })
    }
}
