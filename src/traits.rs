//! External capabilities the locator depends on.
//!
//! Each trait is one outside collaborator: a map widget, a geocoder, a
//! directions service, the site's own endpoints, and client-side storage.
//! Concrete adapters live in their own modules; tests supply in-memory ones.

use crate::directions::{DirectionsError, Route};
use crate::geo::{Bounds, LatLng};
use crate::geocode::{GeocodeError, GeocodeResponse};
use crate::location::ClientLocation;
use crate::map::Overlay;
use crate::popup::Popup;
use crate::report::ErrorReport;
use crate::store::StoreError;
use crate::venue::{SearchError, VenueRecord};

/// Converts free text into the provider's structured placemark response.
pub trait Geocoder {
    fn geocode(&self, address: &str) -> Result<GeocodeResponse, GeocodeError>;
}

/// Best-effort client location from the caller's IP address.
///
/// Returns `None` when the capability is unavailable.
pub trait IpLocator {
    fn client_location(&self) -> Option<ClientLocation>;
}

/// Persists the last resolved location between visits.
pub trait LocationStore {
    fn load(&self) -> Result<Option<LatLng>, StoreError>;

    fn store(&mut self, point: LatLng) -> Result<(), StoreError>;
}

/// The server-side venue search.
pub trait VenueSource {
    fn nearby(&self, point: LatLng) -> Result<Vec<VenueRecord>, SearchError>;
}

/// Driving directions between two points.
pub trait DirectionsProvider {
    fn route(&self, from: LatLng, to: LatLng) -> Result<Route, DirectionsError>;
}

/// Fire-and-forget error reporting. Failures to deliver are ignored.
pub trait ErrorReporter {
    fn report(&self, report: &ErrorReport);
}

/// Fire-and-forget record of the raw search text.
pub trait SearchRecorder {
    fn record_search(&self, query: &str);
}

/// A single map viewport.
pub trait MapView {
    fn set_center(&mut self, center: LatLng, zoom: u8);

    /// Tightest zoom level at which `bounds` fits the viewport.
    fn bounds_zoom_level(&self, bounds: &Bounds) -> u8;

    fn add_overlay(&mut self, overlay: Overlay);

    fn remove_overlay(&mut self, overlay: &Overlay);

    /// Removes every overlay and closes any open info window.
    fn clear_overlays(&mut self);

    fn open_info_window(&mut self, anchor: LatLng, popup: Popup);
}
