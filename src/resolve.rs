//! Picks the session's starting location.
//!
//! Order of preference: the typed address, the stored location from a
//! previous visit, the IP lookup, and finally a fixed default.

use crate::geo::LatLng;
use crate::geocode::geocode;
use crate::location::Location;
use crate::report::ErrorReport;
use crate::traits::{ErrorReporter, Geocoder, IpLocator, LocationStore};

/// Fallback when the IP lookup is unavailable (Falls Church, VA).
pub const DEFAULT_LOCATION: LatLng = LatLng::new(38.8872209, -77.1919999);
pub const DEFAULT_CITY: &str = "Falls Church";
pub const DEFAULT_STATE: &str = "VA";

/// Shown when a typed address cannot be geocoded.
pub const ADDRESS_NOT_FOUND: &str = "Can't find that spot";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSource {
    Address,
    Stored,
    Ip,
    Default,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved { location: Location, source: LocationSource },
    Unknown,
}

impl Resolution {
    /// The resolved location, or `None` when every source came up empty.
    pub fn location(&self) -> Option<&Location> {
        match self {
            Resolution::Resolved { location, .. } => Some(location),
            Resolution::Unknown => None,
        }
    }

    pub fn into_location(self) -> Option<Location> {
        match self {
            Resolution::Resolved { location, .. } => Some(location),
            Resolution::Unknown => None,
        }
    }
}

/// The resolution plus a notice for the user, if one is due.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveOutcome {
    pub resolution: Resolution,
    pub notice: Option<&'static str>,
}

pub struct LocationResolver<'a> {
    geocoder: &'a dyn Geocoder,
    ip_locator: &'a dyn IpLocator,
    store: &'a mut dyn LocationStore,
    reporter: &'a dyn ErrorReporter,
}

impl<'a> LocationResolver<'a> {
    pub fn new(
        geocoder: &'a dyn Geocoder,
        ip_locator: &'a dyn IpLocator,
        store: &'a mut dyn LocationStore,
        reporter: &'a dyn ErrorReporter,
    ) -> Self {
        Self {
            geocoder,
            ip_locator,
            store,
            reporter,
        }
    }

    /// Resolves a location and persists it for the next visit.
    pub fn resolve(&mut self, address: Option<&str>) -> ResolveOutcome {
        let mut notice = None;

        let address = address.map(str::trim).filter(|a| !a.is_empty());
        let typed = match address {
            Some(address) => {
                let found = geocode(self.geocoder, address, self.reporter);
                if found.is_none() {
                    notice = Some(ADDRESS_NOT_FOUND);
                }
                found
            }
            None => None,
        };

        let resolution = match typed {
            Some(location) => Resolution::Resolved {
                location,
                source: LocationSource::Address,
            },
            None => self.fallback(),
        };

        if let Resolution::Resolved { location, source } = &resolution {
            tracing::info!(?source, place = %location.address_text(), "location resolved");
            if let Err(err) = self.store.store(location.point) {
                tracing::warn!(error = %err, "could not persist location");
                self.reporter.report(
                    &ErrorReport::new("Storing location failed").with("error", err.to_string()),
                );
            }
        } else {
            tracing::info!("location unknown");
        }

        ResolveOutcome { resolution, notice }
    }

    fn fallback(&mut self) -> Resolution {
        match self.store.load() {
            Ok(Some(point)) => {
                // The stored pair carries no locality; geocode it to recover one.
                match geocode(self.geocoder, &point.to_query_text(), self.reporter) {
                    Some(location) => Resolution::Resolved {
                        location,
                        source: LocationSource::Stored,
                    },
                    None => Resolution::Unknown,
                }
            }
            Ok(None) => self.client_location(),
            Err(err) => {
                tracing::warn!(error = %err, "stored location unreadable");
                self.reporter.report(
                    &ErrorReport::new("Reading stored location failed").with("error", err.to_string()),
                );
                Resolution::Unknown
            }
        }
    }

    fn client_location(&self) -> Resolution {
        match self.ip_locator.client_location() {
            Some(client) => Resolution::Resolved {
                location: client.into(),
                source: LocationSource::Ip,
            },
            None => {
                tracing::debug!("no IP location, using default");
                Resolution::Resolved {
                    location: Location::at(DEFAULT_LOCATION).with_locality(DEFAULT_CITY, DEFAULT_STATE),
                    source: LocationSource::Default,
                }
            }
        }
    }
}
