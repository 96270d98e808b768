//! bar-locator core
//!
//! Finds smoking-friendly bars near a location: resolves where the user is,
//! ranks nearby venues, pages through them on a map and draws driving
//! routes to the selected one.

pub mod config;
pub mod directions;
pub mod geo;
pub mod geocode;
pub mod location;
pub mod map;
pub mod osrm;
pub mod pagination;
pub mod params;
pub mod polyline;
pub mod popup;
pub mod ranking;
pub mod report;
pub mod resolve;
pub mod selection;
pub mod session;
pub mod site;
pub mod store;
pub mod traits;
pub mod venue;

#[cfg(test)]
mod testing;
