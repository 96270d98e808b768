//! Driving routes between the user and a venue.

use thiserror::Error;

use crate::geo::LatLng;
use crate::polyline::{Polyline, PolylineError};

/// A driving route: the line to draw plus its length.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub polyline: Polyline,
    pub distance_m: f64,
    pub duration_s: f64,
}

#[derive(Debug, Error)]
pub enum DirectionsError {
    #[error("directions request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("directions service answered {code}: {message}")]
    Status { code: String, message: String },
    #[error("no route between the points")]
    NoRoute,
    #[error("route geometry could not be decoded: {0}")]
    Geometry(#[from] PolylineError),
}

impl DirectionsError {
    /// Short status value sent with error reports.
    pub fn status(&self) -> String {
        match self {
            DirectionsError::Status { code, .. } => code.clone(),
            DirectionsError::Http(err) => err
                .status()
                .map(|status| status.as_u16().to_string())
                .unwrap_or_else(|| "request failed".to_string()),
            DirectionsError::NoRoute => "NoRoute".to_string(),
            DirectionsError::Geometry(_) => "InvalidGeometry".to_string(),
        }
    }
}

/// Human-readable description of a lookup, used in logs and error reports.
pub fn lookup_string(from: LatLng, to: LatLng) -> String {
    format!("({},{}) to ({},{})", from.lat, from.lng, to.lat, to.lng)
}
