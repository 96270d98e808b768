//! Polyline representation for route geometries.
//!
//! Routes arrive from the directions service as encoded polylines; they are
//! decoded once at that boundary and drawn on the map as coordinate lists.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::LatLng;

/// A polyline as decoded coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<LatLng>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolylineError {
    #[error("polyline ended in the middle of a value at byte {0}")]
    Truncated(usize),
    #[error("invalid polyline character {0:?} at byte {1}")]
    InvalidChar(char, usize),
    #[error("polyline value at byte {0} does not fit in 64 bits")]
    Overflow(usize),
}

impl Polyline {
    pub fn new(points: Vec<LatLng>) -> Self {
        Self { points }
    }

    /// Decodes the compact polyline format with `precision` decimal digits
    /// (5 for Google and OSRM `polyline`, 6 for `polyline6`).
    pub fn decode(encoded: &str, precision: u32) -> Result<Self, PolylineError> {
        let factor = 10_f64.powi(precision as i32);
        let bytes = encoded.as_bytes();
        let mut index = 0;
        let mut lat: i64 = 0;
        let mut lng: i64 = 0;
        let mut points = Vec::new();

        while index < bytes.len() {
            lat += next_value(bytes, &mut index)?;
            lng += next_value(bytes, &mut index)?;
            points.push(LatLng::new(lat as f64 / factor, lng as f64 / factor));
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[LatLng] {
        &self.points
    }

    pub fn into_points(self) -> Vec<LatLng> {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let Some(&byte) = bytes.get(*index) else {
            return Err(PolylineError::Truncated(*index));
        };
        if !(63..=126).contains(&byte) {
            return Err(PolylineError::InvalidChar(byte as char, *index));
        }
        if shift >= i64::BITS {
            return Err(PolylineError::Overflow(*index));
        }
        *index += 1;

        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 == 1 { !(result >> 1) } else { result >> 1 })
}
