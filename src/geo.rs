//! Coordinates, great-circle distance and viewport fitting.
//!
//! Every coordinate that enters the crate (server records, geocoder results,
//! cookies, IP lookups) is converted to a [`LatLng`] once, at the boundary.

use serde::{Deserialize, Serialize};

/// Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Tile edge in pixels for the Web-Mercator zoom computation.
const TILE_SIZE_PX: f64 = 256.0;

/// Highest zoom level the map supports.
pub const MAX_ZOOM: u8 = 19;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle (haversine) distance to `other` in meters.
    pub fn distance_to(&self, other: &LatLng) -> f64 {
        let lat1_rad = self.lat.to_radians();
        let lat2_rad = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_M * c
    }

    /// The `"lat, lng"` form used for cookies and text geocoding.
    pub fn to_query_text(&self) -> String {
        format!("{}, {}", self.lat, self.lng)
    }
}

/// Axis-aligned bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Bounds {
    /// A zero-area box around a single point.
    pub fn around(point: LatLng) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    pub fn extend(&mut self, point: LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }

    /// Whether `point` lies inside the box, edges included.
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    /// Tightest Web-Mercator zoom at which the whole box fits a viewport of
    /// `width` x `height` pixels.
    pub fn fitting_zoom(&self, width: u32, height: u32) -> u8 {
        let lng_span = (self.north_east.lng - self.south_west.lng).abs();
        let lat_span = (mercator_y(self.north_east.lat) - mercator_y(self.south_west.lat)).abs();

        // Fraction of the whole world each span covers at zoom 0.
        let lng_fraction = lng_span / 360.0;
        let lat_fraction = lat_span / (2.0 * std::f64::consts::PI);

        let zoom_for = |pixels: u32, fraction: f64| {
            if fraction <= 0.0 {
                f64::from(MAX_ZOOM)
            } else {
                (f64::from(pixels) / TILE_SIZE_PX / fraction).log2()
            }
        };

        let zoom = zoom_for(width, lng_fraction)
            .min(zoom_for(height, lat_fraction))
            .floor();
        zoom.clamp(0.0, f64::from(MAX_ZOOM)) as u8
    }
}

fn mercator_y(lat: f64) -> f64 {
    let sin = lat.to_radians().sin().clamp(-0.9999, 0.9999);
    ((1.0 + sin) / (1.0 - sin)).ln() / 2.0
}
