//! Venue records from the search endpoint and their ranked form.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::geo::LatLng;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("venue search request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("venue search response was not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One record of the search endpoint's JSON array.
///
/// The endpoint is loosely typed: numbers may arrive as strings and the
/// indoor-smoking flag as a bool, a number, or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VenueRecord {
    #[serde(deserialize_with = "number")]
    pub lat: f64,
    #[serde(deserialize_with = "number")]
    pub lng: f64,
    #[serde(rename = "barname")]
    pub name: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub restrictions: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub indoor_smoking: bool,
    #[serde(rename = "barid", default, deserialize_with = "optional_text")]
    pub id: Option<String>,
}

/// Map pin for a ranked venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinIcon {
    pub image: String,
}

impl PinIcon {
    pub const INDOOR_COLOR: &'static str = "00FF00";
    pub const OUTDOOR_COLOR: &'static str = "0BB5FF";

    /// A pin lettered with the 1-based `number`.
    pub fn numbered(number: usize, indoor_smoking: bool) -> Self {
        let color = if indoor_smoking {
            Self::INDOOR_COLOR
        } else {
            Self::OUTDOOR_COLOR
        };
        Self {
            image: format!(
                "http://chart.apis.google.com/chart?chst=d_map_pin_letter&chld={}|{}|000000",
                number, color
            ),
        }
    }
}

/// A venue placed in the ranked list.
#[derive(Debug, Clone, PartialEq)]
pub struct Venue {
    pub id: Option<String>,
    pub point: LatLng,
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub url: Option<String>,
    pub restrictions: Option<String>,
    pub indoor_smoking: bool,
    /// Straight-line meters from the user location.
    pub distance_m: f64,
    /// Sort key: distance less any indoor-smoking bonus.
    pub rank_distance: f64,
    /// 0-based position in the ranked list.
    pub rank: usize,
    pub icon: PinIcon,
}

impl Venue {
    pub(crate) fn from_record(record: VenueRecord, distance_m: f64, rank_distance: f64) -> Self {
        Self {
            id: record.id,
            point: LatLng::new(record.lat, record.lng),
            name: record.name,
            street: record.street,
            city: record.city,
            state: record.state,
            phone: record.phone,
            url: record.url,
            restrictions: record.restrictions,
            indoor_smoking: record.indoor_smoking,
            distance_m,
            rank_distance,
            rank: 0,
            icon: PinIcon::numbered(1, record.indoor_smoking),
        }
    }

    pub fn address(&self) -> String {
        format!("{}, {}", self.street, self.city)
    }
}

fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom("coordinate out of range")),
        Value::String(s) => s.trim().parse().map_err(de::Error::custom),
        other => Err(de::Error::custom(format!("expected a coordinate, got {}", other))),
    }
}

fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "y"),
        _ => false,
    })
}
