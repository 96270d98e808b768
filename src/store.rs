//! Persistence of the last resolved location.
//!
//! In a browser this is the `lastLocation` cookie; [`CookieStore`] models the
//! cookie string directly. [`FileStore`] keeps the same value in a JSON file
//! for command-line sessions.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::form_urlencoded;

use crate::geo::LatLng;
use crate::traits::LocationStore;

pub const COOKIE_NAME: &str = "lastLocation";

/// How long a stored location stays valid.
pub const COOKIE_LIFETIME_DAYS: i64 = 365;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("tried to store a location without a lat/lng")]
    MissingCoordinate,
    #[error("stored location {0:?} is not a coordinate pair")]
    Malformed(String),
    #[error("location file error: {0}")]
    Io(#[from] io::Error),
    #[error("location file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A cookie jar holding the page's `document.cookie` string.
#[derive(Debug, Clone, Default)]
pub struct CookieStore {
    cookies: Vec<(String, String)>,
    last_set_cookie: Option<String>,
}

impl CookieStore {
    /// Parses a `name=value; name2=value2` cookie header.
    pub fn from_header(header: &str) -> Self {
        let cookies = header
            .split(';')
            .filter_map(|pair| {
                let (name, value) = pair.trim().split_once('=')?;
                Some((name.to_string(), value.to_string()))
            })
            .collect();

        Self {
            cookies,
            last_set_cookie: None,
        }
    }

    /// The cookie header as the page would now send it.
    pub fn header(&self) -> String {
        self.cookies
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// The most recent `Set-Cookie` value written by [`LocationStore::store`].
    pub fn last_set_cookie(&self) -> Option<&str> {
        self.last_set_cookie.as_deref()
    }

    /// Stores `point` with an explicit clock.
    pub fn store_at(&mut self, point: LatLng, now: DateTime<Utc>) -> Result<(), StoreError> {
        let value = encode_point(point)?;
        let expires = now + Duration::days(COOKIE_LIFETIME_DAYS);

        self.last_set_cookie = Some(format!(
            "{}={};Expires={}",
            COOKIE_NAME,
            value,
            expires.format("%a, %d %b %Y %H:%M:%S GMT")
        ));

        match self.cookies.iter_mut().find(|(name, _)| name == COOKIE_NAME) {
            Some(entry) => entry.1 = value,
            None => self.cookies.push((COOKIE_NAME.to_string(), value)),
        }
        Ok(())
    }
}

impl LocationStore for CookieStore {
    fn load(&self) -> Result<Option<LatLng>, StoreError> {
        self.cookies
            .iter()
            .find(|(name, _)| name == COOKIE_NAME)
            .map(|(_, value)| decode_point(value))
            .transpose()
    }

    fn store(&mut self, point: LatLng) -> Result<(), StoreError> {
        self.store_at(point, Utc::now())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredLocation {
    #[serde(rename = "lastLocation")]
    last_location: LatLng,
    stored_at: DateTime<Utc>,
}

/// Keeps the last location in a JSON file; expired entries read as absent.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LocationStore for FileStore {
    fn load(&self) -> Result<Option<LatLng>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)?;
        let stored: StoredLocation = serde_json::from_str(&data)?;
        if Utc::now() - stored.stored_at > Duration::days(COOKIE_LIFETIME_DAYS) {
            tracing::debug!(path = %self.path.display(), "stored location expired");
            return Ok(None);
        }
        Ok(Some(stored.last_location))
    }

    fn store(&mut self, point: LatLng) -> Result<(), StoreError> {
        validate(point)?;
        let stored = StoredLocation {
            last_location: point,
            stored_at: Utc::now(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&stored)?)?;
        Ok(())
    }
}

/// Store used when nothing should outlive the session.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub point: Option<LatLng>,
}

impl LocationStore for MemoryStore {
    fn load(&self) -> Result<Option<LatLng>, StoreError> {
        Ok(self.point)
    }

    fn store(&mut self, point: LatLng) -> Result<(), StoreError> {
        validate(point)?;
        self.point = Some(point);
        Ok(())
    }
}

// A zero coordinate means the location was never filled in.
fn validate(point: LatLng) -> Result<(), StoreError> {
    if point.lat == 0.0 || point.lng == 0.0 || !point.lat.is_finite() || !point.lng.is_finite() {
        return Err(StoreError::MissingCoordinate);
    }
    Ok(())
}

fn encode_point(point: LatLng) -> Result<String, StoreError> {
    validate(point)?;
    Ok(form_urlencoded::byte_serialize(point.to_query_text().as_bytes()).collect())
}

fn decode_point(raw: &str) -> Result<LatLng, StoreError> {
    // Decoding a lone form-encoded token yields it as the first key.
    let text = form_urlencoded::parse(raw.as_bytes())
        .next()
        .map(|(key, _)| key.into_owned())
        .unwrap_or_default();

    let malformed = || StoreError::Malformed(text.clone());
    let (lat, lng) = text.split_once(',').ok_or_else(malformed)?;
    let lat = lat.trim().parse::<f64>().map_err(|_| malformed())?;
    let lng = lng.trim().parse::<f64>().map_err(|_| malformed())?;
    Ok(LatLng::new(lat, lng))
}
