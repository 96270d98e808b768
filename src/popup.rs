//! Info-window contents for a selected venue.

use serde::Serialize;
use url::form_urlencoded;

use crate::location::Location;
use crate::venue::Venue;

pub const INDOOR_SMOKING_TEXT: &str = "Indoor smoking";
pub const OUTDOOR_SMOKING_TEXT: &str = "Outdoor smoking only";

/// Data shown in a venue's popup. The view layer escapes and lays it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Popup {
    pub name: String,
    /// The name links here when present.
    pub url: Option<String>,
    pub phone: Option<String>,
    pub smoking_style: &'static str,
    pub restrictions: Option<String>,
    pub directions_link: String,
}

impl Popup {
    pub fn for_venue(venue: &Venue, user: &Location) -> Self {
        Self {
            name: venue.name.clone(),
            url: venue.url.clone(),
            phone: venue.phone.clone(),
            smoking_style: if venue.indoor_smoking {
                INDOOR_SMOKING_TEXT
            } else {
                OUTDOOR_SMOKING_TEXT
            },
            restrictions: venue.restrictions.clone(),
            directions_link: directions_link(venue, user),
        }
    }
}

/// Link to the directions page, carrying both endpoints.
pub fn directions_link(venue: &Venue, user: &Location) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query
        .append_pair("fromLat", &user.point.lat.to_string())
        .append_pair("fromLng", &user.point.lng.to_string())
        .append_pair("from", &user.address_text())
        .append_pair("barName", &venue.name)
        .append_pair("barAddress", &venue.address());
    if let Some(phone) = &venue.phone {
        query.append_pair("barPhone", phone);
    }
    query
        .append_pair("barLat", &venue.point.lat.to_string())
        .append_pair("barLng", &venue.point.lng.to_string());

    format!("./directions.html?{}", query.finish())
}
