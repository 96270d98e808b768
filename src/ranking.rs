//! Distance ranking of venues around the user location.

use rayon::prelude::*;

use crate::geo::LatLng;
use crate::report::ErrorReport;
use crate::traits::{ErrorReporter, VenueSource};
use crate::venue::{PinIcon, Venue, VenueRecord};

/// Meters subtracted from an indoor-smoking venue's distance.
///
/// Large enough that any indoor venue in a search radius outranks every
/// outdoor-only one.
pub const INDOOR_SMOKING_BONUS_METERS: f64 = 1_000_000.0;

/// Sort key for a venue at `distance_m` meters.
pub fn rank_distance(distance_m: f64, indoor_smoking: bool) -> f64 {
    if indoor_smoking {
        distance_m - INDOOR_SMOKING_BONUS_METERS
    } else {
        distance_m
    }
}

/// Orders `records` by rank distance from `origin`.
///
/// The sort is stable: records with equal rank distance keep their input
/// order. Each venue gets its position and a numbered pin.
pub fn rank_venues(origin: LatLng, records: Vec<VenueRecord>) -> Vec<Venue> {
    let mut venues: Vec<Venue> = records
        .into_par_iter()
        .map(|record| {
            let distance = origin.distance_to(&LatLng::new(record.lat, record.lng));
            let key = rank_distance(distance, record.indoor_smoking);
            Venue::from_record(record, distance, key)
        })
        .collect();

    venues.sort_by(|a, b| a.rank_distance.total_cmp(&b.rank_distance));

    for (rank, venue) in venues.iter_mut().enumerate() {
        venue.rank = rank;
        venue.icon = PinIcon::numbered(rank + 1, venue.indoor_smoking);
    }

    venues
}

/// Fetches venues near `origin` and ranks them.
///
/// A failed fetch is reported and yields an empty list.
pub fn fetch_ranked<S, R>(source: &S, origin: LatLng, reporter: &R) -> Vec<Venue>
where
    S: VenueSource + ?Sized,
    R: ErrorReporter + ?Sized,
{
    match source.nearby(origin) {
        Ok(records) => {
            tracing::info!(count = records.len(), lat = origin.lat, lng = origin.lng, "venues fetched");
            rank_venues(origin, records)
        }
        Err(err) => {
            tracing::warn!(error = %err, "venue search failed");
            reporter.report(
                &ErrorReport::new("Venue search failed")
                    .with("error", err.to_string())
                    .with("lat", origin.lat)
                    .with("lng", origin.lng),
            );
            Vec::new()
        }
    }
}
