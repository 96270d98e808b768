//! The selected venue, its route line and its popup.
//!
//! Route lookups are asynchronous: selecting a venue without a cached route
//! yields a [`RouteRequest`], and the result comes back later through
//! [`SelectionController::route_resolved`]. Every selection change bumps a
//! generation counter; a result whose request generation is no longer
//! current is cached but never drawn. Results for requests made before the
//! venue list was replaced are dropped entirely, since the cache is keyed
//! by list index.

use std::collections::HashMap;

use crate::directions::{lookup_string, DirectionsError, Route};
use crate::geo::LatLng;
use crate::location::Location;
use crate::map::{MapPresenter, Overlay};
use crate::popup::Popup;
use crate::report::ErrorReport;
use crate::traits::{ErrorReporter, MapView};
use crate::venue::Venue;

/// A pending route lookup from the user to a venue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    pub venue: usize,
    pub generation: u64,
    pub from: LatLng,
    pub to: LatLng,
}

/// Routes already looked up this session, by venue index.
#[derive(Debug, Clone, Default)]
pub struct RouteCache {
    routes: HashMap<usize, Route>,
}

impl RouteCache {
    /// The route stored for the venue at list index `venue`.
    pub fn get(&self, venue: usize) -> Option<&Route> {
        self.routes.get(&venue)
    }

    /// Keeps the first route stored for a venue.
    pub fn insert(&mut self, venue: usize, route: Route) {
        self.routes.entry(venue).or_insert(route);
    }

    /// Number of venues with a stored route.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct SelectionController {
    selected: Option<usize>,
    generation: u64,
    /// Generation at which the current venue list was loaded.
    list_generation: u64,
    /// Venue whose route line is currently on the map.
    drawn: Option<usize>,
    cache: RouteCache,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cache(&self) -> &RouteCache {
        &self.cache
    }

    pub fn drawn_route(&self) -> Option<usize> {
        self.drawn
    }

    /// Forgets the selection and cached routes, for a new venue list.
    pub fn reset(&mut self) {
        self.selected = None;
        self.drawn = None;
        self.cache = RouteCache::default();
        self.generation += 1;
        self.list_generation = self.generation;
    }

    /// The map was cleared, taking any route line with it.
    pub fn overlays_cleared(&mut self) {
        self.drawn = None;
    }

    /// Selects `venue`, returning a route lookup to run if one is needed.
    ///
    /// Re-selecting the selected venue only reopens its popup when closed.
    pub fn select<M: MapView>(
        &mut self,
        venue: usize,
        venues: &[Venue],
        user: &Location,
        presenter: &mut MapPresenter<M>,
    ) -> Option<RouteRequest> {
        let target = venues.get(venue)?;

        if self.selected == Some(venue) {
            if presenter.is_popup_open() {
                return None;
            }
            self.draw_cached(venue, presenter);
            presenter.open_popup(target.point, Popup::for_venue(target, user));
            return None;
        }

        self.remove_drawn(presenter);
        self.selected = Some(venue);
        self.generation += 1;
        tracing::debug!(venue, generation = self.generation, name = %target.name, "selected");

        let request = if self.cache.get(venue).is_some() {
            self.draw_cached(venue, presenter);
            None
        } else {
            Some(RouteRequest {
                venue,
                generation: self.generation,
                from: user.point,
                to: target.point,
            })
        };

        presenter.open_popup(target.point, Popup::for_venue(target, user));
        request
    }

    /// Delivers the result of `request`.
    ///
    /// Routes are cached whether or not they are still wanted; only a
    /// result for the current selection generation is drawn. A result for
    /// an earlier venue list is neither cached nor drawn. Failures are
    /// reported and leave the map alone.
    pub fn route_resolved<M, R>(
        &mut self,
        request: &RouteRequest,
        result: Result<Route, DirectionsError>,
        presenter: &mut MapPresenter<M>,
        reporter: &R,
    ) where
        M: MapView,
        R: ErrorReporter + ?Sized,
    {
        if request.generation < self.list_generation {
            tracing::debug!(
                venue = request.venue,
                generation = request.generation,
                list_generation = self.list_generation,
                "discarding route for a replaced venue list"
            );
            return;
        }

        match result {
            Ok(route) => {
                self.cache.insert(request.venue, route);
                if self.is_current(request) {
                    self.draw_cached(request.venue, presenter);
                } else {
                    tracing::debug!(
                        venue = request.venue,
                        generation = request.generation,
                        current = self.generation,
                        "discarding stale route"
                    );
                }
            }
            Err(err) => {
                let lookup = lookup_string(request.from, request.to);
                tracing::warn!(error = %err, lookup = %lookup, "directions lookup failed");
                reporter.report(
                    &ErrorReport::new("Directions lookup failed")
                        .with("status", err.status())
                        .with("lookupString", lookup),
                );
            }
        }
    }

    pub fn is_current(&self, request: &RouteRequest) -> bool {
        self.selected == Some(request.venue) && self.generation == request.generation
    }

    fn draw_cached<M: MapView>(&mut self, venue: usize, presenter: &mut MapPresenter<M>) {
        if self.drawn == Some(venue) {
            return;
        }
        if let Some(route) = self.cache.get(venue) {
            presenter.add_overlay(Overlay::RouteLine {
                venue,
                polyline: route.polyline.clone(),
            });
            self.drawn = Some(venue);
        }
    }

    fn remove_drawn<M: MapView>(&mut self, presenter: &mut MapPresenter<M>) {
        let Some(venue) = self.drawn.take() else {
            return;
        };
        if let Some(route) = self.cache.get(venue) {
            presenter.remove_overlay(&Overlay::RouteLine {
                venue,
                polyline: route.polyline.clone(),
            });
        }
    }
}
