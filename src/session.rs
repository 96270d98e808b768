//! The search page session: owns the location, the ranked venues, the page
//! window, the map and the selection, and drives them from page events.

use std::collections::VecDeque;

use serde::Serialize;

use crate::directions::{DirectionsError, Route};
use crate::location::Location;
use crate::map::{MapDefaults, MapPresenter, Overlay};
use crate::pagination::{PageSummary, PaginationWindow};
use crate::params::PageParams;
use crate::ranking::fetch_ranked;
use crate::resolve::LocationResolver;
use crate::selection::{RouteRequest, SelectionController};
use crate::traits::{
    DirectionsProvider, ErrorReporter, Geocoder, IpLocator, LocationStore, MapView, SearchRecorder, VenueSource,
};
use crate::venue::Venue;

pub const NO_RESULTS_TEXT: &str = "No results";

/// Everything outside the page the session talks to.
pub struct Capabilities {
    pub geocoder: Box<dyn Geocoder>,
    pub ip_locator: Box<dyn IpLocator>,
    pub store: Box<dyn LocationStore>,
    pub venues: Box<dyn VenueSource>,
    pub directions: Box<dyn DirectionsProvider>,
    pub reporter: Box<dyn ErrorReporter>,
    pub recorder: Box<dyn SearchRecorder>,
}

/// One entry of the rendered result list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultItem {
    pub index: usize,
    pub name: String,
    pub street: String,
    pub city: String,
    pub glyph: String,
    pub selected: bool,
}

/// What the list side of the page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub location_text: Option<String>,
    pub notice: Option<&'static str>,
    pub items: Vec<ResultItem>,
    pub prior_visible: bool,
    pub next_visible: bool,
    pub controls_visible: bool,
    pub summary: PageSummary,
}

impl PageView {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// "1 - 10 of 23", or the empty-list text.
    pub fn status_text(&self) -> String {
        if self.is_empty() {
            return NO_RESULTS_TEXT.to_string();
        }
        let PageSummary { low, high, total } = self.summary;
        format!("{low} - {high} of {total}")
    }
}

pub struct Session<M: MapView> {
    caps: Capabilities,
    location: Option<Location>,
    venues: Vec<Venue>,
    window: PaginationWindow,
    presenter: MapPresenter<M>,
    selection: SelectionController,
    pending: VecDeque<RouteRequest>,
    notice: Option<&'static str>,
}

impl<M: MapView> Session<M> {
    pub fn new(caps: Capabilities, view: M, page_size: usize, defaults: MapDefaults) -> Self {
        Self {
            caps,
            location: None,
            venues: Vec::new(),
            window: PaginationWindow::new(page_size),
            presenter: MapPresenter::new(view, defaults),
            selection: SelectionController::new(),
            pending: VecDeque::new(),
            notice: None,
        }
    }

    /// Runs the page load: record the search, resolve a location, fetch
    /// and rank venues, then draw the first (or deep-linked) page.
    pub fn start(&mut self, params: &PageParams) {
        if let Some(query) = &params.query {
            self.caps.recorder.record_search(query);
        }

        let outcome = LocationResolver::new(
            self.caps.geocoder.as_ref(),
            self.caps.ip_locator.as_ref(),
            self.caps.store.as_mut(),
            self.caps.reporter.as_ref(),
        )
        .resolve(params.query.as_deref());

        self.notice = outcome.notice;
        self.location = outcome.resolution.into_location();

        if self.location.is_none() {
            self.presenter.initialize(None);
            return;
        }
        self.load_venues(params.select.as_deref());
    }

    fn load_venues(&mut self, select: Option<&str>) {
        let Some(location) = &self.location else {
            return;
        };

        self.venues = fetch_ranked(self.caps.venues.as_ref(), location.point, self.caps.reporter.as_ref());
        self.selection.reset();
        self.pending.clear();
        self.window.reset();

        let target = select.and_then(|id| self.venues.iter().position(|v| v.id.as_deref() == Some(id)));
        match target {
            Some(index) => self.window.target(index),
            None if select.is_some() => tracing::info!(select, "deep-linked venue not in results"),
            None => {}
        }

        self.presenter.initialize(self.location.as_ref());
        self.render(target);
    }

    /// Redraws the current page and selects `selected`, or the first
    /// visible venue.
    fn render(&mut self, selected: Option<usize>) {
        self.presenter.redraw(self.location.as_ref(), &self.venues, &self.window);
        self.selection.overlays_cleared();

        if self.venues.is_empty() {
            return;
        }
        self.select(selected.unwrap_or(self.window.min()));
    }

    /// Moves to the next page and selects its first venue. Returns false
    /// when already on the last page.
    pub fn next_page(&mut self) -> bool {
        if !self.window.advance(self.venues.len()) {
            return false;
        }
        self.render(None);
        true
    }

    /// Moves to the previous page; false when already on the first.
    pub fn prior_page(&mut self) -> bool {
        if !self.window.retreat() {
            return false;
        }
        self.render(None);
        true
    }

    /// Selects the venue at `index` in the ranked list.
    pub fn select(&mut self, index: usize) {
        let Some(user) = &self.location else {
            return;
        };
        if let Some(request) = self.selection.select(index, &self.venues, user, &mut self.presenter) {
            self.pending.push_back(request);
        }
    }

    /// Routes a map click; clicks on anything but a venue pin are ignored.
    pub fn handle_map_click(&mut self, overlay: Option<&Overlay>) {
        if let Some(index) = self.presenter.handle_click(overlay) {
            self.select(index);
        }
    }

    /// The map's info-window close event.
    pub fn popup_closed(&mut self) {
        self.presenter.popup_closed();
    }

    /// Route lookups waiting to run.
    pub fn pending_routes(&self) -> usize {
        self.pending.len()
    }

    /// Hands the queued lookups to an outside driver, which reports back
    /// through [`Session::route_resolved`].
    pub fn take_pending_routes(&mut self) -> Vec<RouteRequest> {
        self.pending.drain(..).collect()
    }

    /// Delivers a lookup result taken from [`Session::take_pending_routes`].
    pub fn route_resolved(&mut self, request: &RouteRequest, result: Result<Route, DirectionsError>) {
        self.selection
            .route_resolved(request, result, &mut self.presenter, self.caps.reporter.as_ref());
    }

    /// Runs every queued lookup through the directions provider, in order.
    pub fn run_pending_routes(&mut self) -> usize {
        let mut completed = 0;
        while let Some(request) = self.pending.pop_front() {
            let result = self.caps.directions.route(request.from, request.to);
            self.route_resolved(&request, result);
            completed += 1;
        }
        completed
    }

    /// The list panel for the visible page.
    pub fn page(&self) -> PageView {
        let len = self.venues.len();
        let selected = self.selection.selected();

        let items = self
            .window
            .visible(len)
            .map(|index| {
                let venue = &self.venues[index];
                ResultItem {
                    index,
                    name: venue.name.clone(),
                    street: venue.street.clone(),
                    city: venue.city.clone(),
                    glyph: venue.icon.image.clone(),
                    selected: selected == Some(index),
                }
            })
            .collect();

        PageView {
            location_text: self.location.as_ref().map(Location::address_text),
            notice: self.notice,
            items,
            prior_visible: len > 0 && self.window.has_prior(),
            next_visible: self.window.has_next(len),
            controls_visible: self.window.shows_controls(len),
            summary: self.window.summary(len),
        }
    }

    /// The resolved user location, if any source produced one.
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Every ranked venue, not just the visible page.
    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    pub fn window(&self) -> &PaginationWindow {
        &self.window
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn presenter(&self) -> &MapPresenter<M> {
        &self.presenter
    }

    pub fn map(&self) -> &M {
        self.presenter.view()
    }

    /// Notice shown above the results when the address search failed.
    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }
}
