//! Map presentation: viewport fitting, marker redraws, click routing and
//! popup state.

use crate::geo::{Bounds, LatLng};
use crate::location::Location;
use crate::pagination::PaginationWindow;
use crate::polyline::Polyline;
use crate::popup::Popup;
use crate::traits::MapView;
use crate::venue::{PinIcon, Venue};

/// Center used before any location is known (Falls Church, VA).
pub const DEFAULT_CENTER: LatLng = LatLng::new(38.882334, -77.171091);

pub const DEFAULT_ZOOM: u8 = 10;

/// Anything drawn on the map.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    /// The user's own position; not clickable.
    UserMarker { point: LatLng },
    /// A venue pin; `venue` indexes the ranked list.
    VenueMarker { venue: usize, point: LatLng, icon: PinIcon },
    /// The driving route to a venue.
    RouteLine { venue: usize, polyline: Polyline },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapDefaults {
    pub center: LatLng,
    pub zoom: u8,
}

impl Default for MapDefaults {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Owns the map view and the state the view cannot report on its own.
#[derive(Debug)]
pub struct MapPresenter<M: MapView> {
    view: M,
    defaults: MapDefaults,
    popup_open: bool,
}

impl<M: MapView> MapPresenter<M> {
    pub fn new(view: M, defaults: MapDefaults) -> Self {
        Self {
            view,
            defaults,
            popup_open: false,
        }
    }

    pub fn view(&self) -> &M {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut M {
        &mut self.view
    }

    pub fn is_popup_open(&self) -> bool {
        self.popup_open
    }

    /// Centers on the user (or the default center) at the default zoom.
    pub fn initialize(&mut self, user: Option<&Location>) {
        let center = user.map(|u| u.point).unwrap_or(self.defaults.center);
        self.view.set_center(center, self.defaults.zoom);
    }

    /// Fits the viewport to the user plus the venues in `window`.
    ///
    /// The zoom is one step looser than the tightest fit so a pin on the
    /// edge stays clear of the frame once its popup opens.
    pub fn scale_to_results(&mut self, user: Option<&Location>, venues: &[Venue], window: &PaginationWindow) {
        match results_bounds(user, venues, window) {
            Some(bounds) => {
                let zoom = self.view.bounds_zoom_level(&bounds).saturating_sub(1);
                self.view.set_center(bounds.center(), zoom);
            }
            None => self.initialize(user),
        }
    }

    /// Clears the map and draws the user marker and the visible venue pins.
    pub fn redraw(&mut self, user: Option<&Location>, venues: &[Venue], window: &PaginationWindow) {
        self.view.clear_overlays();
        self.popup_open = false;

        if let Some(user) = user {
            self.view.add_overlay(Overlay::UserMarker { point: user.point });
        }
        self.scale_to_results(user, venues, window);

        for index in window.visible(venues.len()) {
            let venue = &venues[index];
            self.view.add_overlay(Overlay::VenueMarker {
                venue: index,
                point: venue.point,
                icon: venue.icon.clone(),
            });
        }
    }

    /// The venue to select for a click on `overlay`, if any.
    pub fn handle_click(&self, overlay: Option<&Overlay>) -> Option<usize> {
        match overlay {
            Some(Overlay::VenueMarker { venue, .. }) => Some(*venue),
            _ => None,
        }
    }

    /// Draws one overlay without touching the rest of the map.
    pub fn add_overlay(&mut self, overlay: Overlay) {
        self.view.add_overlay(overlay);
    }

    /// Removes a previously added overlay, if still present.
    pub fn remove_overlay(&mut self, overlay: &Overlay) {
        self.view.remove_overlay(overlay);
    }

    pub fn open_popup(&mut self, anchor: LatLng, popup: Popup) {
        self.view.open_info_window(anchor, popup);
        self.popup_open = true;
    }

    /// Called from the view's info-window close event.
    pub fn popup_closed(&mut self) {
        self.popup_open = false;
    }
}

/// Bounds over the user location and the venues inside `window`.
///
/// `None` when there is no user location or no venues.
pub fn results_bounds(user: Option<&Location>, venues: &[Venue], window: &PaginationWindow) -> Option<Bounds> {
    let user = user?;
    if venues.is_empty() {
        return None;
    }

    let mut bounds = Bounds::around(user.point);
    for index in window.visible(venues.len()) {
        bounds.extend(venues[index].point);
    }
    Some(bounds)
}

/// One call made against a [`RecordingMap`].
#[derive(Debug, Clone, PartialEq)]
pub enum MapCall {
    SetCenter(LatLng, u8),
    Add(Overlay),
    Remove(Overlay),
    Clear,
    OpenInfoWindow(LatLng),
}

/// An in-memory map: keeps the current overlays and logs every call.
#[derive(Debug, Clone)]
pub struct RecordingMap {
    pub width: u32,
    pub height: u32,
    pub center: Option<(LatLng, u8)>,
    pub overlays: Vec<Overlay>,
    pub info_window: Option<(LatLng, Popup)>,
    pub calls: Vec<MapCall>,
}

impl RecordingMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            center: None,
            overlays: Vec::new(),
            info_window: None,
            calls: Vec::new(),
        }
    }

    pub fn route_lines(&self) -> Vec<usize> {
        self.overlays
            .iter()
            .filter_map(|overlay| match overlay {
                Overlay::RouteLine { venue, .. } => Some(*venue),
                _ => None,
            })
            .collect()
    }

    pub fn venue_markers(&self) -> Vec<usize> {
        self.overlays
            .iter()
            .filter_map(|overlay| match overlay {
                Overlay::VenueMarker { venue, .. } => Some(*venue),
                _ => None,
            })
            .collect()
    }
}

impl Default for RecordingMap {
    fn default() -> Self {
        Self::new(640, 480)
    }
}

impl MapView for RecordingMap {
    fn set_center(&mut self, center: LatLng, zoom: u8) {
        self.center = Some((center, zoom));
        self.calls.push(MapCall::SetCenter(center, zoom));
    }

    fn bounds_zoom_level(&self, bounds: &Bounds) -> u8 {
        bounds.fitting_zoom(self.width, self.height)
    }

    fn add_overlay(&mut self, overlay: Overlay) {
        self.calls.push(MapCall::Add(overlay.clone()));
        self.overlays.push(overlay);
    }

    fn remove_overlay(&mut self, overlay: &Overlay) {
        self.calls.push(MapCall::Remove(overlay.clone()));
        self.overlays.retain(|existing| existing != overlay);
    }

    fn clear_overlays(&mut self) {
        self.calls.push(MapCall::Clear);
        self.overlays.clear();
        self.info_window = None;
    }

    fn open_info_window(&mut self, anchor: LatLng, popup: Popup) {
        self.calls.push(MapCall::OpenInfoWindow(anchor));
        self.info_window = Some((anchor, popup));
    }
}
