//! Bars around Falls Church, VA, for realistic session fixtures.
//!
//! Coordinates are approximate street positions; the indoor flags are made
//! up so rankings exercise the bonus.

/// A named bar with coordinates.
#[derive(Debug, Clone)]
pub struct Bar {
    pub id: &'static str,
    pub name: &'static str,
    pub street: &'static str,
    pub city: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub indoor_smoking: bool,
}

impl Bar {
    pub const fn new(
        id: &'static str,
        name: &'static str,
        street: &'static str,
        city: &'static str,
        lat: f64,
        lng: f64,
    ) -> Self {
        Self {
            id,
            name,
            street,
            city,
            lat,
            lng,
            indoor_smoking: false,
        }
    }

    pub const fn indoor(mut self) -> Self {
        self.indoor_smoking = true;
        self
    }
}

/// Where "5113 Leesburg Pike, Falls Church, VA" geocodes to.
pub const LEESBURG_PIKE: (f64, f64) = (38.8521, -77.1329);

// ============================================================================
// Bailey's Crossroads / Seven Corners
// ============================================================================

pub const SEVEN_CORNERS: &[Bar] = &[
    Bar::new("101", "Crossroads Tavern", "5101 Leesburg Pike", "Falls Church", 38.8525, -77.1318),
    Bar::new("102", "Pike Pub", "5870 Leesburg Pike", "Falls Church", 38.8492, -77.1392),
    Bar::new("103", "Corner Hookah Lounge", "6272 Arlington Blvd", "Falls Church", 38.8664, -77.1479).indoor(),
    Bar::new("104", "Seven Corners Saloon", "6201 Arlington Blvd", "Falls Church", 38.8669, -77.1447),
    Bar::new("105", "Baileys Billiards", "3401 Carlin Springs Rd", "Falls Church", 38.8557, -77.1290),
    Bar::new("106", "Columbia Pike Cantina", "5725 Columbia Pike", "Falls Church", 38.8560, -77.1180),
];

// ============================================================================
// City of Falls Church
// ============================================================================

pub const FALLS_CHURCH_CITY: &[Bar] = &[
    Bar::new("201", "State Theatre Bar", "220 N Washington St", "Falls Church", 38.8847, -77.1714),
    Bar::new("202", "Mad Fox Taproom", "444 W Broad St", "Falls Church", 38.8812, -77.1790),
    Bar::new("203", "Ireland's Four Provinces", "105 W Broad St", "Falls Church", 38.8830, -77.1737).indoor(),
    Bar::new("204", "Clare and Don's", "129 N Washington St", "Falls Church", 38.8836, -77.1706),
    Bar::new("205", "Dogwood Tavern", "132 W Broad St", "Falls Church", 38.8826, -77.1742),
    Bar::new("206", "Spacebar", "709 W Broad St", "Falls Church", 38.8801, -77.1836),
];

// ============================================================================
// Arlington
// ============================================================================

pub const ARLINGTON: &[Bar] = &[
    Bar::new("301", "Galaxy Hut", "2711 Wilson Blvd", "Arlington", 38.8871, -77.0955),
    Bar::new("302", "Whitlow's on Wilson", "2854 Wilson Blvd", "Arlington", 38.8874, -77.0971),
    Bar::new("303", "Clarendon Ballroom", "3185 Wilson Blvd", "Arlington", 38.8866, -77.0980),
    Bar::new("304", "Hookah Palace", "3100 Columbia Pike", "Arlington", 38.8626, -77.0857).indoor(),
    Bar::new("305", "Westover Beer Garden", "5863 Washington Blvd", "Arlington", 38.8825, -77.1375),
];

/// Every fixture bar.
pub fn all_bars() -> Vec<Bar> {
    SEVEN_CORNERS
        .iter()
        .chain(FALLS_CHURCH_CITY)
        .chain(ARLINGTON)
        .cloned()
        .collect()
}
