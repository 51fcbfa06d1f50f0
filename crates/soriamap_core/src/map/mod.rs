//! Map widget capability boundary.
//!
//! # Responsibility
//! - Define the trait seam the core uses to drive the external map widget.
//! - Provide geometry primitives, icon/overlay styling and the Soria
//!   viewport constants.
//! - Ship a headless in-memory implementation for tests and the CLI probe.
//!
//! # Invariants
//! - Core never talks to a concrete map widget directly; every marker,
//!   popup, view or bounds change goes through [`MapCapability`].

use crate::model::poi::Category;

mod memory;

pub use memory::{MarkerRecord, MemoryMap, OverlayRecord};

/// Geographic coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Rectangular viewport bound, south-west and north-east corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

/// Centre of the Soria province viewport.
pub const SORIA_CENTER: LatLng = LatLng {
    lat: 41.766,
    lng: -2.479,
};

/// Max-bounds rectangle keeping the viewport on the Soria region.
pub const SORIA_BOUNDS: Bounds = Bounds {
    south_west: LatLng { lat: 40.9, lng: -3.5 },
    north_east: LatLng { lat: 42.2, lng: -1.7 },
};

/// Zoom level the map opens at.
pub const INITIAL_ZOOM: u8 = 10;

/// Zoom level used when focusing a single POI or a located position.
pub const FOCUS_ZOOM: u8 = 15;

/// Visual marker icon: a glyph on a coloured round badge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconSpec {
    pub glyph: &'static str,
    pub color: &'static str,
    /// 1.0 for regular markers; the pending-selection marker is translucent.
    pub opacity: f64,
}

impl IconSpec {
    /// Icon for a POI of the given category.
    pub fn for_category(category: Category) -> Self {
        Self {
            glyph: category.glyph(),
            color: category.color(),
            opacity: 1.0,
        }
    }
}

/// Translucent placeholder icon for a clicked-but-unconfirmed location.
pub const SELECTION_ICON: IconSpec = IconSpec {
    glyph: "📍",
    color: "#667eea",
    opacity: 0.6,
};

/// Icon for the transient "current location" marker.
pub const USER_LOCATION_ICON: IconSpec = IconSpec {
    glyph: "",
    color: "#3498db",
    opacity: 1.0,
};

/// Stroke/fill styling for circle overlays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleStyle {
    pub color: &'static str,
    pub weight: u8,
    pub opacity: f64,
    pub fill_color: &'static str,
    pub fill_opacity: f64,
}

/// Styling of the geolocation accuracy-radius overlay.
pub const ACCURACY_CIRCLE_STYLE: CircleStyle = CircleStyle {
    color: "#3498db",
    weight: 2,
    opacity: 0.3,
    fill_color: "#3498db",
    fill_opacity: 0.1,
};

/// Operations the core requires of the external map widget.
///
/// Handles are opaque widget-owned tokens; the core only stores and returns
/// them, it never interprets them.
pub trait MapCapability {
    type Handle: Copy + PartialEq + std::fmt::Debug;

    /// Centres the viewport on `center` at `zoom`.
    fn set_view(&mut self, center: LatLng, zoom: u8);

    /// Constrains panning to `bounds`, or lifts the constraint with `None`.
    fn set_max_bounds(&mut self, bounds: Option<Bounds>);

    /// Places a marker and returns its handle.
    fn add_marker(&mut self, position: LatLng, icon: IconSpec) -> Self::Handle;

    /// Removes a marker. Unknown handles are ignored.
    fn remove_marker(&mut self, handle: Self::Handle);

    /// Attaches popup content to a marker.
    fn bind_popup(&mut self, handle: Self::Handle, html: &str);

    /// Opens the popup bound to a marker.
    fn open_popup(&mut self, handle: Self::Handle);

    /// Places a circle overlay (radius in metres) and returns its handle.
    fn add_circle(&mut self, center: LatLng, radius_m: f64, style: CircleStyle) -> Self::Handle;

    /// Removes a circle overlay. Unknown handles are ignored.
    fn remove_circle(&mut self, handle: Self::Handle);
}
