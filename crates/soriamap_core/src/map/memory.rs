//! Headless in-memory map implementation.
//!
//! # Responsibility
//! - Record every capability call so tests and the CLI probe can run the
//!   full application without a real map widget.
//!
//! # Invariants
//! - Handles are never reused within one map instance.

use super::{Bounds, CircleStyle, IconSpec, LatLng, MapCapability};
use std::collections::BTreeMap;

/// Recorded state of one placed marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerRecord {
    pub position: LatLng,
    pub icon: IconSpec,
    pub popup_html: Option<String>,
    pub popup_open: bool,
}

/// Recorded state of one circle overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayRecord {
    pub center: LatLng,
    pub radius_m: f64,
    pub style: CircleStyle,
}

/// Map capability backed by plain collections.
#[derive(Debug, Default)]
pub struct MemoryMap {
    next_handle: u64,
    markers: BTreeMap<u64, MarkerRecord>,
    circles: BTreeMap<u64, OverlayRecord>,
    view: Option<(LatLng, u8)>,
    max_bounds: Option<Bounds>,
}

impl MemoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn circle_count(&self) -> usize {
        self.circles.len()
    }

    pub fn marker(&self, handle: u64) -> Option<&MarkerRecord> {
        self.markers.get(&handle)
    }

    pub fn circle(&self, handle: u64) -> Option<&OverlayRecord> {
        self.circles.get(&handle)
    }

    /// Placed markers in handle order.
    pub fn marker_records(&self) -> impl Iterator<Item = &MarkerRecord> {
        self.markers.values()
    }

    /// Placed circle overlays in handle order.
    pub fn circle_records(&self) -> impl Iterator<Item = &OverlayRecord> {
        self.circles.values()
    }

    /// Current viewport centre and zoom, if any `set_view` happened.
    pub fn view(&self) -> Option<(LatLng, u8)> {
        self.view
    }

    /// Currently active max-bounds constraint.
    pub fn max_bounds(&self) -> Option<Bounds> {
        self.max_bounds
    }

    fn allocate_handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl MapCapability for MemoryMap {
    type Handle = u64;

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.view = Some((center, zoom));
    }

    fn set_max_bounds(&mut self, bounds: Option<Bounds>) {
        self.max_bounds = bounds;
    }

    fn add_marker(&mut self, position: LatLng, icon: IconSpec) -> u64 {
        let handle = self.allocate_handle();
        self.markers.insert(
            handle,
            MarkerRecord {
                position,
                icon,
                popup_html: None,
                popup_open: false,
            },
        );
        handle
    }

    fn remove_marker(&mut self, handle: u64) {
        self.markers.remove(&handle);
    }

    fn bind_popup(&mut self, handle: u64, html: &str) {
        if let Some(marker) = self.markers.get_mut(&handle) {
            marker.popup_html = Some(html.to_string());
        }
    }

    fn open_popup(&mut self, handle: u64) {
        if let Some(marker) = self.markers.get_mut(&handle) {
            marker.popup_open = true;
        }
    }

    fn add_circle(&mut self, center: LatLng, radius_m: f64, style: CircleStyle) -> u64 {
        let handle = self.allocate_handle();
        self.circles.insert(
            handle,
            OverlayRecord {
                center,
                radius_m,
                style,
            },
        );
        handle
    }

    fn remove_circle(&mut self, handle: u64) {
        self.circles.remove(&handle);
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryMap;
    use crate::map::{LatLng, MapCapability, SELECTION_ICON};

    #[test]
    fn handles_are_not_reused() {
        let mut map = MemoryMap::new();
        let first = map.add_marker(LatLng::new(1.0, 2.0), SELECTION_ICON);
        map.remove_marker(first);
        let second = map.add_marker(LatLng::new(3.0, 4.0), SELECTION_ICON);
        assert_ne!(first, second);
        assert_eq!(map.marker_count(), 1);
    }
}
