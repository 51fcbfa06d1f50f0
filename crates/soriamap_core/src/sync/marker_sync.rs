//! POI marker index and popup content.
//!
//! # Responsibility
//! - Maintain the explicit `id -> handle` mapping between POI records and
//!   map marker handles.
//! - Build popup markup from record fields.
//!
//! # Invariants
//! - Never two handles for the same `id`: adding over an existing id
//!   replaces the old marker first.
//! - Removal of an unknown `id` is a no-op.

use crate::map::{IconSpec, LatLng, MapCapability, FOCUS_ZOOM};
use crate::model::poi::Poi;
use crate::view::escape_html;
use std::collections::HashMap;

/// Derived, non-owning index from POI `id` to map marker handle.
///
/// The repository owns the records; this index must be kept consistent by
/// every mutation path.
#[derive(Debug, Default)]
pub struct MarkerSync<H> {
    index: HashMap<String, H>,
}

impl<H: Copy + PartialEq + std::fmt::Debug> MarkerSync<H> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn handle(&self, id: &str) -> Option<H> {
        self.index.get(id).copied()
    }

    /// Places a marker for `poi` and records its handle.
    ///
    /// An existing marker for the same `id` is removed first, so the index
    /// never holds duplicates.
    pub fn add<M: MapCapability<Handle = H>>(&mut self, map: &mut M, poi: &Poi) {
        if let Some(old) = self.index.remove(&poi.id) {
            map.remove_marker(old);
        }

        let handle = map.add_marker(
            LatLng::new(poi.lat, poi.lng),
            IconSpec::for_category(poi.category),
        );
        map.bind_popup(handle, &popup_html(poi));
        self.index.insert(poi.id.clone(), handle);
    }

    /// Removes the marker for `id`. Unknown ids are a no-op.
    pub fn remove<M: MapCapability<Handle = H>>(&mut self, map: &mut M, id: &str) -> bool {
        match self.index.remove(id) {
            Some(handle) => {
                map.remove_marker(handle);
                true
            }
            None => false,
        }
    }

    /// Re-creates the marker for an edited POI so its popup content is
    /// rebuilt (the widget has no in-place popup update contract).
    pub fn replace<M: MapCapability<Handle = H>>(&mut self, map: &mut M, poi: &Poi) {
        self.remove(map, &poi.id);
        self.add(map, poi);
    }

    /// Centres the map on `poi` and opens its popup.
    pub fn focus<M: MapCapability<Handle = H>>(&mut self, map: &mut M, poi: &Poi) {
        map.set_view(LatLng::new(poi.lat, poi.lng), FOCUS_ZOOM);
        if let Some(handle) = self.index.get(&poi.id) {
            map.open_popup(*handle);
        }
    }

    /// Removes every marker, for the import-replace path.
    pub fn clear<M: MapCapability<Handle = H>>(&mut self, map: &mut M) {
        for (_, handle) in self.index.drain() {
            map.remove_marker(handle);
        }
    }
}

/// Builds the popup markup for one POI.
///
/// Mirrors the sidebar card: coloured name heading, optional description,
/// category and localized date rows. User text is escaped.
pub fn popup_html(poi: &Poi) -> String {
    let name = escape_html(&poi.name);
    let color = poi.category.color();
    let description = if poi.description.is_empty() {
        String::new()
    } else {
        format!(
            "<p><strong>Descripción:</strong> {}</p>",
            escape_html(&poi.description)
        )
    };

    format!(
        concat!(
            r#"<div class="poi-popup">"#,
            r#"<h3 style="color: {color};">{name}</h3>"#,
            "{description}",
            "<p><strong>Categoría:</strong> {category}</p>",
            r#"<p class="poi-popup-date">{date}</p>"#,
            "</div>"
        ),
        color = color,
        name = name,
        description = description,
        category = poi.category.token(),
        date = escape_html(&poi.display_date()),
    )
}
