//! POI list rendering.
//!
//! # Responsibility
//! - Project filtered repository results into display rows.
//! - Render the sidebar list markup, including the empty state.
//!
//! # Invariants
//! - Rows preserve the order the repository filter produced (newest first).
//! - User text is escaped before interpolation.

use super::escape_html;
use crate::model::poi::{Category, Poi};

/// Message shown when a filter yields no results.
pub const EMPTY_LIST_MESSAGE: &str = "No se encontraron puntos de interés";

/// One display row of the sidebar list.
#[derive(Debug, Clone, PartialEq)]
pub struct PoiListRow {
    pub id: String,
    pub glyph: &'static str,
    pub name: String,
    pub category: Category,
    /// `None` when the POI has no description text.
    pub description: Option<String>,
    /// Localized `DD/MM/YYYY` creation date.
    pub display_date: String,
}

impl PoiListRow {
    fn from_poi(poi: &Poi) -> Self {
        Self {
            id: poi.id.clone(),
            glyph: poi.category.glyph(),
            name: poi.name.clone(),
            category: poi.category,
            description: if poi.description.is_empty() {
                None
            } else {
                Some(poi.description.clone())
            },
            display_date: poi.display_date(),
        }
    }
}

/// Projects filtered POIs into list rows, preserving their order.
pub fn build_rows(pois: &[&Poi]) -> Vec<PoiListRow> {
    pois.iter().map(|poi| PoiListRow::from_poi(poi)).collect()
}

/// Renders the sidebar list markup for the given rows.
pub fn render_list_html(rows: &[PoiListRow]) -> String {
    if rows.is_empty() {
        return format!(r#"<p class="empty-message">{EMPTY_LIST_MESSAGE}</p>"#);
    }

    let mut html = String::new();
    for row in rows {
        let name = escape_html(&row.name);
        let category = row.category.token();
        let description = row
            .description
            .as_deref()
            .map(|text| format!(r#"<div class="poi-item-description">{}</div>"#, escape_html(text)))
            .unwrap_or_default();

        html.push_str(&format!(
            concat!(
                r#"<div class="poi-item" data-poi-id="{id}">"#,
                r#"<div class="poi-item-header">"#,
                r#"<span class="poi-item-name">{glyph} {name}</span>"#,
                r#"<span class="poi-category {category}">{category}</span>"#,
                r#"</div>"#,
                "{description}",
                r#"<div class="poi-item-footer"><span>{date}</span></div>"#,
                r#"</div>"#
            ),
            id = escape_html(&row.id),
            glyph = row.glyph,
            name = name,
            category = category,
            description = description,
            date = escape_html(&row.display_date),
        ));
    }
    html
}
