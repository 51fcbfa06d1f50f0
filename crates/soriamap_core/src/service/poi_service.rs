//! Application facade for the POI map.
//!
//! # Responsibility
//! - Own repository, persistence, marker index, map and geolocation state
//!   as one unit passed into UI handlers.
//! - Orchestrate every mutation as explicit sequential steps: repository
//!   change, persistence write, marker sync update.
//!
//! # Invariants
//! - The marker index mirrors the collection after every completed
//!   operation.
//! - Failed validation leaves repository, store and markers untouched.

use super::import_export::{
    export_filename, parse_import_document, ExportDocument, ImportDisposition, ImportError,
    ImportOutcome,
};
use crate::geo::controller::{
    ButtonState, DeferredAction, GeoFailure, GeoFix, GeoOptions, GeoStatus,
    GeolocationCapability, GeolocationController, LocateOutcome,
};
use crate::map::{
    LatLng, MapCapability, INITIAL_ZOOM, SELECTION_ICON, SORIA_BOUNDS, SORIA_CENTER,
};
use crate::model::poi::{Category, CategoryFilter, Poi, PoiValidationError};
use crate::repo::poi_repo::{NewPoi, PoiRepository};
use crate::store::{KeyValueStore, PoiStore, StoreError, StoreResult};
use crate::sync::marker_sync::MarkerSync;
use crate::view::list::{build_rows, render_list_html, PoiListRow};
use chrono::Utc;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Facade-level error for user-triggered operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Input validation failed; no state changed.
    Validation(PoiValidationError),
    /// A POI add was confirmed without a selected map location.
    NoSelection,
    /// Export requested on an empty collection.
    EmptyExport,
    Import(ImportError),
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NoSelection => write!(f, "no location selected on the map"),
            Self::EmptyExport => write!(f, "poi collection is empty, nothing to export"),
            Self::Import(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NoSelection => None,
            Self::EmptyExport => None,
            Self::Import(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<PoiValidationError> for ServiceError {
    fn from(value: PoiValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ImportError> for ServiceError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Form input confirming a POI at the selected location.
#[derive(Debug, Clone)]
pub struct AddPoiRequest {
    pub name: String,
    pub description: String,
    pub category: Category,
}

/// Edit input for an existing POI. `None` fields stay unchanged.
#[derive(Debug, Clone, Default)]
pub struct EditPoiRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug)]
struct Selection<H> {
    location: LatLng,
    marker: H,
}

/// Application-state owner for the POI map session.
pub struct PoiApp<S: KeyValueStore, M: MapCapability> {
    repo: PoiRepository,
    store: PoiStore<S>,
    markers: MarkerSync<M::Handle>,
    map: M,
    selection: Option<Selection<M::Handle>>,
    geo: GeolocationController<M>,
}

impl<S: KeyValueStore, M: MapCapability> PoiApp<S, M> {
    /// Boots the session: configures the viewport, loads the persisted
    /// collection and mirrors it onto the map.
    pub fn bootstrap(store: S, mut map: M) -> StoreResult<Self> {
        map.set_view(SORIA_CENTER, INITIAL_ZOOM);
        map.set_max_bounds(Some(SORIA_BOUNDS));

        let store = PoiStore::new(store);
        let pois = store.load()?;

        let mut markers = MarkerSync::new();
        for poi in &pois {
            markers.add(&mut map, poi);
        }
        info!(
            "event=app_bootstrap module=service status=ok count={}",
            pois.len()
        );

        Ok(Self {
            repo: PoiRepository::from_pois(pois),
            store,
            markers,
            map,
            selection: None,
            geo: GeolocationController::new(),
        })
    }

    pub fn pois(&self) -> &[Poi] {
        self.repo.pois()
    }

    pub fn find_poi(&self, id: &str) -> Option<&Poi> {
        self.repo.find(id)
    }

    pub fn markers(&self) -> &MarkerSync<M::Handle> {
        &self.markers
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    // ----- selection flow ---------------------------------------------------

    /// Handles a map click: holds the clicked location as the pending
    /// selection and drops a translucent placeholder marker, replacing any
    /// previous one.
    pub fn select_location(&mut self, lat: f64, lng: f64) -> LatLng {
        if let Some(previous) = self.selection.take() {
            self.map.remove_marker(previous.marker);
        }

        let location = LatLng::new(lat, lng);
        let marker = self.map.add_marker(location, SELECTION_ICON);
        self.selection = Some(Selection { location, marker });
        location
    }

    /// Clears the pending selection and its placeholder marker.
    pub fn cancel_selection(&mut self) {
        if let Some(selection) = self.selection.take() {
            self.map.remove_marker(selection.marker);
        }
    }

    pub fn selected_location(&self) -> Option<LatLng> {
        self.selection.as_ref().map(|selection| selection.location)
    }

    // ----- CRUD -------------------------------------------------------------

    /// Confirms the add form for the selected location.
    ///
    /// # Contract
    /// - Steps run in order: create, persist, marker, selection cleanup.
    /// - On validation failure the selection stays, so the user can retry.
    ///
    /// # Errors
    /// - [`ServiceError::NoSelection`] without a pending selection.
    /// - [`ServiceError::Validation`] for a blank name.
    pub fn add_poi(&mut self, request: AddPoiRequest) -> ServiceResult<Poi> {
        let Some(selection) = self.selection.as_ref() else {
            return Err(ServiceError::NoSelection);
        };
        let location = selection.location;

        let poi = self.repo.create(NewPoi {
            name: request.name,
            description: request.description,
            category: request.category,
            lat: location.lat,
            lng: location.lng,
        })?;

        self.store.save(self.repo.pois())?;
        self.markers.add(&mut self.map, &poi);
        self.cancel_selection();
        Ok(poi)
    }

    /// Edits name/description of an existing POI.
    ///
    /// Returns `Ok(None)` for an unknown `id` (silent no-op). After a real
    /// update the record is re-persisted and its marker replaced so the
    /// popup shows the new content.
    pub fn edit_poi(&mut self, id: &str, request: EditPoiRequest) -> ServiceResult<Option<Poi>> {
        let Some(poi) = self.repo.update(
            id,
            request.name.as_deref(),
            request.description.as_deref(),
        ) else {
            return Ok(None);
        };

        self.store.save(self.repo.pois())?;
        self.markers.replace(&mut self.map, &poi);
        Ok(Some(poi))
    }

    /// Deletes a POI. Unknown `id` is a silent no-op (`Ok(false)`).
    pub fn remove_poi(&mut self, id: &str) -> ServiceResult<bool> {
        if self.repo.delete(id).is_none() {
            return Ok(false);
        }

        self.store.save(self.repo.pois())?;
        self.markers.remove(&mut self.map, id);
        Ok(true)
    }

    /// Centres the map on a POI and opens its popup. Unknown ids no-op.
    pub fn focus_poi(&mut self, id: &str) {
        if let Some(poi) = self.repo.find(id) {
            self.markers.focus(&mut self.map, poi);
        }
    }

    // ----- list/view --------------------------------------------------------

    /// Filtered, newest-first slice of the collection.
    pub fn filter(&self, search_term: &str, category: CategoryFilter) -> Vec<&Poi> {
        self.repo.filter(search_term, category)
    }

    /// Display rows for the sidebar list.
    pub fn list_rows(&self, search_term: &str, category: CategoryFilter) -> Vec<PoiListRow> {
        build_rows(&self.filter(search_term, category))
    }

    /// Rendered sidebar list markup.
    pub fn render_list(&self, search_term: &str, category: CategoryFilter) -> String {
        render_list_html(&self.list_rows(search_term, category))
    }

    // ----- import/export ----------------------------------------------------

    /// Serializes the collection as a dated downloadable document.
    ///
    /// # Errors
    /// - [`ServiceError::EmptyExport`] when there is nothing to export;
    ///   the host shows this as a warning, not a failure.
    pub fn export(&self) -> ServiceResult<ExportDocument> {
        if self.repo.is_empty() {
            warn!("event=poi_export module=service status=empty");
            return Err(ServiceError::EmptyExport);
        }

        let json = serde_json::to_string_pretty(self.repo.pois())
            .map_err(|err| ServiceError::Store(StoreError::Serialize(err)))?;
        let filename = export_filename(Utc::now().date_naive());
        info!(
            "event=poi_export module=service status=ok count={}",
            self.repo.len()
        );
        Ok(ExportDocument { filename, json })
    }

    /// Applies an uploaded document with the chosen disposition.
    ///
    /// # Contract
    /// - Parse and validation failures abort before any state change.
    /// - Merge skips duplicate ids silently; replace rebuilds everything.
    /// - The collection is persisted once after application.
    pub fn import(
        &mut self,
        document: &str,
        disposition: ImportDisposition,
    ) -> ServiceResult<ImportOutcome> {
        let incoming = parse_import_document(document)?;
        let input_count = incoming.len();

        let applied_count = match disposition {
            ImportDisposition::Merge => {
                let applied = self.repo.import_merge(incoming);
                for poi in &applied {
                    self.markers.add(&mut self.map, poi);
                }
                applied.len()
            }
            ImportDisposition::Replace => {
                self.markers.clear(&mut self.map);
                self.repo.import_replace(incoming);
                for poi in self.repo.pois() {
                    self.markers.add(&mut self.map, poi);
                }
                self.repo.len()
            }
        };

        self.store.save(self.repo.pois())?;
        Ok(ImportOutcome {
            input_count,
            applied_count,
        })
    }

    // ----- geolocation ------------------------------------------------------

    /// Runs a full locate round-trip against a blocking capability.
    pub fn locate<G: GeolocationCapability>(
        &mut self,
        geolocation: &mut G,
        options: &GeoOptions,
    ) -> LocateOutcome {
        self.geo.locate(geolocation, &mut self.map, options)
    }

    /// Enters the requesting state; `None` when a request is in flight.
    pub fn begin_locate(&mut self) -> Option<GeoStatus> {
        self.geo.begin()
    }

    /// Capability success callback.
    pub fn locate_succeeded(&mut self, fix: GeoFix) -> (GeoStatus, DeferredAction) {
        self.geo.succeed(&mut self.map, fix)
    }

    /// Capability error callback.
    pub fn locate_failed(&mut self, reason: GeoFailure) -> GeoStatus {
        self.geo.fail(reason)
    }

    /// Host-scheduled bounds restoration after a successful fix.
    pub fn restore_bounds(&mut self) {
        self.geo.restore_bounds(&mut self.map);
    }

    pub fn geo_button_state(&self) -> ButtonState {
        self.geo.button_state()
    }
}
