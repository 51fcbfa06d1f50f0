//! Core domain logic for the Soria map POI annotation tool.
//! This crate is the single source of truth for business invariants.

pub mod geo;
pub mod logging;
pub mod map;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod sync;
pub mod view;

pub use geo::controller::{
    ButtonState, DeferredAction, GeoFailure, GeoFix, GeoOptions, GeoStatus,
    GeolocationCapability, GeolocationController, LocateOutcome, StatusKind,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use map::{
    Bounds, CircleStyle, IconSpec, LatLng, MapCapability, MemoryMap, FOCUS_ZOOM, INITIAL_ZOOM,
    SORIA_BOUNDS, SORIA_CENTER,
};
pub use model::poi::{Category, CategoryFilter, Poi, PoiValidationError};
pub use repo::poi_repo::{InvalidImportRecord, NewPoi, PoiRepository};
pub use service::import_export::{
    ExportDocument, ImportDisposition, ImportError, ImportOutcome,
};
pub use service::poi_service::{
    AddPoiRequest, EditPoiRequest, PoiApp, ServiceError, ServiceResult,
};
pub use store::{
    KeyValueStore, MemoryKeyValueStore, PoiStore, SqliteKeyValueStore, StoreError, StoreResult,
    POI_STORAGE_KEY,
};
pub use sync::marker_sync::MarkerSync;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
