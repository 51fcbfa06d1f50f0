//! POI collection persistence on top of the key-value capability.
//!
//! # Responsibility
//! - Serialize the whole collection as one JSON document under one key.
//! - Recover from absent or corrupt stored documents as "no data".
//!
//! # Invariants
//! - `save` always writes the complete serialized collection.
//! - `load` never fails on corrupt data; corruption is logged and an empty
//!   collection is returned.

use super::{KeyValueStore, StoreError, StoreResult};
use crate::model::poi::Poi;
use log::{info, warn};

/// Storage key holding the serialized POI collection.
pub const POI_STORAGE_KEY: &str = "soria-pois";

/// JSON document codec for the POI collection.
pub struct PoiStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PoiStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads the persisted collection.
    ///
    /// # Contract
    /// - Absent key -> empty collection.
    /// - Unparseable document -> empty collection, logged as corrupt.
    ///
    /// # Errors
    /// - Only transport errors from the underlying store propagate.
    pub fn load(&self) -> StoreResult<Vec<Poi>> {
        let Some(text) = self.store.get(POI_STORAGE_KEY)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Poi>>(&text) {
            Ok(pois) => {
                info!(
                    "event=poi_load module=store status=ok count={}",
                    pois.len()
                );
                Ok(pois)
            }
            Err(err) => {
                warn!("event=poi_load module=store status=corrupt error={err}");
                Ok(Vec::new())
            }
        }
    }

    /// Overwrites the persisted collection with `pois`.
    pub fn save(&mut self, pois: &[Poi]) -> StoreResult<()> {
        let document = serde_json::to_string(pois).map_err(StoreError::Serialize)?;
        self.store.set(POI_STORAGE_KEY, &document)?;
        info!(
            "event=poi_save module=store status=ok count={}",
            pois.len()
        );
        Ok(())
    }
}
