//! POI repository.
//!
//! # Responsibility
//! - CRUD over the in-memory collection.
//! - Case-insensitive search with category restriction, newest-first.
//! - Validation and merge/replace application for imported collections.
//!
//! # Invariants
//! - `id` is unique within the collection after import dedup; regular
//!   creation trusts the epoch-millisecond id without an active check.
//! - `filter` sorting is stable: equal dates keep insertion order.

use crate::model::poi::{Category, CategoryFilter, Poi, PoiValidationError};
use log::info;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Creation request for a new POI.
#[derive(Debug, Clone)]
pub struct NewPoi {
    pub name: String,
    pub description: String,
    pub category: Category,
    pub lat: f64,
    pub lng: f64,
}

/// Import failure: one invalid record aborts the whole document.
#[derive(Debug)]
pub struct InvalidImportRecord {
    /// Zero-based position of the offending record in the document.
    pub index: usize,
    pub source: PoiValidationError,
}

impl Display for InvalidImportRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid import record at index {}: {}", self.index, self.source)
    }
}

impl Error for InvalidImportRecord {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Authoritative owner of the session's POI collection.
#[derive(Debug, Default)]
pub struct PoiRepository {
    pois: Vec<Poi>,
}

impl PoiRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository from a previously persisted collection.
    pub fn from_pois(pois: Vec<Poi>) -> Self {
        Self { pois }
    }

    /// The full collection in insertion order.
    pub fn pois(&self) -> &[Poi] {
        &self.pois
    }

    pub fn len(&self) -> usize {
        self.pois.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pois.is_empty()
    }

    /// Creates a POI and appends it to the collection.
    ///
    /// # Contract
    /// - Fails when `name` trims to empty; nothing is appended then.
    /// - `id` and `date` are generated here.
    /// - Persisting and marker creation are the caller's next steps.
    ///
    /// # Errors
    /// - [`PoiValidationError::EmptyName`] for a blank name.
    pub fn create(&mut self, request: NewPoi) -> Result<Poi, PoiValidationError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(PoiValidationError::EmptyName);
        }

        let poi = Poi::new(
            name,
            request.description.trim(),
            request.category,
            request.lat,
            request.lng,
        );
        info!(
            "event=poi_create module=repo status=ok id={} category={}",
            poi.id, poi.category
        );
        self.pois.push(poi.clone());
        Ok(poi)
    }

    /// Updates name and/or description of an existing POI in place.
    ///
    /// # Contract
    /// - Unknown `id` is a silent no-op (`None`).
    /// - A provided name that trims to empty skips the name update; the
    ///   description may still update in the same call.
    /// - Returns the updated record so the caller can re-persist and
    ///   replace the marker.
    pub fn update(
        &mut self,
        id: &str,
        new_name: Option<&str>,
        new_description: Option<&str>,
    ) -> Option<Poi> {
        let poi = self.pois.iter_mut().find(|poi| poi.id == id)?;

        if let Some(name) = new_name {
            let name = name.trim();
            if !name.is_empty() {
                poi.name = name.to_string();
            }
        }
        if let Some(description) = new_description {
            poi.description = description.trim().to_string();
        }

        info!("event=poi_update module=repo status=ok id={id}");
        Some(poi.clone())
    }

    /// Removes a POI. Unknown `id` is a silent no-op (`None`).
    pub fn delete(&mut self, id: &str) -> Option<Poi> {
        let position = self.pois.iter().position(|poi| poi.id == id)?;
        let removed = self.pois.remove(position);
        info!("event=poi_delete module=repo status=ok id={id}");
        Some(removed)
    }

    pub fn find(&self, id: &str) -> Option<&Poi> {
        self.pois.iter().find(|poi| poi.id == id)
    }

    /// Filters and sorts the collection for display.
    ///
    /// # Contract
    /// - `search_term` matches case-insensitively against name OR
    ///   description; an empty term matches everything.
    /// - Result is sorted by creation date descending; ties keep the
    ///   original insertion order.
    pub fn filter(&self, search_term: &str, category: CategoryFilter) -> Vec<&Poi> {
        let needle = search_term.trim().to_lowercase();

        let mut matches: Vec<&Poi> = self
            .pois
            .iter()
            .filter(|poi| {
                let matches_search = needle.is_empty()
                    || poi.name.to_lowercase().contains(&needle)
                    || poi.description.to_lowercase().contains(&needle);
                matches_search && category.matches(poi.category)
            })
            .collect();

        matches.sort_by_key(|poi| std::cmp::Reverse(poi.created_at_millis()));
        matches
    }

    /// Validates a decoded import document.
    ///
    /// # Errors
    /// - [`InvalidImportRecord`] for the first record failing
    ///   [`Poi::validate`]; the import must then be abandoned wholesale.
    pub fn validate_import(records: &[Poi]) -> Result<(), InvalidImportRecord> {
        for (index, record) in records.iter().enumerate() {
            record
                .validate()
                .map_err(|source| InvalidImportRecord { index, source })?;
        }
        Ok(())
    }

    /// Merges an imported collection into the current one.
    ///
    /// # Contract
    /// - Records whose `id` already exists are silently skipped, never
    ///   overwritten.
    /// - Returns the records actually appended so the caller can create
    ///   their markers.
    pub fn import_merge(&mut self, incoming: Vec<Poi>) -> Vec<Poi> {
        let existing: HashSet<String> = self.pois.iter().map(|poi| poi.id.clone()).collect();

        let mut applied = Vec::new();
        for record in incoming {
            if existing.contains(&record.id) {
                continue;
            }
            self.pois.push(record.clone());
            applied.push(record);
        }

        info!(
            "event=poi_import module=repo status=ok mode=merge applied={} total={}",
            applied.len(),
            self.pois.len()
        );
        applied
    }

    /// Replaces the whole collection with an imported one.
    pub fn import_replace(&mut self, incoming: Vec<Poi>) {
        self.pois = incoming;
        info!(
            "event=poi_import module=repo status=ok mode=replace total={}",
            self.pois.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{NewPoi, PoiRepository};
    use crate::model::poi::{Category, CategoryFilter, Poi, PoiValidationError};

    fn request(name: &str) -> NewPoi {
        NewPoi {
            name: name.to_string(),
            description: String::new(),
            category: Category::Other,
            lat: 41.7,
            lng: -2.4,
        }
    }

    #[test]
    fn create_trims_and_rejects_blank_name() {
        let mut repo = PoiRepository::new();
        let err = repo.create(request("   ")).unwrap_err();
        assert_eq!(err, PoiValidationError::EmptyName);
        assert!(repo.is_empty());

        let poi = repo.create(request("  Plaza Mayor  ")).unwrap();
        assert_eq!(poi.name, "Plaza Mayor");
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn update_skips_blank_name_but_updates_description() {
        let mut repo = PoiRepository::new();
        let poi = repo.create(request("Original")).unwrap();

        let updated = repo
            .update(&poi.id, Some("   "), Some("nueva descripción"))
            .unwrap();
        assert_eq!(updated.name, "Original");
        assert_eq!(updated.description, "nueva descripción");
    }

    #[test]
    fn update_and_delete_unknown_id_are_noops() {
        let mut repo = PoiRepository::new();
        repo.create(request("kept")).unwrap();

        assert!(repo.update("missing", Some("x"), None).is_none());
        assert!(repo.delete("missing").is_none());
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn merge_skips_duplicate_ids() {
        let mut repo = PoiRepository::new();
        repo.import_replace(vec![Poi::with_id(
            "x",
            "2025-01-01T00:00:00.000Z",
            "B",
            "",
            Category::Other,
            1.0,
            1.0,
        )]);

        let applied = repo.import_merge(vec![
            Poi::with_id("x", "2025-01-02T00:00:00.000Z", "A", "", Category::Other, 1.0, 1.0),
            Poi::with_id("y", "2025-01-03T00:00:00.000Z", "C", "", Category::Signal, 2.0, 2.0),
        ]);

        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].id, "y");
        assert_eq!(repo.find("x").unwrap().name, "B");
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn filter_is_stable_for_equal_dates() {
        let mut repo = PoiRepository::new();
        repo.import_replace(vec![
            Poi::with_id("1", "2025-05-01T00:00:00.000Z", "first", "", Category::Other, 1.0, 1.0),
            Poi::with_id("2", "2025-05-01T00:00:00.000Z", "second", "", Category::Other, 1.0, 1.0),
            Poi::with_id("3", "2025-05-02T00:00:00.000Z", "third", "", Category::Other, 1.0, 1.0),
        ]);

        let ordered: Vec<&str> = repo
            .filter("", CategoryFilter::All)
            .into_iter()
            .map(|poi| poi.id.as_str())
            .collect();
        assert_eq!(ordered, vec!["3", "1", "2"]);
    }
}
