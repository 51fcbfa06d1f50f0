//! Repository layer: authoritative in-memory POI collection.
//!
//! # Responsibility
//! - Own the POI collection for the session.
//! - Provide CRUD, filter/sort and import merge/replace operations.
//!
//! # Invariants
//! - Persistence and marker creation are explicit caller-side steps, never
//!   hidden side effects of repository mutations.
//! - Import applies all-or-nothing: one invalid record aborts the import
//!   with no partial state change.

pub mod poi_repo;
