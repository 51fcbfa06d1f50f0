//! Map synchronization layer.
//!
//! # Responsibility
//! - Keep the map widget's markers mirroring the POI collection.
//!
//! # Invariants
//! - Exactly one marker handle per POI `id`, except during the brief window
//!   of an in-progress add/edit/delete.

pub mod marker_sync;
