//! Domain model for map annotation points.
//!
//! # Responsibility
//! - Define the canonical POI record shared by persistence, marker sync and
//!   list rendering.
//!
//! # Invariants
//! - Every POI carries a category from the fixed enumerated set.
//! - `id` is treated as unique within one collection.

pub mod poi;
