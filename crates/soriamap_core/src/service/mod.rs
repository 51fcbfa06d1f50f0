//! Use-case orchestration layer.
//!
//! # Responsibility
//! - Own the application state (repository, persistence, marker index,
//!   map and geolocation controller) behind one facade.
//! - Keep the mutation order explicit: repository change, persistence
//!   write, marker sync update, then view refresh data for the host.

pub mod import_export;
pub mod poi_service;
