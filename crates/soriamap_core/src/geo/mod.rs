//! Geolocation boundary.
//!
//! # Responsibility
//! - Define the one-shot position capability and the controller driving it.
//!
//! # Invariants
//! - Exactly one of success/failure concludes a request; a second request
//!   while one is in flight is dropped, not queued.

pub mod controller;
