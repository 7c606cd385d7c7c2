//! Constants and spherical math shared by the celestial crates.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`constants`] | Angle unit conversions (π, degrees ↔ radians) |
//! | [`math`] | Great-circle separation ([`angular_separation_deg`](math::angular_separation_deg)) |
//!
//! All functions here are pure and allocation-free, so they can be called
//! from any number of worker threads without synchronization.

pub mod constants;
pub mod math;

pub use math::{angular_separation_deg, vincenty_angular_separation};
