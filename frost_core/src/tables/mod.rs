//! # Property Tables
//!
//! Static reference data every calculator draws on: pipe schedule
//! dimensions, pipe material allowable stresses, refrigerant saturation
//! curves, relief-valve capacity catalogs, and support tables.
//!
//! All tables are loaded once (constants or `once_cell` statics) and are
//! immutable thereafter, so concurrent readers need no synchronization.
//! Lookups are keyed by domain identifiers (material, refrigerant, nominal
//! pipe size, manufacturer + model); a missing key surfaces as
//! [`crate::errors::CalcError::LookupMiss`] with the key that missed.

pub mod materials;
pub mod pipe;
pub mod refrigerants;
pub mod supports;
pub mod valves;

// Re-export the identifiers calculators key on
pub use materials::PipeMaterial;
pub use pipe::{NominalPipeSize, Schedule};
pub use refrigerants::{Refrigerant, SaturationPoint};
pub use valves::{Manufacturer, ReliefValve, ThreeWayValve};
