//! # frost_core - Industrial Refrigeration Calculation Engine
//!
//! `frost_core` is the computational heart of Frostline, providing
//! code-compliant industrial refrigeration sizing with a clean, LLM-friendly
//! API. All inputs and outputs are JSON-serializable, making it ideal for
//! integration with AI assistants via MCP or similar protocols.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Flags, not failures**: Code-limit violations ride inside results
//!
//! ## Quick Start
//!
//! ```rust
//! use frost_core::calculations::room_load::{compute_room_load, RoomSpec};
//!
//! let spec = RoomSpec::default();
//! let result = compute_room_load(&spec).unwrap();
//!
//! // Serialize to JSON for storage or transmission
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - All sizing calculation types (room load, pipe
//!   stress, relief valves, risers, supports, utilities)
//! - [`tables`] - Static property tables (pipe, materials, refrigerants,
//!   valve catalogs, support spans)
//! - [`hydraulics`] - Shared friction-factor and pressure-drop machinery
//! - [`compliance`] - Compliance flags and code section references
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod compliance;
pub mod errors;
pub mod hydraulics;
pub mod tables;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use compliance::{ComplianceFlag, Severity};
pub use errors::{CalcError, CalcResult};
