//! # Refrigeration Calculations
//!
//! This module contains all sizing calculation types. Each calculation
//! follows the pattern:
//!
//! - `*Spec` / `*Case` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `compute_*`/`size_*(spec) -> Result<*Result, CalcError>` - Pure function
//!
//! ## LLM Integration
//!
//! All types are designed for LLM consumption:
//! - Comprehensive rustdoc with examples
//! - Clean JSON serialization
//! - Structured error responses
//!
//! ## Available Calculations
//!
//! - [`room_load`] - Cold-storage room refrigeration load
//! - [`pipe_stress`] - Hoop stress and branch reinforcement (ASME B31.5)
//! - [`srv`] - Safety relief valve sizing (IIAR 2 / ASHRAE 15 / CMC)
//! - [`riser`] - Vertical suction riser sizing
//! - [`supports`] - Pipe line weight and support layout
//! - [`utilities`] - Underfloor warming, sump volume, nitrogen purge

pub mod pipe_stress;
pub mod riser;
pub mod room_load;
pub mod srv;
pub mod supports;
pub mod utilities;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use pipe_stress::{compute_pipe_stress, PipeSpec, StressResult};
pub use riser::{size_riser, RiserResult, RiserSpec};
pub use room_load::{compute_room_load, LoadResult, RoomSpec};
pub use srv::{size_srv, SRVCase, SRVResult};
pub use supports::{size_supports, SupportResult, SupportSpec};
pub use utilities::{
    size_purge, size_sump, size_underfloor_warming, PurgeResult, PurgeSpec, SumpResult, SumpSpec,
    UnderfloorResult, UnderfloorSpec,
};

/// Enum wrapper for all calculation types.
///
/// This allows storing heterogeneous calculations in a single collection
/// while maintaining type safety and clean serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Cold-storage room load calculation
    RoomLoad(RoomSpec),
    /// Pipe stress and branch reinforcement check
    PipeStress(PipeSpec),
    /// Safety relief valve sizing case
    ReliefValve(SRVCase),
    /// Vertical suction riser sizing
    Riser(RiserSpec),
    /// Pipe support layout
    PipeSupports(SupportSpec),
    /// Underfloor warming loop
    UnderfloorWarming(UnderfloorSpec),
    /// Evaporative condenser sump
    SumpVolume(SumpSpec),
    /// Nitrogen purge gas
    NitrogenPurge(PurgeSpec),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::RoomLoad(s) => &s.label,
            CalculationItem::PipeStress(s) => &s.label,
            CalculationItem::ReliefValve(s) => &s.label,
            CalculationItem::Riser(s) => &s.label,
            CalculationItem::PipeSupports(s) => &s.label,
            CalculationItem::UnderfloorWarming(s) => &s.label,
            CalculationItem::SumpVolume(s) => &s.label,
            CalculationItem::NitrogenPurge(s) => &s.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::RoomLoad(_) => "Room Load",
            CalculationItem::PipeStress(_) => "Pipe Stress",
            CalculationItem::ReliefValve(_) => "Relief Valve",
            CalculationItem::Riser(_) => "Suction Riser",
            CalculationItem::PipeSupports(_) => "Pipe Supports",
            CalculationItem::UnderfloorWarming(_) => "Underfloor Warming",
            CalculationItem::SumpVolume(_) => "Sump Volume",
            CalculationItem::NitrogenPurge(_) => "Nitrogen Purge",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_accessors() {
        let item = CalculationItem::RoomLoad(RoomSpec {
            label: "Freezer F-1".to_string(),
            ..RoomSpec::default()
        });
        assert_eq!(item.label(), "Freezer F-1");
        assert_eq!(item.calc_type(), "Room Load");
    }

    #[test]
    fn test_item_serialization_tagged() {
        let item = CalculationItem::ReliefValve(SRVCase::default());
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"type\":\"ReliefValve\""));
        let roundtrip: CalculationItem = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.calc_type(), "Relief Valve");
    }

    #[test]
    fn test_heterogeneous_list() {
        let items = vec![
            CalculationItem::RoomLoad(RoomSpec::default()),
            CalculationItem::Riser(RiserSpec::default()),
            CalculationItem::NitrogenPurge(PurgeSpec::default()),
        ];
        let json = serde_json::to_string(&items).unwrap();
        let roundtrip: Vec<CalculationItem> = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.len(), 3);
        assert_eq!(roundtrip[1].calc_type(), "Suction Riser");
    }
}
