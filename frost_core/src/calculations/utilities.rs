//! # Facility Utility Sizing
//!
//! Small table-driven calculators that round out a refrigerated-facility
//! design package: underfloor warming for freezer slabs, evaporative
//! condenser sump volume, and nitrogen purge gas for commissioning. Each
//! follows the same validated-spec / immutable-result contract as the core
//! calculators, just with less machinery behind it.

use serde::{Deserialize, Serialize};

use crate::compliance::{code_ref, ComplianceFlag};
use crate::errors::{CalcError, CalcResult};
use crate::units::{ATMOSPHERIC_PSI, GALLONS_PER_CU_FT};

/// Heat carried by a gpm of 30% glycol per degree F (BTU/hr)
const GLYCOL_HEAT_FACTOR: f64 = 470.0;

/// Supply/return split above which slab warming gets uneven
const MAX_GLYCOL_DELTA_T_F: f64 = 15.0;

/// Residual air fraction considered acceptable after purging
const PURGE_RESIDUAL_LIMIT: f64 = 0.01;

// ============================================================================
// Underfloor Warming
// ============================================================================

/// Input parameters for freezer-slab underfloor warming.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Freezer slab",
///   "floor_area_ft2": 10000.0,
///   "heat_flux_btu_hr_ft2": 4.0,
///   "pipe_spacing_in": 12.0,
///   "supply_temp_f": 70.0,
///   "return_temp_f": 60.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnderfloorSpec {
    /// User label for this slab
    pub label: String,

    /// Heated slab area (ft2)
    pub floor_area_ft2: f64,

    /// Design heat input into the slab (BTU/(hr-ft2))
    pub heat_flux_btu_hr_ft2: f64,

    /// Warming-pipe grid spacing (in, center to center)
    pub pipe_spacing_in: f64,

    /// Glycol supply temperature (F)
    pub supply_temp_f: f64,

    /// Glycol return temperature (F)
    pub return_temp_f: f64,
}

impl Default for UnderfloorSpec {
    fn default() -> Self {
        UnderfloorSpec {
            label: "Slab".to_string(),
            floor_area_ft2: 10_000.0,
            heat_flux_btu_hr_ft2: 4.0,
            pipe_spacing_in: 12.0,
            supply_temp_f: 70.0,
            return_temp_f: 60.0,
        }
    }
}

impl UnderfloorSpec {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("floor_area_ft2", self.floor_area_ft2),
            ("heat_flux_btu_hr_ft2", self.heat_flux_btu_hr_ft2),
            ("pipe_spacing_in", self.pipe_spacing_in),
        ] {
            if value <= 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Slab parameter must be positive",
                ));
            }
        }
        if self.supply_temp_f <= self.return_temp_f {
            return Err(CalcError::invalid_input(
                "supply_temp_f",
                self.supply_temp_f.to_string(),
                "Supply temperature must exceed return temperature",
            ));
        }
        Ok(())
    }
}

/// Results from an underfloor warming sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnderfloorResult {
    /// Heat input into the slab (BTU/hr)
    pub heat_input_btu_hr: f64,

    /// Warming pipe length at the grid spacing (ft)
    pub pipe_length_ft: f64,

    /// Glycol circulation flow (gpm)
    pub glycol_flow_gpm: f64,

    /// Flags raised during sizing
    pub flags: Vec<ComplianceFlag>,
}

/// Size the underfloor warming loop for a freezer slab.
///
/// Heat input is flux times area; pipe length is the serpentine run needed
/// to cover the slab at the grid spacing; glycol flow carries the heat
/// across the supply/return split.
pub fn size_underfloor_warming(spec: &UnderfloorSpec) -> CalcResult<UnderfloorResult> {
    spec.validate()?;

    let mut flags = Vec::new();
    let heat_input_btu_hr = spec.heat_flux_btu_hr_ft2 * spec.floor_area_ft2;
    let pipe_length_ft = spec.floor_area_ft2 / (spec.pipe_spacing_in / 12.0);

    let delta_t = spec.supply_temp_f - spec.return_temp_f;
    let glycol_flow_gpm = heat_input_btu_hr / (GLYCOL_HEAT_FACTOR * delta_t);
    if delta_t > MAX_GLYCOL_DELTA_T_F {
        flags.push(ComplianceFlag::warning(
            code_ref::UNDERFLOOR_WARMING,
            format!(
                "Glycol split {:.0} F exceeds {:.0} F; far end of the slab will run cold",
                delta_t, MAX_GLYCOL_DELTA_T_F
            ),
        ));
    }

    Ok(UnderfloorResult {
        heat_input_btu_hr,
        pipe_length_ft,
        glycol_flow_gpm,
        flags,
    })
}

// ============================================================================
// Condenser Sump Volume
// ============================================================================

/// Input parameters for an evaporative condenser sump.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SumpSpec {
    /// User label for this condenser
    pub label: String,

    /// Recirculating spray flow (gpm)
    pub spray_flow_gpm: f64,

    /// Water retention time the sump must hold (min)
    pub retention_min: f64,
}

impl Default for SumpSpec {
    fn default() -> Self {
        SumpSpec {
            label: "EC-1".to_string(),
            spray_flow_gpm: 300.0,
            retention_min: 3.0,
        }
    }
}

impl SumpSpec {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.spray_flow_gpm <= 0.0 {
            return Err(CalcError::invalid_input(
                "spray_flow_gpm",
                self.spray_flow_gpm.to_string(),
                "Spray flow must be positive",
            ));
        }
        if self.retention_min <= 0.0 {
            return Err(CalcError::invalid_input(
                "retention_min",
                self.retention_min.to_string(),
                "Retention time must be positive",
            ));
        }
        Ok(())
    }
}

/// Results from a sump volume sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SumpResult {
    /// Working water volume (gal)
    pub working_volume_gal: f64,

    /// Working water volume (ft3)
    pub working_volume_ft3: f64,

    /// Flags raised during sizing
    pub flags: Vec<ComplianceFlag>,
}

/// Size the working water volume of an evaporative condenser sump.
pub fn size_sump(spec: &SumpSpec) -> CalcResult<SumpResult> {
    spec.validate()?;

    let mut flags = Vec::new();
    let working_volume_gal = spec.spray_flow_gpm * spec.retention_min;
    if spec.retention_min < 2.0 {
        flags.push(ComplianceFlag::warning(
            code_ref::CONDENSER_SUMP,
            format!(
                "Retention time {:.1} min is short; spray pumps may draw the sump down",
                spec.retention_min
            ),
        ));
    }

    Ok(SumpResult {
        working_volume_gal,
        working_volume_ft3: working_volume_gal / GALLONS_PER_CU_FT,
        flags,
    })
}

// ============================================================================
// Nitrogen Purge
// ============================================================================

/// Input parameters for pressure-cycle nitrogen purging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurgeSpec {
    /// User label for the purged section
    pub label: String,

    /// Internal volume of the purged section (ft3)
    pub system_volume_ft3: f64,

    /// Pressurization level each cycle (psig)
    pub purge_pressure_psig: f64,

    /// Number of pressurize-and-vent cycles
    pub cycles: u32,
}

impl Default for PurgeSpec {
    fn default() -> Self {
        PurgeSpec {
            label: "System".to_string(),
            system_volume_ft3: 500.0,
            purge_pressure_psig: 30.0,
            cycles: 3,
        }
    }
}

impl PurgeSpec {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.system_volume_ft3 <= 0.0 {
            return Err(CalcError::invalid_input(
                "system_volume_ft3",
                self.system_volume_ft3.to_string(),
                "System volume must be positive",
            ));
        }
        if self.purge_pressure_psig <= 0.0 {
            return Err(CalcError::invalid_input(
                "purge_pressure_psig",
                self.purge_pressure_psig.to_string(),
                "Purge pressure must be positive",
            ));
        }
        if self.cycles == 0 {
            return Err(CalcError::invalid_input(
                "cycles",
                "0",
                "At least one purge cycle is required",
            ));
        }
        Ok(())
    }
}

/// Results from a nitrogen purge sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurgeResult {
    /// Nitrogen added per cycle (standard ft3)
    pub gas_per_cycle_scf: f64,

    /// Total nitrogen for all cycles (standard ft3)
    pub total_gas_scf: f64,

    /// Original-air fraction remaining after the last vent
    pub residual_air_fraction: f64,

    /// Flags raised during sizing
    pub flags: Vec<ComplianceFlag>,
}

/// Size the nitrogen required to purge a system by pressure cycling.
///
/// Each cycle pressurizes the section with nitrogen and vents to
/// atmosphere; the remaining original-air fraction falls by the pressure
/// ratio every cycle.
pub fn size_purge(spec: &PurgeSpec) -> CalcResult<PurgeResult> {
    spec.validate()?;

    let mut flags = Vec::new();
    let gas_per_cycle_scf = spec.system_volume_ft3 * spec.purge_pressure_psig / ATMOSPHERIC_PSI;
    let total_gas_scf = gas_per_cycle_scf * f64::from(spec.cycles);

    let dilution_per_cycle =
        ATMOSPHERIC_PSI / (spec.purge_pressure_psig + ATMOSPHERIC_PSI);
    let residual_air_fraction = dilution_per_cycle.powi(spec.cycles as i32);
    if residual_air_fraction > PURGE_RESIDUAL_LIMIT {
        flags.push(ComplianceFlag::warning(
            code_ref::IIAR5_PURGE,
            format!(
                "Residual air {:.1}% after {} cycles; add cycles or raise the purge pressure",
                residual_air_fraction * 100.0,
                spec.cycles
            ),
        ));
    }

    Ok(PurgeResult {
        gas_per_cycle_scf,
        total_gas_scf,
        residual_air_fraction,
        flags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underfloor_sizing() {
        let result = size_underfloor_warming(&UnderfloorSpec::default()).unwrap();
        assert_eq!(result.heat_input_btu_hr, 40_000.0);
        // 12" grid covers a square foot per foot of pipe
        assert_eq!(result.pipe_length_ft, 10_000.0);
        assert!((result.glycol_flow_gpm - 40_000.0 / (470.0 * 10.0)).abs() < 1e-9);
        assert!(result.flags.is_empty());
    }

    #[test]
    fn test_underfloor_wide_split_flagged() {
        let spec = UnderfloorSpec {
            supply_temp_f: 90.0,
            return_temp_f: 60.0,
            ..UnderfloorSpec::default()
        };
        let result = size_underfloor_warming(&spec).unwrap();
        assert_eq!(result.flags.len(), 1);
        assert!(result.flags[0].message.contains("run cold"));
    }

    #[test]
    fn test_underfloor_inverted_split_rejected() {
        let spec = UnderfloorSpec {
            supply_temp_f: 60.0,
            return_temp_f: 70.0,
            ..UnderfloorSpec::default()
        };
        assert!(size_underfloor_warming(&spec).is_err());
    }

    #[test]
    fn test_sump_volume() {
        let result = size_sump(&SumpSpec::default()).unwrap();
        assert_eq!(result.working_volume_gal, 900.0);
        assert!((result.working_volume_ft3 - 900.0 / GALLONS_PER_CU_FT).abs() < 1e-9);
        assert!(result.flags.is_empty());
    }

    #[test]
    fn test_sump_short_retention_flagged() {
        let spec = SumpSpec {
            retention_min: 1.0,
            ..SumpSpec::default()
        };
        let result = size_sump(&spec).unwrap();
        assert_eq!(result.flags.len(), 1);
    }

    #[test]
    fn test_purge_gas_accounting() {
        let result = size_purge(&PurgeSpec::default()).unwrap();
        // 500 ft3 x 30/14.7 per cycle, three cycles
        let per_cycle = 500.0 * 30.0 / 14.7;
        assert!((result.gas_per_cycle_scf - per_cycle).abs() < 1e-9);
        assert!((result.total_gas_scf - 3.0 * per_cycle).abs() < 1e-9);

        let dilution: f64 = 14.7 / 44.7;
        assert!((result.residual_air_fraction - dilution.powi(3)).abs() < 1e-12);
    }

    #[test]
    fn test_purge_insufficient_cycles_flagged() {
        let spec = PurgeSpec {
            cycles: 1,
            ..PurgeSpec::default()
        };
        let result = size_purge(&spec).unwrap();
        // One cycle at 30 psig leaves a third of the air behind
        assert!(result.residual_air_fraction > PURGE_RESIDUAL_LIMIT);
        assert_eq!(result.flags.len(), 1);

        let thorough = PurgeSpec {
            cycles: 5,
            ..PurgeSpec::default()
        };
        let result = size_purge(&thorough).unwrap();
        assert!(result.residual_air_fraction < PURGE_RESIDUAL_LIMIT);
        assert!(result.flags.is_empty());
    }

    #[test]
    fn test_zero_cycles_rejected() {
        let spec = PurgeSpec {
            cycles: 0,
            ..PurgeSpec::default()
        };
        assert!(size_purge(&spec).is_err());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let spec = PurgeSpec::default();
        let json = serde_json::to_string(&spec).unwrap();
        let roundtrip: PurgeSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec.cycles, roundtrip.cycles);

        let result = size_purge(&spec).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let parsed: PurgeResult = serde_json::from_str(&json).unwrap();
        assert!((parsed.total_gas_scf - result.total_gas_scf).abs() < 1e-9);
    }
}
