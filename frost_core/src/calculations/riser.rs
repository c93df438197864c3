//! # Vertical Suction Riser Sizing
//!
//! Sizes a vertical up-flow riser for oil return: the vapor velocity must
//! stay above the entrainment floor that carries oil up the pipe, and below
//! the noise/erosion ceiling. Candidates are walked in ascending size and
//! the smallest pipe inside the band wins.
//!
//! The riser's frictional pressure drop (shared Darcy-Weisbach solve from
//! [`crate::hydraulics`]) is converted to a suction-temperature penalty
//! through the local slope of the refrigerant's saturation curve:
//! `dT = dp / (dP/dT)`. That penalty is what the pressure drop actually
//! costs the system in effective suction temperature.
//!
//! ## Example (LLM-friendly)
//!
//! ```rust
//! use frost_core::calculations::riser::{size_riser, RiserSpec};
//!
//! let spec = RiserSpec {
//!     label: "SR-1".to_string(),
//!     mass_flow_lb_min: 5.0,
//!     saturation_temp_f: 0.0,
//!     riser_height_ft: 25.0,
//!     ..RiserSpec::default()
//! };
//!
//! let result = size_riser(&spec).unwrap();
//! assert!(result.velocity_fpm > 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::compliance::{code_ref, ComplianceFlag, Severity};
use crate::errors::{CalcError, CalcResult};
use crate::hydraulics::{solve_flow, FlowCase, SolverConfig};
use crate::tables::pipe::{NominalPipeSize, Schedule};
use crate::tables::refrigerants::Refrigerant;
use crate::units::GALLONS_PER_CU_FT;

/// Minimum vapor velocity that reliably returns oil up a riser (ft/min)
pub const OIL_RETURN_FLOOR_FPM: f64 = 1_000.0;

/// Velocity ceiling for noise and erosion (ft/min)
pub const VELOCITY_CEILING_FPM: f64 = 4_000.0;

/// Feed arrangement of the system the riser serves.
///
/// Recirculated (pumped) systems carry a liquid flow figure so the riser's
/// internal volume can be expressed as seconds of liquid reserve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SystemType {
    /// Direct expansion feed
    DirectExpansion,
    /// Pumped liquid recirculation
    Recirculated {
        /// Pumped liquid flow up the riser (gpm)
        liquid_flow_gpm: f64,
    },
}

/// Input parameters for a vertical riser sizing.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "SR-1",
///   "refrigerant": "R717",
///   "saturation_temp_f": -20.0,
///   "mass_flow_lb_min": 8.0,
///   "riser_height_ft": 30.0,
///   "fittings_k_sum": 1.5,
///   "schedule": "Sch40",
///   "candidates": null,
///   "system": { "type": "Recirculated", "liquid_flow_gpm": 20.0 }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiserSpec {
    /// User label for this riser
    pub label: String,

    /// System refrigerant
    pub refrigerant: Refrigerant,

    /// Suction saturation temperature at the riser (F)
    pub saturation_temp_f: f64,

    /// Vapor mass flow up the riser (lb/min)
    pub mass_flow_lb_min: f64,

    /// Riser height / developed length (ft)
    pub riser_height_ft: f64,

    /// Sum of fitting resistance coefficients (K values)
    pub fittings_k_sum: f64,

    /// Pipe schedule for every candidate
    pub schedule: Schedule,

    /// Candidate sizes to evaluate; `None` uses the standard ladder
    /// ([`NominalPipeSize::RISER_CANDIDATES`])
    pub candidates: Option<Vec<NominalPipeSize>>,

    /// Feed arrangement
    pub system: SystemType,
}

impl Default for RiserSpec {
    fn default() -> Self {
        RiserSpec {
            label: "Riser".to_string(),
            refrigerant: Refrigerant::R717,
            saturation_temp_f: -20.0,
            mass_flow_lb_min: 8.0,
            riser_height_ft: 25.0,
            fittings_k_sum: 1.5,
            schedule: Schedule::Sch40,
            candidates: None,
            system: SystemType::DirectExpansion,
        }
    }
}

impl RiserSpec {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.mass_flow_lb_min <= 0.0 {
            return Err(CalcError::invalid_input(
                "mass_flow_lb_min",
                self.mass_flow_lb_min.to_string(),
                "Mass flow must be positive",
            ));
        }
        if self.riser_height_ft <= 0.0 {
            return Err(CalcError::invalid_input(
                "riser_height_ft",
                self.riser_height_ft.to_string(),
                "Riser height must be positive",
            ));
        }
        if self.fittings_k_sum < 0.0 {
            return Err(CalcError::invalid_input(
                "fittings_k_sum",
                self.fittings_k_sum.to_string(),
                "Fitting K sum cannot be negative",
            ));
        }
        if let Some(candidates) = &self.candidates {
            if candidates.is_empty() {
                return Err(CalcError::invalid_input(
                    "candidates",
                    "[]".to_string(),
                    "Candidate list cannot be empty",
                ));
            }
        }
        if let SystemType::Recirculated { liquid_flow_gpm } = self.system {
            if liquid_flow_gpm <= 0.0 {
                return Err(CalcError::invalid_input(
                    "system.liquid_flow_gpm",
                    liquid_flow_gpm.to_string(),
                    "Recirculated liquid flow must be positive",
                ));
            }
        }
        Ok(())
    }

    /// Candidate ladder in ascending size order.
    fn candidate_ladder(&self) -> Vec<NominalPipeSize> {
        let mut ladder = self
            .candidates
            .clone()
            .unwrap_or_else(|| NominalPipeSize::RISER_CANDIDATES.to_vec());
        ladder.sort();
        ladder
    }
}

/// Vapor velocity for one candidate size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateVelocity {
    /// Candidate size
    pub nominal: NominalPipeSize,

    /// Vapor velocity at the design flow (ft/min)
    pub velocity_fpm: f64,

    /// Whether the velocity sits inside the oil-return band
    pub in_band: bool,
}

/// Results from a vertical riser sizing.
///
/// ## JSON Example
///
/// ```json
/// {
///   "selected": "OneHalf",
///   "velocity_fpm": 3300.0,
///   "in_band": true,
///   "candidates": [
///     { "nominal": "One", "velocity_fpm": 7770.0, "in_band": false },
///     { "nominal": "OneHalf", "velocity_fpm": 3300.0, "in_band": true }
///   ],
///   "vapor_density_lb_ft3": 0.1068,
///   "reynolds": 81000.0,
///   "friction_factor": 0.022,
///   "pressure_drop_psi": 0.18,
///   "saturation_slope_psi_per_f": 0.606,
///   "dt_penalty_f": 0.3,
///   "liquid_reserve_s": null,
///   "flags": []
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiserResult {
    // === Selection ===
    /// Selected riser size
    pub selected: NominalPipeSize,

    /// Vapor velocity in the selected riser (ft/min)
    pub velocity_fpm: f64,

    /// Whether the selected velocity sits inside the oil-return band
    pub in_band: bool,

    /// Velocity of every evaluated candidate, ascending size
    pub candidates: Vec<CandidateVelocity>,

    // === Pressure Drop ===
    /// Saturated vapor density used (lb/ft3)
    pub vapor_density_lb_ft3: f64,

    /// Reynolds number in the selected riser
    pub reynolds: f64,

    /// Converged Moody friction factor
    pub friction_factor: f64,

    /// Frictional pressure drop over the riser (psi)
    pub pressure_drop_psi: f64,

    // === Temperature Penalty ===
    /// Local saturation-curve slope dP/dT (psi/F)
    pub saturation_slope_psi_per_f: f64,

    /// Effective suction-temperature loss from the pressure drop (F)
    pub dt_penalty_f: f64,

    // === Liquid Reserve ===
    /// Seconds of liquid reserve in the riser volume; recirculated systems only
    pub liquid_reserve_s: Option<f64>,

    // === Compliance ===
    /// Code flags raised during sizing
    pub flags: Vec<ComplianceFlag>,
}

impl RiserResult {
    /// True when no error-severity flag was raised
    pub fn passes(&self) -> bool {
        !self.flags.iter().any(|f| f.severity == Severity::Error)
    }
}

/// Size a vertical suction riser.
///
/// This is a pure function suitable for LLM invocation.
///
/// # Arguments
///
/// * `spec` - Refrigerant condition, flow, geometry and candidate ladder
///
/// # Returns
///
/// * `Ok(RiserResult)` - Selection, velocities, pressure drop and penalty
/// * `Err(CalcError)` - Invalid input, saturation lookup miss, or a
///   non-convergent friction solve
pub fn size_riser(spec: &RiserSpec) -> CalcResult<RiserResult> {
    spec.validate()?;

    let mut flags = Vec::new();
    let sat = spec.refrigerant.saturation_at(spec.saturation_temp_f)?;
    let vapor_density = sat.vapor_density_lb_ft3;

    // === Candidate velocities, ascending size ===
    // V = m_dot / (rho A); lb/min over (lb/ft3 x ft2) is already ft/min
    let ladder = spec.candidate_ladder();
    let candidates: Vec<CandidateVelocity> = ladder
        .iter()
        .map(|&nominal| {
            let velocity_fpm =
                spec.mass_flow_lb_min / (vapor_density * nominal.flow_area_ft2(spec.schedule));
            CandidateVelocity {
                nominal,
                velocity_fpm,
                in_band: (OIL_RETURN_FLOOR_FPM..=VELOCITY_CEILING_FPM).contains(&velocity_fpm),
            }
        })
        .collect();

    // Smallest in-band size wins; with nothing in band, report the smallest
    // candidate and flag it rather than failing the calculation.
    let selection = candidates
        .iter()
        .find(|c| c.in_band)
        .unwrap_or(&candidates[0]);
    let selected = selection.nominal;
    let velocity_fpm = selection.velocity_fpm;
    let in_band = selection.in_band;

    if !in_band {
        if velocity_fpm < OIL_RETURN_FLOOR_FPM {
            flags.push(ComplianceFlag::warning(
                code_ref::RISER_OIL_RETURN,
                format!(
                    "No candidate reaches the {:.0} fpm oil-return floor; {} runs at {:.0} fpm",
                    OIL_RETURN_FLOOR_FPM, selected, velocity_fpm
                ),
            ));
        } else {
            flags.push(ComplianceFlag::warning(
                code_ref::RISER_VELOCITY_CEILING,
                format!(
                    "No candidate fits the velocity band; {} runs at {:.0} fpm above the {:.0} fpm ceiling",
                    selected, velocity_fpm, VELOCITY_CEILING_FPM
                ),
            ));
        }
    }

    // === Pressure drop over the riser (shared friction solve) ===
    let flow = FlowCase {
        mass_flow_lb_min: spec.mass_flow_lb_min,
        density_lb_ft3: vapor_density,
        viscosity_lb_ft_s: spec.refrigerant.vapor_viscosity_lb_ft_s(),
        diameter_ft: selected.inner_diameter_ft(spec.schedule),
        length_ft: spec.riser_height_ft,
        fittings_k_sum: spec.fittings_k_sum,
    };
    let solution = solve_flow(&flow, SolverConfig::default())?;

    // === Suction temperature penalty: dT = dp / (dP/dT) ===
    let slope = spec
        .refrigerant
        .saturation_slope_psi_per_f(spec.saturation_temp_f)?;
    let dt_penalty_f = solution.pressure_drop_psi / slope;

    // === Liquid column reserve (recirculated only) ===
    let liquid_reserve_s = match spec.system {
        SystemType::Recirculated { liquid_flow_gpm } => {
            let riser_volume_ft3 =
                selected.internal_volume_ft3_per_ft(spec.schedule) * spec.riser_height_ft;
            let liquid_flow_ft3_s = liquid_flow_gpm / GALLONS_PER_CU_FT / 60.0;
            Some(riser_volume_ft3 / liquid_flow_ft3_s)
        }
        SystemType::DirectExpansion => None,
    };

    Ok(RiserResult {
        selected,
        velocity_fpm,
        in_band,
        candidates,
        vapor_density_lb_ft3: vapor_density,
        reynolds: solution.reynolds,
        friction_factor: solution.friction_factor,
        pressure_drop_psi: solution.pressure_drop_psi,
        saturation_slope_psi_per_f: slope,
        dt_penalty_f,
        liquid_reserve_s,
        flags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Ammonia suction riser at 0 F with a flow that lands 1-1/2" in band.
    fn ammonia_riser() -> RiserSpec {
        RiserSpec {
            label: "SR-1".to_string(),
            refrigerant: Refrigerant::R717,
            saturation_temp_f: 0.0,
            mass_flow_lb_min: 5.0,
            riser_height_ft: 25.0,
            fittings_k_sum: 1.5,
            schedule: Schedule::Sch40,
            candidates: None,
            system: SystemType::DirectExpansion,
        }
    }

    #[test]
    fn test_selects_smallest_in_band_size() {
        let result = size_riser(&ammonia_riser()).unwrap();
        assert!(result.in_band);
        assert!(result.velocity_fpm >= OIL_RETURN_FLOOR_FPM);
        assert!(result.velocity_fpm <= VELOCITY_CEILING_FPM);

        // Every smaller candidate must sit above the ceiling
        for candidate in &result.candidates {
            if candidate.nominal < result.selected {
                assert!(candidate.velocity_fpm > VELOCITY_CEILING_FPM);
            }
        }
        assert!(result.flags.is_empty());
    }

    #[test]
    fn test_velocity_formula() {
        let spec = ammonia_riser();
        let result = size_riser(&spec).unwrap();
        let rho = Refrigerant::R717.saturation_at(0.0).unwrap().vapor_density_lb_ft3;
        let area = result.selected.flow_area_ft2(Schedule::Sch40);
        assert!((result.velocity_fpm - 5.0 / (rho * area)).abs() < 1e-9);
    }

    #[test]
    fn test_velocity_scales_linearly_with_flow() {
        // Pin the pipe size so the selection cannot move with the flow
        let mut spec = ammonia_riser();
        spec.candidates = Some(vec![NominalPipeSize::Two]);
        let base = size_riser(&spec).unwrap();

        let k = 3.0;
        spec.mass_flow_lb_min *= k;
        let scaled = size_riser(&spec).unwrap();
        assert!((scaled.velocity_fpm - k * base.velocity_fpm).abs() < 1e-9);
    }

    #[test]
    fn test_no_candidate_in_band_returns_smallest_with_flag() {
        // A trickle of flow leaves every size below the oil-return floor
        let mut spec = ammonia_riser();
        spec.mass_flow_lb_min = 0.05;
        let result = size_riser(&spec).unwrap();
        assert!(!result.in_band);
        assert_eq!(result.selected, NominalPipeSize::RISER_CANDIDATES[0]);
        assert_eq!(result.flags.len(), 1);
        assert!(result.flags[0].message.contains("oil-return floor"));
        // Out-of-band is a warning, not a failure
        assert!(result.passes());
    }

    #[test]
    fn test_all_above_ceiling_flags_ceiling() {
        let mut spec = ammonia_riser();
        spec.candidates = Some(vec![NominalPipeSize::One]);
        spec.mass_flow_lb_min = 20.0;
        let result = size_riser(&spec).unwrap();
        assert!(!result.in_band);
        assert!(result.flags[0].message.contains("ceiling"));
    }

    #[test]
    fn test_dt_penalty_consistent_with_slope() {
        let result = size_riser(&ammonia_riser()).unwrap();
        assert!(result.pressure_drop_psi > 0.0);
        assert!(
            (result.dt_penalty_f
                - result.pressure_drop_psi / result.saturation_slope_psi_per_f)
                .abs()
                < 1e-12
        );
    }

    #[test]
    fn test_taller_riser_larger_penalty() {
        let spec = ammonia_riser();
        let short = size_riser(&spec).unwrap();

        let mut tall = spec;
        tall.riser_height_ft = 100.0;
        let result = size_riser(&tall).unwrap();
        assert!(result.dt_penalty_f > short.dt_penalty_f);
    }

    #[test]
    fn test_liquid_reserve_recirculated_only() {
        let dx = size_riser(&ammonia_riser()).unwrap();
        assert!(dx.liquid_reserve_s.is_none());

        let mut spec = ammonia_riser();
        spec.system = SystemType::Recirculated {
            liquid_flow_gpm: 20.0,
        };
        let result = size_riser(&spec).unwrap();
        let reserve = result.liquid_reserve_s.unwrap();

        let volume = result.selected.internal_volume_ft3_per_ft(Schedule::Sch40) * 25.0;
        let flow_ft3_s = 20.0 / GALLONS_PER_CU_FT / 60.0;
        assert!((reserve - volume / flow_ft3_s).abs() < 1e-9);
    }

    #[test]
    fn test_deterministic() {
        let a = size_riser(&ammonia_riser()).unwrap();
        let b = size_riser(&ammonia_riser()).unwrap();
        assert_eq!(a.friction_factor, b.friction_factor);
        assert_eq!(a.pressure_drop_psi, b.pressure_drop_psi);
        assert_eq!(a.dt_penalty_f, b.dt_penalty_f);
    }

    #[test]
    fn test_zero_flow_rejected() {
        let mut spec = ammonia_riser();
        spec.mass_flow_lb_min = 0.0;
        let error = size_riser(&spec).unwrap_err();
        assert_eq!(error.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_out_of_table_saturation_is_lookup_miss() {
        let mut spec = ammonia_riser();
        spec.saturation_temp_f = -120.0;
        let error = size_riser(&spec).unwrap_err();
        assert_eq!(error.error_code(), "LOOKUP_MISS");
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut spec = ammonia_riser();
        spec.system = SystemType::Recirculated {
            liquid_flow_gpm: 15.0,
        };
        let json = serde_json::to_string_pretty(&spec).unwrap();
        assert!(json.contains("Recirculated"));
        let roundtrip: RiserSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec.system, roundtrip.system);

        let result = size_riser(&spec).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("dt_penalty_f"));
        let parsed: RiserResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.selected, result.selected);
    }
}
