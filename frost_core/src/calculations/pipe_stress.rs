//! # Pipe Stress & Branch Reinforcement Check
//!
//! Code checks for a refrigerant pipe run per ASME B31.5: Barlow hoop
//! stress against the material allowable, minimum wall at design and at
//! hydrostatic-test pressure, and the area-replacement branch-connection
//! check of 504.3.1.
//!
//! ## Assumptions
//!
//! - Thin-wall (Barlow) hoop stress: `S = P D / (2 t E)`
//! - Corrosion/erosion allowance is taken as zero for refrigerant service
//! - The branch check is the direct area balance of 504.3.1, not an
//!   iteration: required area vs. header excess + branch excess + pad
//!
//! ## Example (LLM-friendly)
//!
//! ```rust
//! use frost_core::calculations::pipe_stress::{compute_pipe_stress, PipeSpec};
//! use frost_core::tables::{NominalPipeSize, PipeMaterial, Schedule};
//!
//! let spec = PipeSpec {
//!     label: "HPL-1".to_string(),
//!     nominal: NominalPipeSize::Two,
//!     schedule: Schedule::Sch40,
//!     material: PipeMaterial::A106GradeB,
//!     design_pressure_psig: 250.0,
//!     design_temp_f: 95.0,
//!     ..PipeSpec::default()
//! };
//!
//! let result = compute_pipe_stress(&spec).unwrap();
//! assert!(result.hoop_stress_psi < result.allowable_stress_psi);
//! ```

use serde::{Deserialize, Serialize};

use crate::compliance::{code_ref, ComplianceFlag, Severity};
use crate::errors::{CalcError, CalcResult};
use crate::tables::{NominalPipeSize, PipeMaterial, Schedule};

/// Branch connection geometry for the area-replacement check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchSpec {
    /// Branch pipe nominal size (must be smaller than the header)
    pub nominal: NominalPipeSize,

    /// Branch pipe schedule
    pub schedule: Schedule,

    /// Angle between branch and header axes (degrees); 90 for a straight tee
    pub angle_deg: f64,

    /// Reinforcing pad and weld metal area credited to the connection (in2)
    pub pad_area_in2: f64,
}

/// Input parameters for a pipe stress check.
///
/// Allowable stress and joint efficiency default from the material table at
/// the design temperature; either can be overridden when the spec sheet
/// dictates a value.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "HPL-1",
///   "nominal": "Four",
///   "schedule": "Sch40",
///   "material": "A106GradeB",
///   "allowable_stress_psi": null,
///   "joint_efficiency": null,
///   "design_pressure_psig": 300.0,
///   "design_temp_f": 95.0,
///   "test_pressure_multiplier": 1.5,
///   "branch": {
///     "nominal": "Two",
///     "schedule": "Sch40",
///     "angle_deg": 90.0,
///     "pad_area_in2": 0.25
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipeSpec {
    /// User label for this line
    pub label: String,

    /// Header (run) pipe nominal size
    pub nominal: NominalPipeSize,

    /// Header pipe schedule
    pub schedule: Schedule,

    /// Pipe material
    pub material: PipeMaterial,

    /// Allowable stress override (psi); `None` uses the material table
    pub allowable_stress_psi: Option<f64>,

    /// Longitudinal weld joint efficiency override in (0, 1];
    /// `None` uses the material default
    pub joint_efficiency: Option<f64>,

    /// Internal design gauge pressure (psig)
    pub design_pressure_psig: f64,

    /// Design metal temperature (F)
    pub design_temp_f: f64,

    /// Hydrostatic test pressure as a multiple of design pressure
    pub test_pressure_multiplier: f64,

    /// Branch connection to check, if any
    pub branch: Option<BranchSpec>,
}

impl Default for PipeSpec {
    fn default() -> Self {
        PipeSpec {
            label: "Line".to_string(),
            nominal: NominalPipeSize::Two,
            schedule: Schedule::Sch40,
            material: PipeMaterial::A106GradeB,
            allowable_stress_psi: None,
            joint_efficiency: None,
            design_pressure_psig: 250.0,
            design_temp_f: 95.0,
            test_pressure_multiplier: 1.5,
            branch: None,
        }
    }
}

impl PipeSpec {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.design_pressure_psig <= 0.0 {
            return Err(CalcError::invalid_input(
                "design_pressure_psig",
                self.design_pressure_psig.to_string(),
                "Design pressure must be positive",
            ));
        }
        if self.test_pressure_multiplier < 1.0 {
            return Err(CalcError::invalid_input(
                "test_pressure_multiplier",
                self.test_pressure_multiplier.to_string(),
                "Test pressure multiplier cannot be below 1.0",
            ));
        }
        let efficiency = self.effective_joint_efficiency();
        if efficiency <= 0.0 || efficiency > 1.0 {
            return Err(CalcError::invalid_input(
                "joint_efficiency",
                efficiency.to_string(),
                "Joint efficiency must be in (0, 1]",
            ));
        }
        if let Some(allowable) = self.allowable_stress_psi {
            if allowable <= 0.0 {
                return Err(CalcError::invalid_input(
                    "allowable_stress_psi",
                    allowable.to_string(),
                    "Allowable stress must be positive",
                ));
            }
        }
        if self.design_temp_f < self.material.min_temp_f() {
            return Err(CalcError::invalid_input(
                "design_temp_f",
                self.design_temp_f.to_string(),
                format!(
                    "{} is not rated below {:.0} F",
                    self.material,
                    self.material.min_temp_f()
                ),
            ));
        }
        if let Some(branch) = &self.branch {
            if branch.nominal.outside_diameter_in() >= self.nominal.outside_diameter_in() {
                return Err(CalcError::invalid_input(
                    "branch.nominal",
                    branch.nominal.to_string(),
                    "Branch must be smaller than the header",
                ));
            }
            if branch.angle_deg <= 0.0 || branch.angle_deg > 90.0 {
                return Err(CalcError::invalid_input(
                    "branch.angle_deg",
                    branch.angle_deg.to_string(),
                    "Branch angle must be in (0, 90] degrees",
                ));
            }
            if branch.pad_area_in2 < 0.0 {
                return Err(CalcError::invalid_input(
                    "branch.pad_area_in2",
                    branch.pad_area_in2.to_string(),
                    "Pad area cannot be negative",
                ));
            }
        }
        Ok(())
    }

    /// Allowable stress in effect (override or material table at design temp)
    pub fn effective_allowable_psi(&self) -> f64 {
        self.allowable_stress_psi
            .unwrap_or_else(|| self.material.allowable_stress_psi(self.design_temp_f))
    }

    /// Joint efficiency in effect (override or material default)
    pub fn effective_joint_efficiency(&self) -> f64 {
        self.joint_efficiency
            .unwrap_or_else(|| self.material.default_joint_efficiency())
    }
}

/// Area-replacement breakdown for a branch connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReinforcementResult {
    /// Effective opening diameter d1 in the header wall (in)
    pub opening_diameter_in: f64,

    /// Required reinforcement area (in2)
    pub required_area_in2: f64,

    /// Area contributed by excess header wall (in2)
    pub header_excess_area_in2: f64,

    /// Area contributed by excess branch wall (in2)
    pub branch_excess_area_in2: f64,

    /// Area contributed by pad and weld metal (in2)
    pub pad_area_in2: f64,

    /// Total available area (in2)
    pub available_area_in2: f64,

    /// Available minus required; negative is a deficiency (in2)
    pub margin_in2: f64,
}

/// Results from a pipe stress check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "outside_diameter_in": 2.375,
///   "wall_in": 0.154,
///   "inner_radius_in": 1.0335,
///   "hoop_stress_psi": 1928.0,
///   "allowable_stress_psi": 17100.0,
///   "joint_efficiency": 1.0,
///   "stress_unity": 0.11,
///   "min_wall_design_in": 0.017,
///   "test_pressure_psig": 375.0,
///   "min_wall_test_in": 0.026,
///   "reinforcement": null,
///   "flags": []
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressResult {
    // === Geometry ===
    /// Outside diameter (in)
    pub outside_diameter_in: f64,

    /// Nominal wall thickness (in)
    pub wall_in: f64,

    /// Inner radius from OD minus two walls (in)
    pub inner_radius_in: f64,

    // === Hoop Stress Check ===
    /// Barlow hoop stress at design pressure (psi)
    pub hoop_stress_psi: f64,

    /// Allowable stress in effect (psi)
    pub allowable_stress_psi: f64,

    /// Joint efficiency in effect
    pub joint_efficiency: f64,

    /// Hoop stress / allowable; must be <= 1.0 to pass
    pub stress_unity: f64,

    // === Wall Thickness ===
    /// Minimum wall for design pressure (in)
    pub min_wall_design_in: f64,

    /// Hydrostatic test pressure (psig)
    pub test_pressure_psig: f64,

    /// Minimum wall for the test pressure (in)
    pub min_wall_test_in: f64,

    // === Branch Reinforcement ===
    /// Area-replacement breakdown, present only when a branch was specified
    pub reinforcement: Option<ReinforcementResult>,

    // === Compliance ===
    /// Code flags raised during the check
    pub flags: Vec<ComplianceFlag>,
}

impl StressResult {
    /// True when no error-severity flag was raised
    pub fn passes(&self) -> bool {
        !self.flags.iter().any(|f| f.severity == Severity::Error)
    }
}

/// Run the hoop-stress, test-pressure, and branch reinforcement checks.
///
/// This is a pure function suitable for LLM invocation.
///
/// # Arguments
///
/// * `spec` - Pipe geometry, material, pressures, and optional branch
///
/// # Returns
///
/// * `Ok(StressResult)` - All checks with numeric margins and flags
/// * `Err(CalcError)` - Structured error if inputs are invalid
pub fn compute_pipe_stress(spec: &PipeSpec) -> CalcResult<StressResult> {
    spec.validate()?;

    let mut flags = Vec::new();

    let od = spec.nominal.outside_diameter_in();
    let wall = spec.nominal.wall_in(spec.schedule);
    let inner_radius = (od - 2.0 * wall) / 2.0;
    let allowable = spec.effective_allowable_psi();
    let efficiency = spec.effective_joint_efficiency();
    let pressure = spec.design_pressure_psig;

    // === Hoop stress (Barlow): S = P D / (2 t E) ===
    let hoop_stress = pressure * od / (2.0 * wall * efficiency);
    let stress_unity = hoop_stress / allowable;
    if hoop_stress > allowable {
        flags.push(ComplianceFlag::error(
            code_ref::B31_5_STRAIGHT_PIPE,
            format!(
                "Hoop stress {:.0} psi exceeds allowable {:.0} psi for {} {} at {:.0} psig",
                hoop_stress, allowable, spec.nominal, spec.schedule, pressure
            ),
        ));
    }

    // === Minimum wall at design and hydrostatic test pressure ===
    let min_wall_design = pressure * od / (2.0 * allowable * efficiency);
    let test_pressure = spec.test_pressure_multiplier * pressure;
    let min_wall_test = test_pressure * od / (2.0 * allowable * efficiency);
    if wall < min_wall_test {
        flags.push(ComplianceFlag::warning(
            code_ref::B31_5_HYDROSTATIC_TEST,
            format!(
                "Wall {:.3} in is below the {:.3} in required at the {:.0} psig hydrostatic test",
                wall, min_wall_test, test_pressure
            ),
        ));
    }

    // === Branch reinforcement (area replacement, 504.3.1) ===
    let reinforcement = match &spec.branch {
        Some(branch) => {
            let branch_od = branch.nominal.outside_diameter_in();
            let branch_wall = branch.nominal.wall_in(branch.schedule);
            let angle_rad = branch.angle_deg.to_radians();
            let sin_angle = angle_rad.sin();

            // Required minimum walls of header and branch at design pressure
            let t_mh = pressure * od / (2.0 * allowable * efficiency);
            let t_mb = pressure * branch_od / (2.0 * allowable * efficiency);

            // Effective opening in the header wall
            let d1 = (branch_od - 2.0 * branch_wall) / sin_angle;

            let required = t_mh * d1 * (2.0 - sin_angle);
            let header_excess = d1 * (wall - t_mh);
            // Reinforcement zone extends 2.5 branch walls along the branch
            let branch_excess = 2.0 * (2.5 * branch_wall) * (branch_wall - t_mb);
            let available = header_excess + branch_excess + branch.pad_area_in2;
            let margin = available - required;

            if margin < 0.0 {
                flags.push(ComplianceFlag::error(
                    code_ref::B31_5_BRANCH_REINFORCEMENT,
                    format!(
                        "Branch reinforcement deficient by {:.3} in2 ({:.3} available vs {:.3} required)",
                        -margin, available, required
                    ),
                ));
            }

            Some(ReinforcementResult {
                opening_diameter_in: d1,
                required_area_in2: required,
                header_excess_area_in2: header_excess,
                branch_excess_area_in2: branch_excess,
                pad_area_in2: branch.pad_area_in2,
                available_area_in2: available,
                margin_in2: margin,
            })
        }
        None => None,
    };

    Ok(StressResult {
        outside_diameter_in: od,
        wall_in: wall,
        inner_radius_in: inner_radius,
        hoop_stress_psi: hoop_stress,
        allowable_stress_psi: allowable,
        joint_efficiency: efficiency,
        stress_unity,
        min_wall_design_in: min_wall_design,
        test_pressure_psig: test_pressure,
        min_wall_test_in: min_wall_test,
        reinforcement,
        flags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_line() -> PipeSpec {
        PipeSpec {
            label: "Test line".to_string(),
            nominal: NominalPipeSize::Two,
            schedule: Schedule::Sch40,
            material: PipeMaterial::A106GradeB,
            allowable_stress_psi: None,
            joint_efficiency: None,
            design_pressure_psig: 250.0,
            design_temp_f: 95.0,
            test_pressure_multiplier: 1.5,
            branch: None,
        }
    }

    #[test]
    fn test_barlow_hoop_stress() {
        let result = compute_pipe_stress(&test_line()).unwrap();
        // S = 250 * 2.375 / (2 * 0.154 * 1.0)
        let expected = 250.0 * 2.375 / (2.0 * 0.154);
        assert!((result.hoop_stress_psi - expected).abs() < 1e-9);
        assert!(result.passes());
    }

    #[test]
    fn test_hoop_stress_linear_in_pressure() {
        let spec = test_line();
        let base = compute_pipe_stress(&spec).unwrap();

        let mut doubled = spec;
        doubled.design_pressure_psig *= 2.0;
        let result = compute_pipe_stress(&doubled).unwrap();

        assert!((result.hoop_stress_psi - 2.0 * base.hoop_stress_psi).abs() < 1e-9);
    }

    #[test]
    fn test_joint_efficiency_raises_stress() {
        let seamless = compute_pipe_stress(&test_line()).unwrap();

        let mut welded = test_line();
        welded.joint_efficiency = Some(0.85);
        let result = compute_pipe_stress(&welded).unwrap();

        assert!((result.hoop_stress_psi - seamless.hoop_stress_psi / 0.85).abs() < 1e-6);
    }

    #[test]
    fn test_overstressed_line_flagged() {
        let mut spec = test_line();
        spec.allowable_stress_psi = Some(1_000.0);
        let result = compute_pipe_stress(&spec).unwrap();
        assert!(!result.passes());
        assert!(result.flags[0].message.contains("exceeds allowable"));
    }

    #[test]
    fn test_test_pressure_and_min_walls() {
        let result = compute_pipe_stress(&test_line()).unwrap();
        assert_eq!(result.test_pressure_psig, 375.0);
        assert!((result.min_wall_test_in - 1.5 * result.min_wall_design_in).abs() < 1e-12);
        assert!((result.inner_radius_in - (2.375 - 2.0 * 0.154) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_joint_efficiency() {
        let mut spec = test_line();
        spec.joint_efficiency = Some(1.2);
        assert!(compute_pipe_stress(&spec).is_err());

        spec.joint_efficiency = Some(0.0);
        assert!(compute_pipe_stress(&spec).is_err());
    }

    #[test]
    fn test_material_low_temp_rating_enforced() {
        let mut spec = test_line();
        spec.material = PipeMaterial::A53GradeB;
        spec.design_temp_f = -40.0;
        let error = compute_pipe_stress(&spec).unwrap_err();
        assert_eq!(error.error_code(), "INVALID_INPUT");

        spec.material = PipeMaterial::A333Grade6;
        assert!(compute_pipe_stress(&spec).is_ok());
    }

    /// Branch spec used by the reinforcement tests: a low allowable stress
    /// keeps the header excess small so the pad area actually matters.
    fn branched_line(pad_area_in2: f64) -> PipeSpec {
        PipeSpec {
            label: "Branched".to_string(),
            nominal: NominalPipeSize::Four,
            schedule: Schedule::Sch40,
            material: PipeMaterial::A106GradeB,
            allowable_stress_psi: Some(3_000.0),
            joint_efficiency: Some(1.0),
            design_pressure_psig: 300.0,
            design_temp_f: 95.0,
            test_pressure_multiplier: 1.0,
            branch: Some(BranchSpec {
                nominal: NominalPipeSize::Two,
                schedule: Schedule::Sch40,
                angle_deg: 90.0,
                pad_area_in2,
            }),
        }
    }

    #[test]
    fn test_reinforcement_exact_balance_passes_clean() {
        // First pass: read the area breakdown with no pad
        let bare = compute_pipe_stress(&branched_line(0.0)).unwrap();
        let areas = bare.reinforcement.as_ref().unwrap();
        let exact_pad =
            areas.required_area_in2 - areas.header_excess_area_in2 - areas.branch_excess_area_in2;
        assert!(exact_pad > 0.0, "scenario must need pad area");

        // Exact balance: available == required, zero flags
        let balanced = compute_pipe_stress(&branched_line(exact_pad)).unwrap();
        let areas = balanced.reinforcement.as_ref().unwrap();
        assert!(areas.margin_in2.abs() < 1e-9);
        assert!(balanced.flags.is_empty());
        assert!(balanced.passes());
    }

    #[test]
    fn test_reinforcement_shortfall_equals_pad_reduction() {
        let bare = compute_pipe_stress(&branched_line(0.0)).unwrap();
        let areas = bare.reinforcement.as_ref().unwrap();
        let exact_pad =
            areas.required_area_in2 - areas.header_excess_area_in2 - areas.branch_excess_area_in2;

        let reduction = 0.05;
        let deficient = compute_pipe_stress(&branched_line(exact_pad - reduction)).unwrap();
        let areas = deficient.reinforcement.as_ref().unwrap();
        assert!((areas.margin_in2 + reduction).abs() < 1e-9);
        assert!(!deficient.passes());
        assert!(deficient.flags[0].message.contains("deficient"));
    }

    #[test]
    fn test_branch_larger_than_header_rejected() {
        let mut spec = branched_line(0.0);
        spec.branch.as_mut().unwrap().nominal = NominalPipeSize::Six;
        assert!(compute_pipe_stress(&spec).is_err());
    }

    #[test]
    fn test_no_branch_omits_reinforcement() {
        let result = compute_pipe_stress(&test_line()).unwrap();
        assert!(result.reinforcement.is_none());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let spec = branched_line(0.25);
        let json = serde_json::to_string_pretty(&spec).unwrap();
        let roundtrip: PipeSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec.design_pressure_psig, roundtrip.design_pressure_psig);

        let result = compute_pipe_stress(&spec).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("hoop_stress_psi"));
        assert!(json.contains("required_area_in2"));
        let parsed: StressResult = serde_json::from_str(&json).unwrap();
        assert!((parsed.hoop_stress_psi - result.hoop_stress_psi).abs() < 1e-9);
    }
}
