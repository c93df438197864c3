//! # Pipe Support Sizing
//!
//! Line weight, support spacing, stand selection and drainage drop for a
//! refrigerant pipe run. The computed line weight (steel + refrigerant fill
//! + insulation) is the documented input to the stand selection; nothing
//! else flows between calculators.
//!
//! ## Example (LLM-friendly)
//!
//! ```rust
//! use frost_core::calculations::supports::{size_supports, LineFill, SupportSpec};
//! use frost_core::tables::NominalPipeSize;
//!
//! let spec = SupportSpec {
//!     label: "Suction main".to_string(),
//!     nominal: NominalPipeSize::Six,
//!     fill: LineFill::Liquid,
//!     run_length_ft: 120.0,
//!     ..SupportSpec::default()
//! };
//!
//! let result = size_supports(&spec).unwrap();
//! assert!(result.total_weight_plf > result.steel_weight_plf);
//! ```

use serde::{Deserialize, Serialize};

use crate::compliance::{code_ref, ComplianceFlag, Severity};
use crate::errors::{CalcError, CalcResult};
use crate::tables::pipe::{NominalPipeSize, Schedule};
use crate::tables::refrigerants::Refrigerant;
use crate::tables::supports::{max_support_span_ft, stand_catalog};

/// What the line carries for weight accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LineFill {
    /// Vapor line (fill weight from saturated vapor density)
    #[default]
    Vapor,
    /// Liquid line or liquid-full suction (fill weight from liquid density)
    Liquid,
}

/// Input parameters for a pipe support sizing.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Suction main",
///   "nominal": "Six",
///   "schedule": "Sch40",
///   "refrigerant": "R717",
///   "sat_temp_f": -20.0,
///   "fill": "Liquid",
///   "insulation_weight_plf": 3.5,
///   "run_length_ft": 120.0,
///   "slope_in_per_10ft": 0.25,
///   "support_spacing_ft": null
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportSpec {
    /// User label for this run
    pub label: String,

    /// Pipe nominal size
    pub nominal: NominalPipeSize,

    /// Pipe schedule
    pub schedule: Schedule,

    /// Refrigerant in the line
    pub refrigerant: Refrigerant,

    /// Saturation temperature for fill density (F)
    pub sat_temp_f: f64,

    /// Vapor or liquid fill
    pub fill: LineFill,

    /// Insulation and jacketing weight (lb/ft)
    pub insulation_weight_plf: f64,

    /// Supported run length (ft)
    pub run_length_ft: f64,

    /// Drainage slope (inches of drop per 10 ft of run)
    pub slope_in_per_10ft: f64,

    /// Requested support spacing (ft); `None` uses the span-table maximum
    pub support_spacing_ft: Option<f64>,
}

impl Default for SupportSpec {
    fn default() -> Self {
        SupportSpec {
            label: "Run".to_string(),
            nominal: NominalPipeSize::Four,
            schedule: Schedule::Sch40,
            refrigerant: Refrigerant::R717,
            sat_temp_f: -20.0,
            fill: LineFill::Vapor,
            insulation_weight_plf: 2.0,
            run_length_ft: 100.0,
            slope_in_per_10ft: 0.25,
            support_spacing_ft: None,
        }
    }
}

impl SupportSpec {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.run_length_ft <= 0.0 {
            return Err(CalcError::invalid_input(
                "run_length_ft",
                self.run_length_ft.to_string(),
                "Run length must be positive",
            ));
        }
        if self.insulation_weight_plf < 0.0 {
            return Err(CalcError::invalid_input(
                "insulation_weight_plf",
                self.insulation_weight_plf.to_string(),
                "Insulation weight cannot be negative",
            ));
        }
        if self.slope_in_per_10ft < 0.0 {
            return Err(CalcError::invalid_input(
                "slope_in_per_10ft",
                self.slope_in_per_10ft.to_string(),
                "Slope cannot be negative",
            ));
        }
        if let Some(spacing) = self.support_spacing_ft {
            if spacing <= 0.0 {
                return Err(CalcError::invalid_input(
                    "support_spacing_ft",
                    spacing.to_string(),
                    "Support spacing must be positive",
                ));
            }
        }
        Ok(())
    }
}

/// The stand the capacity scan settled on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedStand {
    /// Catalog model designation
    pub model: String,

    /// Rated vertical load (lb)
    pub capacity_lb: f64,
}

/// Results from a pipe support sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportResult {
    // === Line Weight (lb/ft) ===
    /// Empty steel pipe
    pub steel_weight_plf: f64,

    /// Refrigerant fill
    pub fluid_weight_plf: f64,

    /// Insulation and jacketing
    pub insulation_weight_plf: f64,

    /// Total operating weight
    pub total_weight_plf: f64,

    // === Spacing ===
    /// Span-table maximum for this size (ft)
    pub max_span_ft: f64,

    /// Spacing used for the layout (ft)
    pub spacing_ft: f64,

    /// Number of supports over the run
    pub support_count: u32,

    /// Load per support at the layout spacing (lb)
    pub load_per_support_lb: f64,

    /// Selected support stand
    pub stand: SelectedStand,

    // === Drainage ===
    /// Total elevation drop over the run at the given slope (in)
    pub total_drop_in: f64,

    // === Compliance ===
    /// Code flags raised during sizing
    pub flags: Vec<ComplianceFlag>,
}

impl SupportResult {
    /// True when no error-severity flag was raised
    pub fn passes(&self) -> bool {
        !self.flags.iter().any(|f| f.severity == Severity::Error)
    }
}

/// Size the supports for one pipe run.
///
/// This is a pure function suitable for LLM invocation.
///
/// # Arguments
///
/// * `spec` - Pipe, fill, insulation, run geometry and requested spacing
///
/// # Returns
///
/// * `Ok(SupportResult)` - Weights, layout, stand selection and flags
/// * `Err(CalcError)` - Invalid input, saturation lookup miss, or no stand
///   rated for the per-support load
pub fn size_supports(spec: &SupportSpec) -> CalcResult<SupportResult> {
    spec.validate()?;

    let mut flags = Vec::new();

    // === Line weight ===
    let steel_weight_plf = spec.nominal.steel_weight_plf(spec.schedule);
    let sat = spec.refrigerant.saturation_at(spec.sat_temp_f)?;
    let fill_density = match spec.fill {
        LineFill::Vapor => sat.vapor_density_lb_ft3,
        LineFill::Liquid => sat.liquid_density_lb_ft3,
    };
    let fluid_weight_plf = fill_density * spec.nominal.internal_volume_ft3_per_ft(spec.schedule);
    let total_weight_plf = steel_weight_plf + fluid_weight_plf + spec.insulation_weight_plf;

    // === Spacing and per-support load ===
    let max_span_ft = max_support_span_ft(spec.nominal);
    let spacing_ft = spec.support_spacing_ft.unwrap_or(max_span_ft);
    if spacing_ft > max_span_ft {
        flags.push(ComplianceFlag::warning(
            code_ref::SUPPORT_SPACING,
            format!(
                "Requested spacing {:.1} ft exceeds the {:.1} ft suggested maximum for {}",
                spacing_ft, max_span_ft, spec.nominal
            ),
        ));
    }
    let support_count = (spec.run_length_ft / spacing_ft).ceil() as u32 + 1;
    let load_per_support_lb = total_weight_plf * spacing_ft;

    // === Stand selection (pipe weight feeds the capacity scan) ===
    let stand = stand_catalog()
        .iter()
        .find(|s| s.capacity_lb >= load_per_support_lb)
        .map(|s| SelectedStand {
            model: s.model.to_string(),
            capacity_lb: s.capacity_lb,
        })
        .ok_or_else(|| {
            CalcError::lookup_miss(
                "support stand catalog",
                format!("stand for {:.0} lb per support", load_per_support_lb),
            )
        })?;

    // === Drainage drop ===
    let total_drop_in = spec.slope_in_per_10ft * spec.run_length_ft / 10.0;

    Ok(SupportResult {
        steel_weight_plf,
        fluid_weight_plf,
        insulation_weight_plf: spec.insulation_weight_plf,
        total_weight_plf,
        max_span_ft,
        spacing_ft,
        support_count,
        load_per_support_lb,
        stand,
        total_drop_in,
        flags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suction_main() -> SupportSpec {
        SupportSpec {
            label: "Suction main".to_string(),
            nominal: NominalPipeSize::Four,
            schedule: Schedule::Sch40,
            refrigerant: Refrigerant::R717,
            sat_temp_f: -20.0,
            fill: LineFill::Vapor,
            insulation_weight_plf: 2.0,
            run_length_ft: 100.0,
            slope_in_per_10ft: 0.25,
            support_spacing_ft: None,
        }
    }

    #[test]
    fn test_weight_stackup() {
        let result = size_supports(&suction_main()).unwrap();
        assert!((result.steel_weight_plf - 10.79).abs() < 0.05);
        // Vapor fill on a 4" line weighs almost nothing
        assert!(result.fluid_weight_plf < 0.01);
        assert!(
            (result.total_weight_plf
                - (result.steel_weight_plf + result.fluid_weight_plf + 2.0))
                .abs()
                < 1e-12
        );
    }

    #[test]
    fn test_liquid_fill_heavier_than_vapor() {
        let vapor = size_supports(&suction_main()).unwrap();
        let mut spec = suction_main();
        spec.fill = LineFill::Liquid;
        let liquid = size_supports(&spec).unwrap();
        assert!(liquid.fluid_weight_plf > 100.0 * vapor.fluid_weight_plf);
    }

    #[test]
    fn test_default_spacing_is_table_span() {
        let result = size_supports(&suction_main()).unwrap();
        assert_eq!(result.spacing_ft, 14.0);
        assert_eq!(result.max_span_ft, 14.0);
        assert!(result.flags.is_empty());
        // 100 ft at 14 ft spacing: 8 bays, 9 supports
        assert_eq!(result.support_count, 9);
    }

    #[test]
    fn test_overspan_flagged_not_rejected() {
        let mut spec = suction_main();
        spec.support_spacing_ft = Some(20.0);
        let result = size_supports(&spec).unwrap();
        assert_eq!(result.spacing_ft, 20.0);
        assert_eq!(result.flags.len(), 1);
        assert!(result.flags[0].message.contains("suggested maximum"));
        assert!(result.passes());
    }

    #[test]
    fn test_stand_selection_smallest_sufficient() {
        let result = size_supports(&suction_main()).unwrap();
        assert_eq!(result.stand.model, "PS-1");
        assert!(result.stand.capacity_lb >= result.load_per_support_lb);
    }

    #[test]
    fn test_no_stand_rated_is_lookup_miss() {
        let mut spec = suction_main();
        spec.nominal = NominalPipeSize::Twelve;
        spec.fill = LineFill::Liquid;
        spec.support_spacing_ft = Some(500.0);
        let error = size_supports(&spec).unwrap_err();
        assert_eq!(error.error_code(), "LOOKUP_MISS");
    }

    #[test]
    fn test_drainage_drop() {
        let result = size_supports(&suction_main()).unwrap();
        // 0.25 in per 10 ft over 100 ft
        assert!((result.total_drop_in - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_run_rejected() {
        let mut spec = suction_main();
        spec.run_length_ft = 0.0;
        assert!(size_supports(&spec).is_err());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let spec = suction_main();
        let json = serde_json::to_string_pretty(&spec).unwrap();
        let roundtrip: SupportSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec.nominal, roundtrip.nominal);

        let result = size_supports(&spec).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("load_per_support_lb"));
        let parsed: SupportResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.stand.model, result.stand.model);
    }
}
