//! # Safety Relief Valve Sizing
//!
//! Sizes the pressure relief protection for refrigeration equipment: the
//! required relieving capacity for the equipment class under the governing
//! code edition, the smallest catalog valve that serves the duty point, and
//! the back-pressure check on the discharge (outlet) piping.
//!
//! ## Dispatch
//!
//! Each `(equipment class, code edition)` pair maps to exactly one formula
//! family through a fixed table ([`formula_for`]). A pair the table does not
//! list is an [`CalcError::UnsupportedConfiguration`]; the engine never
//! substitutes a "nearest" formula. Adding a class or edition is an additive
//! table row, not a change to the dispatch.
//!
//! | family | classes | basis |
//! |---|---|---|
//! | vessel fire exposure | vessels, accumulators, intercoolers | `C = f D L` (lb air/min) |
//! | compressor displacement | screw, reciprocating | swept vapor flow at suction |
//! | heat exchanger | shell-and-tube, plate, evaporative condenser | heat input over latent heat |
//! | two-stage oil cooling | screw intermediate oil duty | oil-cooling duty over latent heat |
//!
//! ## Example (LLM-friendly)
//!
//! ```rust
//! use frost_core::calculations::srv::{size_srv, CodeEdition, EquipmentClass, SRVCase};
//!
//! let case = SRVCase {
//!     label: "HPR-1".to_string(),
//!     equipment: EquipmentClass::VesselHorizontal {
//!         diameter_ft: 4.0,
//!         length_ft: 12.0,
//!     },
//!     code_edition: CodeEdition::Iiar2014A,
//!     set_pressure_psig: 250.0,
//!     ..SRVCase::default()
//! };
//!
//! let result = size_srv(&case).unwrap();
//! assert!(result.valve.rated_capacity_lb_air_min >= result.required_capacity_lb_air_min);
//! ```

use serde::{Deserialize, Serialize};

use crate::compliance::{code_ref, ComplianceFlag, Severity};
use crate::errors::{CalcError, CalcResult};
use crate::hydraulics::{solve_flow, FlowCase, SolverConfig};
use crate::tables::pipe::{NominalPipeSize, Schedule};
use crate::tables::refrigerants::Refrigerant;
use crate::tables::valves::{
    relief_catalog, three_way_catalog, Manufacturer, BACK_PRESSURE_FREE_RATIO,
    DIFFUSION_WATER_GAL_PER_LB,
};
use crate::units::ATMOSPHERIC_PSI;

/// Molecular weight of air (lb/lb-mol)
const AIR_MOLECULAR_WEIGHT: f64 = 28.97;

/// Density of air at standard conditions (lb/ft3)
const AIR_DENSITY_LB_FT3: f64 = 0.0764;

/// Dynamic viscosity of air (lb/(ft-s))
const AIR_VISCOSITY_LB_FT_S: f64 = 1.22e-5;

/// Fire-exposure heat flux on a shell-and-tube exchanger (BTU/(hr-ft2))
const SHELL_AND_TUBE_FLUX_BTU_HR_FT2: f64 = 6_000.0;

/// Fire-exposure heat flux on a plate exchanger (BTU/(hr-ft2))
const PLATE_FLUX_BTU_HR_FT2: f64 = 10_000.0;

/// Vapor-space allowance on top of a diffusion tank's water volume
const DIFFUSION_TANK_VAPOR_SPACE: f64 = 0.20;

/// Governing code edition for the relief sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CodeEdition {
    /// IIAR 2-2014 with Addendum A
    #[default]
    Iiar2014A,
    /// ASHRAE 15-1994
    Ashrae1994,
    /// 2010 California Mechanical Code, section 1118.0
    Cmc2010,
}

impl CodeEdition {
    /// All editions for UI selection
    pub const ALL: [CodeEdition; 3] = [
        CodeEdition::Iiar2014A,
        CodeEdition::Ashrae1994,
        CodeEdition::Cmc2010,
    ];

    /// Display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            CodeEdition::Iiar2014A => "IIAR 2-2014 + Addendum A",
            CodeEdition::Ashrae1994 => "ASHRAE 15-1994",
            CodeEdition::Cmc2010 => "CMC 1118.0 (2010)",
        }
    }
}

impl std::fmt::Display for CodeEdition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Equipment being protected, with the geometry or heat-input parameters its
/// formula family needs.
///
/// ## JSON Serialization
///
/// Variants carry a "class" discriminator:
///
/// ```json
/// { "class": "VesselHorizontal", "diameter_ft": 4.0, "length_ft": 12.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class")]
pub enum EquipmentClass {
    /// Horizontal pressure vessel (receiver, surge drum)
    VesselHorizontal { diameter_ft: f64, length_ft: f64 },
    /// Vertical pressure vessel
    VesselVertical { diameter_ft: f64, height_ft: f64 },
    /// Suction accumulator
    Accumulator { diameter_ft: f64, length_ft: f64 },
    /// Two-stage intercooler
    Intercooler { diameter_ft: f64, length_ft: f64 },
    /// Rotary screw compressor
    CompressorScrew {
        displacement_cfm: f64,
        suction_sat_temp_f: f64,
    },
    /// Reciprocating compressor
    CompressorReciprocating {
        displacement_cfm: f64,
        suction_sat_temp_f: f64,
    },
    /// Evaporative condenser
    EvaporativeCondenser {
        heat_rejection_btu_hr: f64,
        condensing_temp_f: f64,
    },
    /// Shell-and-tube heat exchanger
    ShellAndTube {
        surface_area_ft2: f64,
        sat_temp_f: f64,
    },
    /// Plate heat exchanger
    Plate {
        surface_area_ft2: f64,
        sat_temp_f: f64,
    },
    /// Screw compressor two-stage oil cooling loop
    TwoStageOilCooling {
        oil_cooling_load_btu_hr: f64,
        intermediate_sat_temp_f: f64,
    },
}

impl EquipmentClass {
    /// Display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            EquipmentClass::VesselHorizontal { .. } => "Horizontal vessel",
            EquipmentClass::VesselVertical { .. } => "Vertical vessel",
            EquipmentClass::Accumulator { .. } => "Accumulator",
            EquipmentClass::Intercooler { .. } => "Intercooler",
            EquipmentClass::CompressorScrew { .. } => "Screw compressor",
            EquipmentClass::CompressorReciprocating { .. } => "Reciprocating compressor",
            EquipmentClass::EvaporativeCondenser { .. } => "Evaporative condenser",
            EquipmentClass::ShellAndTube { .. } => "Shell-and-tube heat exchanger",
            EquipmentClass::Plate { .. } => "Plate heat exchanger",
            EquipmentClass::TwoStageOilCooling { .. } => "Two-stage oil cooling",
        }
    }

    /// Validate the class-specific parameters.
    fn validate(&self) -> CalcResult<()> {
        let positive = |field: &str, value: f64| -> CalcResult<()> {
            if value <= 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Equipment parameter must be positive",
                ));
            }
            Ok(())
        };
        match self {
            EquipmentClass::VesselHorizontal {
                diameter_ft,
                length_ft,
            }
            | EquipmentClass::Accumulator {
                diameter_ft,
                length_ft,
            }
            | EquipmentClass::Intercooler {
                diameter_ft,
                length_ft,
            } => {
                positive("diameter_ft", *diameter_ft)?;
                positive("length_ft", *length_ft)
            }
            EquipmentClass::VesselVertical {
                diameter_ft,
                height_ft,
            } => {
                positive("diameter_ft", *diameter_ft)?;
                positive("height_ft", *height_ft)
            }
            EquipmentClass::CompressorScrew {
                displacement_cfm, ..
            }
            | EquipmentClass::CompressorReciprocating {
                displacement_cfm, ..
            } => positive("displacement_cfm", *displacement_cfm),
            EquipmentClass::EvaporativeCondenser {
                heat_rejection_btu_hr,
                ..
            } => positive("heat_rejection_btu_hr", *heat_rejection_btu_hr),
            EquipmentClass::ShellAndTube {
                surface_area_ft2, ..
            }
            | EquipmentClass::Plate {
                surface_area_ft2, ..
            } => positive("surface_area_ft2", *surface_area_ft2),
            EquipmentClass::TwoStageOilCooling {
                oil_cooling_load_btu_hr,
                ..
            } => positive("oil_cooling_load_btu_hr", *oil_cooling_load_btu_hr),
        }
    }
}

/// Formula family a `(class, edition)` pair resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormulaFamily {
    /// `C = f D L`, lb air/min from fire exposure on the vessel shell
    VesselFireExposure,
    /// Swept vapor volume at the suction saturation condition
    CompressorDisplacement,
    /// Heat input (fire flux or rejection duty) over latent heat
    HeatExchanger,
    /// Intermediate-stage oil-cooling duty over latent heat
    TwoStageOilCooling,
}

/// The fixed dispatch table from `(equipment class, code edition)` to a
/// formula family. `None` means the pair has no defined formula under that
/// edition and must not be sized by this engine.
///
/// IIAR 2-2014+A covers every class; ASHRAE 15-1994 covers the vessel family
/// and heat exchangers; CMC 1118.0 covers pressure vessels only.
pub fn formula_for(class: &EquipmentClass, edition: CodeEdition) -> Option<FormulaFamily> {
    use CodeEdition::*;
    use EquipmentClass::*;
    match (class, edition) {
        (VesselHorizontal { .. } | VesselVertical { .. }, _) => {
            Some(FormulaFamily::VesselFireExposure)
        }
        (Accumulator { .. } | Intercooler { .. }, Iiar2014A | Ashrae1994) => {
            Some(FormulaFamily::VesselFireExposure)
        }
        (CompressorScrew { .. } | CompressorReciprocating { .. }, Iiar2014A) => {
            Some(FormulaFamily::CompressorDisplacement)
        }
        (
            EvaporativeCondenser { .. } | ShellAndTube { .. } | Plate { .. },
            Iiar2014A | Ashrae1994,
        ) => Some(FormulaFamily::HeatExchanger),
        (TwoStageOilCooling { .. }, Iiar2014A) => Some(FormulaFamily::TwoStageOilCooling),
        _ => None,
    }
}

/// Air-equivalent relieving capacity for a refrigerant mass flow.
///
/// Capacity through a given orifice scales with the square root of molecular
/// weight, so `W_air = W_ref sqrt(M_air / M_ref)`.
pub fn air_equivalent_lb_min(refrigerant_lb_min: f64, refrigerant: Refrigerant) -> f64 {
    refrigerant_lb_min * (AIR_MOLECULAR_WEIGHT / refrigerant.molecular_weight()).sqrt()
}

/// Discharge (outlet) piping run downstream of the relief valve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutletPiping {
    /// Straight run length to the atmospheric termination (ft)
    pub length_ft: f64,

    /// Sum of fitting resistance coefficients (K values)
    pub fittings_k_sum: f64,

    /// Pipe size; `None` uses the selected valve's outlet connection
    pub nominal: Option<NominalPipeSize>,

    /// Pipe schedule
    pub schedule: Schedule,
}

/// Input parameters for a relief valve sizing case.
///
/// Exactly one equipment class and one code edition per case; the pair picks
/// the capacity formula. The three-way manifold and diffusion-tank
/// sub-results are produced only when `dual_relief` / `diffusion_inventory_lb`
/// ask for them.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "HPR-1",
///   "refrigerant": "R717",
///   "equipment": { "class": "VesselHorizontal", "diameter_ft": 4.0, "length_ft": 12.0 },
///   "code_edition": "Iiar2014A",
///   "set_pressure_psig": 250.0,
///   "back_pressure_psig": 0.0,
///   "manufacturer": "Hansen",
///   "outlet_piping": { "length_ft": 30.0, "fittings_k_sum": 1.5,
///                      "nominal": null, "schedule": "Sch40" },
///   "dual_relief": true,
///   "diffusion_inventory_lb": null
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SRVCase {
    /// User label for this relief point
    pub label: String,

    /// System refrigerant
    pub refrigerant: Refrigerant,

    /// Protected equipment and its sizing parameters
    pub equipment: EquipmentClass,

    /// Governing code edition
    pub code_edition: CodeEdition,

    /// Relief valve set pressure (psig)
    pub set_pressure_psig: f64,

    /// Superimposed back pressure at the valve outlet (psig)
    pub back_pressure_psig: f64,

    /// Valve catalog to select from
    pub manufacturer: Manufacturer,

    /// Discharge piping to check, if routed
    pub outlet_piping: Option<OutletPiping>,

    /// Dual relief valves on a three-way manifold
    pub dual_relief: bool,

    /// Ammonia inventory to absorb in an emergency diffusion tank (lb);
    /// `None` omits the tank sizing
    pub diffusion_inventory_lb: Option<f64>,
}

impl Default for SRVCase {
    fn default() -> Self {
        SRVCase {
            label: "SRV".to_string(),
            refrigerant: Refrigerant::R717,
            equipment: EquipmentClass::VesselHorizontal {
                diameter_ft: 4.0,
                length_ft: 12.0,
            },
            code_edition: CodeEdition::Iiar2014A,
            set_pressure_psig: 250.0,
            back_pressure_psig: 0.0,
            manufacturer: Manufacturer::Hansen,
            outlet_piping: None,
            dual_relief: false,
            diffusion_inventory_lb: None,
        }
    }
}

impl SRVCase {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.set_pressure_psig <= 0.0 {
            return Err(CalcError::invalid_input(
                "set_pressure_psig",
                self.set_pressure_psig.to_string(),
                "Set pressure must be positive",
            ));
        }
        if self.back_pressure_psig < 0.0 {
            return Err(CalcError::invalid_input(
                "back_pressure_psig",
                self.back_pressure_psig.to_string(),
                "Back pressure cannot be negative",
            ));
        }
        self.equipment.validate()?;
        if let Some(piping) = &self.outlet_piping {
            if piping.length_ft <= 0.0 {
                return Err(CalcError::invalid_input(
                    "outlet_piping.length_ft",
                    piping.length_ft.to_string(),
                    "Outlet run length must be positive",
                ));
            }
            if piping.fittings_k_sum < 0.0 {
                return Err(CalcError::invalid_input(
                    "outlet_piping.fittings_k_sum",
                    piping.fittings_k_sum.to_string(),
                    "Fitting K sum cannot be negative",
                ));
            }
        }
        if let Some(inventory) = self.diffusion_inventory_lb {
            if inventory <= 0.0 {
                return Err(CalcError::invalid_input(
                    "diffusion_inventory_lb",
                    inventory.to_string(),
                    "Diffusion inventory must be positive",
                ));
            }
        }
        Ok(())
    }
}

/// Required relieving capacity and the formula that produced it.
#[derive(Debug, Clone)]
struct RequiredCapacity {
    lb_air_min: f64,
    lb_refrigerant_min: f64,
    formula: &'static str,
    code_ref: &'static str,
}

/// Required capacity per the dispatch table.
fn required_capacity(case: &SRVCase) -> CalcResult<RequiredCapacity> {
    let family = formula_for(&case.equipment, case.code_edition).ok_or_else(|| {
        CalcError::unsupported(
            case.equipment.display_name(),
            case.code_edition.display_name(),
        )
    })?;

    let refrigerant = case.refrigerant;
    match family {
        FormulaFamily::VesselFireExposure => {
            let (d, l) = match &case.equipment {
                EquipmentClass::VesselHorizontal {
                    diameter_ft,
                    length_ft,
                }
                | EquipmentClass::Accumulator {
                    diameter_ft,
                    length_ft,
                }
                | EquipmentClass::Intercooler {
                    diameter_ft,
                    length_ft,
                } => (*diameter_ft, *length_ft),
                EquipmentClass::VesselVertical {
                    diameter_ft,
                    height_ft,
                } => (*diameter_ft, *height_ft),
                _ => unreachable!("dispatch table routed a non-vessel to VesselFireExposure"),
            };
            // C = f D L is already in lb air/min
            let lb_air_min = refrigerant.fire_factor() * d * l;
            let lb_refrigerant_min =
                lb_air_min / (AIR_MOLECULAR_WEIGHT / refrigerant.molecular_weight()).sqrt();
            Ok(RequiredCapacity {
                lb_air_min,
                lb_refrigerant_min,
                formula: "C = f D L",
                code_ref: match case.code_edition {
                    CodeEdition::Iiar2014A => code_ref::IIAR2_VESSEL_RELIEF,
                    CodeEdition::Ashrae1994 => code_ref::ASHRAE15_VESSEL_RELIEF,
                    CodeEdition::Cmc2010 => code_ref::CMC_VESSEL_RELIEF,
                },
            })
        }
        FormulaFamily::CompressorDisplacement => {
            let (displacement_cfm, suction_sat_temp_f) = match &case.equipment {
                EquipmentClass::CompressorScrew {
                    displacement_cfm,
                    suction_sat_temp_f,
                }
                | EquipmentClass::CompressorReciprocating {
                    displacement_cfm,
                    suction_sat_temp_f,
                } => (*displacement_cfm, *suction_sat_temp_f),
                _ => unreachable!("dispatch table routed a non-compressor to CompressorDisplacement"),
            };
            // Full swept volume carried as saturated vapor at suction
            let vapor_density = refrigerant
                .saturation_at(suction_sat_temp_f)?
                .vapor_density_lb_ft3;
            let lb_refrigerant_min = displacement_cfm * vapor_density;
            Ok(RequiredCapacity {
                lb_air_min: air_equivalent_lb_min(lb_refrigerant_min, refrigerant),
                lb_refrigerant_min,
                formula: "W = rho_v V_disp",
                code_ref: code_ref::IIAR2_COMPRESSOR_RELIEF,
            })
        }
        FormulaFamily::HeatExchanger => {
            let (heat_input_btu_hr, sat_temp_f) = match &case.equipment {
                EquipmentClass::ShellAndTube {
                    surface_area_ft2,
                    sat_temp_f,
                } => (SHELL_AND_TUBE_FLUX_BTU_HR_FT2 * surface_area_ft2, *sat_temp_f),
                EquipmentClass::Plate {
                    surface_area_ft2,
                    sat_temp_f,
                } => (PLATE_FLUX_BTU_HR_FT2 * surface_area_ft2, *sat_temp_f),
                EquipmentClass::EvaporativeCondenser {
                    heat_rejection_btu_hr,
                    condensing_temp_f,
                } => (*heat_rejection_btu_hr, *condensing_temp_f),
                _ => unreachable!("dispatch table routed a non-exchanger to HeatExchanger"),
            };
            let latent = refrigerant.saturation_at(sat_temp_f)?.latent_heat_btu_lb;
            let lb_refrigerant_min = heat_input_btu_hr / latent / 60.0;
            Ok(RequiredCapacity {
                lb_air_min: air_equivalent_lb_min(lb_refrigerant_min, refrigerant),
                lb_refrigerant_min,
                formula: "W = Q / h_fg",
                code_ref: match case.code_edition {
                    CodeEdition::Ashrae1994 => code_ref::ASHRAE15_HX_RELIEF,
                    _ => code_ref::IIAR2_HX_RELIEF,
                },
            })
        }
        FormulaFamily::TwoStageOilCooling => {
            let (oil_load_btu_hr, intermediate_sat_temp_f) = match &case.equipment {
                EquipmentClass::TwoStageOilCooling {
                    oil_cooling_load_btu_hr,
                    intermediate_sat_temp_f,
                } => (*oil_cooling_load_btu_hr, *intermediate_sat_temp_f),
                _ => unreachable!("dispatch table routed a non-oil-cooler to TwoStageOilCooling"),
            };
            // Vapor generated by the oil duty at the intermediate condition
            let latent = refrigerant
                .saturation_at(intermediate_sat_temp_f)?
                .latent_heat_btu_lb;
            let lb_refrigerant_min = oil_load_btu_hr / latent / 60.0;
            Ok(RequiredCapacity {
                lb_air_min: air_equivalent_lb_min(lb_refrigerant_min, refrigerant),
                lb_refrigerant_min,
                formula: "W = Q_oil / h_fg",
                code_ref: code_ref::IIAR2_COMPRESSOR_RELIEF,
            })
        }
    }
}

/// The valve the selection scan settled on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedValve {
    /// Manufacturer
    pub manufacturer: Manufacturer,

    /// Catalog model designation
    pub model: String,

    /// Inlet connection size
    pub inlet: NominalPipeSize,

    /// Outlet connection size
    pub outlet: NominalPipeSize,

    /// Effective orifice area (in2)
    pub orifice_area_in2: f64,

    /// Catalog rank of the selection
    pub rank: u32,

    /// Rated air capacity at the duty point (lb air/min)
    pub rated_capacity_lb_air_min: f64,
}

/// Scan a manufacturer catalog for the smallest valve whose rated capacity
/// at the duty point meets or exceeds the required capacity.
///
/// The boundary is inclusive: a valve rated exactly at the requirement is
/// selected. Catalogs are stored in ascending rank, so the first hit is the
/// tie-break winner (lowest rank, then table order).
pub fn select_relief_valve(
    manufacturer: Manufacturer,
    required_lb_air_min: f64,
    set_psig: f64,
    back_psig: f64,
) -> CalcResult<SelectedValve> {
    for valve in relief_catalog(manufacturer) {
        if let Some(rated) = valve.rated_air_capacity_lb_min(set_psig, back_psig) {
            if rated >= required_lb_air_min {
                return Ok(SelectedValve {
                    manufacturer: valve.manufacturer,
                    model: valve.model.to_string(),
                    inlet: valve.inlet,
                    outlet: valve.outlet,
                    orifice_area_in2: valve.orifice_area_in2,
                    rank: valve.rank,
                    rated_capacity_lb_air_min: rated,
                });
            }
        }
    }
    Err(CalcError::lookup_miss(
        "relief valve catalog",
        format!(
            "{} valve for {:.1} lb air/min at {:.0} psig set / {:.0} psig back",
            manufacturer, required_lb_air_min, set_psig, back_psig
        ),
    ))
}

/// Discharge piping back-pressure check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutletCheck {
    /// Pipe size used for the run
    pub nominal: NominalPipeSize,

    /// Flow velocity in the run (ft/s)
    pub velocity_ft_s: f64,

    /// Reynolds number
    pub reynolds: f64,

    /// Converged Moody friction factor
    pub friction_factor: f64,

    /// Developed back pressure at rated valve flow (psi)
    pub pressure_drop_psi: f64,

    /// Code limit on developed back pressure (psi)
    pub allowable_back_pressure_psi: f64,
}

/// Three-way manifold valve selection for dual relief.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreeWaySelection {
    /// Catalog model designation
    pub model: String,

    /// Connection size
    pub connection: NominalPipeSize,
}

/// Emergency diffusion tank sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffusionTankResult {
    /// Water volume to absorb the inventory (gal)
    pub water_volume_gal: f64,

    /// Tank volume including vapor space (gal)
    pub tank_volume_gal: f64,
}

/// Results from a relief valve sizing case.
///
/// ## JSON Example
///
/// ```json
/// {
///   "formula": "C = f D L",
///   "code_ref": "IIAR 2-2014 15.5.2",
///   "required_capacity_lb_air_min": 24.0,
///   "required_refrigerant_lb_min": 18.4,
///   "valve": {
///     "manufacturer": "Hansen", "model": "H5600",
///     "inlet": "Half", "outlet": "One",
///     "orifice_area_in2": 0.11, "rank": 1,
///     "rated_capacity_lb_air_min": 39.2
///   },
///   "outlet": null,
///   "three_way": null,
///   "diffusion_tank": null,
///   "flags": []
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SRVResult {
    // === Required Capacity ===
    /// Formula family applied (for the report header)
    pub formula: String,

    /// Code section the formula comes from
    pub code_ref: String,

    /// Required relieving capacity (lb air/min)
    pub required_capacity_lb_air_min: f64,

    /// Required capacity as refrigerant mass flow (lb/min)
    pub required_refrigerant_lb_min: f64,

    // === Selection ===
    /// Selected relief valve
    pub valve: SelectedValve,

    // === Optional Sub-Results ===
    /// Discharge piping check, present only when piping was specified
    pub outlet: Option<OutletCheck>,

    /// Three-way manifold valve, present only for dual relief
    pub three_way: Option<ThreeWaySelection>,

    /// Diffusion tank sizing, present only when an inventory was given
    pub diffusion_tank: Option<DiffusionTankResult>,

    // === Compliance ===
    /// Code flags raised during sizing
    pub flags: Vec<ComplianceFlag>,
}

impl SRVResult {
    /// True when no error-severity flag was raised
    pub fn passes(&self) -> bool {
        !self.flags.iter().any(|f| f.severity == Severity::Error)
    }
}

/// Size the relief protection for one case.
///
/// This is a pure function suitable for LLM invocation.
///
/// # Arguments
///
/// * `case` - Equipment, code edition, duty point and optional sub-requests
///
/// # Returns
///
/// * `Ok(SRVResult)` - Required capacity, selected valve, checks and flags
/// * `Err(CalcError)` - Invalid input, unsupported pair, missing catalog
///   entry, or a non-convergent outlet solve
pub fn size_srv(case: &SRVCase) -> CalcResult<SRVResult> {
    case.validate()?;

    let mut flags = Vec::new();

    // === Required capacity per the (class, edition) dispatch ===
    let required = required_capacity(case)?;

    // === Valve selection ===
    let valve = select_relief_valve(
        case.manufacturer,
        required.lb_air_min,
        case.set_pressure_psig,
        case.back_pressure_psig,
    )?;

    // === Discharge piping check ===
    // The pipe must carry the valve's full rated flow, not just the required
    // flow, because the valve will pass its rating when open. Flowing density
    // is air at the relieving pressure (ideal gas from the standard density).
    let outlet = match &case.outlet_piping {
        Some(piping) => {
            let nominal = piping.nominal.unwrap_or(valve.outlet);
            let relieving_psia = 1.1 * case.set_pressure_psig + ATMOSPHERIC_PSI;
            let flow = FlowCase {
                mass_flow_lb_min: valve.rated_capacity_lb_air_min,
                density_lb_ft3: AIR_DENSITY_LB_FT3 * relieving_psia / ATMOSPHERIC_PSI,
                viscosity_lb_ft_s: AIR_VISCOSITY_LB_FT_S,
                diameter_ft: nominal.inner_diameter_ft(piping.schedule),
                length_ft: piping.length_ft,
                fittings_k_sum: piping.fittings_k_sum,
            };
            let solution = solve_flow(&flow, SolverConfig::default())?;

            let allowable = BACK_PRESSURE_FREE_RATIO * case.set_pressure_psig;
            let developed = solution.pressure_drop_psi + case.back_pressure_psig;
            if developed > allowable {
                let discharge_ref = match case.code_edition {
                    CodeEdition::Ashrae1994 => code_ref::ASHRAE15_DISCHARGE,
                    _ => code_ref::IIAR2_DISCHARGE_PIPING,
                };
                flags.push(ComplianceFlag::error(
                    discharge_ref,
                    format!(
                        "Developed back pressure {:.1} psi exceeds {:.1} psi (10% of set) in the {} outlet run",
                        developed, allowable, nominal
                    ),
                ));
            }

            Some(OutletCheck {
                nominal,
                velocity_ft_s: solution.velocity_ft_s,
                reynolds: solution.reynolds,
                friction_factor: solution.friction_factor,
                pressure_drop_psi: solution.pressure_drop_psi,
                allowable_back_pressure_psi: allowable,
            })
        }
        None => None,
    };

    // === Three-way manifold for dual relief ===
    let three_way = if case.dual_relief {
        let selection = three_way_catalog()
            .iter()
            .find(|v| v.connection >= valve.inlet)
            .ok_or_else(|| {
                CalcError::lookup_miss(
                    "three-way valve catalog",
                    format!("connection >= {}", valve.inlet),
                )
            })?;
        Some(ThreeWaySelection {
            model: selection.model.to_string(),
            connection: selection.connection,
        })
    } else {
        None
    };

    // === Diffusion tank ===
    let diffusion_tank = case.diffusion_inventory_lb.map(|inventory| {
        let water_volume_gal = inventory * DIFFUSION_WATER_GAL_PER_LB;
        DiffusionTankResult {
            water_volume_gal,
            tank_volume_gal: water_volume_gal * (1.0 + DIFFUSION_TANK_VAPOR_SPACE),
        }
    });

    Ok(SRVResult {
        formula: required.formula.to_string(),
        code_ref: required.code_ref.to_string(),
        required_capacity_lb_air_min: required.lb_air_min,
        required_refrigerant_lb_min: required.lb_refrigerant_min,
        valve,
        outlet,
        three_way,
        diffusion_tank,
        flags,
    })
}
