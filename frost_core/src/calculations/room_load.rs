//! # Cold-Storage Room Load Calculation
//!
//! Computes the daily refrigeration load for a cold-storage room:
//! envelope transmission, air-change infiltration, door infiltration,
//! internal (lighting, people, motors) and product loads, aggregated to a
//! safety-factored connected load and tons of refrigeration.
//!
//! ## Assumptions
//!
//! - Daily (24-hour) accounting; all subtotals are BTU/day
//! - Each surface sees its own adjacent temperature (an engine room wall
//!   and a roof under the sun get their own deltas)
//! - Door-opening flow and envelope air-change leakage are physically
//!   distinct and are both carried
//! - Product terms are gated on whether the pull-down actually crosses the
//!   freeze point; a transition that does not occur contributes nothing
//!
//! ## Example (LLM-friendly)
//!
//! ```rust
//! use frost_core::calculations::room_load::{compute_room_load, RoomSpec, SurfaceSpec};
//!
//! let spec = RoomSpec {
//!     label: "Freezer F-1".to_string(),
//!     length_ft: 50.0,
//!     width_ft: 20.0,
//!     height_ft: 20.0,
//!     inside_temp_f: -10.0,
//!     outside_temp_f: 85.0,
//!     surfaces: vec![SurfaceSpec {
//!         name: "North wall".to_string(),
//!         u_value: 0.035,
//!         area_ft2: 1000.0,
//!         adjacent_temp_f: None,
//!     }],
//!     ..RoomSpec::default()
//! };
//!
//! let result = compute_room_load(&spec).unwrap();
//! assert!(result.transmission_btu_day > 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::compliance::{code_ref, ComplianceFlag};
use crate::errors::{CalcError, CalcResult};
use crate::units::BTU_PER_HR_PER_TON;

/// Volumetric heat factor of air (BTU per ft3 per F)
const AIR_HEAT_FACTOR_BTU_FT3_F: f64 = 0.018;

/// Specific volume of air for infiltration mass accounting (ft3/lb)
const AIR_SPECIFIC_VOLUME_FT3_LB: f64 = 13.5;

/// Lighting heat equivalent (BTU/hr per watt)
const BTU_PER_WATT_HR: f64 = 3.413;

/// Motor heat equivalent (BTU/hr per hp)
const BTU_PER_HP_HR: f64 = 2_545.0;

/// Floor on the per-person occupancy heat estimate (BTU/hr)
const PERSON_HEAT_FLOOR_BTU_HR: f64 = 720.0;

/// A single envelope assembly (wall, roof, or floor section).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceSpec {
    /// Surface label (e.g., "North wall", "Roof")
    pub name: String,

    /// Overall heat-transfer coefficient U (BTU/(hr-ft2-F))
    pub u_value: f64,

    /// Surface area (ft2); zero contributes zero load
    pub area_ft2: f64,

    /// Temperature on the far side of this assembly (F).
    /// `None` means the ambient outside design temperature.
    pub adjacent_temp_f: Option<f64>,
}

/// Door construction/service class; sets the open-door airflow rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DoorType {
    /// Freezer door (largest inside/outside density difference)
    #[default]
    Freezer,
    /// Cooler door
    Cooler,
    /// Shipping/dock door with vestibule or curtain
    Dock,
}

impl DoorType {
    /// All door types for UI selection
    pub const ALL: [DoorType; 3] = [DoorType::Freezer, DoorType::Cooler, DoorType::Dock];

    /// Open-door airflow per square foot of opening (cfm/ft2)
    pub fn airflow_cfm_per_ft2(&self) -> f64 {
        match self {
            DoorType::Freezer => 150.0,
            DoorType::Cooler => 120.0,
            DoorType::Dock => 100.0,
        }
    }

    /// Display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            DoorType::Freezer => "Freezer",
            DoorType::Cooler => "Cooler",
            DoorType::Dock => "Dock",
        }
    }
}

/// A door in the room envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoorSpec {
    /// Door label (e.g., "D-1")
    pub name: String,

    /// Opening area (ft2); zero contributes zero load
    pub area_ft2: f64,

    /// Hours per day the door stands open
    pub open_hours_per_day: f64,

    /// Door service class
    pub door_type: DoorType,
}

/// Product moving through the room each day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSpec {
    /// Product label (e.g., "Boxed beef")
    pub name: String,

    /// Daily throughput (lb/day)
    pub mass_lb_per_day: f64,

    /// Specific heat above the freeze point (BTU/(lb-F))
    pub specific_heat_above: f64,

    /// Specific heat below the freeze point (BTU/(lb-F))
    pub specific_heat_below: f64,

    /// Latent heat of fusion (BTU/lb)
    pub latent_heat_btu_lb: f64,

    /// Product freeze point (F)
    pub freeze_point_f: f64,

    /// Temperature at which product enters the room (F)
    pub entering_temp_f: f64,

    /// Temperature the product is pulled down to (F)
    pub final_temp_f: f64,
}

impl ProductSpec {
    /// Sensible heat removed above the freeze point (BTU/day).
    /// Zero when the pull-down never operates above freezing.
    pub fn sensible_above_btu_day(&self) -> f64 {
        if self.entering_temp_f > self.freeze_point_f {
            let stop = self.final_temp_f.max(self.freeze_point_f);
            self.mass_lb_per_day * self.specific_heat_above * (self.entering_temp_f - stop)
        } else {
            0.0
        }
    }

    /// Latent heat of fusion removed (BTU/day).
    /// Included only when the pull-down crosses the freeze point.
    pub fn latent_btu_day(&self) -> f64 {
        if self.entering_temp_f > self.freeze_point_f && self.final_temp_f < self.freeze_point_f {
            self.mass_lb_per_day * self.latent_heat_btu_lb
        } else {
            0.0
        }
    }

    /// Sensible heat removed below the freeze point (BTU/day).
    /// Zero when the product never goes below freezing.
    pub fn sensible_below_btu_day(&self) -> f64 {
        if self.final_temp_f < self.freeze_point_f {
            let start = self.entering_temp_f.min(self.freeze_point_f);
            self.mass_lb_per_day * self.specific_heat_below * (start - self.final_temp_f)
        } else {
            0.0
        }
    }

    /// Total product load (BTU/day)
    pub fn total_btu_day(&self) -> f64 {
        self.sensible_above_btu_day() + self.latent_btu_day() + self.sensible_below_btu_day()
    }
}

/// Lighting, occupancy, and motor loads inside the room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternalLoads {
    /// Installed lighting density (W/ft2 of floor area)
    pub lighting_w_per_ft2: f64,

    /// Hours per day the lights run
    pub lighting_hours_per_day: f64,

    /// Number of people working in the room
    pub people_count: f64,

    /// Hours per day of occupancy
    pub people_hours_per_day: f64,

    /// Per-person heat rate override (BTU/hr). `None` estimates from the
    /// room temperature (people give off more heat in colder rooms).
    pub person_heat_btu_hr: Option<f64>,

    /// Total motor/equipment nameplate rating (hp)
    pub motor_nameplate_hp: f64,

    /// Fraction of nameplate actually drawn
    pub motor_load_factor: f64,

    /// Hours per day the motors run
    pub motor_hours_per_day: f64,
}

impl Default for InternalLoads {
    fn default() -> Self {
        InternalLoads {
            lighting_w_per_ft2: 0.0,
            lighting_hours_per_day: 0.0,
            people_count: 0.0,
            people_hours_per_day: 0.0,
            person_heat_btu_hr: None,
            motor_nameplate_hp: 0.0,
            motor_load_factor: 1.0,
            motor_hours_per_day: 0.0,
        }
    }
}

/// Input parameters for a cold-storage room load calculation.
///
/// All temperatures are degrees F, all dimensions feet. The inside design
/// temperature must be strictly below the outside design temperature;
/// individual surfaces may still face spaces colder than the room.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Freezer F-1",
///   "length_ft": 50.0,
///   "width_ft": 20.0,
///   "height_ft": 20.0,
///   "inside_temp_f": -10.0,
///   "outside_temp_f": 85.0,
///   "inside_humidity_ratio": 0.0005,
///   "outside_humidity_ratio": 0.014,
///   "surfaces": [
///     { "name": "Roof", "u_value": 0.03, "area_ft2": 1000.0, "adjacent_temp_f": 110.0 }
///   ],
///   "doors": [
///     { "name": "D-1", "area_ft2": 100.0, "open_hours_per_day": 2.0, "door_type": "Freezer" }
///   ],
///   "products": [],
///   "internal": { "lighting_w_per_ft2": 1.2, "lighting_hours_per_day": 12.0,
///                 "people_count": 2.0, "people_hours_per_day": 8.0,
///                 "person_heat_btu_hr": null,
///                 "motor_nameplate_hp": 5.0, "motor_load_factor": 0.8,
///                 "motor_hours_per_day": 16.0 },
///   "run_hours_per_day": 18.0,
///   "safety_factor": 0.10
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSpec {
    /// User label for this room
    pub label: String,

    /// Inside room length (ft)
    pub length_ft: f64,

    /// Inside room width (ft)
    pub width_ft: f64,

    /// Inside room height (ft)
    pub height_ft: f64,

    /// Design inside (holding) temperature (F)
    pub inside_temp_f: f64,

    /// Design outside (ambient) temperature (F)
    pub outside_temp_f: f64,

    /// Inside air humidity ratio (lb water / lb dry air)
    pub inside_humidity_ratio: f64,

    /// Outside air humidity ratio (lb water / lb dry air)
    pub outside_humidity_ratio: f64,

    /// Envelope assemblies
    pub surfaces: Vec<SurfaceSpec>,

    /// Doors in the envelope
    pub doors: Vec<DoorSpec>,

    /// Products moving through the room
    pub products: Vec<ProductSpec>,

    /// Lighting/people/motor loads
    pub internal: InternalLoads,

    /// Design compressor run hours per day (defrost and pull-down margin)
    pub run_hours_per_day: f64,

    /// Safety factor applied once to the connected total (0.10 = 10 %)
    pub safety_factor: f64,
}

impl Default for RoomSpec {
    fn default() -> Self {
        RoomSpec {
            label: "Room".to_string(),
            length_ft: 20.0,
            width_ft: 20.0,
            height_ft: 12.0,
            inside_temp_f: 35.0,
            outside_temp_f: 95.0,
            inside_humidity_ratio: 0.003,
            outside_humidity_ratio: 0.014,
            surfaces: Vec::new(),
            doors: Vec::new(),
            products: Vec::new(),
            internal: InternalLoads::default(),
            run_hours_per_day: 18.0,
            safety_factor: 0.10,
        }
    }
}

impl RoomSpec {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("length_ft", self.length_ft),
            ("width_ft", self.width_ft),
            ("height_ft", self.height_ft),
        ] {
            if value <= 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Room dimension must be positive",
                ));
            }
        }
        if self.inside_temp_f >= self.outside_temp_f {
            return Err(CalcError::invalid_input(
                "inside_temp_f",
                self.inside_temp_f.to_string(),
                "Inside design temperature must be below the outside design temperature",
            ));
        }
        if self.run_hours_per_day <= 0.0 || self.run_hours_per_day > 24.0 {
            return Err(CalcError::invalid_input(
                "run_hours_per_day",
                self.run_hours_per_day.to_string(),
                "Run hours must be in (0, 24]",
            ));
        }
        if self.safety_factor < 0.0 {
            return Err(CalcError::invalid_input(
                "safety_factor",
                self.safety_factor.to_string(),
                "Safety factor cannot be negative",
            ));
        }
        for surface in &self.surfaces {
            if surface.u_value < 0.0 || surface.area_ft2 < 0.0 {
                return Err(CalcError::invalid_input(
                    "surfaces",
                    surface.name.clone(),
                    "U-value and area cannot be negative",
                ));
            }
        }
        for door in &self.doors {
            if door.area_ft2 < 0.0 {
                return Err(CalcError::invalid_input(
                    "doors",
                    door.name.clone(),
                    "Door area cannot be negative",
                ));
            }
            if door.open_hours_per_day < 0.0 || door.open_hours_per_day > 24.0 {
                return Err(CalcError::invalid_input(
                    "doors",
                    door.name.clone(),
                    "Door open hours must be in [0, 24]",
                ));
            }
        }
        for product in &self.products {
            if product.mass_lb_per_day < 0.0 {
                return Err(CalcError::invalid_input(
                    "products",
                    product.name.clone(),
                    "Product throughput cannot be negative",
                ));
            }
            if product.final_temp_f > product.entering_temp_f {
                return Err(CalcError::invalid_input(
                    "products",
                    product.name.clone(),
                    "Final temperature cannot exceed entering temperature",
                ));
            }
        }
        Ok(())
    }

    /// Interior room volume (ft3)
    pub fn volume_ft3(&self) -> f64 {
        self.length_ft * self.width_ft * self.height_ft
    }

    /// Floor area (ft2)
    pub fn floor_area_ft2(&self) -> f64 {
        self.length_ft * self.width_ft
    }

    /// Air changes per 24 hours from room volume.
    ///
    /// Two empirical regimes split at a 32 F inside design temperature:
    /// below freezing `n = 596.21 V^-0.548`, at or above `n = 817.5 V^-0.5551`.
    pub fn air_changes_per_day(&self) -> f64 {
        let volume = self.volume_ft3();
        if self.inside_temp_f < 32.0 {
            596.21 * volume.powf(-0.548)
        } else {
            817.5 * volume.powf(-0.5551)
        }
    }

    /// Per-person heat rate (BTU/hr): explicit override, or the cold-room
    /// estimate `1295 - 11.4 T` floored at 720.
    pub fn person_heat_btu_hr(&self) -> f64 {
        self.internal
            .person_heat_btu_hr
            .unwrap_or_else(|| (1_295.0 - 11.4 * self.inside_temp_f).max(PERSON_HEAT_FLOOR_BTU_HR))
    }
}

/// Enthalpy of moist air (BTU/lb dry air) at temperature `t_f` and humidity
/// ratio `w` (lb/lb): `h = 0.24 t + w (1061 + 0.444 t)`.
pub fn moist_air_enthalpy_btu_lb(t_f: f64, w: f64) -> f64 {
    0.24 * t_f + w * (1_061.0 + 0.444 * t_f)
}

/// Results from a room load calculation.
///
/// Subtotals are all BTU/day. The safety factor is applied once, to the
/// connected total, not per subtotal.
///
/// ## JSON Example
///
/// ```json
/// {
///   "volume_ft3": 20000.0,
///   "air_changes_per_day": 2.6,
///   "transmission_btu_day": 250000.0,
///   "infiltration_btu_day": 180000.0,
///   "door_btu_day": 310000.0,
///   "lighting_btu_day": 0.0,
///   "occupancy_btu_day": 0.0,
///   "equipment_btu_day": 0.0,
///   "product_btu_day": 0.0,
///   "connected_total_btu_day": 740000.0,
///   "safety_factor": 0.10,
///   "design_total_btu_day": 814000.0,
///   "required_capacity_btu_hr": 45222.0,
///   "tons_refrigeration": 3.77,
///   "flags": []
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadResult {
    // === Room Summary ===
    /// Interior volume (ft3)
    pub volume_ft3: f64,

    /// Envelope air changes per 24 hours
    pub air_changes_per_day: f64,

    // === Subtotals (BTU/day) ===
    /// Envelope transmission
    pub transmission_btu_day: f64,

    /// Envelope air-change infiltration (sensible + latent)
    pub infiltration_btu_day: f64,

    /// Door-opening infiltration, summed over doors
    pub door_btu_day: f64,

    /// Lighting
    pub lighting_btu_day: f64,

    /// Occupancy
    pub occupancy_btu_day: f64,

    /// Motors and equipment
    pub equipment_btu_day: f64,

    /// Product pull-down (sensible + latent + subcooling)
    pub product_btu_day: f64,

    // === Aggregate ===
    /// Sum of all subtotals before the safety factor
    pub connected_total_btu_day: f64,

    /// Safety factor applied to the connected total
    pub safety_factor: f64,

    /// Design total after the safety factor (BTU/day)
    pub design_total_btu_day: f64,

    /// Required equipment capacity over the design run hours (BTU/hr)
    pub required_capacity_btu_hr: f64,

    /// Required capacity in tons of refrigeration
    pub tons_refrigeration: f64,

    // === Compliance ===
    /// Informational and code flags raised during the calculation
    pub flags: Vec<ComplianceFlag>,
}

impl LoadResult {
    /// Sum of the individual subtotals (equals `connected_total_btu_day`)
    pub fn subtotal_sum_btu_day(&self) -> f64 {
        self.transmission_btu_day
            + self.infiltration_btu_day
            + self.door_btu_day
            + self.lighting_btu_day
            + self.occupancy_btu_day
            + self.equipment_btu_day
            + self.product_btu_day
    }
}

/// Calculate the daily refrigeration load for a room.
///
/// This is a pure function suitable for LLM invocation.
///
/// # Arguments
///
/// * `spec` - Room geometry, envelope, doors, product and internal loads
///
/// # Returns
///
/// * `Ok(LoadResult)` - Subtotals, aggregate and flags
/// * `Err(CalcError)` - Structured error if inputs are invalid
pub fn compute_room_load(spec: &RoomSpec) -> CalcResult<LoadResult> {
    spec.validate()?;

    let mut flags = Vec::new();
    let volume = spec.volume_ft3();

    // === Transmission ===
    // Q = U A dT * 24 per assembly, each against its own adjacent temperature
    let mut transmission_btu_day = 0.0;
    let mut envelope_area_ft2 = 0.0;
    for surface in &spec.surfaces {
        let adjacent = surface.adjacent_temp_f.unwrap_or(spec.outside_temp_f);
        let delta_t = adjacent - spec.inside_temp_f;
        let q = surface.u_value * surface.area_ft2 * delta_t * 24.0;
        if q < 0.0 {
            flags.push(ComplianceFlag::info(
                code_ref::ROOM_LOAD,
                format!(
                    "Surface '{}' faces a space colder than the room ({:.1} F); transmission term is negative",
                    surface.name, adjacent
                ),
            ));
        }
        transmission_btu_day += q;
        envelope_area_ft2 += surface.area_ft2;
    }

    // === Air-change infiltration ===
    // Applies only when the room has exposed envelope area to leak through;
    // an interior sub-space modeled with no envelope takes no change load.
    let air_changes = spec.air_changes_per_day();
    let infiltration_btu_day = if envelope_area_ft2 > 0.0 {
        let air_mass_lb_day = air_changes * volume / AIR_SPECIFIC_VOLUME_FT3_LB;
        let enthalpy_diff = moist_air_enthalpy_btu_lb(spec.outside_temp_f, spec.outside_humidity_ratio)
            - moist_air_enthalpy_btu_lb(spec.inside_temp_f, spec.inside_humidity_ratio);
        air_mass_lb_day * enthalpy_diff
    } else {
        0.0
    };

    // === Door infiltration ===
    // Independent of the air-change term: doorway flow while open
    let delta_t_ambient = spec.outside_temp_f - spec.inside_temp_f;
    let mut door_btu_day = 0.0;
    for door in &spec.doors {
        let airflow_ft3 =
            door.door_type.airflow_cfm_per_ft2() * door.area_ft2 * 60.0 * door.open_hours_per_day;
        door_btu_day += airflow_ft3 * delta_t_ambient * AIR_HEAT_FACTOR_BTU_FT3_F;
    }

    // === Internal loads ===
    let internal = &spec.internal;
    let lighting_btu_day = internal.lighting_w_per_ft2
        * spec.floor_area_ft2()
        * BTU_PER_WATT_HR
        * internal.lighting_hours_per_day;
    let occupancy_btu_day =
        internal.people_count * spec.person_heat_btu_hr() * internal.people_hours_per_day;
    let equipment_btu_day = internal.motor_nameplate_hp
        * BTU_PER_HP_HR
        * internal.motor_load_factor
        * internal.motor_hours_per_day;

    // === Product load ===
    let product_btu_day: f64 = spec.products.iter().map(ProductSpec::total_btu_day).sum();

    // === Aggregate ===
    let connected_total_btu_day = transmission_btu_day
        + infiltration_btu_day
        + door_btu_day
        + lighting_btu_day
        + occupancy_btu_day
        + equipment_btu_day
        + product_btu_day;
    let design_total_btu_day = connected_total_btu_day * (1.0 + spec.safety_factor);

    // TR = BTU/day / (24 * run-hour fraction) / 12000
    let run_hour_fraction = spec.run_hours_per_day / 24.0;
    let required_capacity_btu_hr = design_total_btu_day / (24.0 * run_hour_fraction);
    let tons_refrigeration = required_capacity_btu_hr / BTU_PER_HR_PER_TON;

    Ok(LoadResult {
        volume_ft3: volume,
        air_changes_per_day: air_changes,
        transmission_btu_day,
        infiltration_btu_day,
        door_btu_day,
        lighting_btu_day,
        occupancy_btu_day,
        equipment_btu_day,
        product_btu_day,
        connected_total_btu_day,
        safety_factor: spec.safety_factor,
        design_total_btu_day,
        required_capacity_btu_hr,
        tons_refrigeration,
        flags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The 20,000 ft3 freezer scenario: -10 F inside, 85 F outside,
    /// one 100 ft2 door open 2 hr/day, no product.
    fn freezer_room() -> RoomSpec {
        RoomSpec {
            label: "Freezer F-1".to_string(),
            length_ft: 50.0,
            width_ft: 20.0,
            height_ft: 20.0,
            inside_temp_f: -10.0,
            outside_temp_f: 85.0,
            inside_humidity_ratio: 0.0005,
            outside_humidity_ratio: 0.014,
            surfaces: vec![
                SurfaceSpec {
                    name: "Walls".to_string(),
                    u_value: 0.035,
                    area_ft2: 2_800.0,
                    adjacent_temp_f: None,
                },
                SurfaceSpec {
                    name: "Roof".to_string(),
                    u_value: 0.03,
                    area_ft2: 1_000.0,
                    adjacent_temp_f: Some(110.0),
                },
                SurfaceSpec {
                    name: "Floor".to_string(),
                    u_value: 0.05,
                    area_ft2: 1_000.0,
                    adjacent_temp_f: Some(55.0),
                },
            ],
            doors: vec![DoorSpec {
                name: "D-1".to_string(),
                area_ft2: 100.0,
                open_hours_per_day: 2.0,
                door_type: DoorType::Freezer,
            }],
            products: Vec::new(),
            internal: InternalLoads::default(),
            run_hours_per_day: 18.0,
            safety_factor: 0.10,
        }
    }

    /// A room with no envelope, doors, product or internal loads
    fn empty_room() -> RoomSpec {
        RoomSpec {
            label: "Empty".to_string(),
            length_ft: 10.0,
            width_ft: 10.0,
            height_ft: 10.0,
            inside_temp_f: 0.0,
            outside_temp_f: 90.0,
            inside_humidity_ratio: 0.001,
            outside_humidity_ratio: 0.014,
            surfaces: Vec::new(),
            doors: Vec::new(),
            products: Vec::new(),
            internal: InternalLoads::default(),
            run_hours_per_day: 18.0,
            safety_factor: 0.10,
        }
    }

    #[test]
    fn test_empty_room_all_subtotals_zero() {
        let result = compute_room_load(&empty_room()).unwrap();
        assert_eq!(result.transmission_btu_day, 0.0);
        assert_eq!(result.infiltration_btu_day, 0.0);
        assert_eq!(result.door_btu_day, 0.0);
        assert_eq!(result.lighting_btu_day, 0.0);
        assert_eq!(result.occupancy_btu_day, 0.0);
        assert_eq!(result.equipment_btu_day, 0.0);
        assert_eq!(result.product_btu_day, 0.0);
        assert_eq!(result.connected_total_btu_day, 0.0);
        assert_eq!(result.tons_refrigeration, 0.0);
        assert!(result.flags.is_empty());
    }

    #[test]
    fn test_freezer_scenario_distinct_positive_subtotals() {
        let result = compute_room_load(&freezer_room()).unwrap();
        assert!(result.transmission_btu_day > 0.0);
        assert!(result.infiltration_btu_day > 0.0);
        assert!(result.door_btu_day > 0.0);
        assert!(result.transmission_btu_day != result.infiltration_btu_day);
        assert!(result.infiltration_btu_day != result.door_btu_day);
        assert_eq!(result.product_btu_day, 0.0);

        // Safety-factored total
        assert!(
            (result.design_total_btu_day - result.connected_total_btu_day * 1.10).abs() < 1e-6
        );
    }

    #[test]
    fn test_tons_consistent_with_run_hours() {
        let result = compute_room_load(&freezer_room()).unwrap();
        let run_fraction: f64 = 18.0 / 24.0;
        let expected_tr = result.design_total_btu_day / (24.0 * run_fraction) / 12_000.0;
        assert!((result.tons_refrigeration - expected_tr).abs() < 1e-9);
    }

    #[test]
    fn test_air_change_regimes() {
        // 20,000 ft3 below freezing: n = 596.21 * V^-0.548
        let freezer = freezer_room();
        let n = freezer.air_changes_per_day();
        let expected = 596.21 * 20_000.0_f64.powf(-0.548);
        assert!((n - expected).abs() < 1e-9);

        // Same volume at +35 F uses the warm-room regime
        let mut cooler = freezer_room();
        cooler.inside_temp_f = 35.0;
        let n_warm = cooler.air_changes_per_day();
        let expected_warm = 817.5 * 20_000.0_f64.powf(-0.5551);
        assert!((n_warm - expected_warm).abs() < 1e-9);
    }

    #[test]
    fn test_door_load_formula() {
        let result = compute_room_load(&freezer_room()).unwrap();
        // 150 cfm/ft2 * 100 ft2 * 60 * 2 hr * 95 F * 0.018
        let expected = 150.0 * 100.0 * 60.0 * 2.0 * 95.0 * 0.018;
        assert!((result.door_btu_day - expected).abs() < 1e-6);
    }

    #[test]
    fn test_negative_delta_surface_flagged_not_rejected() {
        let mut spec = freezer_room();
        spec.surfaces.push(SurfaceSpec {
            name: "Wall to blast cell".to_string(),
            u_value: 0.04,
            area_ft2: 400.0,
            adjacent_temp_f: Some(-40.0),
        });
        let result = compute_room_load(&spec).unwrap();
        assert_eq!(result.flags.len(), 1);
        assert!(result.flags[0].message.contains("blast cell"));
    }

    #[test]
    fn test_zero_area_surface_contributes_zero() {
        let mut spec = freezer_room();
        let base = compute_room_load(&spec).unwrap();
        spec.surfaces.push(SurfaceSpec {
            name: "Zero".to_string(),
            u_value: 0.5,
            area_ft2: 0.0,
            adjacent_temp_f: None,
        });
        let with_zero = compute_room_load(&spec).unwrap();
        assert_eq!(base.transmission_btu_day, with_zero.transmission_btu_day);
    }

    #[test]
    fn test_product_terms_gated_on_freeze_crossing() {
        let chilled = ProductSpec {
            name: "Produce".to_string(),
            mass_lb_per_day: 10_000.0,
            specific_heat_above: 0.9,
            specific_heat_below: 0.45,
            latent_heat_btu_lb: 120.0,
            freeze_point_f: 30.0,
            entering_temp_f: 70.0,
            final_temp_f: 38.0,
        };
        // Never crosses freezing: only the above-freezing sensible term
        assert_eq!(chilled.sensible_above_btu_day(), 10_000.0 * 0.9 * 32.0);
        assert_eq!(chilled.latent_btu_day(), 0.0);
        assert_eq!(chilled.sensible_below_btu_day(), 0.0);

        let frozen = ProductSpec {
            final_temp_f: -10.0,
            ..chilled.clone()
        };
        // Crosses: all three terms present
        assert_eq!(frozen.sensible_above_btu_day(), 10_000.0 * 0.9 * 40.0);
        assert_eq!(frozen.latent_btu_day(), 10_000.0 * 120.0);
        assert_eq!(frozen.sensible_below_btu_day(), 10_000.0 * 0.45 * 40.0);

        let already_frozen = ProductSpec {
            entering_temp_f: 10.0,
            final_temp_f: -10.0,
            ..chilled
        };
        // Entered below freezing: no above-freezing or latent term
        assert_eq!(already_frozen.sensible_above_btu_day(), 0.0);
        assert_eq!(already_frozen.latent_btu_day(), 0.0);
        assert_eq!(already_frozen.sensible_below_btu_day(), 10_000.0 * 0.45 * 20.0);
    }

    #[test]
    fn test_safety_factor_applied_once_to_total() {
        let mut spec = freezer_room();
        spec.safety_factor = 0.25;
        let result = compute_room_load(&spec).unwrap();
        assert!((result.design_total_btu_day - result.subtotal_sum_btu_day() * 1.25).abs() < 1e-6);
    }

    #[test]
    fn test_subtotal_sum_matches_connected_total() {
        let result = compute_room_load(&freezer_room()).unwrap();
        assert!((result.subtotal_sum_btu_day() - result.connected_total_btu_day).abs() < 1e-9);
    }

    #[test]
    fn test_inverted_temperatures_rejected() {
        let mut spec = freezer_room();
        spec.inside_temp_f = 90.0;
        spec.outside_temp_f = 85.0;
        assert!(compute_room_load(&spec).is_err());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let mut spec = freezer_room();
        spec.height_ft = 0.0;
        let error = compute_room_load(&spec).unwrap_err();
        assert_eq!(error.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_occupancy_estimate_rises_in_colder_rooms() {
        let freezer = freezer_room();
        let mut cooler = freezer_room();
        cooler.inside_temp_f = 35.0;
        assert!(freezer.person_heat_btu_hr() > cooler.person_heat_btu_hr());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let spec = freezer_room();
        let json = serde_json::to_string_pretty(&spec).unwrap();
        let roundtrip: RoomSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec.surfaces.len(), roundtrip.surfaces.len());
        assert_eq!(spec.inside_temp_f, roundtrip.inside_temp_f);

        let result = compute_room_load(&spec).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("transmission_btu_day"));
        assert!(json.contains("tons_refrigeration"));
        let parsed: LoadResult = serde_json::from_str(&json).unwrap();
        assert!((parsed.design_total_btu_day - result.design_total_btu_day).abs() < 1e-9);
    }
}
