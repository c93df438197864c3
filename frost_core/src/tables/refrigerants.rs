//! Refrigerant Property Tables
//!
//! Saturation-curve data for the working fluids this engine sizes for:
//! pressure, vapor and liquid density, and latent heat tabulated against
//! saturation temperature, with linear interpolation between rows.
//!
//! The saturation slope dP/dT - the quantity behind the riser DT-penalty
//! calculation - is taken as a table-interpolated finite difference rather
//! than an equation-of-state derivative.
//!
//! ## Example
//!
//! ```rust
//! use frost_core::tables::refrigerants::Refrigerant;
//!
//! let sat = Refrigerant::R717.saturation_at(0.0).unwrap();
//! assert!((sat.pressure_psia - 30.42).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// One row of a refrigerant saturation table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaturationPoint {
    /// Saturation temperature (F)
    pub temp_f: f64,
    /// Saturation pressure (psia)
    pub pressure_psia: f64,
    /// Saturated vapor density (lb/ft3)
    pub vapor_density_lb_ft3: f64,
    /// Saturated liquid density (lb/ft3)
    pub liquid_density_lb_ft3: f64,
    /// Latent heat of vaporization (BTU/lb)
    pub latent_heat_btu_lb: f64,
}

const fn row(
    temp_f: f64,
    pressure_psia: f64,
    vapor_density_lb_ft3: f64,
    liquid_density_lb_ft3: f64,
    latent_heat_btu_lb: f64,
) -> SaturationPoint {
    SaturationPoint {
        temp_f,
        pressure_psia,
        vapor_density_lb_ft3,
        liquid_density_lb_ft3,
        latent_heat_btu_lb,
    }
}

/// R-717 (ammonia) saturation table, -60 F to +120 F
const R717_TABLE: [SaturationPoint; 10] = [
    row(-60.0, 5.55, 0.0228, 43.9, 610.8),
    row(-40.0, 10.41, 0.0402, 43.1, 597.6),
    row(-20.0, 18.30, 0.0672, 42.2, 583.6),
    row(0.0, 30.42, 0.1068, 41.3, 568.9),
    row(20.0, 48.21, 0.1627, 40.4, 553.1),
    row(40.0, 73.32, 0.2387, 39.5, 536.2),
    row(60.0, 107.6, 0.3388, 38.5, 517.7),
    row(80.0, 153.0, 0.5110, 37.5, 497.3),
    row(100.0, 211.9, 0.7050, 36.4, 474.5),
    row(120.0, 286.4, 0.9550, 35.2, 448.9),
];

/// R-22 saturation table, -60 F to +120 F
const R22_TABLE: [SaturationPoint; 10] = [
    row(-60.0, 8.8, 0.222, 89.6, 100.3),
    row(-40.0, 15.3, 0.365, 88.2, 97.5),
    row(-20.0, 25.0, 0.577, 86.6, 94.6),
    row(0.0, 38.7, 0.868, 84.9, 91.5),
    row(20.0, 57.7, 1.26, 83.1, 88.2),
    row(40.0, 83.2, 1.80, 81.2, 84.6),
    row(60.0, 116.3, 2.47, 79.0, 80.5),
    row(80.0, 158.2, 3.41, 76.8, 76.0),
    row(100.0, 210.6, 4.65, 74.3, 70.9),
    row(120.0, 274.6, 6.08, 71.4, 65.4),
];

/// R-134a saturation table, -40 F to +120 F
const R134A_TABLE: [SaturationPoint; 9] = [
    row(-40.0, 7.4, 0.182, 88.5, 97.0),
    row(-20.0, 12.9, 0.305, 86.9, 94.7),
    row(0.0, 21.2, 0.484, 85.2, 92.2),
    row(20.0, 33.1, 0.731, 83.4, 89.4),
    row(40.0, 49.7, 1.07, 81.5, 86.3),
    row(60.0, 72.2, 1.52, 79.4, 82.8),
    row(80.0, 101.4, 2.13, 77.2, 78.9),
    row(100.0, 138.8, 2.93, 74.6, 74.3),
    row(120.0, 185.9, 4.00, 71.8, 68.9),
];

/// R-404A saturation table (dew point basis), -60 F to +120 F
const R404A_TABLE: [SaturationPoint; 10] = [
    row(-60.0, 9.9, 0.27, 79.0, 87.0),
    row(-40.0, 16.7, 0.45, 77.0, 83.5),
    row(-20.0, 26.7, 0.70, 74.8, 79.8),
    row(0.0, 40.9, 1.05, 72.5, 75.7),
    row(20.0, 60.3, 1.52, 70.0, 71.2),
    row(40.0, 86.1, 2.15, 67.3, 66.1),
    row(60.0, 119.4, 2.99, 64.2, 60.3),
    row(80.0, 161.7, 4.12, 60.7, 53.5),
    row(100.0, 214.7, 5.67, 56.5, 45.4),
    row(120.0, 280.4, 7.90, 51.2, 35.3),
];

/// Refrigerant identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Refrigerant {
    /// R-717 (anhydrous ammonia)
    #[default]
    R717,
    /// R-22 (chlorodifluoromethane)
    R22,
    /// R-134a (tetrafluoroethane)
    R134a,
    /// R-404A (HFC blend)
    R404a,
}

impl Refrigerant {
    /// All refrigerants for UI selection
    pub const ALL: [Refrigerant; 4] = [
        Refrigerant::R717,
        Refrigerant::R22,
        Refrigerant::R134a,
        Refrigerant::R404a,
    ];

    /// Display designation for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            Refrigerant::R717 => "R-717 (ammonia)",
            Refrigerant::R22 => "R-22",
            Refrigerant::R134a => "R-134a",
            Refrigerant::R404a => "R-404A",
        }
    }

    /// Molecular weight (lb/lb-mol)
    pub fn molecular_weight(&self) -> f64 {
        match self {
            Refrigerant::R717 => 17.03,
            Refrigerant::R22 => 86.47,
            Refrigerant::R134a => 102.03,
            Refrigerant::R404a => 97.60,
        }
    }

    /// Saturated vapor dynamic viscosity (lb/(ft-s))
    ///
    /// Treated as constant over the saturation range covered by the tables;
    /// the friction-factor solve is weakly sensitive to viscosity.
    pub fn vapor_viscosity_lb_ft_s(&self) -> f64 {
        match self {
            Refrigerant::R717 => 6.6e-6,
            Refrigerant::R22 => 8.1e-6,
            Refrigerant::R134a => 7.7e-6,
            Refrigerant::R404a => 7.9e-6,
        }
    }

    /// Relief fire factor f for vessel sizing, lb air/(min-ft2 of D x L)
    ///
    /// ASHRAE 15-1994 Table in 9.4.5; IIAR 2 uses the same 0.5 for ammonia.
    pub fn fire_factor(&self) -> f64 {
        match self {
            Refrigerant::R717 => 0.5,
            Refrigerant::R22 => 1.6,
            Refrigerant::R134a => 1.6,
            Refrigerant::R404a => 2.5,
        }
    }

    /// The saturation table for this refrigerant
    fn table(&self) -> &'static [SaturationPoint] {
        match self {
            Refrigerant::R717 => &R717_TABLE,
            Refrigerant::R22 => &R22_TABLE,
            Refrigerant::R134a => &R134A_TABLE,
            Refrigerant::R404a => &R404A_TABLE,
        }
    }

    /// Covered saturation temperature range (F)
    pub fn temp_range_f(&self) -> (f64, f64) {
        let table = self.table();
        (table[0].temp_f, table[table.len() - 1].temp_f)
    }

    /// Saturation properties at a temperature, linearly interpolated.
    ///
    /// Temperatures outside the tabulated range are a [`CalcError::LookupMiss`]
    /// carrying the refrigerant and requested temperature.
    pub fn saturation_at(&self, temp_f: f64) -> CalcResult<SaturationPoint> {
        let table = self.table();
        let (lo, hi) = self.temp_range_f();
        if temp_f < lo || temp_f > hi {
            return Err(CalcError::lookup_miss(
                "refrigerant saturation",
                format!("{} at {:.1} F", self.display_name(), temp_f),
            ));
        }

        let upper = table
            .iter()
            .position(|p| p.temp_f >= temp_f)
            .unwrap_or(table.len() - 1);
        if table[upper].temp_f == temp_f {
            return Ok(table[upper]);
        }
        let a = table[upper - 1];
        let b = table[upper];
        let frac = (temp_f - a.temp_f) / (b.temp_f - a.temp_f);
        let lerp = |x: f64, y: f64| x + frac * (y - x);

        Ok(SaturationPoint {
            temp_f,
            pressure_psia: lerp(a.pressure_psia, b.pressure_psia),
            vapor_density_lb_ft3: lerp(a.vapor_density_lb_ft3, b.vapor_density_lb_ft3),
            liquid_density_lb_ft3: lerp(a.liquid_density_lb_ft3, b.liquid_density_lb_ft3),
            latent_heat_btu_lb: lerp(a.latent_heat_btu_lb, b.latent_heat_btu_lb),
        })
    }

    /// Local saturation-curve slope dP/dT (psi/F), finite-differenced from
    /// the interpolated table over a 1 F window (clamped at the table ends).
    pub fn saturation_slope_psi_per_f(&self, temp_f: f64) -> CalcResult<f64> {
        let (lo, hi) = self.temp_range_f();
        if temp_f < lo || temp_f > hi {
            return Err(CalcError::lookup_miss(
                "refrigerant saturation",
                format!("{} at {:.1} F", self.display_name(), temp_f),
            ));
        }
        let t_lo = (temp_f - 0.5).max(lo);
        let t_hi = (temp_f + 0.5).min(hi);
        let p_lo = self.saturation_at(t_lo)?.pressure_psia;
        let p_hi = self.saturation_at(t_hi)?.pressure_psia;
        Ok((p_hi - p_lo) / (t_hi - t_lo))
    }
}

impl std::fmt::Display for Refrigerant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_node_lookup() {
        let sat = Refrigerant::R717.saturation_at(0.0).unwrap();
        assert_eq!(sat.pressure_psia, 30.42);
        assert_eq!(sat.latent_heat_btu_lb, 568.9);
    }

    #[test]
    fn test_interpolated_lookup() {
        // Midway between -20 F (18.30 psia) and 0 F (30.42 psia)
        let sat = Refrigerant::R717.saturation_at(-10.0).unwrap();
        assert!((sat.pressure_psia - 24.36).abs() < 1e-9);
        assert!(sat.vapor_density_lb_ft3 > 0.0672 && sat.vapor_density_lb_ft3 < 0.1068);
    }

    #[test]
    fn test_out_of_range_is_lookup_miss() {
        let error = Refrigerant::R134a.saturation_at(-100.0).unwrap_err();
        assert_eq!(error.error_code(), "LOOKUP_MISS");
    }

    #[test]
    fn test_tables_monotonic() {
        for refrigerant in Refrigerant::ALL {
            let table = refrigerant.table();
            for pair in table.windows(2) {
                assert!(pair[0].temp_f < pair[1].temp_f);
                assert!(
                    pair[0].pressure_psia < pair[1].pressure_psia,
                    "{} pressure not monotonic",
                    refrigerant
                );
                assert!(pair[0].vapor_density_lb_ft3 < pair[1].vapor_density_lb_ft3);
                assert!(pair[0].liquid_density_lb_ft3 > pair[1].liquid_density_lb_ft3);
                assert!(pair[0].latent_heat_btu_lb > pair[1].latent_heat_btu_lb);
            }
        }
    }

    #[test]
    fn test_saturation_slope_positive_and_steepening() {
        let cold = Refrigerant::R717.saturation_slope_psi_per_f(-40.0).unwrap();
        let warm = Refrigerant::R717.saturation_slope_psi_per_f(40.0).unwrap();
        assert!(cold > 0.0);
        assert!(warm > cold);
    }

    #[test]
    fn test_slope_matches_segment() {
        // In the middle of the -20..0 segment the slope is the segment slope
        let slope = Refrigerant::R717.saturation_slope_psi_per_f(-10.0).unwrap();
        assert!((slope - (30.42 - 18.30) / 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_fire_factors() {
        assert_eq!(Refrigerant::R717.fire_factor(), 0.5);
        assert!(Refrigerant::R404a.fire_factor() > Refrigerant::R22.fire_factor());
    }

    #[test]
    fn test_serialization() {
        let sat = Refrigerant::R22.saturation_at(20.0).unwrap();
        let json = serde_json::to_string(&sat).unwrap();
        let roundtrip: SaturationPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(sat, roundtrip);
    }
}
