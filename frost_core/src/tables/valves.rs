//! Relief Valve Capacity Tables
//!
//! Manufacturer catalogs for pressure relief valves and three-way manifold
//! valves. Each relief valve carries its orifice area and certified
//! discharge coefficient; rated capacity is evaluated at the duty point
//! (set pressure, back pressure) rather than stored, because certified
//! capacity scales with absolute relieving pressure.
//!
//! Rated air capacity at 10 % accumulation:
//!
//! ```text
//! W = 1.40 * Kd * A * (1.1 * P_set + 14.7)   [lb air/min]
//! ```
//!
//! Back pressure up to 10 % of set is free; between 10 % and 30 % the
//! capacity is linearly derated to 0.80; beyond 30 % a conventional valve
//! is not selectable at all (see DESIGN.md for the configuration choice).

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::tables::pipe::NominalPipeSize;

/// Air-capacity coefficient, lb/(min-in2-psia): `356 sqrt(M_air/T_std) / 60`
pub const AIR_CAPACITY_COEFFICIENT: f64 = 1.40;

/// Back-pressure ratio with no capacity penalty
pub const BACK_PRESSURE_FREE_RATIO: f64 = 0.10;

/// Back-pressure ratio beyond which a conventional valve is not usable
pub const BACK_PRESSURE_LIMIT_RATIO: f64 = 0.30;

/// Capacity multiplier at the back-pressure limit
pub const BACK_PRESSURE_FLOOR: f64 = 0.80;

/// Water needed to absorb discharged ammonia in a diffusion tank (gal/lb)
pub const DIFFUSION_WATER_GAL_PER_LB: f64 = 1.0;

/// Relief valve manufacturer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Manufacturer {
    /// Hansen Technologies
    #[default]
    Hansen,
    /// Cyrus Shank
    CyrusShank,
}

impl Manufacturer {
    /// All manufacturers for UI selection
    pub const ALL: [Manufacturer; 2] = [Manufacturer::Hansen, Manufacturer::CyrusShank];

    /// Display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            Manufacturer::Hansen => "Hansen",
            Manufacturer::CyrusShank => "Cyrus Shank",
        }
    }
}

impl std::fmt::Display for Manufacturer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One catalog entry for a spring-loaded relief valve.
///
/// Catalog rows serialize for reporting but are never read back in; the
/// catalogs are compiled-in reference data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReliefValve {
    /// Manufacturer
    pub manufacturer: Manufacturer,
    /// Catalog model designation
    pub model: &'static str,
    /// Inlet connection size
    pub inlet: NominalPipeSize,
    /// Outlet connection size
    pub outlet: NominalPipeSize,
    /// Effective orifice area (in2)
    pub orifice_area_in2: f64,
    /// Certified discharge coefficient (includes the 0.9 code derate)
    pub discharge_coefficient: f64,
    /// Manufacturer size/cost ordering; selection tie-break key
    pub rank: u32,
    /// Maximum allowed set pressure (psig)
    pub max_set_psig: f64,
}

impl ReliefValve {
    /// Rated air capacity (lb air/min) at the duty point, or `None` when the
    /// valve cannot serve it (set pressure above the spring range, or back
    /// pressure beyond the conventional-valve limit).
    pub fn rated_air_capacity_lb_min(&self, set_psig: f64, back_psig: f64) -> Option<f64> {
        if set_psig > self.max_set_psig {
            return None;
        }
        let derate = back_pressure_derate(set_psig, back_psig)?;
        let relieving_psia = 1.1 * set_psig + 14.7;
        Some(AIR_CAPACITY_COEFFICIENT * self.discharge_coefficient * self.orifice_area_in2
            * relieving_psia
            * derate)
    }
}

/// Back-pressure capacity multiplier, or `None` past the usable limit.
pub fn back_pressure_derate(set_psig: f64, back_psig: f64) -> Option<f64> {
    if set_psig <= 0.0 {
        return None;
    }
    let ratio = back_psig.max(0.0) / set_psig;
    if ratio <= BACK_PRESSURE_FREE_RATIO {
        Some(1.0)
    } else if ratio <= BACK_PRESSURE_LIMIT_RATIO {
        let span = BACK_PRESSURE_LIMIT_RATIO - BACK_PRESSURE_FREE_RATIO;
        Some(1.0 - (1.0 - BACK_PRESSURE_FLOOR) * (ratio - BACK_PRESSURE_FREE_RATIO) / span)
    } else {
        None
    }
}

const fn valve(
    manufacturer: Manufacturer,
    model: &'static str,
    inlet: NominalPipeSize,
    outlet: NominalPipeSize,
    orifice_area_in2: f64,
    discharge_coefficient: f64,
    rank: u32,
    max_set_psig: f64,
) -> ReliefValve {
    ReliefValve {
        manufacturer,
        model,
        inlet,
        outlet,
        orifice_area_in2,
        discharge_coefficient,
        rank,
        max_set_psig,
    }
}

/// Hansen H5600-series catalog, ascending rank
static HANSEN_CATALOG: Lazy<Vec<ReliefValve>> = Lazy::new(|| {
    use Manufacturer::Hansen;
    use NominalPipeSize::*;
    vec![
        valve(Hansen, "H5600", Half, One, 0.110, 0.877, 1, 450.0),
        valve(Hansen, "H5601", ThreeQuarter, One, 0.196, 0.877, 2, 450.0),
        valve(Hansen, "H5602", One, OneQuarter, 0.307, 0.877, 3, 450.0),
        valve(Hansen, "H5603", OneQuarter, OneHalf, 0.503, 0.877, 4, 450.0),
        valve(Hansen, "H5604", OneHalf, Two, 0.785, 0.877, 5, 450.0),
        valve(Hansen, "H5605", Two, TwoHalf, 1.227, 0.877, 6, 400.0),
        valve(Hansen, "H5606", TwoHalf, Three, 1.767, 0.877, 7, 400.0),
        valve(Hansen, "H5607", Three, Four, 2.405, 0.877, 8, 400.0),
    ]
});

/// Cyrus Shank 800-series catalog, ascending rank
static CYRUS_SHANK_CATALOG: Lazy<Vec<ReliefValve>> = Lazy::new(|| {
    use Manufacturer::CyrusShank;
    use NominalPipeSize::*;
    vec![
        valve(CyrusShank, "800QR", Half, One, 0.096, 0.894, 1, 400.0),
        valve(CyrusShank, "801QR", ThreeQuarter, One, 0.194, 0.894, 2, 400.0),
        valve(CyrusShank, "802QR", One, OneQuarter, 0.332, 0.894, 3, 400.0),
        valve(CyrusShank, "803QR", OneQuarter, OneHalf, 0.531, 0.894, 4, 400.0),
        valve(CyrusShank, "804QR", OneHalf, Two, 0.779, 0.894, 5, 400.0),
        valve(CyrusShank, "805QR", Two, TwoHalf, 1.180, 0.894, 6, 350.0),
        valve(CyrusShank, "806QR", Three, Four, 2.290, 0.894, 7, 350.0),
    ]
});

/// Catalog for a manufacturer, ascending rank order.
pub fn relief_catalog(manufacturer: Manufacturer) -> &'static [ReliefValve] {
    match manufacturer {
        Manufacturer::Hansen => &HANSEN_CATALOG,
        Manufacturer::CyrusShank => &CYRUS_SHANK_CATALOG,
    }
}

/// A three-way manifold (dual relief) valve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThreeWayValve {
    /// Catalog model designation
    pub model: &'static str,
    /// Connection size (matches the relief valve inlet)
    pub connection: NominalPipeSize,
}

/// Three-way manifold valve catalog, ascending connection size
static THREE_WAY_CATALOG: Lazy<Vec<ThreeWayValve>> = Lazy::new(|| {
    use NominalPipeSize::*;
    vec![
        ThreeWayValve { model: "H5934", connection: Half },
        ThreeWayValve { model: "H5936", connection: ThreeQuarter },
        ThreeWayValve { model: "H5938", connection: One },
        ThreeWayValve { model: "H5940", connection: OneQuarter },
        ThreeWayValve { model: "H5942", connection: OneHalf },
        ThreeWayValve { model: "H5944", connection: Two },
        ThreeWayValve { model: "H5946", connection: TwoHalf },
        ThreeWayValve { model: "H5948", connection: Three },
        ThreeWayValve { model: "H5950", connection: Four },
    ]
});

/// The three-way manifold catalog, ascending connection size.
pub fn three_way_catalog() -> &'static [ThreeWayValve] {
    &THREE_WAY_CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogs_rank_ascending() {
        for manufacturer in Manufacturer::ALL {
            let catalog = relief_catalog(manufacturer);
            assert!(!catalog.is_empty());
            for pair in catalog.windows(2) {
                assert!(pair[0].rank < pair[1].rank);
                assert!(pair[0].orifice_area_in2 < pair[1].orifice_area_in2);
            }
        }
    }

    #[test]
    fn test_rated_capacity_scales_with_set_pressure() {
        let valve = &relief_catalog(Manufacturer::Hansen)[0];
        let low = valve.rated_air_capacity_lb_min(150.0, 0.0).unwrap();
        let high = valve.rated_air_capacity_lb_min(250.0, 0.0).unwrap();
        assert!(high > low);
    }

    #[test]
    fn test_rated_capacity_formula() {
        let valve = &relief_catalog(Manufacturer::Hansen)[0];
        let capacity = valve.rated_air_capacity_lb_min(250.0, 0.0).unwrap();
        let expected = 1.40 * 0.877 * 0.110 * (1.1 * 250.0 + 14.7);
        assert!((capacity - expected).abs() < 1e-9);
    }

    #[test]
    fn test_back_pressure_derate_curve() {
        assert_eq!(back_pressure_derate(250.0, 0.0), Some(1.0));
        assert_eq!(back_pressure_derate(250.0, 25.0), Some(1.0));
        // Midway between 10% and 30% -> 0.90
        let mid = back_pressure_derate(250.0, 50.0).unwrap();
        assert!((mid - 0.90).abs() < 1e-9);
        assert_eq!(back_pressure_derate(250.0, 100.0), None);
    }

    #[test]
    fn test_set_pressure_above_spring_range() {
        let valve = &relief_catalog(Manufacturer::CyrusShank)[0];
        assert!(valve.rated_air_capacity_lb_min(425.0, 0.0).is_none());
    }

    #[test]
    fn test_three_way_catalog_ascending() {
        let catalog = three_way_catalog();
        for pair in catalog.windows(2) {
            assert!(pair[0].connection < pair[1].connection);
        }
    }
}
