//! Standard Pipe Dimensions
//!
//! Nominal pipe size (NPS) designations with schedule 40/80 dimensional
//! lookups per ASME B36.10M. Supports the size range used in industrial
//! refrigerant piping (1/2" through 12").
//!
//! ## Nominal vs Actual Dimensions
//!
//! - NPS 1/2 = 0.840" OD
//! - NPS 2   = 2.375" OD
//! - NPS 6   = 6.625" OD
//! - etc.
//!
//! Wall thickness depends on schedule; inner diameter is OD minus two walls.

use serde::{Deserialize, Serialize};

/// Pipe wall schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Schedule {
    /// Standard weight (schedule 40)
    #[default]
    Sch40,
    /// Extra strong (schedule 80)
    Sch80,
}

impl Schedule {
    /// All schedules for UI selection
    pub const ALL: [Schedule; 2] = [Schedule::Sch40, Schedule::Sch80];

    /// Display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            Schedule::Sch40 => "Sch 40",
            Schedule::Sch80 => "Sch 80",
        }
    }
}

impl std::fmt::Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Nominal pipe size designation
///
/// Represents NPS sizes with automatic actual-dimension lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum NominalPipeSize {
    /// NPS 1/2 (0.840" OD)
    Half,
    /// NPS 3/4 (1.050" OD)
    ThreeQuarter,
    /// NPS 1 (1.315" OD)
    One,
    /// NPS 1-1/4 (1.660" OD)
    OneQuarter,
    /// NPS 1-1/2 (1.900" OD)
    OneHalf,
    /// NPS 2 (2.375" OD)
    #[default]
    Two,
    /// NPS 2-1/2 (2.875" OD)
    TwoHalf,
    /// NPS 3 (3.500" OD)
    Three,
    /// NPS 4 (4.500" OD)
    Four,
    /// NPS 5 (5.563" OD)
    Five,
    /// NPS 6 (6.625" OD)
    Six,
    /// NPS 8 (8.625" OD)
    Eight,
    /// NPS 10 (10.750" OD)
    Ten,
    /// NPS 12 (12.750" OD)
    Twelve,
}

impl NominalPipeSize {
    /// All supported sizes in ascending order
    pub const ALL: [NominalPipeSize; 14] = [
        NominalPipeSize::Half,
        NominalPipeSize::ThreeQuarter,
        NominalPipeSize::One,
        NominalPipeSize::OneQuarter,
        NominalPipeSize::OneHalf,
        NominalPipeSize::Two,
        NominalPipeSize::TwoHalf,
        NominalPipeSize::Three,
        NominalPipeSize::Four,
        NominalPipeSize::Five,
        NominalPipeSize::Six,
        NominalPipeSize::Eight,
        NominalPipeSize::Ten,
        NominalPipeSize::Twelve,
    ];

    /// Default candidate ladder for suction riser sizing (ascending)
    pub const RISER_CANDIDATES: [NominalPipeSize; 10] = [
        NominalPipeSize::One,
        NominalPipeSize::OneQuarter,
        NominalPipeSize::OneHalf,
        NominalPipeSize::Two,
        NominalPipeSize::TwoHalf,
        NominalPipeSize::Three,
        NominalPipeSize::Four,
        NominalPipeSize::Five,
        NominalPipeSize::Six,
        NominalPipeSize::Eight,
    ];

    /// Outside diameter in inches per ASME B36.10M
    pub fn outside_diameter_in(&self) -> f64 {
        match self {
            NominalPipeSize::Half => 0.840,
            NominalPipeSize::ThreeQuarter => 1.050,
            NominalPipeSize::One => 1.315,
            NominalPipeSize::OneQuarter => 1.660,
            NominalPipeSize::OneHalf => 1.900,
            NominalPipeSize::Two => 2.375,
            NominalPipeSize::TwoHalf => 2.875,
            NominalPipeSize::Three => 3.500,
            NominalPipeSize::Four => 4.500,
            NominalPipeSize::Five => 5.563,
            NominalPipeSize::Six => 6.625,
            NominalPipeSize::Eight => 8.625,
            NominalPipeSize::Ten => 10.750,
            NominalPipeSize::Twelve => 12.750,
        }
    }

    /// Wall thickness in inches for the given schedule
    pub fn wall_in(&self, schedule: Schedule) -> f64 {
        match schedule {
            Schedule::Sch40 => match self {
                NominalPipeSize::Half => 0.109,
                NominalPipeSize::ThreeQuarter => 0.113,
                NominalPipeSize::One => 0.133,
                NominalPipeSize::OneQuarter => 0.140,
                NominalPipeSize::OneHalf => 0.145,
                NominalPipeSize::Two => 0.154,
                NominalPipeSize::TwoHalf => 0.203,
                NominalPipeSize::Three => 0.216,
                NominalPipeSize::Four => 0.237,
                NominalPipeSize::Five => 0.258,
                NominalPipeSize::Six => 0.280,
                NominalPipeSize::Eight => 0.322,
                NominalPipeSize::Ten => 0.365,
                NominalPipeSize::Twelve => 0.406,
            },
            Schedule::Sch80 => match self {
                NominalPipeSize::Half => 0.147,
                NominalPipeSize::ThreeQuarter => 0.154,
                NominalPipeSize::One => 0.179,
                NominalPipeSize::OneQuarter => 0.191,
                NominalPipeSize::OneHalf => 0.200,
                NominalPipeSize::Two => 0.218,
                NominalPipeSize::TwoHalf => 0.276,
                NominalPipeSize::Three => 0.300,
                NominalPipeSize::Four => 0.337,
                NominalPipeSize::Five => 0.375,
                NominalPipeSize::Six => 0.432,
                NominalPipeSize::Eight => 0.500,
                NominalPipeSize::Ten => 0.594,
                NominalPipeSize::Twelve => 0.688,
            },
        }
    }

    /// Inner diameter in inches for the given schedule
    pub fn inner_diameter_in(&self, schedule: Schedule) -> f64 {
        self.outside_diameter_in() - 2.0 * self.wall_in(schedule)
    }

    /// Inner diameter in feet
    pub fn inner_diameter_ft(&self, schedule: Schedule) -> f64 {
        self.inner_diameter_in(schedule) / 12.0
    }

    /// Internal flow area in square inches
    pub fn flow_area_in2(&self, schedule: Schedule) -> f64 {
        let id = self.inner_diameter_in(schedule);
        std::f64::consts::PI * id * id / 4.0
    }

    /// Internal flow area in square feet
    pub fn flow_area_ft2(&self, schedule: Schedule) -> f64 {
        self.flow_area_in2(schedule) / 144.0
    }

    /// Internal volume per foot of run (ft3/ft)
    pub fn internal_volume_ft3_per_ft(&self, schedule: Schedule) -> f64 {
        self.flow_area_ft2(schedule)
    }

    /// Empty steel weight per foot (lb/ft)
    ///
    /// Standard plain-end weight formula: `w = 10.69 (D - t) t`.
    pub fn steel_weight_plf(&self, schedule: Schedule) -> f64 {
        let od = self.outside_diameter_in();
        let t = self.wall_in(schedule);
        10.69 * (od - t) * t
    }

    /// Nominal size in inches (for capacity-table matching)
    pub fn nominal_inches(&self) -> f64 {
        match self {
            NominalPipeSize::Half => 0.5,
            NominalPipeSize::ThreeQuarter => 0.75,
            NominalPipeSize::One => 1.0,
            NominalPipeSize::OneQuarter => 1.25,
            NominalPipeSize::OneHalf => 1.5,
            NominalPipeSize::Two => 2.0,
            NominalPipeSize::TwoHalf => 2.5,
            NominalPipeSize::Three => 3.0,
            NominalPipeSize::Four => 4.0,
            NominalPipeSize::Five => 5.0,
            NominalPipeSize::Six => 6.0,
            NominalPipeSize::Eight => 8.0,
            NominalPipeSize::Ten => 10.0,
            NominalPipeSize::Twelve => 12.0,
        }
    }

    /// Display designation for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            NominalPipeSize::Half => "1/2\"",
            NominalPipeSize::ThreeQuarter => "3/4\"",
            NominalPipeSize::One => "1\"",
            NominalPipeSize::OneQuarter => "1-1/4\"",
            NominalPipeSize::OneHalf => "1-1/2\"",
            NominalPipeSize::Two => "2\"",
            NominalPipeSize::TwoHalf => "2-1/2\"",
            NominalPipeSize::Three => "3\"",
            NominalPipeSize::Four => "4\"",
            NominalPipeSize::Five => "5\"",
            NominalPipeSize::Six => "6\"",
            NominalPipeSize::Eight => "8\"",
            NominalPipeSize::Ten => "10\"",
            NominalPipeSize::Twelve => "12\"",
        }
    }
}

impl std::fmt::Display for NominalPipeSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
