//! Pipe Support Tables
//!
//! Suggested maximum support spacing for steel refrigerant pipe and the
//! capacity catalog for fabricated pipe-support stands. Spans follow the
//! MSS SP-69 water-service table, which is the conservative basis for
//! liquid-full refrigerant lines.

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::tables::pipe::NominalPipeSize;

/// Suggested maximum support span (ft) for the pipe size.
pub fn max_support_span_ft(nps: NominalPipeSize) -> f64 {
    match nps {
        NominalPipeSize::Half => 7.0,
        NominalPipeSize::ThreeQuarter => 7.0,
        NominalPipeSize::One => 7.0,
        NominalPipeSize::OneQuarter => 8.0,
        NominalPipeSize::OneHalf => 9.0,
        NominalPipeSize::Two => 10.0,
        NominalPipeSize::TwoHalf => 11.0,
        NominalPipeSize::Three => 12.0,
        NominalPipeSize::Four => 14.0,
        NominalPipeSize::Five => 16.0,
        NominalPipeSize::Six => 17.0,
        NominalPipeSize::Eight => 19.0,
        NominalPipeSize::Ten => 22.0,
        NominalPipeSize::Twelve => 23.0,
    }
}

/// A fabricated pipe-support stand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SupportStand {
    /// Catalog model designation
    pub model: &'static str,
    /// Rated vertical load (lb)
    pub capacity_lb: f64,
}

/// Stand catalog, ascending capacity
static STAND_CATALOG: Lazy<Vec<SupportStand>> = Lazy::new(|| {
    vec![
        SupportStand { model: "PS-1", capacity_lb: 1_500.0 },
        SupportStand { model: "PS-2", capacity_lb: 3_000.0 },
        SupportStand { model: "PS-3", capacity_lb: 6_000.0 },
        SupportStand { model: "PS-4", capacity_lb: 10_000.0 },
        SupportStand { model: "PS-5", capacity_lb: 16_000.0 },
    ]
});

/// The stand catalog, ascending capacity order.
pub fn stand_catalog() -> &'static [SupportStand] {
    &STAND_CATALOG
}
