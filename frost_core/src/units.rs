//! # Unit Types
//!
//! Type-safe wrappers for refrigeration engineering units. These provide
//! compile-time safety against unit confusion while remaining lightweight
//! (just f64 wrappers).
//!
//! ## Design Philosophy
//!
//! We use simple newtype wrappers rather than a full units library because:
//! - Industrial refrigeration practice in the US uses a consistent IP unit set
//! - We want JSON serialization to be clean (just numbers)
//! - Minimal runtime overhead
//!
//! Calculation records carry plain `f64` fields with unit-suffixed names
//! (`_ft`, `_psig`, `_btu_day`); the newtypes serve the conversion seams
//! that deserve an explicit type (tons vs BTU/hr, gauge vs absolute
//! pressure, daily vs hourly energy).
//!
//! ## US Customary Units (Primary)
//!
//! - Length: feet (ft), inches (in)
//! - Temperature: degrees Fahrenheit (F), Rankine (R) where absolute is needed
//! - Pressure: psig (gauge), psia (absolute)
//! - Energy rate: BTU/hr, BTU/day, tons of refrigeration (1 TR = 12,000 BTU/hr)
//! - Velocity: feet per minute (fpm)
//! - Liquid flow: US gallons per minute (gpm)
//!
//! ## Example
//!
//! ```rust
//! use frost_core::units::{BtuPerHr, Psia, Psig, TonsRefrigeration};
//!
//! let load = BtuPerHr(36_000.0);
//! let tons: TonsRefrigeration = load.into();
//! assert_eq!(tons.0, 3.0);
//!
//! let set = Psig(250.0);
//! let abs: Psia = set.into();
//! assert!((abs.0 - 264.7).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Standard atmosphere used for gauge/absolute pressure conversion (psi)
pub const ATMOSPHERIC_PSI: f64 = 14.7;

/// One ton of refrigeration in BTU/hr
pub const BTU_PER_HR_PER_TON: f64 = 12_000.0;

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * 12.0)
    }
}

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / 12.0)
    }
}

// ============================================================================
// Temperature Units
// ============================================================================

/// Temperature in degrees Fahrenheit
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fahrenheit(pub f64);

/// Absolute temperature in degrees Rankine
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rankine(pub f64);

impl From<Fahrenheit> for Rankine {
    fn from(f: Fahrenheit) -> Self {
        Rankine(f.0 + 459.67)
    }
}

impl From<Rankine> for Fahrenheit {
    fn from(r: Rankine) -> Self {
        Fahrenheit(r.0 - 459.67)
    }
}

// ============================================================================
// Pressure Units
// ============================================================================

/// Gauge pressure in pounds per square inch (psig)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Psig(pub f64);

/// Absolute pressure in pounds per square inch (psia)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Psia(pub f64);

impl From<Psig> for Psia {
    fn from(g: Psig) -> Self {
        Psia(g.0 + ATMOSPHERIC_PSI)
    }
}

impl From<Psia> for Psig {
    fn from(a: Psia) -> Self {
        Psig(a.0 - ATMOSPHERIC_PSI)
    }
}

// ============================================================================
// Energy Rate Units
// ============================================================================

/// Heat rate in BTU per hour
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BtuPerHr(pub f64);

/// Daily heat quantity in BTU per 24-hour day
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BtuPerDay(pub f64);

/// Refrigeration capacity in tons (1 TR = 12,000 BTU/hr)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TonsRefrigeration(pub f64);

impl From<BtuPerHr> for TonsRefrigeration {
    fn from(q: BtuPerHr) -> Self {
        TonsRefrigeration(q.0 / BTU_PER_HR_PER_TON)
    }
}

impl From<TonsRefrigeration> for BtuPerHr {
    fn from(tr: TonsRefrigeration) -> Self {
        BtuPerHr(tr.0 * BTU_PER_HR_PER_TON)
    }
}

impl From<BtuPerDay> for BtuPerHr {
    fn from(q: BtuPerDay) -> Self {
        BtuPerHr(q.0 / 24.0)
    }
}

impl From<BtuPerHr> for BtuPerDay {
    fn from(q: BtuPerHr) -> Self {
        BtuPerDay(q.0 * 24.0)
    }
}

// ============================================================================
// Flow and Velocity Units
// ============================================================================

/// Velocity in feet per minute
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FtPerMin(pub f64);

/// Velocity in feet per second
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FtPerSec(pub f64);

impl From<FtPerMin> for FtPerSec {
    fn from(v: FtPerMin) -> Self {
        FtPerSec(v.0 / 60.0)
    }
}

impl From<FtPerSec> for FtPerMin {
    fn from(v: FtPerSec) -> Self {
        FtPerMin(v.0 * 60.0)
    }
}

/// Liquid flow in US gallons per minute
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gpm(pub f64);

/// Mass flow in pounds per minute
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LbPerMin(pub f64);

/// Mass flow in pounds per hour
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LbPerHr(pub f64);

impl From<LbPerHr> for LbPerMin {
    fn from(w: LbPerHr) -> Self {
        LbPerMin(w.0 / 60.0)
    }
}

impl From<LbPerMin> for LbPerHr {
    fn from(w: LbPerMin) -> Self {
        LbPerHr(w.0 * 60.0)
    }
}

// ============================================================================
// Area and Volume Units
// ============================================================================

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

/// Area in square inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqIn(pub f64);

impl From<SqFt> for SqIn {
    fn from(a: SqFt) -> Self {
        SqIn(a.0 * 144.0)
    }
}

impl From<SqIn> for SqFt {
    fn from(a: SqIn) -> Self {
        SqFt(a.0 / 144.0)
    }
}

/// Volume in cubic feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CuFt(pub f64);

/// Volume in US gallons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gallons(pub f64);

/// US gallons per cubic foot
pub const GALLONS_PER_CU_FT: f64 = 7.481;

impl From<CuFt> for Gallons {
    fn from(v: CuFt) -> Self {
        Gallons(v.0 * GALLONS_PER_CU_FT)
    }
}

impl From<Gallons> for CuFt {
    fn from(v: Gallons) -> Self {
        CuFt(v.0 / GALLONS_PER_CU_FT)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Feet);
impl_arithmetic!(Inches);
impl_arithmetic!(Fahrenheit);
impl_arithmetic!(Rankine);
impl_arithmetic!(Psig);
impl_arithmetic!(Psia);
impl_arithmetic!(BtuPerHr);
impl_arithmetic!(BtuPerDay);
impl_arithmetic!(TonsRefrigeration);
impl_arithmetic!(FtPerMin);
impl_arithmetic!(FtPerSec);
impl_arithmetic!(Gpm);
impl_arithmetic!(LbPerMin);
impl_arithmetic!(LbPerHr);
impl_arithmetic!(SqFt);
impl_arithmetic!(SqIn);
impl_arithmetic!(CuFt);
impl_arithmetic!(Gallons);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feet_to_inches() {
        let ft = Feet(10.0);
        let inches: Inches = ft.into();
        assert_eq!(inches.0, 120.0);
    }

    #[test]
    fn test_gauge_to_absolute() {
        let set = Psig(250.0);
        let abs: Psia = set.into();
        assert!((abs.0 - 264.7).abs() < 1e-9);

        let back: Psig = abs.into();
        assert!((back.0 - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_tons_conversion() {
        let q = BtuPerHr(24_000.0);
        let tr: TonsRefrigeration = q.into();
        assert_eq!(tr.0, 2.0);

        let daily = BtuPerDay(288_000.0);
        let hourly: BtuPerHr = daily.into();
        assert_eq!(hourly.0, 12_000.0);
    }

    #[test]
    fn test_fahrenheit_to_rankine() {
        let t = Fahrenheit(40.33);
        let r: Rankine = t.into();
        assert!((r.0 - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_arithmetic() {
        let a = Feet(10.0);
        let b = Feet(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
    }

    #[test]
    fn test_serialization() {
        let v = FtPerMin(1500.0);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "1500.0");

        let roundtrip: FtPerMin = serde_json::from_str(&json).unwrap();
        assert_eq!(v, roundtrip);
    }
}
