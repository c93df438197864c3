//! Pipe Material Properties
//!
//! Allowable stress and physical properties for the carbon and stainless
//! steels used in refrigerant piping, per the ASME B31.5 stress tables.
//! Allowable stress is piecewise in metal temperature; refrigeration work
//! lives almost entirely on the flat low-temperature end of the curve.

use serde::{Deserialize, Serialize};

/// Steel density used for pipe weight (lb/ft3)
pub const STEEL_DENSITY_LB_FT3: f64 = 490.0;

/// Pipe material selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PipeMaterial {
    /// ASTM A53 Grade B, electric resistance welded
    #[default]
    A53GradeB,
    /// ASTM A106 Grade B, seamless
    A106GradeB,
    /// ASTM A333 Grade 6, seamless (low-temperature service)
    A333Grade6,
    /// ASTM A312 TP304L stainless, welded
    Tp304L,
}

impl PipeMaterial {
    /// All materials for UI selection
    pub const ALL: [PipeMaterial; 4] = [
        PipeMaterial::A53GradeB,
        PipeMaterial::A106GradeB,
        PipeMaterial::A333Grade6,
        PipeMaterial::Tp304L,
    ];

    /// Basic allowable stress S at the given metal temperature (psi)
    ///
    /// Values follow the B31.5 allowable-stress tables; between listed
    /// temperatures the lower (conservative) step value applies. Carbon
    /// steels are flat through 300 F; the stainless curve starts lower
    /// and declines sooner.
    pub fn allowable_stress_psi(&self, temp_f: f64) -> f64 {
        match self {
            PipeMaterial::A53GradeB => {
                if temp_f <= 300.0 {
                    14_350.0
                } else if temp_f <= 400.0 {
                    14_000.0
                } else {
                    13_000.0
                }
            }
            PipeMaterial::A106GradeB => {
                if temp_f <= 300.0 {
                    17_100.0
                } else if temp_f <= 400.0 {
                    16_600.0
                } else {
                    15_500.0
                }
            }
            PipeMaterial::A333Grade6 => {
                if temp_f <= 300.0 {
                    17_100.0
                } else if temp_f <= 400.0 {
                    16_600.0
                } else {
                    15_500.0
                }
            }
            PipeMaterial::Tp304L => {
                if temp_f <= 200.0 {
                    16_700.0
                } else if temp_f <= 300.0 {
                    15_400.0
                } else {
                    14_300.0
                }
            }
        }
    }

    /// Default longitudinal weld joint efficiency E
    ///
    /// Seamless product is 1.00; ERW and welded product carry the code
    /// derate. A spec record may override this when the actual product
    /// form is known.
    pub fn default_joint_efficiency(&self) -> f64 {
        match self {
            PipeMaterial::A53GradeB => 0.85,
            PipeMaterial::A106GradeB => 1.0,
            PipeMaterial::A333Grade6 => 1.0,
            PipeMaterial::Tp304L => 0.85,
        }
    }

    /// Lowest metal temperature the material is rated for (F)
    pub fn min_temp_f(&self) -> f64 {
        match self {
            PipeMaterial::A53GradeB => -20.0,
            PipeMaterial::A106GradeB => -20.0,
            PipeMaterial::A333Grade6 => -50.0,
            PipeMaterial::Tp304L => -320.0,
        }
    }

    /// Display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            PipeMaterial::A53GradeB => "A53 Gr. B (ERW)",
            PipeMaterial::A106GradeB => "A106 Gr. B (SMLS)",
            PipeMaterial::A333Grade6 => "A333 Gr. 6 (SMLS)",
            PipeMaterial::Tp304L => "A312 TP304L (WLD)",
        }
    }
}

impl std::fmt::Display for PipeMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
