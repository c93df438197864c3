//! # Compliance Flags
//!
//! Code-check outcomes that ride along inside result records. A flag is not
//! an error: the calculation completed and produced numbers, but one of them
//! violates (or deserves attention under) a code limit. Callers decide what
//! to do with flagged results; the engine only reports.
//!
//! Every flag carries a traceable code reference so a reviewer can find the
//! governing section without re-deriving it.
//!
//! ## Example
//!
//! ```rust
//! use frost_core::compliance::{code_ref, ComplianceFlag, Severity};
//!
//! let flag = ComplianceFlag::error(
//!     code_ref::B31_5_STRAIGHT_PIPE,
//!     "Hoop stress 18,450 psi exceeds allowable 17,100 psi",
//! );
//! assert_eq!(flag.severity, Severity::Error);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Code Section References
// ============================================================================

/// Code section references cited by compliance flags.
///
/// These constants provide traceable references to the governing standards:
/// IIAR 2-2014 with Addendum A, ASHRAE 15-1994, ASME B31.5, and the 2010
/// California Mechanical Code.
pub mod code_ref {
    // ASME B31.5 - Refrigeration Piping and Heat Transfer Components
    /// Straight pipe under internal pressure (Barlow / minimum wall)
    pub const B31_5_STRAIGHT_PIPE: &str = "ASME B31.5 504.1.1";
    /// Branch connection reinforcement (area-replacement method)
    pub const B31_5_BRANCH_REINFORCEMENT: &str = "ASME B31.5 504.3.1";
    /// Hydrostatic leak test pressure
    pub const B31_5_HYDROSTATIC_TEST: &str = "ASME B31.5 538.4";

    // IIAR 2-2014 + Addendum A - Safe Design of Closed-Circuit Ammonia Systems
    /// Pressure vessel relief capacity
    pub const IIAR2_VESSEL_RELIEF: &str = "IIAR 2-2014 15.5.2";
    /// Positive-displacement compressor relief
    pub const IIAR2_COMPRESSOR_RELIEF: &str = "IIAR 2-2014 15.5.4";
    /// Heat exchanger relief capacity
    pub const IIAR2_HX_RELIEF: &str = "IIAR 2-2014 15.5.3";
    /// Relief discharge (outlet) piping back pressure
    pub const IIAR2_DISCHARGE_PIPING: &str = "IIAR 2-2014 15.5.9";
    /// Emergency diffusion tank
    pub const IIAR2_DIFFUSION_TANK: &str = "IIAR 2-2014 15.6";

    // ASHRAE 15-1994 - Safety Code for Mechanical Refrigeration
    /// Pressure vessel relief capacity (C = f D L)
    pub const ASHRAE15_VESSEL_RELIEF: &str = "ASHRAE 15-1994 9.4.5";
    /// Heat exchanger relief capacity
    pub const ASHRAE15_HX_RELIEF: &str = "ASHRAE 15-1994 9.4.6";
    /// Relief device setting and discharge
    pub const ASHRAE15_DISCHARGE: &str = "ASHRAE 15-1994 9.4.8";

    // 2010 California Mechanical Code
    /// Refrigeration vessel relief capacity
    pub const CMC_VESSEL_RELIEF: &str = "CMC 2010 1118.0";

    // Suction riser / oil return practice
    /// Minimum vapor velocity for oil return in vertical up-flow risers
    pub const RISER_OIL_RETURN: &str = "ASHRAE Refrigeration Handbook Ch.2 (riser oil return)";
    /// Velocity ceiling for noise and erosion
    pub const RISER_VELOCITY_CEILING: &str = "ASHRAE Refrigeration Handbook Ch.2 (line velocity)";

    // Room load practice
    /// Cold-storage load calculation procedure
    pub const ROOM_LOAD: &str = "ASHRAE Refrigeration Handbook Ch.24 (refrigeration load)";

    // Support spans
    /// Suggested maximum support spacing for steel refrigerant piping
    pub const SUPPORT_SPACING: &str = "ASME B31.5 520.1 / MSS SP-69";

    // Facility-design practice
    /// Underfloor warming for freezer slabs
    pub const UNDERFLOOR_WARMING: &str =
        "ASHRAE Refrigeration Handbook Ch.23 (refrigerated-facility design)";
    /// Evaporative condenser sump practice
    pub const CONDENSER_SUMP: &str = "ASHRAE Systems Handbook Ch.40 (evaporative condensers)";
    /// Commissioning and purge practice
    pub const IIAR5_PURGE: &str = "ANSI/IIAR 5 (commissioning)";
}

/// Severity of a compliance flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Informational note (e.g., heat gain reversed because the adjacent
    /// space is colder than the room). Nothing to fix.
    Info,
    /// Result is valid but close to or outside preferred practice.
    Warning,
    /// Result violates a code limit; the design as specified does not pass.
    Error,
}

impl Severity {
    /// Display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A single code-compliance finding attached to a result record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceFlag {
    /// How serious the finding is
    pub severity: Severity,
    /// Governing code section (see [`code_ref`])
    pub code_ref: String,
    /// Human-readable description with the offending numbers
    pub message: String,
}

impl ComplianceFlag {
    /// Create an informational flag
    pub fn info(code_ref: impl Into<String>, message: impl Into<String>) -> Self {
        ComplianceFlag {
            severity: Severity::Info,
            code_ref: code_ref.into(),
            message: message.into(),
        }
    }

    /// Create a warning flag
    pub fn warning(code_ref: impl Into<String>, message: impl Into<String>) -> Self {
        ComplianceFlag {
            severity: Severity::Warning,
            code_ref: code_ref.into(),
            message: message.into(),
        }
    }

    /// Create an error flag
    pub fn error(code_ref: impl Into<String>, message: impl Into<String>) -> Self {
        ComplianceFlag {
            severity: Severity::Error,
            code_ref: code_ref.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ComplianceFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {} - {}", self.severity, self.code_ref, self.message)
    }
}

/// Check whether a flag list contains any error-severity entries.
///
/// Convenience for callers that only care about pass/fail.
pub fn has_errors(flags: &[ComplianceFlag]) -> bool {
    flags.iter().any(|f| f.severity == Severity::Error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_constructors() {
        let info = ComplianceFlag::info(code_ref::ROOM_LOAD, "negative transmission term");
        assert_eq!(info.severity, Severity::Info);

        let error = ComplianceFlag::error(code_ref::B31_5_STRAIGHT_PIPE, "overstressed");
        assert_eq!(error.severity, Severity::Error);
        assert_eq!(error.code_ref, "ASME B31.5 504.1.1");
    }

    #[test]
    fn test_has_errors() {
        let flags = vec![
            ComplianceFlag::info(code_ref::ROOM_LOAD, "note"),
            ComplianceFlag::warning(code_ref::RISER_OIL_RETURN, "close to floor"),
        ];
        assert!(!has_errors(&flags));

        let mut flags = flags;
        flags.push(ComplianceFlag::error(
            code_ref::B31_5_BRANCH_REINFORCEMENT,
            "deficient",
        ));
        assert!(has_errors(&flags));
    }

    #[test]
    fn test_flag_serialization() {
        let flag = ComplianceFlag::warning(code_ref::RISER_VELOCITY_CEILING, "4,400 fpm");
        let json = serde_json::to_string(&flag).unwrap();
        assert!(json.contains("Warning"));
        let roundtrip: ComplianceFlag = serde_json::from_str(&json).unwrap();
        assert_eq!(flag, roundtrip);
    }

    #[test]
    fn test_flag_display() {
        let flag = ComplianceFlag::error(code_ref::B31_5_STRAIGHT_PIPE, "overstressed");
        let text = flag.to_string();
        assert!(text.contains("ERROR"));
        assert!(text.contains("504.1.1"));
    }
}
