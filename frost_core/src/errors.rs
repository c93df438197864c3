//! # Error Types
//!
//! Structured error types for frost_core. These errors are designed to be
//! informative for both humans and LLMs, providing enough context to
//! understand and fix issues programmatically.
//!
//! Code-limit violations (overstress, deficient reinforcement, out-of-band
//! velocity) are NOT errors - they are [`crate::compliance::ComplianceFlag`]
//! entries carried inside a successful result, because the caller usually
//! wants the numbers alongside the violation.
//!
//! ## Example
//!
//! ```rust
//! use frost_core::errors::{CalcError, CalcResult};
//!
//! fn validate_flow(mass_flow_lb_hr: f64) -> CalcResult<()> {
//!     if mass_flow_lb_hr <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "mass_flow_lb_hr",
//!             mass_flow_lb_hr.to_string(),
//!             "Mass flow must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for frost_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by LLMs and other consumers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value violates a stated invariant (out of range, wrong sign,
    /// temperature ordering, etc.). Raised before any computation runs.
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required property-table key has no entry (material, pipe size,
    /// refrigerant, valve model, ...). Carries the table and the missing key.
    #[error("No entry in {table} table for key: {key}")]
    LookupMiss { table: String, key: String },

    /// An (equipment class x code edition) pair - or another combinatorial
    /// input - has no defined formula. Surfaced explicitly rather than
    /// approximated with a "nearest" formula.
    #[error("No formula defined for {equipment_class} under {code_edition}")]
    UnsupportedConfiguration {
        equipment_class: String,
        code_edition: String,
    },

    /// An iterative solve failed to converge within its iteration budget.
    /// Carries the last estimate and iteration count for diagnostics.
    #[error("{solver} did not converge after {iterations} iterations (last estimate {last_estimate})")]
    NonConvergence {
        solver: String,
        last_estimate: f64,
        iterations: u32,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a LookupMiss error
    pub fn lookup_miss(table: impl Into<String>, key: impl Into<String>) -> Self {
        CalcError::LookupMiss {
            table: table.into(),
            key: key.into(),
        }
    }

    /// Create an UnsupportedConfiguration error
    pub fn unsupported(
        equipment_class: impl Into<String>,
        code_edition: impl Into<String>,
    ) -> Self {
        CalcError::UnsupportedConfiguration {
            equipment_class: equipment_class.into(),
            code_edition: code_edition.into(),
        }
    }

    /// Create a NonConvergence error
    pub fn non_convergence(solver: impl Into<String>, last_estimate: f64, iterations: u32) -> Self {
        CalcError::NonConvergence {
            solver: solver.into(),
            last_estimate,
            iterations,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::LookupMiss { .. } => "LOOKUP_MISS",
            CalcError::UnsupportedConfiguration { .. } => "UNSUPPORTED_CONFIGURATION",
            CalcError::NonConvergence { .. } => "NON_CONVERGENCE",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error =
            CalcError::invalid_input("mass_flow_lb_hr", "-5.0", "Mass flow must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalcError::lookup_miss("refrigerants", "R-12").error_code(),
            "LOOKUP_MISS"
        );
        assert_eq!(
            CalcError::unsupported("CompressorScrew", "CMC 1118.0 (2010)").error_code(),
            "UNSUPPORTED_CONFIGURATION"
        );
        assert_eq!(
            CalcError::non_convergence("colebrook", 0.021, 50).error_code(),
            "NON_CONVERGENCE"
        );
    }

    #[test]
    fn test_non_convergence_carries_diagnostics() {
        let error = CalcError::non_convergence("colebrook", 0.0185, 50);
        match error {
            CalcError::NonConvergence {
                last_estimate,
                iterations,
                ..
            } => {
                assert_eq!(last_estimate, 0.0185);
                assert_eq!(iterations, 50);
            }
            _ => panic!("wrong variant"),
        }
    }
}
