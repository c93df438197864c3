//! # Pipe-Flow Hydraulics
//!
//! Shared single-phase pressure-drop machinery: Reynolds number, Moody
//! friction factor, and Darcy-Weisbach pressure drop. Both the relief-valve
//! outlet check and the vertical riser calculator solve the same implicit
//! friction-factor equation, so the bounded fixed-point solver lives here
//! once and is configured per call.
//!
//! ## Friction factor
//!
//! Below Re = 2300 the laminar closed form `f = 64/Re` applies. Above it the
//! Colebrook-White correlation is solved by fixed-point iteration:
//!
//! ```text
//! 1/sqrt(f) = -2 log10( eps/(3.7 D) + 2.51/(Re sqrt(f)) )
//! ```
//!
//! seeded with the explicit Swamee-Jain estimate. Iteration stops when
//! successive friction-factor estimates agree within the configured relative
//! tolerance; exhausting the iteration budget is a
//! [`CalcError::NonConvergence`], never a silent best-effort answer.
//!
//! ## Units
//!
//! All hydraulics work in IP units: density lb/ft3, velocity ft/s, length
//! and diameter ft, viscosity lb/(ft-s), pressure drop psi.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Mass-to-force conversion constant, lbm-ft/(lbf-s2)
pub const G_C: f64 = 32.174;

/// Absolute roughness of new commercial steel pipe (ft)
pub const STEEL_ROUGHNESS_FT: f64 = 0.00015;

/// Laminar/turbulent transition Reynolds number
const RE_LAMINAR_LIMIT: f64 = 2300.0;

/// Tolerance and iteration budget for a bounded fixed-point solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Relative convergence tolerance between successive estimates
    pub tolerance: f64,
    /// Hard cap on iterations before reporting non-convergence
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            tolerance: 1e-6,
            max_iterations: 50,
        }
    }
}

/// Converged value plus the iteration count that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedPointSolution {
    /// Converged estimate
    pub value: f64,
    /// Iterations consumed (1 = converged on first update)
    pub iterations: u32,
}

/// Solve `x = map(x)` by bounded fixed-point iteration.
///
/// `solver` names the calling solve for the NonConvergence diagnostic.
/// Convergence is relative: `|x1 - x0| <= tolerance * |x1|`.
pub fn fixed_point(
    solver: &str,
    initial: f64,
    config: SolverConfig,
    map: impl Fn(f64) -> f64,
) -> CalcResult<FixedPointSolution> {
    let mut x0 = initial;
    for iteration in 1..=config.max_iterations {
        let x1 = map(x0);
        if (x1 - x0).abs() <= config.tolerance * x1.abs() {
            return Ok(FixedPointSolution {
                value: x1,
                iterations: iteration,
            });
        }
        x0 = x1;
    }
    Err(CalcError::non_convergence(solver, x0, config.max_iterations))
}

/// Reynolds number for pipe flow.
///
/// `Re = rho V D / mu`, all in IP units (lb/ft3, ft/s, ft, lb/(ft-s)).
pub fn reynolds_number(
    density_lb_ft3: f64,
    velocity_ft_s: f64,
    diameter_ft: f64,
    viscosity_lb_ft_s: f64,
) -> f64 {
    density_lb_ft3 * velocity_ft_s * diameter_ft / viscosity_lb_ft_s
}

/// Moody friction factor for a (Reynolds number, relative roughness) pair.
///
/// Laminar flow gets the closed form; turbulent flow iterates Colebrook-White
/// with the given solver configuration. Deterministic for identical inputs.
pub fn friction_factor(
    reynolds: f64,
    relative_roughness: f64,
    config: SolverConfig,
) -> CalcResult<f64> {
    if reynolds <= 0.0 {
        return Err(CalcError::invalid_input(
            "reynolds",
            reynolds.to_string(),
            "Reynolds number must be positive",
        ));
    }
    if reynolds < RE_LAMINAR_LIMIT {
        return Ok(64.0 / reynolds);
    }

    // Swamee-Jain explicit estimate seeds the Colebrook iteration
    let seed_log = (relative_roughness / 3.7 + 5.74 / reynolds.powf(0.9)).log10();
    let seed = 0.25 / (seed_log * seed_log);

    let solution = fixed_point("colebrook", seed, config, |f| {
        let inv_sqrt = -2.0 * (relative_roughness / 3.7 + 2.51 / (reynolds * f.sqrt())).log10();
        1.0 / (inv_sqrt * inv_sqrt)
    })?;
    Ok(solution.value)
}

/// Darcy-Weisbach pressure drop including fitting losses, in psi.
///
/// `dP = (f L/D + sum K) rho V^2 / (2 g_c)`, converted from lbf/ft2 to psi.
pub fn darcy_pressure_drop_psi(
    friction_factor: f64,
    length_ft: f64,
    diameter_ft: f64,
    fittings_k_sum: f64,
    density_lb_ft3: f64,
    velocity_ft_s: f64,
) -> f64 {
    let velocity_head_psf =
        density_lb_ft3 * velocity_ft_s * velocity_ft_s / (2.0 * G_C);
    let loss_coefficient = friction_factor * length_ft / diameter_ft + fittings_k_sum;
    loss_coefficient * velocity_head_psf / 144.0
}

/// Input to a straight-run pressure-drop evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowCase {
    /// Mass flow (lb/min)
    pub mass_flow_lb_min: f64,
    /// Fluid density at flowing conditions (lb/ft3)
    pub density_lb_ft3: f64,
    /// Dynamic viscosity (lb/(ft-s))
    pub viscosity_lb_ft_s: f64,
    /// Pipe inner diameter (ft)
    pub diameter_ft: f64,
    /// Straight run length (ft)
    pub length_ft: f64,
    /// Sum of fitting resistance coefficients (K values)
    pub fittings_k_sum: f64,
}

/// Velocity, Reynolds number, friction factor and pressure drop for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowSolution {
    /// Mean velocity (ft/s)
    pub velocity_ft_s: f64,
    /// Reynolds number
    pub reynolds: f64,
    /// Converged Moody friction factor
    pub friction_factor: f64,
    /// Total pressure drop including fittings (psi)
    pub pressure_drop_psi: f64,
}

/// Evaluate velocity, Reynolds number, friction factor and pressure drop for
/// a single pipe run. This is the one shared entry point for every caller
/// that needs Darcy-Weisbach with the implicit friction factor.
pub fn solve_flow(case: &FlowCase, config: SolverConfig) -> CalcResult<FlowSolution> {
    if case.mass_flow_lb_min <= 0.0 {
        return Err(CalcError::invalid_input(
            "mass_flow_lb_min",
            case.mass_flow_lb_min.to_string(),
            "Mass flow must be positive",
        ));
    }
    if case.diameter_ft <= 0.0 {
        return Err(CalcError::invalid_input(
            "diameter_ft",
            case.diameter_ft.to_string(),
            "Diameter must be positive",
        ));
    }
    if case.density_lb_ft3 <= 0.0 {
        return Err(CalcError::invalid_input(
            "density_lb_ft3",
            case.density_lb_ft3.to_string(),
            "Density must be positive",
        ));
    }

    let area_ft2 = std::f64::consts::PI * case.diameter_ft * case.diameter_ft / 4.0;
    let mass_flow_lb_s = case.mass_flow_lb_min / 60.0;
    let velocity_ft_s = mass_flow_lb_s / (case.density_lb_ft3 * area_ft2);

    let reynolds = reynolds_number(
        case.density_lb_ft3,
        velocity_ft_s,
        case.diameter_ft,
        case.viscosity_lb_ft_s,
    );
    let relative_roughness = STEEL_ROUGHNESS_FT / case.diameter_ft;
    let friction = friction_factor(reynolds, relative_roughness, config)?;
    let pressure_drop_psi = darcy_pressure_drop_psi(
        friction,
        case.length_ft,
        case.diameter_ft,
        case.fittings_k_sum,
        case.density_lb_ft3,
        velocity_ft_s,
    );

    Ok(FlowSolution {
        velocity_ft_s,
        reynolds,
        friction_factor: friction,
        pressure_drop_psi,
    })
}
