//! Inverse calculation: target net salary to gross salary.
//!
//! Net income is a non-decreasing, piecewise-linear function of gross income,
//! so the gross that produces a given net can be found by bisection, using the
//! forward calculator as a black box.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::PolicyTable;
use crate::models::{CalculationInput, CalculationResult};

use super::gross_to_net::compute_from_gross;

/// Largest accepted absolute difference between computed and target net.
pub const SOLVER_TOLERANCE: Decimal = Decimal::ONE;

/// Maximum number of bisection steps before giving up.
pub const SOLVER_MAX_ITERATIONS: u32 = 100;

/// Initial upper bound of the search, as a multiple of the target net.
pub const SEARCH_UPPER_MULTIPLIER: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

/// How a solve ended, without the breakdown itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverSummary {
    /// Number of forward calculations performed.
    pub iterations: u32,
    /// Whether the last result is within [`SOLVER_TOLERANCE`] of the target.
    pub converged: bool,
    /// `|result.net - target_net|` of the returned result.
    pub net_difference: Decimal,
}

/// The result of a solve together with its [`SolverSummary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverOutcome {
    /// Breakdown of the gross that was found (or the last one tried).
    pub result: CalculationResult,
    /// Convergence information.
    pub summary: SolverSummary,
}

/// Finds the gross salary whose net is within 1 of `target_net`.
///
/// Returns the last computed breakdown even if the search did not converge
/// within [`SOLVER_MAX_ITERATIONS`]; use [`solve_gross_from_net_detailed`] to
/// find out whether it did.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::solve_gross_from_net;
/// use payroll_engine::config::PolicyTable;
/// use payroll_engine::models::{CalculationInput, PolicyPeriod, Region};
/// use rust_decimal::Decimal;
///
/// let table = PolicyTable::statutory();
/// let target = Decimal::from(17_460_000);
/// let input = CalculationInput::net_to_gross(PolicyPeriod::P1SecondHalf2025, Region::I, target);
///
/// let result = solve_gross_from_net(target, &input, &table);
/// assert!((result.gross - Decimal::from(20_000_000)).abs() <= Decimal::ONE);
/// ```
pub fn solve_gross_from_net(
    target_net: Decimal,
    input: &CalculationInput,
    table: &PolicyTable,
) -> CalculationResult {
    solve_gross_from_net_detailed(target_net, input, table).result
}

/// Bisection search for the gross salary producing `target_net`.
///
/// The search starts on `[target_net, 3 * target_net]`. Each trial gross gets
/// its own input: when insurance tracks the actual salary, the trial's
/// insurance salary is the trial gross; otherwise the caller's fixed insurance
/// salary is kept.
pub fn solve_gross_from_net_detailed(
    target_net: Decimal,
    input: &CalculationInput,
    table: &PolicyTable,
) -> SolverOutcome {
    let mut low = target_net;
    let mut high = target_net * SEARCH_UPPER_MULTIPLIER;

    let mut iterations = 0;
    loop {
        iterations += 1;
        let mid = (low + high) / Decimal::TWO;

        let trial = input.for_trial_gross(mid);
        let result = compute_from_gross(mid, &trial, table);
        let diff = result.net - target_net;
        let converged = diff.abs() <= SOLVER_TOLERANCE;

        if converged || iterations >= SOLVER_MAX_ITERATIONS {
            if converged {
                debug!(
                    target_net = %target_net,
                    gross = %result.gross,
                    iterations,
                    "Net-to-gross search converged"
                );
            } else {
                warn!(
                    target_net = %target_net,
                    gross = %result.gross,
                    net_difference = %diff.abs(),
                    iterations,
                    "Net-to-gross search did not converge; returning last attempt"
                );
            }
            return SolverOutcome {
                result,
                summary: SolverSummary {
                    iterations,
                    converged,
                    net_difference: diff.abs(),
                },
            };
        }

        if diff > Decimal::ZERO {
            high = mid;
        } else {
            low = mid;
        }
    }
}
