//! Calculation logic for the payroll engine.
//!
//! This module contains insurance contribution capping, the progressive
//! personal income tax walk, the gross-to-net forward calculator, the
//! net-to-gross bisection solver, and dispatch on the calculation mode.

mod dispatch;
mod gross_to_net;
mod insurance;
mod net_to_gross;
mod progressive_tax;

pub use dispatch::{calculate, CalculationOutcome};
pub use gross_to_net::compute_from_gross;
pub use insurance::{contribution_bases, employee_insurance, employer_contributions, percent_of};
pub use net_to_gross::{
    solve_gross_from_net, solve_gross_from_net_detailed, SolverOutcome, SolverSummary,
    SEARCH_UPPER_MULTIPLIER, SOLVER_MAX_ITERATIONS, SOLVER_TOLERANCE,
};
pub use progressive_tax::{calculate_progressive_tax, ProgressiveTaxResult};
