//! Mode dispatch between the forward calculator and the inverse solver.

use crate::config::PolicyTable;
use crate::models::{CalculationInput, CalculationMode, CalculationResult};

use super::gross_to_net::compute_from_gross;
use super::net_to_gross::{solve_gross_from_net_detailed, SolverSummary};

/// The breakdown produced for a [`CalculationInput`], plus solver details
/// when the input asked for NET_TO_GROSS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationOutcome {
    /// The breakdown.
    pub result: CalculationResult,
    /// Present only for NET_TO_GROSS calculations.
    pub solver: Option<SolverSummary>,
}

/// Runs the calculation `input.mode` asks for.
///
/// For GROSS_TO_NET, `input.amount` is the gross; when insurance tracks the
/// actual salary, the insurance salary is taken to be that gross. For
/// NET_TO_GROSS, `input.amount` is the target net handed to the solver.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate;
/// use payroll_engine::config::PolicyTable;
/// use payroll_engine::models::{CalculationInput, PolicyPeriod, Region};
/// use rust_decimal::Decimal;
///
/// let table = PolicyTable::statutory();
/// let input = CalculationInput::gross_to_net(
///     PolicyPeriod::P3FromSecondHalf2026,
///     Region::I,
///     Decimal::from(20_000_000),
/// );
///
/// let outcome = calculate(&input, &table);
/// assert_eq!(outcome.result.net, Decimal::from(17_780_000));
/// assert!(outcome.solver.is_none());
/// ```
pub fn calculate(input: &CalculationInput, table: &PolicyTable) -> CalculationOutcome {
    match input.mode {
        CalculationMode::GrossToNet => {
            let input = input.for_trial_gross(input.amount);
            CalculationOutcome {
                result: compute_from_gross(input.amount, &input, table),
                solver: None,
            }
        }
        CalculationMode::NetToGross => {
            let outcome = solve_gross_from_net_detailed(input.amount, input, table);
            CalculationOutcome {
                result: outcome.result,
                solver: Some(outcome.summary),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PolicyPeriod, Region, MAX_AMOUNT};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_gross_to_net_dispatch() {
        let table = PolicyTable::statutory();
        let input = CalculationInput::gross_to_net(
            PolicyPeriod::P1SecondHalf2025,
            Region::I,
            dec("20000000"),
        );

        let outcome = calculate(&input, &table);

        assert_eq!(outcome.result.net, dec("17460000"));
        assert!(outcome.solver.is_none());
    }

    #[test]
    fn test_gross_to_net_syncs_stale_tracking_insurance_salary() {
        let table = PolicyTable::statutory();
        let mut input = CalculationInput::gross_to_net(
            PolicyPeriod::P1SecondHalf2025,
            Region::I,
            dec("20000000"),
        );
        input.insurance_contribution_salary = dec("5000000");

        let outcome = calculate(&input, &table);

        assert_eq!(
            outcome.result.contribution_bases.social_health,
            dec("20000000")
        );
    }

    #[test]
    fn test_gross_to_net_keeps_fixed_insurance_salary() {
        let table = PolicyTable::statutory();
        let input = CalculationInput::gross_to_net(
            PolicyPeriod::P1SecondHalf2025,
            Region::I,
            dec("20000000"),
        )
        .with_fixed_insurance_salary(dec("5000000"));

        let outcome = calculate(&input, &table);

        assert_eq!(
            outcome.result.contribution_bases.social_health,
            dec("5000000")
        );
    }

    #[test]
    fn test_net_to_gross_dispatch_reports_solver() {
        let table = PolicyTable::statutory();
        let input = CalculationInput::net_to_gross(
            PolicyPeriod::P1SecondHalf2025,
            Region::I,
            dec("17460000"),
        );

        let outcome = calculate(&input, &table);

        let solver = outcome.solver.unwrap();
        assert!(solver.converged);
        assert!(solver.net_difference <= Decimal::ONE);
        assert!((outcome.result.gross - dec("20000000")).abs() <= Decimal::ONE);
    }

    #[test]
    fn test_largest_accepted_amounts_do_not_overflow() {
        let table = PolicyTable::statutory();
        let input = CalculationInput::net_to_gross(
            PolicyPeriod::P3FromSecondHalf2026,
            Region::I,
            MAX_AMOUNT,
        )
        .with_fixed_insurance_salary(MAX_AMOUNT)
        .with_other_deductions(MAX_AMOUNT);
        assert!(input.validate().is_ok());

        let outcome = calculate(&input, &table);
        assert!(outcome.solver.is_some());

        let forward = CalculationInput::gross_to_net(
            PolicyPeriod::P1SecondHalf2025,
            Region::II,
            MAX_AMOUNT,
        );
        let result = calculate(&forward, &table).result;
        assert!(result.net > Decimal::ZERO);
    }
}
