//! Forward calculation: gross salary to net salary.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PolicyTable;
use crate::models::{CalculationInput, CalculationResult};

use super::insurance::{contribution_bases, employee_insurance, employer_contributions};
use super::progressive_tax::calculate_progressive_tax;

/// Computes the full breakdown of a gross salary.
///
/// The insurance salary is taken from `input.insurance_contribution_salary`
/// as-is; `input.mode` and `input.amount` are ignored. The function is total:
/// nothing is validated and nothing is rounded, so unusual inputs (such as a
/// negative gross) simply flow through the arithmetic. Only taxable income is
/// floored at zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_from_gross;
/// use payroll_engine::config::PolicyTable;
/// use payroll_engine::models::{CalculationInput, PolicyPeriod, Region};
/// use rust_decimal::Decimal;
///
/// let table = PolicyTable::statutory();
/// let gross = Decimal::from(20_000_000);
/// let input = CalculationInput::gross_to_net(PolicyPeriod::P1SecondHalf2025, Region::I, gross);
///
/// let result = compute_from_gross(gross, &input, &table);
/// assert_eq!(result.taxable_income, Decimal::from(6_900_000));
/// assert_eq!(result.pit_total, Decimal::from(440_000));
/// assert_eq!(result.net, Decimal::from(17_460_000));
/// ```
pub fn compute_from_gross(
    gross: Decimal,
    input: &CalculationInput,
    table: &PolicyTable,
) -> CalculationResult {
    let deductions = table.deductions_for(input.period);
    let rates = table.contribution_rates();

    let bases = contribution_bases(
        input.insurance_contribution_salary,
        input.period,
        input.region,
        table,
    );
    let employee = employee_insurance(&bases, rates);
    let employer = employer_contributions(&bases, rates);
    let total_employer_cost = gross + employer.total();

    let pre_tax_income = gross - employee.total();

    let self_deduction = deductions.self_deduction;
    let dependent_deduction = deductions.dependent_deduction * Decimal::from(input.dependents);
    let total_deductions = self_deduction + dependent_deduction + input.other_deductions;

    let taxable_income = (pre_tax_income - total_deductions).max(Decimal::ZERO);
    let tax = calculate_progressive_tax(taxable_income, table.tax_brackets_for(input.period));

    let net = pre_tax_income - tax.total;

    debug!(
        period = %input.period,
        region = %input.region,
        gross = %gross,
        taxable_income = %taxable_income,
        pit_total = %tax.total,
        net = %net,
        "Computed gross-to-net breakdown"
    );

    CalculationResult {
        gross,
        contribution_bases: bases,
        employee_insurance: employee,
        pre_tax_income,
        self_deduction,
        dependent_deduction,
        other_deductions: input.other_deductions,
        taxable_income,
        tax_details: tax.details,
        pit_total: tax.total,
        net,
        employer_contributions: employer,
        total_employer_cost,
    }
}
