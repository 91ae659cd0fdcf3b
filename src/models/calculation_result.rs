//! Calculation result models for the payroll engine.
//!
//! This module contains the [`CalculationResult`] type and the structures it
//! is assembled from: contribution bases, employee and employer insurance,
//! and the per-bracket [`TaxDetail`] records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The two independently capped salaries insurance is computed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionBases {
    /// Base for social and health insurance, capped at a multiple of the
    /// statutory base salary.
    pub social_health: Decimal,
    /// Base for unemployment insurance, capped at a multiple of the regional
    /// minimum wage.
    pub unemployment: Decimal,
}

/// Insurance withheld from the employee's pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInsurance {
    /// Social insurance (BHXH).
    pub social: Decimal,
    /// Health insurance (BHYT).
    pub health: Decimal,
    /// Unemployment insurance (BHTN).
    pub unemployment: Decimal,
}

impl EmployeeInsurance {
    /// Sum of the three employee contributions.
    pub fn total(&self) -> Decimal {
        self.social + self.health + self.unemployment
    }
}

/// Contributions paid by the employer on top of gross salary.
///
/// These are a cost to the employer only and never reduce the employee's pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerContributions {
    /// Social insurance (BHXH).
    pub social: Decimal,
    /// Health insurance (BHYT).
    pub health: Decimal,
    /// Unemployment insurance (BHTN).
    pub unemployment: Decimal,
    /// Occupational accident and disease fund (BHTNLĐ-BNN).
    pub occupational_accident: Decimal,
}

impl EmployerContributions {
    /// Sum of the four employer contributions.
    pub fn total(&self) -> Decimal {
        self.social + self.health + self.unemployment + self.occupational_accident
    }
}

/// Tax charged inside one bracket.
///
/// # Example
///
/// ```
/// use payroll_engine::models::TaxDetail;
/// use rust_decimal::Decimal;
///
/// let detail = TaxDetail {
///     order: 1,
///     range_label: "Đến 5 triệu".to_string(),
///     taxable_segment: Decimal::from(5_000_000),
///     rate_percent: Decimal::from(5),
///     tax_amount: Decimal::from(250_000),
/// };
/// assert_eq!(detail.order, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxDetail {
    /// Order of the bracket in its table.
    pub order: u32,
    /// Human-readable range of the bracket.
    pub range_label: String,
    /// Portion of taxable income falling inside the bracket.
    pub taxable_segment: Decimal,
    /// Marginal rate of the bracket, as a percentage.
    pub rate_percent: Decimal,
    /// `taxable_segment * rate_percent / 100`.
    pub tax_amount: Decimal,
}

/// The complete breakdown of one gross salary.
///
/// Produced by a single forward calculation and never modified afterwards.
/// Amounts are unrounded; rounding is left to whoever displays them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Gross salary the breakdown was computed for.
    pub gross: Decimal,
    /// Capped salaries insurance was computed on.
    pub contribution_bases: ContributionBases,
    /// Insurance withheld from the employee.
    pub employee_insurance: EmployeeInsurance,
    /// Gross minus employee insurance.
    pub pre_tax_income: Decimal,
    /// Personal deduction.
    pub self_deduction: Decimal,
    /// Dependent deduction times the number of dependents.
    pub dependent_deduction: Decimal,
    /// Other deductions supplied by the caller.
    pub other_deductions: Decimal,
    /// Pre-tax income minus all deductions, floored at zero.
    pub taxable_income: Decimal,
    /// Per-bracket tax, in ascending bracket order.
    pub tax_details: Vec<TaxDetail>,
    /// Total personal income tax.
    pub pit_total: Decimal,
    /// Pre-tax income minus personal income tax.
    pub net: Decimal,
    /// Contributions paid by the employer.
    pub employer_contributions: EmployerContributions,
    /// Gross plus employer contributions.
    pub total_employer_cost: Decimal,
}

impl CalculationResult {
    /// Total insurance withheld from the employee.
    pub fn total_employee_insurance(&self) -> Decimal {
        self.employee_insurance.total()
    }

    /// Sum of self, dependent and other deductions.
    pub fn total_deductions(&self) -> Decimal {
        self.self_deduction + self.dependent_deduction + self.other_deductions
    }

    /// Total contributions paid by the employer.
    pub fn total_employer_contributions(&self) -> Decimal {
        self.employer_contributions.total()
    }
}

/// A warning attached to a calculation that still produced a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}
