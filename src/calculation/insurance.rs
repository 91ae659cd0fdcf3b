//! Social, health and unemployment insurance contributions.
//!
//! Two contribution bases are derived from the insurance salary and capped
//! independently: the social/health base against a multiple of the statutory
//! base salary, and the unemployment base against a multiple of the regional
//! minimum wage.

use rust_decimal::Decimal;

use crate::config::{ContributionRates, PolicyTable};
use crate::models::{
    ContributionBases, EmployeeInsurance, EmployerContributions, PolicyPeriod, Region,
};

/// `amount * percent / 100`.
pub fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    amount * percent / Decimal::ONE_HUNDRED
}

/// Caps the insurance salary into the two contribution bases.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::contribution_bases;
/// use payroll_engine::config::PolicyTable;
/// use payroll_engine::models::{PolicyPeriod, Region};
/// use rust_decimal::Decimal;
///
/// let table = PolicyTable::statutory();
/// let bases = contribution_bases(
///     Decimal::from(60_000_000),
///     PolicyPeriod::P1SecondHalf2025,
///     Region::I,
///     &table,
/// );
/// assert_eq!(bases.social_health, Decimal::from(46_800_000));
/// assert_eq!(bases.unemployment, Decimal::from(60_000_000));
/// ```
pub fn contribution_bases(
    insurance_salary: Decimal,
    period: PolicyPeriod,
    region: Region,
    table: &PolicyTable,
) -> ContributionBases {
    ContributionBases {
        social_health: insurance_salary.min(table.social_health_cap()),
        unemployment: insurance_salary.min(table.unemployment_cap(period, region)),
    }
}

/// Insurance withheld from the employee.
pub fn employee_insurance(bases: &ContributionBases, rates: &ContributionRates) -> EmployeeInsurance {
    EmployeeInsurance {
        social: percent_of(bases.social_health, rates.employee.social),
        health: percent_of(bases.social_health, rates.employee.health),
        unemployment: percent_of(bases.unemployment, rates.employee.unemployment),
    }
}

/// Contributions paid by the employer.
pub fn employer_contributions(
    bases: &ContributionBases,
    rates: &ContributionRates,
) -> EmployerContributions {
    EmployerContributions {
        social: percent_of(bases.social_health, rates.employer.social),
        health: percent_of(bases.social_health, rates.employer.health),
        unemployment: percent_of(bases.unemployment, rates.employer.unemployment),
        occupational_accident: percent_of(
            bases.social_health,
            rates.employer.occupational_accident,
        ),
    }
}
