//! Built-in statutory policy values.
//!
//! These are the amounts in force for the three supported periods. The
//! `config/vn_pit` directory ships the same values in YAML form.

use rust_decimal::Decimal;

use crate::models::TaxBracket;

use super::types::{
    ContributionRates, Deductions, EmployeeRates, EmployerRates, PeriodPolicy, PolicyTable,
};

/// Statutory base salary (lương cơ sở).
pub const BASE_SALARY: i64 = 2_340_000;

/// Contribution bases are capped at this multiple of the base salary or
/// regional minimum wage.
pub const CAP_MULTIPLIER: i64 = 20;

const MINIMUM_WAGES_2025: [i64; 4] = [4_960_000, 4_410_000, 3_860_000, 3_450_000];
const MINIMUM_WAGES_2026: [i64; 4] = [5_310_000, 4_730_000, 4_140_000, 3_700_000];

// (lower, upper, rate %)
const SEVEN_BRACKETS: [(i64, Option<i64>, i64); 7] = [
    (0, Some(5_000_000), 5),
    (5_000_000, Some(10_000_000), 10),
    (10_000_000, Some(18_000_000), 15),
    (18_000_000, Some(32_000_000), 20),
    (32_000_000, Some(52_000_000), 25),
    (52_000_000, Some(80_000_000), 30),
    (80_000_000, None, 35),
];

const FIVE_BRACKETS: [(i64, Option<i64>, i64); 5] = [
    (0, Some(10_000_000), 5),
    (10_000_000, Some(30_000_000), 10),
    (30_000_000, Some(60_000_000), 25),
    (60_000_000, Some(100_000_000), 30),
    (100_000_000, None, 35),
];

fn brackets(rows: &[(i64, Option<i64>, i64)]) -> Vec<TaxBracket> {
    rows.iter()
        .enumerate()
        .map(|(i, &(lower, upper, rate))| TaxBracket {
            order: i as u32 + 1,
            lower_bound: Decimal::from(lower),
            upper_bound: upper.map(Decimal::from),
            rate_percent: Decimal::from(rate),
        })
        .collect()
}

fn period(
    self_deduction: i64,
    dependent_deduction: i64,
    wage_table: &str,
    wages: [i64; 4],
    bracket_table: &str,
    rows: &[(i64, Option<i64>, i64)],
) -> PeriodPolicy {
    PeriodPolicy {
        deductions: Deductions {
            self_deduction: Decimal::from(self_deduction),
            dependent_deduction: Decimal::from(dependent_deduction),
        },
        minimum_wage_table: wage_table.to_string(),
        minimum_wages: wages.map(Decimal::from),
        bracket_table: bracket_table.to_string(),
        brackets: brackets(rows),
    }
}

/// Statutory contribution rates, as percentages.
pub fn statutory_rates() -> ContributionRates {
    ContributionRates {
        employee: EmployeeRates {
            social: Decimal::from(8),
            health: Decimal::new(15, 1),
            unemployment: Decimal::ONE,
        },
        employer: EmployerRates {
            social: Decimal::from(17),
            health: Decimal::from(3),
            unemployment: Decimal::ONE,
            occupational_accident: Decimal::new(5, 1),
        },
    }
}

impl PolicyTable {
    /// The built-in statutory table.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::PolicyTable;
    /// use payroll_engine::models::{PolicyPeriod, Region};
    /// use rust_decimal::Decimal;
    ///
    /// let table = PolicyTable::statutory();
    /// assert_eq!(table.base_salary(), Decimal::from(2_340_000));
    /// assert_eq!(
    ///     table.minimum_wage_for(PolicyPeriod::P1SecondHalf2025, Region::I),
    ///     Decimal::from(4_960_000)
    /// );
    /// assert_eq!(table.tax_brackets_for(PolicyPeriod::P3FromSecondHalf2026).len(), 5);
    /// ```
    pub fn statutory() -> Self {
        let periods = [
            period(
                11_000_000,
                4_400_000,
                "2025",
                MINIMUM_WAGES_2025,
                "seven_bracket",
                &SEVEN_BRACKETS,
            ),
            period(
                15_500_000,
                6_200_000,
                "2026",
                MINIMUM_WAGES_2026,
                "seven_bracket",
                &SEVEN_BRACKETS,
            ),
            period(
                15_500_000,
                6_200_000,
                "2026",
                MINIMUM_WAGES_2026,
                "five_bracket",
                &FIVE_BRACKETS,
            ),
        ];

        // The constant tables are validated by the tests below.
        PolicyTable::from_validated_parts(
            Decimal::from(BASE_SALARY),
            Decimal::from(CAP_MULTIPLIER),
            statutory_rates(),
            periods,
        )
    }
}
