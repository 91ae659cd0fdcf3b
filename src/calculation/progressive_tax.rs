//! Progressive personal income tax.
//!
//! Taxable income is split across the brackets of the period's table; each
//! slice is taxed at its bracket's marginal rate.

use rust_decimal::Decimal;

use crate::models::{TaxBracket, TaxDetail};

use super::insurance::percent_of;

/// Total tax and its per-bracket breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressiveTaxResult {
    /// Sum of the tax of every bracket reached.
    pub total: Decimal,
    /// One record per bracket reached, lowest first.
    pub details: Vec<TaxDetail>,
}

/// Walks the brackets in ascending order and taxes the slice of
/// `taxable_income` falling inside each one.
///
/// Brackets whose lower bound is not exceeded are omitted, so a taxable income
/// of zero yields no details and zero tax.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_progressive_tax;
/// use payroll_engine::config::PolicyTable;
/// use payroll_engine::models::PolicyPeriod;
/// use rust_decimal::Decimal;
///
/// let table = PolicyTable::statutory();
/// let tax = calculate_progressive_tax(
///     Decimal::from(6_900_000),
///     table.tax_brackets_for(PolicyPeriod::P1SecondHalf2025),
/// );
/// assert_eq!(tax.total, Decimal::from(440_000));
/// assert_eq!(tax.details.len(), 2);
/// ```
pub fn calculate_progressive_tax(
    taxable_income: Decimal,
    brackets: &[TaxBracket],
) -> ProgressiveTaxResult {
    let mut total = Decimal::ZERO;
    let mut details = Vec::new();

    for bracket in brackets {
        if taxable_income <= bracket.lower_bound {
            break;
        }

        let top = match bracket.upper_bound {
            Some(upper) => taxable_income.min(upper),
            None => taxable_income,
        };
        let segment = top - bracket.lower_bound;
        let tax_amount = percent_of(segment, bracket.rate_percent);

        total += tax_amount;
        details.push(TaxDetail {
            order: bracket.order,
            range_label: bracket.range_label(),
            taxable_segment: segment,
            rate_percent: bracket.rate_percent,
            tax_amount,
        });
    }

    ProgressiveTaxResult { total, details }
}
