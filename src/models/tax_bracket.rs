//! Progressive tax bracket model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// One band of a progressive personal income tax schedule.
///
/// Bounds are monthly taxable income in VND. The last bracket of a table has
/// no upper bound.
///
/// # Example
///
/// ```
/// use payroll_engine::models::TaxBracket;
/// use rust_decimal::Decimal;
///
/// let bracket = TaxBracket {
///     order: 2,
///     lower_bound: Decimal::from(5_000_000),
///     upper_bound: Some(Decimal::from(10_000_000)),
///     rate_percent: Decimal::from(10),
/// };
/// assert_eq!(bracket.range_label(), "Trên 5 đến 10 triệu");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Position of the bracket in its table, starting at 1.
    pub order: u32,
    /// Taxable income at which the bracket starts.
    pub lower_bound: Decimal,
    /// Taxable income at which the bracket ends, `None` for the top bracket.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// Marginal rate applied inside the bracket, as a percentage (0-100).
    pub rate_percent: Decimal,
}

impl TaxBracket {
    /// Returns true for the open-ended top bracket.
    pub fn is_unbounded(&self) -> bool {
        self.upper_bound.is_none()
    }

    /// Label describing the bracket's range in millions of VND.
    pub fn range_label(&self) -> String {
        let lower = in_millions(self.lower_bound);
        match self.upper_bound {
            None => format!("Trên {} triệu", lower),
            Some(upper) if self.lower_bound.is_zero() => {
                format!("Đến {} triệu", in_millions(upper))
            }
            Some(upper) => format!("Trên {} đến {} triệu", lower, in_millions(upper)),
        }
    }
}

fn in_millions(amount: Decimal) -> Decimal {
    (amount / Decimal::from(1_000_000)).normalize()
}

/// Checks that a bracket table is usable by the progressive tax walk.
///
/// A valid table is non-empty, starts at zero, is numbered 1..=n, has
/// strictly increasing contiguous bounds, non-negative rates, and ends in
/// exactly one unbounded bracket.
pub fn validate_brackets(brackets: &[TaxBracket]) -> EngineResult<()> {
    let invalid = |message: String| EngineError::InvalidPolicy { message };

    let first = brackets
        .first()
        .ok_or_else(|| invalid("bracket table is empty".to_string()))?;
    if !first.lower_bound.is_zero() {
        return Err(invalid(format!(
            "first bracket starts at {} instead of 0",
            first.lower_bound
        )));
    }

    let last_index = brackets.len() - 1;
    let mut previous_upper: Option<Decimal> = None;
    for (i, bracket) in brackets.iter().enumerate() {
        let expected_order = i as u32 + 1;
        if bracket.order != expected_order {
            return Err(invalid(format!(
                "bracket at position {} has order {}",
                expected_order, bracket.order
            )));
        }
        if bracket.rate_percent.is_sign_negative() {
            return Err(invalid(format!(
                "bracket {} has a negative rate",
                bracket.order
            )));
        }
        if let Some(upper) = previous_upper {
            if bracket.lower_bound != upper {
                return Err(invalid(format!(
                    "bracket {} starts at {} but bracket {} ends at {}",
                    bracket.order,
                    bracket.lower_bound,
                    bracket.order - 1,
                    upper
                )));
            }
        }
        match bracket.upper_bound {
            Some(upper) if i == last_index => {
                return Err(invalid(format!(
                    "last bracket {} is capped at {}",
                    bracket.order, upper
                )));
            }
            Some(upper) if upper <= bracket.lower_bound => {
                return Err(invalid(format!(
                    "bracket {} is empty ({} to {})",
                    bracket.order, bracket.lower_bound, upper
                )));
            }
            None if i != last_index => {
                return Err(invalid(format!(
                    "bracket {} is unbounded but is not the last bracket",
                    bracket.order
                )));
            }
            _ => {}
        }
        previous_upper = bracket.upper_bound;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bracket(order: u32, lower: i64, upper: Option<i64>, rate: i64) -> TaxBracket {
        TaxBracket {
            order,
            lower_bound: Decimal::from(lower),
            upper_bound: upper.map(Decimal::from),
            rate_percent: Decimal::from(rate),
        }
    }

    fn three_brackets() -> Vec<TaxBracket> {
        vec![
            bracket(1, 0, Some(5_000_000), 5),
            bracket(2, 5_000_000, Some(10_000_000), 10),
            bracket(3, 10_000_000, None, 15),
        ]
    }

    #[test]
    fn test_range_labels() {
        let brackets = three_brackets();
        assert_eq!(brackets[0].range_label(), "Đến 5 triệu");
        assert_eq!(brackets[1].range_label(), "Trên 5 đến 10 triệu");
        assert_eq!(brackets[2].range_label(), "Trên 10 triệu");
    }

    #[test]
    fn test_range_label_fractional_millions() {
        let b = bracket(2, 2_500_000, Some(7_500_000), 10);
        assert_eq!(b.range_label(), "Trên 2.5 đến 7.5 triệu");
    }

    #[test]
    fn test_valid_table_passes() {
        assert!(validate_brackets(&three_brackets()).is_ok());
    }

    #[test]
    fn test_empty_table_rejected() {
        let err = validate_brackets(&[]).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_gap_between_brackets_rejected() {
        let mut brackets = three_brackets();
        brackets[1].lower_bound = Decimal::from(6_000_000);
        let err = validate_brackets(&brackets).unwrap_err();
        assert!(matches!(err, EngineError::InvalidPolicy { .. }));
        assert!(err.to_string().contains("bracket 2 starts at 6000000"));
    }

    #[test]
    fn test_capped_last_bracket_rejected() {
        let mut brackets = three_brackets();
        brackets[2].upper_bound = Some(Decimal::from(20_000_000));
        let err = validate_brackets(&brackets).unwrap_err();
        assert!(err.to_string().contains("last bracket 3"));
    }

    #[test]
    fn test_unbounded_middle_bracket_rejected() {
        let mut brackets = three_brackets();
        brackets[1].upper_bound = None;
        assert!(validate_brackets(&brackets).is_err());
    }

    #[test]
    fn test_nonzero_start_rejected() {
        let mut brackets = three_brackets();
        brackets[0].lower_bound = Decimal::from(1);
        assert!(validate_brackets(&brackets).is_err());
    }

    #[test]
    fn test_misnumbered_bracket_rejected() {
        let mut brackets = three_brackets();
        brackets[2].order = 7;
        let err = validate_brackets(&brackets).unwrap_err();
        assert!(err.to_string().contains("order 7"));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut brackets = three_brackets();
        brackets[0].rate_percent = Decimal::from(-5);
        assert!(validate_brackets(&brackets).is_err());
    }
}
