//! Calculation input model.
//!
//! A [`CalculationInput`] bundles everything a caller chooses for one
//! calculation: the direction, the policy period and region, the amount and the
//! insurance and deduction settings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{PolicyPeriod, Region};

/// Largest amount [`CalculationInput::validate`] accepts for any money field.
///
/// One quadrillion VND. Three times this amount, multiplied by any rate, stays
/// inside the range of [`Decimal`].
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// The direction of a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalculationMode {
    /// `amount` is the gross salary; derive the net.
    GrossToNet,
    /// `amount` is the target net salary; search for the gross.
    NetToGross,
}

/// Everything needed to run one calculation.
///
/// When `insurance_tracks_actual_salary` is true, `insurance_contribution_salary`
/// is expected to equal the gross being evaluated. The forward calculator does
/// not enforce this; callers (and the inverse solver) re-derive it per gross.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{CalculationInput, CalculationMode, PolicyPeriod, Region};
/// use rust_decimal::Decimal;
///
/// let input = CalculationInput::gross_to_net(
///     PolicyPeriod::P1SecondHalf2025,
///     Region::I,
///     Decimal::from(20_000_000),
/// )
/// .with_dependents(1);
///
/// assert_eq!(input.mode, CalculationMode::GrossToNet);
/// assert_eq!(input.insurance_contribution_salary, Decimal::from(20_000_000));
/// assert!(input.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// Direction of the calculation.
    pub mode: CalculationMode,
    /// The policy period whose tables apply.
    pub period: PolicyPeriod,
    /// Gross salary (GROSS_TO_NET) or target net salary (NET_TO_GROSS).
    pub amount: Decimal,
    /// Region used for the unemployment-insurance cap.
    pub region: Region,
    /// Number of registered dependents.
    pub dependents: u32,
    /// Salary on which insurance contributions are computed.
    pub insurance_contribution_salary: Decimal,
    /// Whether the insurance salary follows the actual gross salary.
    pub insurance_tracks_actual_salary: bool,
    /// Additional deductions (charity, voluntary pension, ...).
    pub other_deductions: Decimal,
}

impl CalculationInput {
    /// Creates a GROSS_TO_NET input with insurance tracking the gross,
    /// no dependents and no other deductions.
    pub fn gross_to_net(period: PolicyPeriod, region: Region, gross: Decimal) -> Self {
        Self {
            mode: CalculationMode::GrossToNet,
            period,
            amount: gross,
            region,
            dependents: 0,
            insurance_contribution_salary: gross,
            insurance_tracks_actual_salary: true,
            other_deductions: Decimal::ZERO,
        }
    }

    /// Creates a NET_TO_GROSS input with insurance tracking the (unknown) gross,
    /// no dependents and no other deductions.
    pub fn net_to_gross(period: PolicyPeriod, region: Region, target_net: Decimal) -> Self {
        Self {
            mode: CalculationMode::NetToGross,
            period,
            amount: target_net,
            region,
            dependents: 0,
            insurance_contribution_salary: target_net,
            insurance_tracks_actual_salary: true,
            other_deductions: Decimal::ZERO,
        }
    }

    /// Sets the number of dependents.
    pub fn with_dependents(mut self, dependents: u32) -> Self {
        self.dependents = dependents;
        self
    }

    /// Sets the other deductions amount.
    pub fn with_other_deductions(mut self, other_deductions: Decimal) -> Self {
        self.other_deductions = other_deductions;
        self
    }

    /// Pins insurance to a fixed salary, independent of the gross.
    pub fn with_fixed_insurance_salary(mut self, salary: Decimal) -> Self {
        self.insurance_contribution_salary = salary;
        self.insurance_tracks_actual_salary = false;
        self
    }

    /// Copy of this input for evaluating a candidate gross.
    ///
    /// The insurance salary is replaced by `gross` only when it tracks the
    /// actual salary; a fixed insurance salary is kept unchanged.
    pub fn for_trial_gross(&self, gross: Decimal) -> Self {
        let mut trial = self.clone();
        if self.insurance_tracks_actual_salary {
            trial.insurance_contribution_salary = gross;
        }
        trial
    }

    /// Rejects inputs the formulas are not meant for.
    ///
    /// The calculators themselves accept anything; this is an opt-in check for
    /// callers (such as the HTTP API) that want to refuse negative amounts or
    /// amounts above [`MAX_AMOUNT`].
    pub fn validate(&self) -> EngineResult<()> {
        let in_range = |field: &str, value: Decimal| {
            if value.is_sign_negative() && !value.is_zero() {
                Err(EngineError::InvalidInput {
                    field: field.to_string(),
                    message: format!("must not be negative (got {})", value),
                })
            } else if value > MAX_AMOUNT {
                Err(EngineError::InvalidInput {
                    field: field.to_string(),
                    message: format!("must not exceed {} (got {})", MAX_AMOUNT, value),
                })
            } else {
                Ok(())
            }
        };

        in_range("amount", self.amount)?;
        in_range(
            "insurance_contribution_salary",
            self.insurance_contribution_salary,
        )?;
        in_range("other_deductions", self.other_deductions)?;
        Ok(())
    }
}
