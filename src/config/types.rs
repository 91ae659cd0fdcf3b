//! Configuration types for the payroll engine.
//!
//! The file-level structs mirror the YAML files of a policy directory. They are
//! resolved into a [`PolicyTable`], which is what the calculators consume.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{validate_brackets, PolicyPeriod, Region, TaxBracket};

/// Personal and per-dependent deductions of a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    /// Monthly deduction for the taxpayer.
    pub self_deduction: Decimal,
    /// Monthly deduction per registered dependent.
    pub dependent_deduction: Decimal,
}

/// Employee contribution rates, as percentages of the contribution base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRates {
    /// Social insurance (BHXH).
    pub social: Decimal,
    /// Health insurance (BHYT).
    pub health: Decimal,
    /// Unemployment insurance (BHTN).
    pub unemployment: Decimal,
}

/// Employer contribution rates, as percentages of the contribution base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerRates {
    /// Social insurance (BHXH).
    pub social: Decimal,
    /// Health insurance (BHYT).
    pub health: Decimal,
    /// Unemployment insurance (BHTN).
    pub unemployment: Decimal,
    /// Occupational accident and disease fund.
    pub occupational_accident: Decimal,
}

/// Employee and employer contribution rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRates {
    /// Rates withheld from the employee.
    pub employee: EmployeeRates,
    /// Rates paid by the employer.
    pub employer: EmployerRates,
}

/// Contents of `insurance.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct InsuranceConfig {
    /// Statutory base salary (lương cơ sở) used for the social/health cap.
    pub base_salary: Decimal,
    /// Multiple of the base salary / regional minimum wage at which bases are capped.
    pub cap_multiplier: Decimal,
    /// Contribution rates.
    pub contribution_rates: ContributionRates,
    /// Named regional minimum wage tables (e.g. `"2025"`).
    pub minimum_wage_tables: HashMap<String, HashMap<Region, Decimal>>,
}

/// Contents of `brackets.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct BracketsConfig {
    /// Named bracket tables (e.g. `"seven_bracket"`).
    pub bracket_tables: HashMap<String, Vec<TaxBracket>>,
}

/// Per-period entry of `periods.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodConfig {
    /// Monthly deduction for the taxpayer.
    pub self_deduction: Decimal,
    /// Monthly deduction per dependent.
    pub dependent_deduction: Decimal,
    /// Name of the minimum wage table in `insurance.yaml`.
    pub minimum_wage_table: String,
    /// Name of the bracket table in `brackets.yaml`.
    pub bracket_table: String,
}

/// Contents of `periods.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodsConfig {
    /// Settings for each policy period.
    pub periods: HashMap<PolicyPeriod, PeriodConfig>,
}

/// Everything that varies by policy period, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodPolicy {
    /// Deduction amounts.
    pub deductions: Deductions,
    /// Name of the minimum wage table the period uses.
    pub minimum_wage_table: String,
    /// Regional minimum wages, indexed by [`Region`] order.
    pub minimum_wages: [Decimal; 4],
    /// Name of the bracket table the period uses.
    pub bracket_table: String,
    /// Progressive tax brackets in ascending order.
    pub brackets: Vec<TaxBracket>,
}

fn ensure_non_negative(name: &str, value: Decimal) -> EngineResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(EngineError::InvalidPolicy {
            message: format!("{} must not be negative (got {})", name, value),
        });
    }
    Ok(())
}

/// Static lookup data for the calculators.
///
/// A `PolicyTable` is validated when it is built, so every lookup by period and
/// region is infallible. Use [`PolicyTable::statutory`] for the built-in values
/// or [`crate::config::ConfigLoader`] to read them from YAML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyTable {
    base_salary: Decimal,
    cap_multiplier: Decimal,
    contribution_rates: ContributionRates,
    periods: [PeriodPolicy; 3],
}

impl PolicyTable {
    /// Builds a table from already resolved parts, checking every bracket table.
    pub fn new(
        base_salary: Decimal,
        cap_multiplier: Decimal,
        contribution_rates: ContributionRates,
        periods: [PeriodPolicy; 3],
    ) -> EngineResult<Self> {
        ensure_non_negative("base_salary", base_salary)?;
        ensure_non_negative("cap_multiplier", cap_multiplier)?;
        let employee = &contribution_rates.employee;
        let employer = &contribution_rates.employer;
        for (name, rate) in [
            ("employee social rate", employee.social),
            ("employee health rate", employee.health),
            ("employee unemployment rate", employee.unemployment),
            ("employer social rate", employer.social),
            ("employer health rate", employer.health),
            ("employer unemployment rate", employer.unemployment),
            ("employer occupational accident rate", employer.occupational_accident),
        ] {
            ensure_non_negative(name, rate)?;
        }

        for (period, policy) in PolicyPeriod::ALL.iter().zip(periods.iter()) {
            validate_brackets(&policy.brackets).map_err(|err| match err {
                EngineError::InvalidPolicy { message } => EngineError::InvalidPolicy {
                    message: format!("period {}: {}", period, message),
                },
                other => other,
            })?;
            ensure_non_negative(
                &format!("period {} self deduction", period),
                policy.deductions.self_deduction,
            )?;
            ensure_non_negative(
                &format!("period {} dependent deduction", period),
                policy.deductions.dependent_deduction,
            )?;
            for region in Region::ALL {
                ensure_non_negative(
                    &format!("period {} minimum wage for region {}", period, region),
                    policy.minimum_wages[region.index()],
                )?;
            }
        }
        Ok(Self::from_validated_parts(
            base_salary,
            cap_multiplier,
            contribution_rates,
            periods,
        ))
    }

    pub(crate) fn from_validated_parts(
        base_salary: Decimal,
        cap_multiplier: Decimal,
        contribution_rates: ContributionRates,
        periods: [PeriodPolicy; 3],
    ) -> Self {
        Self {
            base_salary,
            cap_multiplier,
            contribution_rates,
            periods,
        }
    }

    /// Resolves the three configuration files into a table.
    ///
    /// Fails if a period is missing, a period references an unknown table, a
    /// minimum wage table lacks a region, or a bracket table is malformed.
    pub fn from_configs(
        insurance: InsuranceConfig,
        brackets: BracketsConfig,
        periods: PeriodsConfig,
    ) -> EngineResult<Self> {
        let invalid = |message: String| EngineError::InvalidPolicy { message };

        let mut resolved = Vec::with_capacity(PolicyPeriod::ALL.len());
        for period in PolicyPeriod::ALL {
            let period_config = periods
                .periods
                .get(&period)
                .ok_or_else(|| invalid(format!("period {} is not configured", period)))?;

            let wage_table = insurance
                .minimum_wage_tables
                .get(&period_config.minimum_wage_table)
                .ok_or_else(|| {
                    invalid(format!(
                        "period {} references unknown minimum wage table '{}'",
                        period, period_config.minimum_wage_table
                    ))
                })?;

            let mut minimum_wages = [Decimal::ZERO; 4];
            for region in Region::ALL {
                minimum_wages[region.index()] = *wage_table.get(&region).ok_or_else(|| {
                    invalid(format!(
                        "minimum wage table '{}' has no entry for region {}",
                        period_config.minimum_wage_table, region
                    ))
                })?;
            }

            let bracket_table = brackets
                .bracket_tables
                .get(&period_config.bracket_table)
                .ok_or_else(|| {
                    invalid(format!(
                        "period {} references unknown bracket table '{}'",
                        period, period_config.bracket_table
                    ))
                })?;

            resolved.push(PeriodPolicy {
                deductions: Deductions {
                    self_deduction: period_config.self_deduction,
                    dependent_deduction: period_config.dependent_deduction,
                },
                minimum_wage_table: period_config.minimum_wage_table.clone(),
                minimum_wages,
                bracket_table: period_config.bracket_table.clone(),
                brackets: bracket_table.clone(),
            });
        }

        let periods: [PeriodPolicy; 3] = resolved
            .try_into()
            .map_err(|_| invalid("expected exactly three policy periods".to_string()))?;

        Self::new(
            insurance.base_salary,
            insurance.cap_multiplier,
            insurance.contribution_rates,
            periods,
        )
    }

    /// Statutory base salary shared by all periods.
    pub fn base_salary(&self) -> Decimal {
        self.base_salary
    }

    /// Multiplier applied to the base salary and the regional minimum wage
    /// to obtain the contribution caps.
    pub fn cap_multiplier(&self) -> Decimal {
        self.cap_multiplier
    }

    /// Employee and employer contribution rates.
    pub fn contribution_rates(&self) -> &ContributionRates {
        &self.contribution_rates
    }

    /// All period-dependent settings of a period.
    pub fn period_policy(&self, period: PolicyPeriod) -> &PeriodPolicy {
        &self.periods[period.index()]
    }

    /// Self and dependent deductions of a period.
    pub fn deductions_for(&self, period: PolicyPeriod) -> Deductions {
        self.period_policy(period).deductions
    }

    /// Regional minimum wage in force during a period.
    pub fn minimum_wage_for(&self, period: PolicyPeriod, region: Region) -> Decimal {
        self.period_policy(period).minimum_wages[region.index()]
    }

    /// Progressive tax brackets of a period, lowest first.
    pub fn tax_brackets_for(&self, period: PolicyPeriod) -> &[TaxBracket] {
        &self.period_policy(period).brackets
    }

    /// Cap on the social/health insurance base.
    pub fn social_health_cap(&self) -> Decimal {
        self.cap_multiplier * self.base_salary
    }

    /// Cap on the unemployment insurance base for a period and region.
    pub fn unemployment_cap(&self, period: PolicyPeriod, region: Region) -> Decimal {
        self.cap_multiplier * self.minimum_wage_for(period, region)
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::statutory()
    }
}
