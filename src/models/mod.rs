//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_input;
mod calculation_result;
mod policy_period;
mod tax_bracket;

pub use calculation_input::{CalculationInput, CalculationMode, MAX_AMOUNT};
pub use calculation_result::{
    AuditWarning, CalculationResult, ContributionBases, EmployeeInsurance, EmployerContributions,
    TaxDetail,
};
pub use policy_period::{PolicyPeriod, Region};
pub use tax_bracket::{validate_brackets, TaxBracket};
