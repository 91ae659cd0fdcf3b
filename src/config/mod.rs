//! Policy table configuration for the payroll engine.
//!
//! This module provides the [`PolicyTable`] consumed by the calculators, the
//! built-in statutory values, and loading of the same table from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let table = ConfigLoader::load("./config/vn_pit").unwrap().into_table();
//! println!("Base salary: {}", table.base_salary());
//! ```

mod loader;
mod statutory;
mod types;

pub use loader::ConfigLoader;
pub use statutory::{statutory_rates, BASE_SALARY, CAP_MULTIPLIER};
pub use types::{
    BracketsConfig, ContributionRates, Deductions, EmployeeRates, EmployerRates, InsuranceConfig,
    PeriodConfig, PeriodPolicy, PeriodsConfig, PolicyTable,
};
