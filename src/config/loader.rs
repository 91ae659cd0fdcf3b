//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a policy table
//! from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{BracketsConfig, InsuranceConfig, PeriodsConfig, PolicyTable};

/// Loads a [`PolicyTable`] from a policy directory.
///
/// # Directory Structure
///
/// ```text
/// config/vn_pit/
/// ├── insurance.yaml   # Base salary, cap multiplier, contribution rates, minimum wage tables
/// ├── brackets.yaml    # Named progressive tax bracket tables
/// └── periods.yaml     # Per-period deductions and table references
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::PolicyPeriod;
///
/// let loader = ConfigLoader::load("./config/vn_pit")?;
/// let brackets = loader.table().tax_brackets_for(PolicyPeriod::P1SecondHalf2025);
/// println!("{} brackets", brackets.len());
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    table: PolicyTable,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or misses a field (`ConfigParseError`)
    /// - The files are inconsistent with each other (`InvalidPolicy`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let insurance = Self::load_yaml::<InsuranceConfig>(&path.join("insurance.yaml"))?;
        let brackets = Self::load_yaml::<BracketsConfig>(&path.join("brackets.yaml"))?;
        let periods = Self::load_yaml::<PeriodsConfig>(&path.join("periods.yaml"))?;

        let table = PolicyTable::from_configs(insurance, brackets, periods)?;
        debug!(path = %path.display(), "Loaded policy table");

        Ok(Self { table })
    }

    /// Wraps the built-in statutory table.
    pub fn statutory() -> Self {
        Self {
            table: PolicyTable::statutory(),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded policy table.
    pub fn table(&self) -> &PolicyTable {
        &self.table
    }

    /// Consumes the loader, returning the policy table.
    pub fn into_table(self) -> PolicyTable {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PolicyPeriod, Region};
    use rust_decimal::Decimal;
    use std::path::PathBuf;

    fn shipped_config_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config/vn_pit")
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "payroll_engine_{}_{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn copy_shipped_config(to: &Path) {
        for file in ["insurance.yaml", "brackets.yaml", "periods.yaml"] {
            fs::copy(shipped_config_dir().join(file), to.join(file)).unwrap();
        }
    }

    #[test]
    fn test_shipped_config_matches_statutory_table() {
        let loader = ConfigLoader::load(shipped_config_dir()).unwrap();
        assert_eq!(loader.table(), &PolicyTable::statutory());
    }

    #[test]
    fn test_shipped_config_lookups() {
        let table = ConfigLoader::load(shipped_config_dir()).unwrap().into_table();
        assert_eq!(
            table.minimum_wage_for(PolicyPeriod::P2FirstHalf2026, Region::II),
            Decimal::from(4_730_000)
        );
        assert_eq!(
            table
                .deductions_for(PolicyPeriod::P3FromSecondHalf2026)
                .self_deduction,
            Decimal::from(15_500_000)
        );
    }

    #[test]
    fn test_missing_directory_returns_config_not_found() {
        let result = ConfigLoader::load("/nonexistent/policy/dir");
        match result.unwrap_err() {
            EngineError::ConfigNotFound { path } => {
                assert!(path.ends_with("insurance.yaml"));
            }
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_yaml_returns_parse_error() {
        let dir = scratch_dir("malformed");
        copy_shipped_config(&dir);
        fs::write(dir.join("brackets.yaml"), "bracket_tables: [not: a map").unwrap();

        match ConfigLoader::load(&dir).unwrap_err() {
            EngineError::ConfigParseError { path, .. } => {
                assert!(path.ends_with("brackets.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unknown_bracket_table_reference_is_invalid_policy() {
        let dir = scratch_dir("unknown_table");
        copy_shipped_config(&dir);
        let periods = fs::read_to_string(dir.join("periods.yaml")).unwrap();
        fs::write(
            dir.join("periods.yaml"),
            periods.replace("five_bracket", "six_bracket"),
        )
        .unwrap();

        match ConfigLoader::load(&dir).unwrap_err() {
            EngineError::InvalidPolicy { message } => {
                assert!(message.contains("six_bracket"));
            }
            other => panic!("Expected InvalidPolicy, got {:?}", other),
        }
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_bracket_gap_is_invalid_policy() {
        let dir = scratch_dir("bracket_gap");
        copy_shipped_config(&dir);
        let brackets = fs::read_to_string(dir.join("brackets.yaml")).unwrap();
        fs::write(
            dir.join("brackets.yaml"),
            brackets.replacen("lower_bound: \"5000000\"", "lower_bound: \"6000000\"", 1),
        )
        .unwrap();

        match ConfigLoader::load(&dir).unwrap_err() {
            EngineError::InvalidPolicy { message } => {
                assert!(message.contains("bracket 2"));
            }
            other => panic!("Expected InvalidPolicy, got {:?}", other),
        }
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_negative_contribution_rate_is_invalid_policy() {
        let dir = scratch_dir("negative_rate");
        copy_shipped_config(&dir);
        let insurance = fs::read_to_string(dir.join("insurance.yaml")).unwrap();
        fs::write(
            dir.join("insurance.yaml"),
            insurance.replacen("social: \"17\"", "social: \"-17\"", 1),
        )
        .unwrap();

        match ConfigLoader::load(&dir).unwrap_err() {
            EngineError::InvalidPolicy { message } => {
                assert!(message.contains("employer social rate"));
            }
            other => panic!("Expected InvalidPolicy, got {:?}", other),
        }
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_statutory_loader() {
        let loader = ConfigLoader::statutory();
        assert_eq!(loader.table().base_salary(), Decimal::from(2_340_000));
    }
}
