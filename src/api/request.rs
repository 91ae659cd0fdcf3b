//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structure for the `/calculate` endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CalculationInput, CalculationMode, PolicyPeriod, Region};

/// Request body for the `/calculate` endpoint.
///
/// Mirrors [`CalculationInput`], with defaults for the optional fields:
/// no dependents, no other deductions, insurance tracking the actual salary,
/// and an insurance salary equal to `amount` when it is not given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// GROSS_TO_NET or NET_TO_GROSS.
    pub mode: CalculationMode,
    /// Policy period code, e.g. `"P1_2025_H2"`.
    pub period: PolicyPeriod,
    /// Gross salary or target net salary, depending on `mode`.
    pub amount: Decimal,
    /// Region `"I"` to `"IV"`.
    pub region: Region,
    /// Number of registered dependents.
    #[serde(default)]
    pub dependents: u32,
    /// Salary insurance is computed on; defaults to `amount`.
    #[serde(default)]
    pub insurance_salary: Option<Decimal>,
    /// Whether the insurance salary follows the actual gross salary.
    #[serde(default = "default_tracks_actual_salary")]
    pub insurance_tracks_actual_salary: bool,
    /// Additional deductions.
    #[serde(default)]
    pub other_deductions: Decimal,
}

fn default_tracks_actual_salary() -> bool {
    true
}

impl From<CalculationRequest> for CalculationInput {
    fn from(req: CalculationRequest) -> Self {
        CalculationInput {
            mode: req.mode,
            period: req.period,
            amount: req.amount,
            region: req.region,
            dependents: req.dependents,
            insurance_contribution_salary: req.insurance_salary.unwrap_or(req.amount),
            insurance_tracks_actual_salary: req.insurance_tracks_actual_salary,
            other_deductions: req.other_deductions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_minimal_request_uses_defaults() {
        let req: CalculationRequest = serde_json::from_value(json!({
            "mode": "GROSS_TO_NET",
            "period": "P1_2025_H2",
            "amount": 20000000,
            "region": "I"
        }))
        .unwrap();

        assert_eq!(req.dependents, 0);
        assert!(req.insurance_tracks_actual_salary);
        assert_eq!(req.other_deductions, Decimal::ZERO);

        let input: CalculationInput = req.into();
        assert_eq!(input.insurance_contribution_salary, dec("20000000"));
    }

    #[test]
    fn test_full_request_converts_to_input() {
        let req: CalculationRequest = serde_json::from_value(json!({
            "mode": "NET_TO_GROSS",
            "period": "P3_2026_H2_ONWARD",
            "amount": "30000000",
            "region": "III",
            "dependents": 2,
            "insurance_salary": "12000000",
            "insurance_tracks_actual_salary": false,
            "other_deductions": "500000"
        }))
        .unwrap();

        let input: CalculationInput = req.into();
        assert_eq!(input.mode, CalculationMode::NetToGross);
        assert_eq!(input.period, PolicyPeriod::P3FromSecondHalf2026);
        assert_eq!(input.amount, dec("30000000"));
        assert_eq!(input.region, Region::III);
        assert_eq!(input.dependents, 2);
        assert_eq!(input.insurance_contribution_salary, dec("12000000"));
        assert!(!input.insurance_tracks_actual_salary);
        assert_eq!(input.other_deductions, dec("500000"));
    }

    #[test]
    fn test_negative_dependents_rejected_by_deserializer() {
        let result: Result<CalculationRequest, _> = serde_json::from_value(json!({
            "mode": "GROSS_TO_NET",
            "period": "P1_2025_H2",
            "amount": 20000000,
            "region": "I",
            "dependents": -1
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_mode_rejected() {
        let result: Result<CalculationRequest, _> = serde_json::from_value(json!({
            "period": "P1_2025_H2",
            "amount": 20000000,
            "region": "I"
        }));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("missing field `mode`"));
    }
}
