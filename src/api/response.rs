//! Response types for the payroll engine API.
//!
//! This module defines the success and error response bodies and the mapping
//! from [`EngineError`] to HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::SolverSummary;
use crate::config::{Deductions, PolicyTable};
use crate::error::EngineError;
use crate::models::{
    AuditWarning, CalculationMode, CalculationResult, PolicyPeriod, Region, TaxBracket,
};

/// Response body of a successful `/calculate` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// Direction of the calculation.
    pub mode: CalculationMode,
    /// Policy period applied.
    pub period: PolicyPeriod,
    /// Human-readable label of the period.
    pub period_label: String,
    /// The full breakdown.
    pub result: CalculationResult,
    /// Solver details, present for NET_TO_GROSS.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub solver: Option<SolverSummary>,
    /// Warnings raised while calculating.
    #[serde(default)]
    pub warnings: Vec<AuditWarning>,
}

/// Minimum wage of one region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionalMinimumWage {
    /// The region.
    pub region: Region,
    /// Its monthly minimum wage.
    pub minimum_wage: Decimal,
    /// Resulting unemployment insurance cap.
    pub unemployment_cap: Decimal,
}

/// Response body of `/policy/{period}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyResponse {
    /// The period described.
    pub period: PolicyPeriod,
    /// Human-readable label of the period.
    pub period_label: String,
    /// First day the period applies.
    pub starts_on: chrono::NaiveDate,
    /// Last day the period applies, absent if open-ended.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ends_on: Option<chrono::NaiveDate>,
    /// Statutory base salary.
    pub base_salary: Decimal,
    /// Social/health insurance cap.
    pub social_health_cap: Decimal,
    /// Self and dependent deductions.
    pub deductions: Deductions,
    /// Minimum wage and unemployment cap of each region.
    pub minimum_wages: Vec<RegionalMinimumWage>,
    /// Progressive tax brackets.
    pub tax_brackets: Vec<TaxBracket>,
}

impl PolicyResponse {
    /// Describes one period of a policy table.
    pub fn from_table(table: &PolicyTable, period: PolicyPeriod) -> Self {
        Self {
            period,
            period_label: period.label().to_string(),
            starts_on: period.starts_on(),
            ends_on: period.ends_on(),
            base_salary: table.base_salary(),
            social_health_cap: table.social_health_cap(),
            deductions: table.deductions_for(period),
            minimum_wages: Region::ALL
                .into_iter()
                .map(|region| RegionalMinimumWage {
                    region,
                    minimum_wage: table.minimum_wage_for(period, region),
                    unemployment_cap: table.unemployment_cap(period, region),
                })
                .collect(),
            tax_brackets: table.tax_brackets_for(period).to_vec(),
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidPolicy { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Invalid policy table", message),
            },
            EngineError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_INPUT",
                    format!("Invalid input field '{}': {}", field, message),
                    "The calculation input contains invalid information",
                ),
            },
        }
    }
}
