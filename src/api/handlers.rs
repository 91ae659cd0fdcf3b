//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate, SolverSummary, SOLVER_MAX_ITERATIONS};
use crate::models::{AuditWarning, CalculationInput, PolicyPeriod};

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse, CalculationResponse, PolicyResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/policy/:period", get(policy_handler))
        .with_state(state)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a calculation request and returns the full breakdown for the
/// requested direction.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // The body text carries serde's message, e.g. "missing field `mode`"
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return json_response(StatusCode::BAD_REQUEST, error);
        }
    };

    let input: CalculationInput = request.into();
    if let Err(err) = input.validate() {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Calculation input rejected"
        );
        let api_error: ApiErrorResponse = err.into();
        return json_response(api_error.status, api_error.error);
    }

    let start_time = Instant::now();
    let outcome = calculate(&input, state.table());
    let duration = start_time.elapsed();

    let warnings: Vec<AuditWarning> = outcome
        .solver
        .iter()
        .filter(|summary| !summary.converged)
        .map(non_convergence_warning)
        .collect();

    info!(
        correlation_id = %correlation_id,
        mode = ?input.mode,
        period = %input.period,
        region = %input.region,
        gross = %outcome.result.gross,
        net = %outcome.result.net,
        solver_iterations = outcome.solver.map(|s| s.iterations),
        duration_us = duration.as_micros(),
        "Calculation completed successfully"
    );

    let response = CalculationResponse {
        calculation_id: correlation_id,
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        mode: input.mode,
        period: input.period,
        period_label: input.period.label().to_string(),
        result: outcome.result,
        solver: outcome.solver,
        warnings,
    };
    json_response(StatusCode::OK, response)
}

fn non_convergence_warning(summary: &SolverSummary) -> AuditWarning {
    AuditWarning {
        code: "SOLVER_NOT_CONVERGED".to_string(),
        message: format!(
            "No gross salary within tolerance was found after {} of {} iterations; \
             the result is off the target net by {}",
            summary.iterations, SOLVER_MAX_ITERATIONS, summary.net_difference
        ),
        severity: "high".to_string(),
    }
}

/// Handler for GET /policy/:period endpoint.
///
/// Returns the parameters that apply to one policy period.
async fn policy_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> impl IntoResponse {
    match PolicyPeriod::ALL.into_iter().find(|p| p.code() == code) {
        Some(period) => json_response(
            StatusCode::OK,
            PolicyResponse::from_table(state.table(), period),
        ),
        None => {
            warn!(period = %code, "Unknown policy period requested");
            json_response(
                StatusCode::NOT_FOUND,
                ApiError::with_details(
                    "UNKNOWN_PERIOD",
                    format!("Unknown policy period: {}", code),
                    "Expected one of P1_2025_H2, P2_2026_H1, P3_2026_H2_ONWARD",
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PolicyTable;
    use axum::body::Body;
    use axum::http::Request;
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        AppState::new(PolicyTable::statutory())
    }

    async fn post_calculate(body: String) -> (StatusCode, Value) {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/calculate")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_gross_to_net_success() {
        let (status, body) = post_calculate(
            json!({
                "mode": "GROSS_TO_NET",
                "period": "P1_2025_H2",
                "amount": 20000000,
                "region": "I"
            })
            .to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let net: Decimal = body["result"]["net"].as_str().unwrap().parse().unwrap();
        assert_eq!(net, Decimal::from(17_460_000));
        assert_eq!(body["mode"], "GROSS_TO_NET");
        assert_eq!(body["engine_version"], env!("CARGO_PKG_VERSION"));
        assert!(body.get("solver").is_none());
        assert_eq!(body["warnings"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_net_to_gross_reports_solver() {
        let (status, body) = post_calculate(
            json!({
                "mode": "NET_TO_GROSS",
                "period": "P1_2025_H2",
                "amount": "17460000",
                "region": "I"
            })
            .to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["solver"]["converged"], true);
        let summary: SolverSummary = serde_json::from_value(body["solver"].clone()).unwrap();
        assert!(summary.iterations <= SOLVER_MAX_ITERATIONS);
    }

    #[tokio::test]
    async fn test_unreachable_target_adds_warning() {
        let (status, body) = post_calculate(
            json!({
                "mode": "NET_TO_GROSS",
                "period": "P1_2025_H2",
                "amount": 1000000,
                "region": "I",
                "insurance_salary": 40000000,
                "insurance_tracks_actual_salary": false
            })
            .to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["solver"]["converged"], false);
        assert_eq!(body["warnings"][0]["code"], "SOLVER_NOT_CONVERGED");
    }

    #[tokio::test]
    async fn test_negative_amount_rejected() {
        let (status, body) = post_calculate(
            json!({
                "mode": "GROSS_TO_NET",
                "period": "P1_2025_H2",
                "amount": -1,
                "region": "I"
            })
            .to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_amount_above_maximum_rejected() {
        let (status, body) = post_calculate(
            json!({
                "mode": "GROSS_TO_NET",
                "period": "P1_2025_H2",
                "amount": "30000000000000000000000000000",
                "region": "I"
            })
            .to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_missing_field_is_validation_error() {
        let (status, body) = post_calculate(
            json!({
                "mode": "GROSS_TO_NET",
                "amount": 20000000,
                "region": "I"
            })
            .to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_region_is_malformed() {
        let (status, body) = post_calculate(
            json!({
                "mode": "GROSS_TO_NET",
                "period": "P1_2025_H2",
                "amount": 20000000,
                "region": "V"
            })
            .to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_invalid_json_syntax() {
        let (status, body) = post_calculate("{ not json".to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/calculate")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "MISSING_CONTENT_TYPE");
    }

    #[tokio::test]
    async fn test_policy_endpoint() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/policy/P3_2026_H2_ONWARD")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: PolicyResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.period, PolicyPeriod::P3FromSecondHalf2026);
        assert_eq!(body.tax_brackets.len(), 5);
        assert_eq!(body.deductions.self_deduction, Decimal::from(15_500_000));
        assert!(body.ends_on.is_none());
    }

    #[tokio::test]
    async fn test_policy_endpoint_unknown_period() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/policy/P9")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
