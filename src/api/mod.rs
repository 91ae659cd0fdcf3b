//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for gross/net salary calculations
//! and for inspecting the policy parameters of each period.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::{
    ApiError, ApiErrorResponse, CalculationResponse, PolicyResponse, RegionalMinimumWage,
};
pub use state::AppState;
