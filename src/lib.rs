//! Payroll engine for Vietnamese salaries
//!
//! This crate converts between gross and net monthly salaries under the
//! Vietnamese social, health and unemployment insurance schemes and the
//! progressive personal income tax, for the policy periods from the second
//! half of 2025 onward. It also exposes the calculations over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
