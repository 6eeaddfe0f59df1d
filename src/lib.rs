//! Repayment System - Projection engine for income-contingent student loans
//!
//! This library provides:
//! - Annual-to-monthly series expansion aligned to calendar reset boundaries
//! - Threshold-based interest and installment formulas (UK Plan 2 by default)
//! - A month-by-month amortization loop over the statutory relief period
//! - Present-value discounting and schedule summaries

pub mod calendar;
pub mod error;
pub mod projection;
pub mod scenario;
pub mod schedule;
pub mod terms;

// Re-export commonly used types
pub use calendar::{months_until, MonthRef};
pub use error::ProjectionError;
pub use projection::{
    CashflowRow, ProjectionConfig, ProjectionEngine, ProjectionResult, DEFAULT_MONTHS_TO_RELIEF,
};
pub use scenario::{LoanScenario, RunSpec};
pub use schedule::{
    extrapolate, monthly_discount_factors, monthly_interest_rate_series, monthly_salary_series,
};
pub use terms::{monthly_interest, PlanTerms};
