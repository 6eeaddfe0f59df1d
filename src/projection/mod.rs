//! Amortization engine for month-by-month repayment projections

mod cashflows;
mod engine;

pub use cashflows::{CashflowRow, ProjectionResult};
pub use engine::{ProjectionConfig, ProjectionEngine};

// ============================================================================
// Default Horizon
// ============================================================================
// Income-contingent loans are written off after a statutory relief period
// rather than amortizing to zero; the projection runs to that horizon.

/// Default write-off horizon: 30 years of monthly repayments.
pub const DEFAULT_MONTHS_TO_RELIEF: u32 = 360;
