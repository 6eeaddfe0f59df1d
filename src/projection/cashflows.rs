//! Projection output: the three parallel monthly series and summary views

use serde::Serialize;

use crate::error::ProjectionError;

/// One projected month, for tabular output.
#[derive(Debug, Clone, Serialize)]
pub struct CashflowRow {
    /// 0-based month index from the start of the projection
    pub month: u32,
    /// Amount repaid this month (installment plus any discretionary extra)
    pub repayment: f64,
    /// Interest accrued this month
    pub interest: f64,
    /// Balance outstanding after this month's interest and repayment
    pub balance: f64,
}

/// Result of a repayment projection.
///
/// Three series of equal length, one entry per projected month: the amount
/// repaid, the interest accrued, and the balance left after both.
#[derive(Debug, Clone, Default)]
pub struct ProjectionResult {
    pub repayments: Vec<f64>,
    pub interest: Vec<f64>,
    pub balances: Vec<f64>,
}

impl ProjectionResult {
    pub(crate) fn with_capacity(months: usize) -> Self {
        Self {
            repayments: Vec::with_capacity(months),
            interest: Vec::with_capacity(months),
            balances: Vec::with_capacity(months),
        }
    }

    pub(crate) fn push(&mut self, repayment: f64, interest: f64, balance: f64) {
        self.repayments.push(repayment);
        self.interest.push(interest);
        self.balances.push(balance);
    }

    /// Number of projected months.
    pub fn months(&self) -> usize {
        self.repayments.len()
    }

    /// Per-month rows in projection order.
    pub fn rows(&self) -> impl Iterator<Item = CashflowRow> + '_ {
        (0..self.months()).map(move |i| CashflowRow {
            month: i as u32,
            repayment: self.repayments[i],
            interest: self.interest[i],
            balance: self.balances[i],
        })
    }

    /// Sum of all repayments over the horizon.
    pub fn total_repaid(&self) -> f64 {
        self.repayments.iter().sum()
    }

    /// Sum of all interest accrued over the horizon.
    pub fn total_interest(&self) -> f64 {
        self.interest.iter().sum()
    }

    /// Balance left when the horizon ends (written off at relief).
    pub fn final_balance(&self) -> f64 {
        self.balances.last().copied().unwrap_or(0.0)
    }

    /// Months taken to clear the debt, counting from 1.
    ///
    /// The clearing month is the first whose end-of-month balance reaches
    /// zero. `None` when the horizon ends with debt still outstanding.
    pub fn months_to_clear(&self) -> Option<u32> {
        self.balances
            .iter()
            .position(|balance| *balance <= 0.0)
            .map(|i| i as u32 + 1)
    }

    /// Present value of the repayment stream.
    ///
    /// Each month's repayment is divided by the matching entry of a
    /// discount-factor series (see `monthly_discount_factors`). Fails when
    /// the factor series is shorter than the repayment series.
    pub fn present_value(&self, discount_factors: &[f64]) -> Result<f64, ProjectionError> {
        if discount_factors.len() < self.months() {
            return Err(ProjectionError::HorizonOutOfRange {
                series: "discount factor",
                requested: self.months() as u32,
                available: discount_factors.len(),
            });
        }
        Ok(self
            .repayments
            .iter()
            .zip(discount_factors)
            .map(|(repayment, factor)| repayment / factor)
            .sum())
    }
}
