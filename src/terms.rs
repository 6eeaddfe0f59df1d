//! Repayment plan terms and the per-month formulas they drive
//!
//! The thresholds, premium and repayment rate live in one immutable
//! structure so projections can be run against different policy regimes.
//! The default regime is the UK Plan 2 loan (2012-2023 cohorts).

use chrono::Month;
use serde::{Deserialize, Serialize};

/// Parameters of an income-contingent repayment plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanTerms {
    /// Annual salary above which interest starts climbing above RPI (27,295)
    #[serde(default = "default_lower_threshold")]
    pub lower_income_threshold: f64,

    /// Annual salary at which the interest premium reaches its maximum (49,130)
    #[serde(default = "default_upper_threshold")]
    pub upper_income_threshold: f64,

    /// Maximum percentage-point premium added on top of RPI (3.0)
    #[serde(default = "default_interest_premium")]
    pub interest_premium: f64,

    /// Percentage of salary above the lower threshold collected each month (9.0)
    #[serde(default = "default_repayment_rate")]
    pub repayment_rate: f64,

    /// Years until any remaining debt is written off (30)
    #[serde(default = "default_relief_years")]
    pub relief_years: u32,

    /// Month the interest rate is re-set each year (September)
    #[serde(default = "default_reset_month")]
    pub interest_reset_month: Month,
}

fn default_lower_threshold() -> f64 { 27_295.0 }
fn default_upper_threshold() -> f64 { 49_130.0 }
fn default_interest_premium() -> f64 { 3.0 }
fn default_repayment_rate() -> f64 { 9.0 }
fn default_relief_years() -> u32 { 30 }
fn default_reset_month() -> Month { Month::September }

impl Default for PlanTerms {
    fn default() -> Self {
        Self {
            lower_income_threshold: 27_295.0,
            upper_income_threshold: 49_130.0,
            interest_premium: 3.0,
            repayment_rate: 9.0,
            relief_years: 30,
            interest_reset_month: Month::September,
        }
    }
}

impl PlanTerms {
    /// The Plan 2 regime (the default terms, under their official name).
    pub fn plan2() -> Self {
        Self::default()
    }

    /// Annual interest rate charged for a year with the given salary and RPI.
    ///
    /// The rate is RPI plus up to `interest_premium` points, scaled linearly
    /// between the two income thresholds. A salary at or below the lower
    /// threshold pays plain RPI. There is no floor: a negative RPI gives a
    /// negative rate.
    ///
    /// # Arguments
    /// * `base_salary` - Annual salary for the year in question
    /// * `rpi` - Retail Price Index for the year, in percent
    /// * `max_interest_cap` - Optional upper clamp on the resulting rate
    pub fn annual_interest_rate(
        &self,
        base_salary: f64,
        rpi: f64,
        max_interest_cap: Option<f64>,
    ) -> f64 {
        let mut rate = rpi;
        if base_salary > self.lower_income_threshold {
            let span = self.upper_income_threshold - self.lower_income_threshold;
            let progress = ((base_salary - self.lower_income_threshold) / span).min(1.0);
            rate += self.interest_premium * progress;
        }
        if let Some(cap) = max_interest_cap {
            rate = rate.min(cap);
        }
        rate
    }

    /// Mandatory installment for a month with the given gross monthly salary.
    ///
    /// Only salary above one twelfth of the lower threshold is charged,
    /// at `repayment_rate` percent.
    pub fn monthly_installment(&self, monthly_salary: f64) -> f64 {
        let taxable = (monthly_salary - self.lower_income_threshold / 12.0).max(0.0);
        taxable * self.repayment_rate / 100.0
    }

    /// The write-off horizon in months.
    pub fn months_to_relief(&self) -> u32 {
        self.relief_years * 12
    }
}

/// Interest accrued on a balance over one month at the given monthly rate (%).
///
/// No clamping in either direction: a negative balance or a negative rate
/// yields negative interest.
pub fn monthly_interest(balance: f64, monthly_rate_pct: f64) -> f64 {
    balance * monthly_rate_pct / 100.0
}
