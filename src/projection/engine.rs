//! The amortization loop

use std::collections::HashMap;

use chrono::Month;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::calendar::MonthRef;
use crate::error::ProjectionError;
use crate::scenario::LoanScenario;
use crate::schedule::{monthly_interest_rate_series, monthly_salary_series};
use crate::terms::{monthly_interest, PlanTerms};

use super::cashflows::ProjectionResult;
use super::DEFAULT_MONTHS_TO_RELIEF;

/// Knobs for a single projection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Calendar month the projection starts in
    #[serde(default = "default_current_month")]
    pub current_month: MonthRef,

    /// Month the salary is revised each year
    #[serde(default = "default_revision_month")]
    pub salary_revision_month: MonthRef,

    /// Months until the remaining debt is written off
    #[serde(default = "default_months_to_relief")]
    pub months_to_relief: u32,

    /// Voluntary extra payments keyed by 0-based month index
    #[serde(default)]
    pub discretionary_repayments: HashMap<u32, f64>,
}

fn default_current_month() -> MonthRef { MonthRef::current() }
fn default_revision_month() -> MonthRef { Month::April.into() }
fn default_months_to_relief() -> u32 { DEFAULT_MONTHS_TO_RELIEF }

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            current_month: MonthRef::current(),
            salary_revision_month: Month::April.into(),
            months_to_relief: DEFAULT_MONTHS_TO_RELIEF,
            discretionary_repayments: HashMap::new(),
        }
    }
}

/// Runs the month-by-month repayment projection for one scenario.
pub struct ProjectionEngine {
    terms: PlanTerms,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(terms: PlanTerms, config: ProjectionConfig) -> Self {
        Self { terms, config }
    }

    /// Project a scenario over the configured horizon.
    ///
    /// Builds the monthly salary and interest-rate series, then walks the
    /// horizon month by month: accrue interest, work out the installment
    /// from that month's salary, add any discretionary extra, repay at most
    /// what is owed, and record the result.
    ///
    /// The loop always runs the full horizon. A cleared balance stays in
    /// the series at zero for the remaining months; write-off happens at
    /// the horizon, not at zero. The repayment cap also works in reverse:
    /// when the amount owed is below the installment (including below
    /// zero), the recorded repayment is the amount owed itself, so a
    /// negative opening balance is refunded back to zero in month 0.
    pub fn project(&self, scenario: &LoanScenario) -> Result<ProjectionResult, ProjectionError> {
        let salaries = monthly_salary_series(
            scenario.annual_salaries.clone(),
            &self.config.current_month,
            &self.config.salary_revision_month,
            &self.terms,
        )?;
        let rates = monthly_interest_rate_series(
            scenario.annual_salaries.clone(),
            scenario.annual_rpis.clone(),
            &self.config.current_month,
            &self.terms,
        )?;

        let months = self.config.months_to_relief;
        if salaries.len() < months as usize {
            return Err(ProjectionError::HorizonOutOfRange {
                series: "salary",
                requested: months,
                available: salaries.len(),
            });
        }
        if rates.len() < months as usize {
            return Err(ProjectionError::HorizonOutOfRange {
                series: "interest rate",
                requested: months,
                available: rates.len(),
            });
        }
        debug!(
            "projecting {} months ({} salary / {} rate entries built)",
            months,
            salaries.len(),
            rates.len()
        );

        let mut balance = scenario.loan_outstanding;
        let mut result = ProjectionResult::with_capacity(months as usize);

        for i in 0..months as usize {
            let interest = monthly_interest(balance, rates[i]);
            let mut installment = self.terms.monthly_installment(salaries[i]);

            if let Some(&extra) = self.config.discretionary_repayments.get(&(i as u32)) {
                installment += extra;
            }

            // never repay more than is owed after this month's interest
            let repayment = installment.min(balance + interest);
            balance = balance + interest - repayment;

            result.push(repayment, interest, balance);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(balance: f64, salary: f64, rpi: f64) -> LoanScenario {
        LoanScenario {
            loan_outstanding: balance,
            annual_salaries: vec![salary],
            annual_rpis: vec![rpi],
        }
    }

    fn config_starting_in(month: u32) -> ProjectionConfig {
        ProjectionConfig {
            current_month: MonthRef::Number(month),
            ..Default::default()
        }
    }

    #[test]
    fn test_horizon_always_filled_exactly() {
        let terms = PlanTerms::default();
        // whatever the boundary alignment, the output covers the horizon
        for month in 1..=12 {
            let engine = ProjectionEngine::new(terms.clone(), config_starting_in(month));
            let result = engine.project(&scenario(40_000.0, 30_000.0, 2.0)).unwrap();
            assert_eq!(result.months(), 360);
            assert_eq!(result.repayments.len(), result.balances.len());
            assert_eq!(result.interest.len(), result.balances.len());
        }
    }

    #[test]
    fn test_high_earner_clears_within_horizon() {
        let terms = PlanTerms::default();
        let engine = ProjectionEngine::new(terms, config_starting_in(1));
        // installment ~245/month against ~25/month of interest at the start
        let result = engine.project(&scenario(10_000.0, 60_000.0, 0.0)).unwrap();

        let cleared = result.months_to_clear().expect("debt should clear");
        assert!(cleared < 60, "took {} months", cleared);

        // non-increasing all the way down, flat at zero afterwards
        for window in result.balances.windows(2) {
            assert!(window[1] <= window[0] + 1e-9);
        }
        assert_eq!(result.final_balance(), 0.0);
        // once cleared, nothing further is repaid
        assert_eq!(result.repayments[cleared as usize], 0.0);
    }

    #[test]
    fn test_low_earner_grows_balance_until_writeoff() {
        let terms = PlanTerms::default();
        let engine = ProjectionEngine::new(terms, config_starting_in(1));
        // ~20/month installment against ~79/month of interest: debt compounds
        let result = engine.project(&scenario(40_000.0, 30_000.0, 2.0)).unwrap();

        assert_eq!(result.months_to_clear(), None);
        assert!(result.final_balance() > 40_000.0);
        // the loop must not stop early just because the debt is hopeless
        assert_eq!(result.months(), 360);
    }

    #[test]
    fn test_flat_scenario_matches_hand_computed_recurrence() {
        let terms = PlanTerms::default();
        let engine = ProjectionEngine::new(terms, config_starting_in(1));
        let result = engine.project(&scenario(40_000.0, 30_000.0, 2.0)).unwrap();
        assert_eq!(result.months(), 360);

        // flat inputs hold one salary and one rate across the whole horizon
        let monthly_salary = 30_000.0_f64 / 12.0;
        let installment = (monthly_salary - 27_295.0 / 12.0).max(0.0) * 9.0 / 100.0;
        let monthly_rate =
            (2.0 + 3.0 * ((30_000.0_f64 - 27_295.0) / (49_130.0 - 27_295.0)).min(1.0)) / 12.0;

        let mut balance = 40_000.0;
        let mut repaid = 0.0;
        for i in 0..result.months() {
            let interest = balance * monthly_rate / 100.0;
            let repayment = installment.min(balance + interest);
            balance = balance + interest - repayment;
            repaid += repayment;

            assert!(
                (result.interest[i] - interest).abs() < 1e-9,
                "interest diverged at month {}",
                i
            );
            assert!(
                (result.repayments[i] - repayment).abs() < 1e-9,
                "repayment diverged at month {}",
                i
            );
            assert!(
                (result.balances[i] - balance).abs() < 1e-9,
                "balance diverged at month {}",
                i
            );
        }
        assert!((result.total_repaid() - repaid).abs() < 1e-6);
        assert!((result.final_balance() - balance).abs() < 1e-9);
    }

    #[test]
    fn test_repayment_capped_at_amount_owed() {
        let terms = PlanTerms::default();
        let engine = ProjectionEngine::new(terms, config_starting_in(1));
        let result = engine.project(&scenario(10.0, 120_000.0, 2.0)).unwrap();

        // month 0 pays off everything: balance + interest, not the installment
        let owed = 10.0 + result.interest[0];
        assert!((result.repayments[0] - owed).abs() < 1e-12);
        assert_eq!(result.balances[0], 0.0);
        // a zero balance accrues zero interest and repays nothing
        assert_eq!(result.interest[1], 0.0);
        assert_eq!(result.repayments[1], 0.0);
        assert_eq!(result.balances[359], 0.0);
    }

    #[test]
    fn test_discretionary_repayment_adds_exactly() {
        let terms = PlanTerms::default();
        let base = ProjectionEngine::new(terms.clone(), config_starting_in(1))
            .project(&scenario(40_000.0, 30_000.0, 2.0))
            .unwrap();

        let mut config = config_starting_in(1);
        config.discretionary_repayments.insert(5, 200.0);
        let boosted = ProjectionEngine::new(terms, config)
            .project(&scenario(40_000.0, 30_000.0, 2.0))
            .unwrap();

        // identical up to month 5, then exactly 200 more repaid that month
        for i in 0..5 {
            assert_eq!(boosted.repayments[i], base.repayments[i]);
            assert_eq!(boosted.balances[i], base.balances[i]);
        }
        assert!((boosted.repayments[5] - base.repayments[5] - 200.0).abs() < 1e-9);
        assert!(boosted.balances[5] < base.balances[5]);
    }

    #[test]
    fn test_multi_year_scenario_with_extras_matches_series_recurrence() {
        let terms = PlanTerms::default();
        let mut config = ProjectionConfig {
            current_month: MonthRef::Name("November".to_string()),
            ..Default::default()
        };
        config.discretionary_repayments.insert(5, 200.0);
        config.discretionary_repayments.insert(24, 500.0);

        let scenario = LoanScenario {
            loan_outstanding: 45_000.0,
            annual_salaries: vec![28_000.0, 30_000.0, 33_000.0, 36_000.0, 40_000.0],
            annual_rpis: vec![3.1, 2.8, 2.6, 2.5],
        };
        let result = ProjectionEngine::new(terms.clone(), config.clone())
            .project(&scenario)
            .unwrap();
        assert_eq!(result.months(), 360);

        // replay the recurrence against freshly built series
        let salaries = monthly_salary_series(
            scenario.annual_salaries.clone(),
            &config.current_month,
            &config.salary_revision_month,
            &terms,
        )
        .unwrap();
        let rates = monthly_interest_rate_series(
            scenario.annual_salaries.clone(),
            scenario.annual_rpis.clone(),
            &config.current_month,
            &terms,
        )
        .unwrap();

        let mut balance = scenario.loan_outstanding;
        for i in 0..result.months() {
            let interest = monthly_interest(balance, rates[i]);
            let mut installment = terms.monthly_installment(salaries[i]);
            if let Some(&extra) = config.discretionary_repayments.get(&(i as u32)) {
                installment += extra;
            }
            let repayment = installment.min(balance + interest);
            balance = balance + interest - repayment;

            assert!(
                (result.repayments[i] - repayment).abs() < 1e-9,
                "repayment diverged at month {}",
                i
            );
            assert!(
                (result.interest[i] - interest).abs() < 1e-9,
                "interest diverged at month {}",
                i
            );
            assert!(
                (result.balances[i] - balance).abs() < 1e-9,
                "balance diverged at month {}",
                i
            );
        }

        // the lump payments land in exactly the scheduled months
        assert!(
            (result.repayments[5] - terms.monthly_installment(salaries[5]) - 200.0).abs() < 1e-9
        );
        assert!(
            (result.repayments[24] - terms.monthly_installment(salaries[24]) - 500.0).abs() < 1e-9
        );
    }

    #[test]
    fn test_negative_opening_balance_refunds_to_zero() {
        let terms = PlanTerms::default();
        let engine = ProjectionEngine::new(terms, config_starting_in(1));
        // the repayment cap is min(installment, owed) with no lower clamp:
        // owed below zero makes the recorded repayment negative, and the
        // balance update lands on exactly zero
        let result = engine.project(&scenario(-500.0, 20_000.0, 2.0)).unwrap();

        assert!(result.interest[0] < 0.0);
        assert!(result.repayments[0] < -500.0);
        assert_eq!(result.balances[0], 0.0);

        // from month 1 the account is dead but the loop still records it
        for i in 1..result.months() {
            assert_eq!(result.interest[i], 0.0);
            assert_eq!(result.repayments[i], 0.0);
            assert_eq!(result.balances[i], 0.0);
        }
        assert_eq!(result.months(), 360);
    }

    #[test]
    fn test_horizon_past_salary_series_is_an_error() {
        let terms = PlanTerms::default();
        let mut config = config_starting_in(1);
        // salary series from one entry: 3 + 12 * 31 = 375 months
        config.months_to_relief = 400;
        let err = ProjectionEngine::new(terms, config)
            .project(&scenario(40_000.0, 30_000.0, 2.0))
            .unwrap_err();
        assert!(matches!(
            err,
            ProjectionError::HorizonOutOfRange {
                series: "salary",
                requested: 400,
                ..
            }
        ));
    }

    #[test]
    fn test_horizon_past_rate_series_is_an_error() {
        let terms = PlanTerms::default();
        let mut config = config_starting_in(1);
        // rate series from January: 8 + 12 * 30 = 368 months, salary has 375
        config.months_to_relief = 370;
        let err = ProjectionEngine::new(terms, config)
            .project(&scenario(40_000.0, 30_000.0, 2.0))
            .unwrap_err();
        assert!(matches!(
            err,
            ProjectionError::HorizonOutOfRange {
                series: "interest rate",
                requested: 370,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_salary_vector_is_an_error() {
        let terms = PlanTerms::default();
        let engine = ProjectionEngine::new(terms, config_starting_in(1));
        let empty = LoanScenario {
            loan_outstanding: 1_000.0,
            annual_salaries: vec![],
            annual_rpis: vec![2.0],
        };
        assert_eq!(engine.project(&empty).unwrap_err(), ProjectionError::EmptySeries);
    }

    #[test]
    fn test_config_defaults() {
        let config = ProjectionConfig::default();
        assert_eq!(config.months_to_relief, 360);
        assert_eq!(config.salary_revision_month, MonthRef::from(Month::April));
        assert_eq!(config.salary_revision_month.resolve(), Ok(4));
        assert!(config.discretionary_repayments.is_empty());
        assert!(config.current_month.resolve().is_ok());
    }
}
