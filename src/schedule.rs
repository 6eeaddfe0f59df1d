//! Annual-to-monthly series builders
//!
//! Annual assumptions (salary, RPI) turn into monthly series here. All three
//! builders share one calendar alignment rule: the first annual figure holds
//! only until the next reset boundary (1-12 months away), every later figure
//! holds for a full 12-month block.

use crate::calendar::{month_gap, months_until, MonthRef};
use crate::error::ProjectionError;
use crate::terms::PlanTerms;

/// Pad a series to at least `target` entries by repeating the last value.
///
/// When padding is needed, `target - len + 1` copies are appended, landing
/// one element past `target`. Downstream layouts consume one element fewer
/// than the padded length, so the extra element is what makes the final
/// 12-month block complete. Inputs already at or past `target` come back
/// unchanged, never truncated.
pub fn extrapolate(mut values: Vec<f64>, target: usize) -> Result<Vec<f64>, ProjectionError> {
    let last = *values.last().ok_or(ProjectionError::EmptySeries)?;
    if values.len() < target {
        let copies = target - values.len() + 1;
        values.extend(std::iter::repeat(last).take(copies));
    }
    Ok(values)
}

/// Lay annual values out month by month, dividing each by 12.
///
/// The first value covers `first_block` months, each later value a full
/// year. `annual` must be non-empty.
fn expand_by_year(annual: &[f64], first_block: u32) -> Vec<f64> {
    let mut monthly = Vec::with_capacity(first_block as usize + 12 * (annual.len() - 1));
    monthly.extend(std::iter::repeat(annual[0] / 12.0).take(first_block as usize));
    for &value in &annual[1..] {
        monthly.extend(std::iter::repeat(value / 12.0).take(12));
    }
    monthly
}

/// Monthly gross salary series, aligned to the pay review month.
///
/// The first annual salary applies until the next review, each subsequent
/// one for the year after. Short inputs are extrapolated to cover the
/// relief period.
pub fn monthly_salary_series(
    annual_salaries: Vec<f64>,
    current_month: &MonthRef,
    revision_month: &MonthRef,
    terms: &PlanTerms,
) -> Result<Vec<f64>, ProjectionError> {
    let months_to_revision = months_until(current_month, revision_month)?;
    let annual_salaries = extrapolate(annual_salaries, terms.relief_years as usize + 1)?;
    Ok(expand_by_year(&annual_salaries, months_to_revision))
}

/// Monthly interest rate series (in percent per month), September-aligned.
///
/// One annual rate is derived per year of the relief period from that
/// year's salary and RPI, then laid out monthly. No cap is applied here.
pub fn monthly_interest_rate_series(
    annual_salaries: Vec<f64>,
    annual_rpis: Vec<f64>,
    current_month: &MonthRef,
    terms: &PlanTerms,
) -> Result<Vec<f64>, ProjectionError> {
    let months_to_reset = month_gap(
        current_month.resolve()?,
        terms.interest_reset_month.number_from_month(),
    );
    let years = terms.relief_years as usize + 1;
    let annual_salaries = extrapolate(annual_salaries, years)?;
    let annual_rpis = extrapolate(annual_rpis, years)?;

    // one rate per year of the relief period, whatever the input length
    let mut annual_rates = Vec::with_capacity(years);
    for i in 0..years {
        annual_rates.push(terms.annual_interest_rate(annual_salaries[i], annual_rpis[i], None));
    }

    Ok(expand_by_year(&annual_rates, months_to_reset))
}

/// Present-value discount factor for each month, September-aligned.
///
/// The monthly RPI series is converted to growth factors `1 + rpi/100`
/// and compounded. Element `k` scales a nominal amount in month `k` back
/// to month 0 terms; element 0 already carries one month of growth.
pub fn monthly_discount_factors(
    annual_rpis: Vec<f64>,
    current_month: &MonthRef,
    terms: &PlanTerms,
) -> Result<Vec<f64>, ProjectionError> {
    let months_to_reset = month_gap(
        current_month.resolve()?,
        terms.interest_reset_month.number_from_month(),
    );
    let annual_rpis = extrapolate(annual_rpis, terms.relief_years as usize + 1)?;
    let monthly_rpis = expand_by_year(&annual_rpis, months_to_reset);

    let mut factors = Vec::with_capacity(monthly_rpis.len());
    let mut running = 1.0;
    for rpi in &monthly_rpis {
        running *= 1.0 + rpi / 100.0;
        factors.push(running);
    }
    Ok(factors)
}
