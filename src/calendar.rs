//! Month references and reset-boundary arithmetic
//!
//! Annual figures only change at fixed calendar boundaries (interest every
//! September, salary at the pay review month), so the schedule builders need
//! to know how many months remain until a given month comes around again.

use chrono::{Datelike, Local, Month};
use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;

/// A calendar month given either by number (1-12) or by full name.
///
/// Deserializes from plain JSON, so `4` and `"April"` both work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MonthRef {
    Number(u32),
    Name(String),
}

impl MonthRef {
    /// The current calendar month.
    pub fn current() -> Self {
        MonthRef::Number(Local::now().month())
    }

    /// Normalize to a month number in 1-12.
    ///
    /// Names are matched case-insensitively against full month names;
    /// abbreviations like "Sep" are rejected.
    pub fn resolve(&self) -> Result<u32, ProjectionError> {
        match self {
            MonthRef::Number(n) => {
                if (1..=12).contains(n) {
                    Ok(*n)
                } else {
                    Err(ProjectionError::MonthOutOfRange(*n))
                }
            }
            MonthRef::Name(name) => {
                // chrono's parser also accepts 3-letter abbreviations,
                // which are not part of our input domain
                let month: Month = name
                    .parse()
                    .map_err(|_| ProjectionError::InvalidMonthName(name.clone()))?;
                if month.name().eq_ignore_ascii_case(name) {
                    Ok(month.number_from_month())
                } else {
                    Err(ProjectionError::InvalidMonthName(name.clone()))
                }
            }
        }
    }
}

impl From<Month> for MonthRef {
    fn from(month: Month) -> Self {
        MonthRef::Number(month.number_from_month())
    }
}

/// Months remaining until `target` next comes around, counted from `current`.
///
/// Always in 1-12: when the two months coincide the answer is the full
/// 12-month cycle, not zero, because a figure set this month stays valid
/// until the boundary a year from now.
pub fn months_until(current: &MonthRef, target: &MonthRef) -> Result<u32, ProjectionError> {
    Ok(month_gap(current.resolve()?, target.resolve()?))
}

/// Gap between two already-normalized month numbers, with the 0 -> 12 rule.
pub(crate) fn month_gap(current: u32, target: u32) -> u32 {
    let gap = (target as i64 - current as i64).rem_euclid(12) as u32;
    if gap == 0 {
        12
    } else {
        gap
    }
}
