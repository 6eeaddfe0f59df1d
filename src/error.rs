//! Error types for the projection library

use thiserror::Error;

/// Everything that can go wrong while building series or running a projection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// A month given as text did not match a full calendar month name
    #[error("unrecognized month name: {0:?} (full names only, e.g. \"September\")")]
    InvalidMonthName(String),

    /// A month given as a number was outside 1-12
    #[error("month number {0} out of range (expected 1-12)")]
    MonthOutOfRange(u32),

    /// An annual assumption vector was empty, so there is no last value to extrapolate
    #[error("annual series is empty, nothing to extrapolate")]
    EmptySeries,

    /// A requested horizon runs past the end of a built monthly series
    #[error("{series} series has {available} months, horizon needs {requested}")]
    HorizonOutOfRange {
        series: &'static str,
        requested: u32,
        available: usize,
    },
}
