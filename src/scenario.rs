//! Scenario inputs for a projection run

use serde::{Deserialize, Serialize};

use crate::projection::ProjectionConfig;
use crate::terms::PlanTerms;

/// One loan to project: the balance today and the economics behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanScenario {
    /// Debt outstanding at the start of the projection
    pub loan_outstanding: f64,

    /// Projected gross annual salaries, year 0 first; short vectors are
    /// extrapolated from the last entry
    pub annual_salaries: Vec<f64>,

    /// Projected annual RPI figures in percent, year 0 first; short vectors
    /// are extrapolated from the last entry
    pub annual_rpis: Vec<f64>,
}

/// The JSON envelope the binaries consume: a scenario plus optional
/// configuration and plan-term overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSpec {
    pub scenario: LoanScenario,

    #[serde(default)]
    pub config: ProjectionConfig,

    #[serde(default)]
    pub terms: PlanTerms,
}

impl RunSpec {
    /// Parse a run spec from JSON text.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
