use crate::core::metrics::{MetricSet, Pmr};
use serde::Serialize;
use tracing::debug;

/// Stand-in for an unbounded promise-to-modification ratio.
pub const INFINITE_PMR_FACTOR: f64 = 31.6;
pub const SCORE_CAP: f64 = 100.0;

/// Reciprocal used when ttr is zero or negative (a recurrence every half turn).
const MIN_TTR_RECIPROCAL: f64 = 2.0;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Minimal,
    Moderate,
    Severe,
    Critical,
}

impl Severity {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s < 10.0 => Self::Minimal,
            s if s < 30.0 => Self::Moderate,
            s if s < 60.0 => Self::Severe,
            _ => Self::Critical,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minimal => "Minimal",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
            Self::Critical => "Critical",
        }
    }

    pub fn status(self) -> &'static str {
        match self {
            Self::Minimal => "Acceptable friction",
            Self::Moderate => "Needs improvement",
            Self::Severe => "Architectural problem",
            Self::Critical => "Multiplicative harm confirmed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreResult {
    /// Capped at [`SCORE_CAP`] and rounded to one decimal.
    pub score: f64,
    /// Composite × 100 before capping or rounding.
    pub uncapped: f64,
    pub severity: Severity,
    pub metrics: MetricSet,
}

impl ScoreResult {
    pub fn status(&self) -> &'static str {
        self.severity.status()
    }
}

pub fn compute(metrics: MetricSet) -> ScoreResult {
    let ttr_inverse = if metrics.ttr <= 0.0 {
        MIN_TTR_RECIPROCAL
    } else {
        1.0 / metrics.ttr
    };
    let context_loss = 10.0 - metrics.cfs;
    let pmr_normalized = match metrics.pmr {
        Pmr::Infinite => INFINITE_PMR_FACTOR,
        Pmr::Finite(pmr) => pmr / 3.0,
    };
    let aaf_normalized = metrics.aaf / 10.0;
    let cci_normalized = metrics.cci / 5.0;

    let composite = ttr_inverse
        * context_loss
        * metrics.ifd
        * aaf_normalized
        * pmr_normalized
        * metrics.efr
        * cci_normalized;
    let uncapped = composite * 100.0;
    let score = round_to(uncapped.min(SCORE_CAP), 1);
    let severity = Severity::from_score(score);

    debug!(
        ttr_inverse,
        context_loss,
        pmr_normalized,
        aaf_normalized,
        cci_normalized,
        composite,
        score,
        severity = severity.as_str(),
        "computed harm multiplication index"
    );

    ScoreResult {
        score,
        uncapped,
        severity,
        metrics,
    }
}

/// Rounds half away from zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
