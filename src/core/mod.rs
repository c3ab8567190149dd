pub mod compliance;
pub mod metrics;
pub mod report;
pub mod score;

use crate::core::compliance::{Compliance, Readings};
use crate::core::metrics::MetricSet;
use crate::core::score::ScoreResult;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub result: ScoreResult,
    pub compliance: Compliance,
}

/// Scores `metrics` and checks them, together with the final score, against the SLA table.
pub fn assess(metrics: MetricSet) -> Assessment {
    let result = score::compute(metrics);
    let compliance = compliance::check_compliance(&Readings::from_metrics(&metrics, result.score));

    debug!(
        passed = compliance.passed(),
        applicable = compliance.applicable(),
        "checked sla compliance"
    );

    Assessment { result, compliance }
}
