use crate::config::FailOn;
use crate::core::Assessment;
use crate::core::compliance::{Compliance, Metric, SLA_THRESHOLDS};
use crate::core::metrics::{MetricSet, format_number};
use crate::core::score::{Severity, round_to};
use colored::Colorize;
use serde::Serialize;

const BANNER_WIDTH: usize = 60;

#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub hmi: f64,
    pub hmi_raw: f64,
    pub severity: Severity,
    pub status: &'static str,
    pub components: MetricSet,
    pub sla_compliance: Compliance,
    pub sla_pass_rate: f64,
}

impl From<&Assessment> for JsonReport {
    fn from(assessment: &Assessment) -> Self {
        Self {
            hmi: assessment.result.score,
            hmi_raw: round_to(assessment.result.uncapped, 3),
            severity: assessment.result.severity,
            status: assessment.result.status(),
            components: assessment.result.metrics,
            sla_compliance: assessment.compliance.clone(),
            sla_pass_rate: assessment.compliance.pass_rate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitStatus {
    pub ok: bool,
    pub reasons: Vec<String>,
}

impl ExitStatus {
    pub fn reason_line(&self) -> String {
        self.reasons.join("; ")
    }
}

pub fn evaluate_exit(assessment: &Assessment, fail_on: FailOn) -> ExitStatus {
    let mut reasons = Vec::new();

    match fail_on {
        FailOn::None => {}
        FailOn::Sla => {
            if !assessment.compliance.all_passed() {
                let failed: Vec<&str> = assessment
                    .compliance
                    .verdicts
                    .iter()
                    .filter(|verdict| verdict.passed == Some(false))
                    .map(|verdict| verdict.metric.key())
                    .collect();
                reasons.push(format!("sla thresholds missed: {}", failed.join(", ")));
            }
        }
        FailOn::Critical => {
            if assessment.result.severity == Severity::Critical {
                reasons.push(format!(
                    "hmi {:.1} is critical",
                    assessment.result.score
                ));
            }
        }
    }

    ExitStatus {
        ok: reasons.is_empty(),
        reasons,
    }
}

fn colored_severity(severity: Severity) -> String {
    match severity {
        Severity::Minimal => severity.as_str().green().bold().to_string(),
        Severity::Moderate => severity.as_str().yellow().bold().to_string(),
        Severity::Severe => severity.as_str().red().to_string(),
        Severity::Critical => severity.as_str().red().bold().to_string(),
    }
}

fn glyph(passed: Option<bool>) -> String {
    match passed {
        Some(true) => "✓".green().to_string(),
        Some(false) => "✗".red().to_string(),
        None => "-".dimmed().to_string(),
    }
}

fn component_value(metrics: &MetricSet, metric: Metric) -> Option<String> {
    let value = match metric {
        Metric::Pmr => return Some(metrics.pmr.to_string()),
        Metric::Ttr => metrics.ttr,
        Metric::Cfs => metrics.cfs,
        Metric::Ifd => metrics.ifd,
        Metric::Aaf => metrics.aaf,
        Metric::Efr => metrics.efr,
        Metric::Cci => metrics.cci,
        Metric::Hmi => return None,
    };
    Some(format_number(value))
}

pub fn render_human(assessment: &Assessment) -> String {
    let result = &assessment.result;
    let compliance = &assessment.compliance;
    let rule = "=".repeat(BANNER_WIDTH);
    let mut lines = vec![
        rule.clone(),
        "HARM MULTIPLICATION INDEX CALCULATION".to_string(),
        rule.clone(),
        String::new(),
        format!("HMI: {:.1}", result.score),
        format!("Severity: {}", colored_severity(result.severity)),
        format!("Status: {}", result.status()),
        String::new(),
        format!(
            "SLA Compliance: {:.0}% ({}/{} metrics)",
            compliance.pass_rate() * 100.0,
            compliance.passed(),
            compliance.verdicts.len()
        ),
        String::new(),
        "Component Metrics:".to_string(),
    ];

    for threshold in &SLA_THRESHOLDS {
        let Some(value) = component_value(&result.metrics, threshold.metric) else {
            continue;
        };
        lines.push(format!(
            "  {} {}: {} (sla {} {})",
            glyph(compliance.get(threshold.metric)),
            threshold.metric,
            value,
            threshold.comparison.symbol(),
            format_number(threshold.limit)
        ));
    }

    lines.push(rule);
    lines.join("\n")
}

pub fn print_human(assessment: &Assessment) {
    println!("{}", render_human(assessment));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assess;
    use crate::core::metrics::Pmr;

    fn at_threshold() -> MetricSet {
        MetricSet {
            ttr: 10.0,
            cfs: 7.0,
            ifd: 0.3,
            aaf: 10.0,
            pmr: Pmr::Finite(3.0),
            efr: 1.0,
            cci: 5.0,
        }
    }

    fn json_for(metrics: MetricSet) -> serde_json::Value {
        let report = JsonReport::from(&assess(metrics));
        serde_json::to_value(&report).unwrap()
    }

    #[test]
    fn json_report_for_threshold_metrics() {
        let json = json_for(at_threshold());
        assert_eq!(json["hmi"], 9.0);
        assert_eq!(json["hmi_raw"], 9.0);
        assert_eq!(json["severity"], "Minimal");
        assert_eq!(json["status"], "Acceptable friction");
        assert_eq!(json["components"]["pmr"], 3.0);
        assert_eq!(json["sla_pass_rate"], 1.0);
        for key in ["ttr", "cfs", "ifd", "aaf", "pmr", "efr", "cci", "hmi"] {
            assert_eq!(json["sla_compliance"][key], true, "{key} should pass");
        }
    }

    #[test]
    fn json_report_for_infinite_pmr() {
        let json = json_for(MetricSet {
            pmr: Pmr::Infinite,
            ..at_threshold()
        });
        assert_eq!(json["components"]["pmr"], "inf");
        assert_eq!(json["sla_compliance"]["pmr"], false);
        assert_eq!(json["hmi"], 100.0);
        assert_eq!(json["hmi_raw"], 284.4);
        assert_eq!(json["severity"], "Critical");
    }

    #[test]
    fn json_keys_keep_report_order() {
        let report = JsonReport::from(&assess(at_threshold()));
        let text = serde_json::to_string(&report).unwrap();
        let positions: Vec<usize> = [
            "\"hmi\"",
            "\"hmi_raw\"",
            "\"severity\"",
            "\"status\"",
            "\"components\"",
            "\"sla_compliance\"",
            "\"sla_pass_rate\"",
        ]
        .iter()
        .map(|key| text.find(key).unwrap())
        .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn human_report_lists_components() {
        colored::control::set_override(false);
        let text = render_human(&assess(MetricSet {
            pmr: Pmr::Infinite,
            ..at_threshold()
        }));
        assert!(text.starts_with(&"=".repeat(BANNER_WIDTH)));
        assert!(text.contains("HMI: 100.0"));
        assert!(text.contains("Severity: Critical"));
        assert!(text.contains("SLA Compliance: 75% (6/8 metrics)"));
        assert!(text.contains("  ✗ PMR: ∞ (sla <= 3.0)"));
        assert!(text.contains("  ✓ TTR: 10.0 (sla >= 10.0)"));
    }

    #[test]
    fn exit_follows_fail_on() {
        let failing = assess(MetricSet {
            pmr: Pmr::Infinite,
            ..at_threshold()
        });
        let passing = assess(at_threshold());

        assert!(evaluate_exit(&failing, FailOn::None).ok);
        assert!(evaluate_exit(&passing, FailOn::Sla).ok);
        assert!(evaluate_exit(&passing, FailOn::Critical).ok);

        let sla = evaluate_exit(&failing, FailOn::Sla);
        assert!(!sla.ok);
        assert_eq!(sla.reason_line(), "sla thresholds missed: pmr, hmi");

        let critical = evaluate_exit(&failing, FailOn::Critical);
        assert_eq!(critical.reason_line(), "hmi 100.0 is critical");
    }
}
