use crate::core::metrics::{MetricSet, Pmr};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Ttr,
    Cfs,
    Ifd,
    Aaf,
    Pmr,
    Efr,
    Cci,
    Hmi,
}

impl Metric {
    pub fn key(self) -> &'static str {
        match self {
            Self::Ttr => "ttr",
            Self::Cfs => "cfs",
            Self::Ifd => "ifd",
            Self::Aaf => "aaf",
            Self::Pmr => "pmr",
            Self::Efr => "efr",
            Self::Cci => "cci",
            Self::Hmi => "hmi",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key().to_ascii_uppercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    AtLeast,
    AtMost,
}

impl Comparison {
    pub fn holds(self, value: f64, limit: f64) -> bool {
        match self {
            Self::AtLeast => value >= limit,
            Self::AtMost => value <= limit,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::AtLeast => ">=",
            Self::AtMost => "<=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    pub metric: Metric,
    pub comparison: Comparison,
    pub limit: f64,
}

const fn threshold(metric: Metric, comparison: Comparison, limit: f64) -> Threshold {
    Threshold {
        metric,
        comparison,
        limit,
    }
}

pub const SLA_THRESHOLDS: [Threshold; 8] = [
    threshold(Metric::Ttr, Comparison::AtLeast, 10.0),
    threshold(Metric::Cfs, Comparison::AtLeast, 7.0),
    threshold(Metric::Ifd, Comparison::AtMost, 0.30),
    threshold(Metric::Aaf, Comparison::AtMost, 10.0),
    threshold(Metric::Pmr, Comparison::AtMost, 3.0),
    threshold(Metric::Efr, Comparison::AtMost, 1.0),
    threshold(Metric::Cci, Comparison::AtMost, 5.0),
    threshold(Metric::Hmi, Comparison::AtMost, 30.0),
];

/// Values to check against [`SLA_THRESHOLDS`]. Any field may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Readings {
    pub ttr: Option<f64>,
    pub cfs: Option<f64>,
    pub ifd: Option<f64>,
    pub aaf: Option<f64>,
    pub pmr: Option<Pmr>,
    pub efr: Option<f64>,
    pub cci: Option<f64>,
    pub hmi: Option<f64>,
}

impl Readings {
    pub fn from_metrics(metrics: &MetricSet, hmi: f64) -> Self {
        Self {
            ttr: Some(metrics.ttr),
            cfs: Some(metrics.cfs),
            ifd: Some(metrics.ifd),
            aaf: Some(metrics.aaf),
            pmr: Some(metrics.pmr),
            efr: Some(metrics.efr),
            cci: Some(metrics.cci),
            hmi: Some(hmi),
        }
    }

    fn get(&self, metric: Metric) -> Option<Pmr> {
        let scalar = match metric {
            Metric::Pmr => return self.pmr,
            Metric::Ttr => self.ttr,
            Metric::Cfs => self.cfs,
            Metric::Ifd => self.ifd,
            Metric::Aaf => self.aaf,
            Metric::Efr => self.efr,
            Metric::Cci => self.cci,
            Metric::Hmi => self.hmi,
        };
        scalar.map(Pmr::Finite)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub metric: Metric,
    /// `None` when the reading was absent.
    pub passed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compliance {
    pub verdicts: Vec<Verdict>,
}

impl Compliance {
    pub fn get(&self, metric: Metric) -> Option<bool> {
        self.verdicts
            .iter()
            .find(|verdict| verdict.metric == metric)
            .and_then(|verdict| verdict.passed)
    }

    pub fn passed(&self) -> usize {
        self.verdicts
            .iter()
            .filter(|verdict| verdict.passed == Some(true))
            .count()
    }

    pub fn applicable(&self) -> usize {
        self.verdicts
            .iter()
            .filter(|verdict| verdict.passed.is_some())
            .count()
    }

    pub fn all_passed(&self) -> bool {
        self.passed() == self.applicable()
    }

    /// Fraction of applicable verdicts that passed; 0.0 when none apply.
    pub fn pass_rate(&self) -> f64 {
        match self.applicable() {
            0 => 0.0,
            applicable => self.passed() as f64 / applicable as f64,
        }
    }
}

impl Serialize for Compliance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.verdicts.len()))?;
        for verdict in &self.verdicts {
            map.serialize_entry(verdict.metric.key(), &verdict.passed)?;
        }
        map.end()
    }
}

pub fn check_compliance(readings: &Readings) -> Compliance {
    let verdicts = SLA_THRESHOLDS
        .iter()
        .map(|threshold| Verdict {
            metric: threshold.metric,
            passed: readings.get(threshold.metric).map(|reading| match reading {
                Pmr::Infinite => false,
                Pmr::Finite(value) => threshold.comparison.holds(value, threshold.limit),
            }),
        })
        .collect();

    Compliance { verdicts }
}
