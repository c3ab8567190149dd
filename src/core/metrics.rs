use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricParseError {
    #[error("`{0}` is not a number")]
    NotANumber(String),
    #[error("`{0}` must be a finite number")]
    NotFinite(String),
}

/// Promise-to-modification ratio. An unbounded ratio (promises with no
/// modification at all) is its own variant rather than an IEEE infinity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pmr {
    Finite(f64),
    Infinite,
}

impl FromStr for Pmr {
    type Err = MetricParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("inf") {
            return Ok(Self::Infinite);
        }

        let value = trimmed
            .parse::<f64>()
            .map_err(|_| MetricParseError::NotANumber(raw.to_string()))?;
        if value.is_nan() || value == f64::NEG_INFINITY {
            return Err(MetricParseError::NotFinite(raw.to_string()));
        }
        if value == f64::INFINITY {
            return Ok(Self::Infinite);
        }

        Ok(Self::Finite(value))
    }
}

impl fmt::Display for Pmr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(value) => write!(f, "{}", format_number(*value)),
            Self::Infinite => write!(f, "∞"),
        }
    }
}

impl Serialize for Pmr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Finite(value) => serializer.serialize_f64(*value),
            Self::Infinite => serializer.serialize_str("inf"),
        }
    }
}

/// The seven measured inputs of one assessment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricSet {
    pub ttr: f64,
    pub cfs: f64,
    pub ifd: f64,
    pub aaf: f64,
    pub pmr: Pmr,
    pub efr: f64,
    pub cci: f64,
}

pub fn parse_finite(raw: &str) -> Result<f64, MetricParseError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| MetricParseError::NotANumber(raw.to_string()))?;
    if !value.is_finite() {
        return Err(MetricParseError::NotFinite(raw.to_string()));
    }
    Ok(value)
}

/// Whole numbers keep a trailing `.0` so `10` reads as a measurement, not a count.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
