use crate::core::metrics::{MetricSet, Pmr, parse_finite};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "hmi",
    version,
    about = "Calculate the Harm Multiplication Index (HMI) and check it against SLA thresholds"
)]
pub struct Cli {
    /// Time to Recurrence (turns)
    #[arg(long, value_parser = parse_finite, allow_negative_numbers = true)]
    pub ttr: f64,
    /// Contextual Flattening Score (0-10)
    #[arg(long, value_parser = parse_finite, allow_negative_numbers = true)]
    pub cfs: f64,
    /// Instruction Following Degradation (0-1)
    #[arg(long, value_parser = parse_finite, allow_negative_numbers = true)]
    pub ifd: f64,
    /// Authority Assertion Frequency (per 100 turns)
    #[arg(long, value_parser = parse_finite, allow_negative_numbers = true)]
    pub aaf: f64,
    /// Promise-to-Modification Ratio (number or 'inf')
    #[arg(long, allow_negative_numbers = true)]
    pub pmr: Pmr,
    /// Escalation Feedback Rate (negative for de-escalation)
    #[arg(long, value_parser = parse_finite, allow_negative_numbers = true)]
    pub efr: f64,
    /// Correction Cycle Index
    #[arg(long, value_parser = parse_finite, allow_negative_numbers = true)]
    pub cci: f64,
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
    /// Config file (defaults to ./hmi.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
    /// Log intermediate terms to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn metrics(&self) -> MetricSet {
        MetricSet {
            ttr: self.ttr,
            cfs: self.cfs,
            ifd: self.ifd,
            aaf: self.aaf,
            pmr: self.pmr,
            efr: self.efr,
            cci: self.cci,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    const THRESHOLD_ARGS: [&str; 15] = [
        "hmi", "--ttr", "10", "--cfs", "7", "--ifd", "0.3", "--aaf", "10", "--pmr", "3", "--efr",
        "1", "--cci", "5",
    ];

    #[test]
    fn parses_all_metrics() {
        let cli = Cli::try_parse_from(THRESHOLD_ARGS).unwrap();
        let metrics = cli.metrics();
        assert_eq!(metrics.ttr, 10.0);
        assert_eq!(metrics.pmr, Pmr::Finite(3.0));
        assert_eq!(metrics.cci, 5.0);
        assert!(!cli.json);
        assert!(cli.config.is_none());
    }

    #[test]
    fn parses_infinite_pmr_and_negative_efr() {
        let mut args = THRESHOLD_ARGS.to_vec();
        args[10] = "INF";
        args[12] = "-0.5";
        args.push("--json");

        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.pmr, Pmr::Infinite);
        assert_eq!(cli.efr, -0.5);
        assert!(cli.json);
    }

    #[test]
    fn malformed_number_is_a_usage_error() {
        let mut args = THRESHOLD_ARGS.to_vec();
        args[2] = "ten";

        let err = Cli::try_parse_from(args).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn nan_is_rejected() {
        let mut args = THRESHOLD_ARGS.to_vec();
        args[4] = "NaN";
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn missing_metric_is_a_usage_error() {
        let err = Cli::try_parse_from(&THRESHOLD_ARGS[..13]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }
}
