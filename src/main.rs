mod cli;
mod config;
mod core;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let loaded = config::load_config(cli.config.as_deref(), &cwd)?;
    let general = &loaded.config.general;
    if let Some(source) = &loaded.source {
        debug!(path = %source.display(), "using config file");
    }

    if cli.no_color || !general.color {
        colored::control::set_override(false);
    }

    let assessment = core::assess(cli.metrics());

    let output_json = cli.json || general.json;
    if output_json {
        let json_report = core::report::JsonReport::from(&assessment);
        println!("{}", serde_json::to_string_pretty(&json_report)?);
    } else {
        core::report::print_human(&assessment);
    }

    let exit = core::report::evaluate_exit(&assessment, general.fail_on);
    if exit.ok {
        Ok(0)
    } else {
        eprintln!("exit: FAILED ({})", exit.reason_line());
        Ok(1)
    }
}
