use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use serde_json::Value;

use hashcost::cli::{Cli, Command, ParamsTarget};
use hashcost::logging::{setup_logging, DEFAULT_LOG_LEVEL};
use hashcost::{Argon2Hint, CalibrationConfig, Calibrator};

fn emit(json: bool, text: &dyn std::fmt::Display, value: Value) {
    if json {
        println!("{}", value);
    } else {
        println!("{}", text);
    }
}

fn print_benchmark_usage() {
    let mut cmd = Cli::command();
    cmd.build();
    if let Some(sub) = cmd.find_subcommand_mut("benchmark") {
        eprintln!("{}", sub.render_help());
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL));

    let config = CalibrationConfig {
        samples: cli.samples,
        ..CalibrationConfig::default()
    };

    match cli.command {
        Command::Benchmark { algorithm, costs } => {
            if costs.is_empty() {
                eprintln!("error: at least one cost parameter is required\n");
                print_benchmark_usage();
                std::process::exit(1);
            }
            let report = Calibrator::new(config)?
                .benchmark(algorithm, &costs)
                .with_context(|| format!("benchmarking {}", algorithm))?;
            emit(cli.json, &report, report.to_json());
        }
        Command::FindBestParams {
            algorithm: ParamsTarget::Argon2,
            time_cost,
        } => {
            let hint = Argon2Hint::detect(time_cost);
            emit(cli.json, &hint, hint.to_json());
        }
        Command::FindBestParams {
            algorithm: ParamsTarget::Calibrated(algorithm),
            time_cost,
        } => {
            let recommendation = Calibrator::new(config)?
                .find_best_params(algorithm, time_cost)
                .with_context(|| format!("calibrating {} for {} s", algorithm, time_cost))?;
            emit(cli.json, &recommendation, recommendation.to_json());
        }
    }

    Ok(())
}
