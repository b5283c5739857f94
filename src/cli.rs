use std::num::NonZeroUsize;

use clap::{Parser, Subcommand};

use crate::config::{DEFAULT_SAMPLES, DEFAULT_TIME_COST};
use crate::registry::Algorithm;

#[derive(Parser, Debug)]
#[command(
    name = "hashcost",
    version,
    about = "Find password-hash cost parameters that hit a target latency"
)]
pub struct Cli {
    /// Timed hashes averaged per measurement
    #[arg(long, global = true, default_value_t = DEFAULT_SAMPLES)]
    pub samples: NonZeroUsize,

    /// Log level filter (trace, debug, info, warn, error); logs go to stderr
    #[arg(long, global = true, env = "HASHCOST_LOG")]
    pub log_level: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Measure the mean hash duration at each cost parameter
    Benchmark {
        /// bcrypt, pbkdf2_256 or pbkdf2_512
        #[arg(value_parser = parse_algorithm)]
        algorithm: Algorithm,
        /// Cost parameters to measure (bcrypt rounds, PBKDF2 iterations)
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        costs: Vec<u32>,
    },
    /// Recommend the cost parameter that makes one hash take --time_cost seconds
    #[command(name = "find_best_params", alias = "find-best-params")]
    FindBestParams {
        /// bcrypt, pbkdf2_256, pbkdf2_512 or argon2
        #[arg(value_parser = parse_params_target)]
        algorithm: ParamsTarget,
        /// Target duration of a single hash, in seconds
        #[arg(
            long = "time_cost",
            alias = "time-cost",
            default_value_t = DEFAULT_TIME_COST,
            value_parser = parse_time_cost
        )]
        time_cost: f64,
    },
}

/// What `find_best_params` should size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamsTarget {
    Calibrated(Algorithm),
    Argon2,
}

fn parse_algorithm(s: &str) -> Result<Algorithm, String> {
    s.parse::<Algorithm>().map_err(|e| e.to_string())
}

fn parse_params_target(s: &str) -> Result<ParamsTarget, String> {
    if s == "argon2" {
        return Ok(ParamsTarget::Argon2);
    }
    s.parse::<Algorithm>().map(ParamsTarget::Calibrated).map_err(|_| {
        format!(
            "unknown algorithm '{}' (expected one of: bcrypt, pbkdf2_256, pbkdf2_512, argon2)",
            s
        )
    })
}

fn parse_time_cost(s: &str) -> Result<f64, String> {
    let secs: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", s))?;
    if !(secs > 0.0 && secs.is_finite()) {
        return Err(format!("time cost must be positive, got {}", s));
    }
    Ok(secs)
}
