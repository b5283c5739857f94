//! Calibration driver: sample at a baseline cost, average, extrapolate.

use std::fmt;
use std::time::Duration;

use serde_json::{json, Map, Value};
use tracing::{info, warn};

use crate::config::CalibrationConfig;
use crate::errors::{CalibrateError, CalibrateResult};
use crate::hash::HashBinding;
use crate::registry::{Algorithm, AlgorithmProfile};
use crate::sampler::{Clock, MonotonicClock, Sampler};
use crate::scaling;
use crate::stats::{average, to_millis};

/// Cost parameter recommended for a target duration.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub algorithm: Algorithm,
    pub cost_name: &'static str,
    pub cost: u32,
    /// Output of the scaling law before clamping.
    pub raw_cost: i64,
    pub clamped: bool,
    pub baseline_cost: u32,
    pub baseline_ms: f64,
    pub target_ms: f64,
}

impl Recommendation {
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert(self.cost_name.to_string(), Value::from(self.cost));
        Value::Object(map)
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{'{}': {}}}", self.cost_name, self.cost)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkEntry {
    pub cost: u32,
    pub mean_ms: f64,
}

/// Mean duration per requested cost, in the order the costs were given.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkReport {
    pub algorithm: Algorithm,
    pub entries: Vec<BenchmarkEntry>,
}

impl BenchmarkReport {
    pub fn to_json(&self) -> Value {
        let results: Vec<Value> = self
            .entries
            .iter()
            .map(|e| json!({ "cost": e.cost, "mean_ms": e.mean_ms }))
            .collect();
        json!({ "algorithm": self.algorithm.identifier(), "results": results })
    }
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {:?}", entry.cost, entry.mean_ms)?;
        }
        write!(f, "}}")
    }
}

/// Runs calibrations and raw benchmarks, one hash invocation at a time.
#[derive(Debug, Clone)]
pub struct Calibrator<C = MonotonicClock> {
    config: CalibrationConfig,
    sampler: Sampler<C>,
}

impl Calibrator {
    pub fn new(config: CalibrationConfig) -> CalibrateResult<Self> {
        Self::with_clock(config, MonotonicClock)
    }
}

impl<C: Clock> Calibrator<C> {
    pub fn with_clock(config: CalibrationConfig, clock: C) -> CalibrateResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            sampler: Sampler::new(clock, config.password_len),
        })
    }

    /// Average duration of one `binding` invocation at `cost`.
    pub fn measure(
        &self,
        profile: &AlgorithmProfile,
        binding: &dyn HashBinding,
        cost: u32,
    ) -> CalibrateResult<Duration> {
        let samples = self
            .sampler
            .sample(binding, cost, self.config.samples)
            .map_err(|source| CalibrateError::Hash {
                algorithm: profile.algorithm.identifier(),
                cost,
                source,
            })?;
        average(samples.durations())
    }

    /// Recommend the cost for `algorithm` that makes one hash take about
    /// `time_cost` seconds.
    pub fn find_best_params(
        &self,
        algorithm: Algorithm,
        time_cost: f64,
    ) -> CalibrateResult<Recommendation> {
        let profile = algorithm.profile();
        self.calibrate(profile, profile.binding, time_cost)
    }

    /// Same as [`Calibrator::find_best_params`] with an explicit binding.
    pub fn calibrate(
        &self,
        profile: &AlgorithmProfile,
        binding: &dyn HashBinding,
        time_cost: f64,
    ) -> CalibrateResult<Recommendation> {
        if !(time_cost > 0.0 && time_cost.is_finite()) {
            return Err(CalibrateError::InvalidArgument(format!(
                "time cost must be a positive number of seconds, got {}",
                time_cost
            )));
        }
        let target_ms = time_cost * 1000.0;

        let baseline = self.measure(profile, binding, profile.baseline_cost)?;
        let baseline_ms = to_millis(baseline);
        info!(
            algorithm = %profile.algorithm,
            cost = profile.baseline_cost,
            baseline_ms,
            target_ms,
            "measured baseline"
        );

        let raw_cost =
            scaling::recommend(profile.law, profile.baseline_cost, baseline_ms, target_ms)?;

        let min = i64::from(*profile.cost_bounds.start());
        let max = i64::from(*profile.cost_bounds.end());
        let bounded = raw_cost.clamp(min, max);
        let clamped = bounded != raw_cost;
        if clamped {
            warn!(
                algorithm = %profile.algorithm,
                raw_cost,
                cost = bounded,
                "recommended cost outside supported range, clamped"
            );
        }

        Ok(Recommendation {
            algorithm: profile.algorithm,
            cost_name: profile.cost_name,
            // within u32 after the clamp
            cost: bounded as u32,
            raw_cost,
            clamped,
            baseline_cost: profile.baseline_cost,
            baseline_ms,
            target_ms,
        })
    }

    /// Mean duration at each of `costs`, without extrapolation.
    pub fn benchmark(
        &self,
        algorithm: Algorithm,
        costs: &[u32],
    ) -> CalibrateResult<BenchmarkReport> {
        let profile = algorithm.profile();
        self.benchmark_with(profile, profile.binding, costs)
    }

    pub fn benchmark_with(
        &self,
        profile: &AlgorithmProfile,
        binding: &dyn HashBinding,
        costs: &[u32],
    ) -> CalibrateResult<BenchmarkReport> {
        if costs.is_empty() {
            return Err(CalibrateError::InvalidArgument(
                "at least one cost parameter is required".to_string(),
            ));
        }

        // One cost at a time, never overlapping.
        let mut entries = Vec::with_capacity(costs.len());
        for &cost in costs {
            let mean_ms = to_millis(self.measure(profile, binding, cost)?);
            info!(algorithm = %profile.algorithm, cost, mean_ms, "benchmarked");
            entries.push(BenchmarkEntry { cost, mean_ms });
        }

        Ok(BenchmarkReport {
            algorithm: profile.algorithm,
            entries,
        })
    }
}
