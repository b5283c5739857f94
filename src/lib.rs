//! Calibrate password-hash cost parameters to a target latency.
//!
//! A calibration hashes random passwords at a known baseline cost, averages
//! the measured durations and extrapolates to the cost that should take the
//! requested time, using the algorithm's [`ScalingLaw`]:
//!
//! - bcrypt doubles its work per round, so the recommendation adds
//!   `log2(target / baseline)` rounds to the baseline
//! - PBKDF2 work is linear in its iteration count, so the baseline is
//!   multiplied by `target / baseline`
//!
//! ```no_run
//! use hashcost::{Algorithm, CalibrationConfig, Calibrator};
//!
//! let calibrator = Calibrator::new(CalibrationConfig::default()).unwrap();
//! let rec = calibrator.find_best_params(Algorithm::Bcrypt, 0.25).unwrap();
//! println!("{}", rec); // {'rounds': 12}
//! ```

pub mod argon2;
mod calibrate;
pub mod cli;
mod config;
mod errors;
pub mod hash;
pub mod logging;
pub mod registry;
pub mod sampler;
pub mod scaling;
pub mod stats;

pub use crate::argon2::Argon2Hint;
pub use crate::calibrate::{BenchmarkEntry, BenchmarkReport, Calibrator, Recommendation};
pub use crate::config::{
    CalibrationConfig, DEFAULT_PASSWORD_LEN, DEFAULT_SAMPLES, DEFAULT_TIME_COST,
};
pub use crate::errors::{CalibrateError, CalibrateResult, HashError};
pub use crate::hash::HashBinding;
pub use crate::registry::{resolve, Algorithm, AlgorithmProfile};
pub use crate::sampler::{Clock, MonotonicClock, SampleSet, Sampler};
pub use crate::scaling::{recommend, ScalingLaw};
