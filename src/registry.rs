//! The closed set of algorithms that can be calibrated.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::errors::{CalibrateError, CalibrateResult};
use crate::hash::{
    Bcrypt, HashBinding, Pbkdf2Sha256, Pbkdf2Sha512, BCRYPT_MAX_COST, BCRYPT_MIN_COST,
};
use crate::scaling::ScalingLaw;

/// Lowest PBKDF2 iteration count ever recommended (RFC 8018, section 4.2).
pub const PBKDF2_MIN_ITERATIONS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bcrypt,
    Pbkdf2Sha256,
    Pbkdf2Sha512,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Bcrypt,
        Algorithm::Pbkdf2Sha256,
        Algorithm::Pbkdf2Sha512,
    ];

    /// Name accepted on the command line.
    pub fn identifier(self) -> &'static str {
        match self {
            Algorithm::Bcrypt => "bcrypt",
            Algorithm::Pbkdf2Sha256 => "pbkdf2_256",
            Algorithm::Pbkdf2Sha512 => "pbkdf2_512",
        }
    }

    pub fn profile(self) -> &'static AlgorithmProfile {
        match self {
            Algorithm::Bcrypt => &PROFILES[0],
            Algorithm::Pbkdf2Sha256 => &PROFILES[1],
            Algorithm::Pbkdf2Sha512 => &PROFILES[2],
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for Algorithm {
    type Err = CalibrateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bcrypt" => Ok(Algorithm::Bcrypt),
            "pbkdf2_256" | "pbkdf2-256" => Ok(Algorithm::Pbkdf2Sha256),
            "pbkdf2_512" | "pbkdf2-512" => Ok(Algorithm::Pbkdf2Sha512),
            other => Err(CalibrateError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Everything the calibration driver needs to know about one algorithm.
pub struct AlgorithmProfile {
    pub algorithm: Algorithm,
    pub display_name: &'static str,
    /// Key under which the recommended cost is reported.
    pub cost_name: &'static str,
    pub law: ScalingLaw,
    pub baseline_cost: u32,
    /// Recommendations are clamped into this range.
    pub cost_bounds: RangeInclusive<u32>,
    pub binding: &'static (dyn HashBinding + Sync),
}

impl fmt::Debug for AlgorithmProfile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("AlgorithmProfile")
            .field("algorithm", &self.algorithm)
            .field("display_name", &self.display_name)
            .field("cost_name", &self.cost_name)
            .field("law", &self.law)
            .field("baseline_cost", &self.baseline_cost)
            .field("cost_bounds", &self.cost_bounds)
            .finish_non_exhaustive()
    }
}

static PROFILES: [AlgorithmProfile; 3] = [
    AlgorithmProfile {
        algorithm: Algorithm::Bcrypt,
        display_name: "bcrypt",
        cost_name: "rounds",
        law: ScalingLaw::Exponential,
        baseline_cost: 10,
        cost_bounds: BCRYPT_MIN_COST..=BCRYPT_MAX_COST,
        binding: &Bcrypt,
    },
    AlgorithmProfile {
        algorithm: Algorithm::Pbkdf2Sha256,
        display_name: "PBKDF2-HMAC-SHA256",
        cost_name: "rounds",
        law: ScalingLaw::Linear,
        baseline_cost: 10_000,
        cost_bounds: PBKDF2_MIN_ITERATIONS..=u32::MAX,
        binding: &Pbkdf2Sha256,
    },
    AlgorithmProfile {
        algorithm: Algorithm::Pbkdf2Sha512,
        display_name: "PBKDF2-HMAC-SHA512",
        cost_name: "rounds",
        law: ScalingLaw::Linear,
        baseline_cost: 10_000,
        cost_bounds: PBKDF2_MIN_ITERATIONS..=u32::MAX,
        binding: &Pbkdf2Sha512,
    },
];

/// Look up an algorithm profile by its command-line identifier.
pub fn resolve(identifier: &str) -> CalibrateResult<&'static AlgorithmProfile> {
    identifier.parse::<Algorithm>().map(Algorithm::profile)
}
