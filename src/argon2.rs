//! Argon2 sizing hint.
//!
//! Argon2 is not calibrated by sampling. The hint only reflects host
//! resources and echoes the requested time cost back.

use std::fmt;
use std::num::NonZeroUsize;
use std::thread;

use serde_json::{json, Value};

/// Memory cost in KiB (2 GiB).
pub const ARGON2_MEMORY_COST: u32 = 1 << 21;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Argon2Hint {
    pub parallelism: u32,
    pub memory_cost: u32,
    pub time_cost: f64,
}

impl Argon2Hint {
    /// Two lanes per available core.
    pub fn detect(time_cost: f64) -> Self {
        let cores = thread::available_parallelism().map_or(1, NonZeroUsize::get);
        Self::for_cores(cores, time_cost)
    }

    pub fn for_cores(cores: usize, time_cost: f64) -> Self {
        let lanes = u32::try_from(cores.max(1)).unwrap_or(u32::MAX / 2);
        Self {
            parallelism: lanes.saturating_mul(2),
            memory_cost: ARGON2_MEMORY_COST,
            time_cost,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "parallelism": self.parallelism,
            "memory_cost": self.memory_cost,
            "time_cost": self.time_cost,
        })
    }
}

impl fmt::Display for Argon2Hint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{{'parallelism': {}, 'memory_cost': {}, 'time_cost': {:?}}}",
            self.parallelism, self.memory_cost, self.time_cost
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_lanes_per_core() {
        let hint = Argon2Hint::for_cores(8, 0.25);
        assert_eq!(hint.parallelism, 16);
        assert_eq!(hint.memory_cost, 2_097_152);
        assert_eq!(
            hint.to_string(),
            "{'parallelism': 16, 'memory_cost': 2097152, 'time_cost': 0.25}"
        );
    }

    #[test]
    fn zero_cores_still_yields_lanes() {
        assert_eq!(Argon2Hint::for_cores(0, 1.0).parallelism, 2);
    }

    #[test]
    fn detected_hint_is_usable() {
        let hint = Argon2Hint::detect(0.5);
        assert!(hint.parallelism >= 2);
        assert_eq!(hint.to_json()["time_cost"], 0.5);
    }
}
