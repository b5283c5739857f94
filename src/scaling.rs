//! Extrapolation from one baseline measurement to the cost hitting a target duration.

use std::fmt;

use crate::errors::{CalibrateError, CalibrateResult};

/// How the work of an algorithm grows with its cost parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalingLaw {
    /// Work doubles with every increment (bcrypt rounds).
    Exponential,
    /// Work is proportional to the cost (PBKDF2 iterations).
    Linear,
}

impl fmt::Display for ScalingLaw {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScalingLaw::Exponential => write!(f, "exponential"),
            ScalingLaw::Linear => write!(f, "linear"),
        }
    }
}

/// Cost parameter expected to take `target_ms`, given that `baseline_cost`
/// took `baseline_ms`.
///
/// The result is not clamped and may be zero or negative for tiny targets.
/// Rounding is half-to-even.
pub fn recommend(
    law: ScalingLaw,
    baseline_cost: u32,
    baseline_ms: f64,
    target_ms: f64,
) -> CalibrateResult<i64> {
    if !(baseline_ms > 0.0 && baseline_ms.is_finite()) {
        return Err(CalibrateError::NonPositiveBaseline { baseline_ms });
    }
    if !target_ms.is_finite() {
        return Err(CalibrateError::NonPositiveTarget { target_ms });
    }

    let ratio = target_ms / baseline_ms;
    let cost = match law {
        ScalingLaw::Exponential => {
            if !(ratio > 0.0) {
                return Err(CalibrateError::NonPositiveTarget { target_ms });
            }
            let doublings = ratio.log2().round_ties_even() as i64;
            doublings.saturating_add(i64::from(baseline_cost))
        }
        ScalingLaw::Linear => {
            let multiplier = ratio.round_ties_even() as i64;
            multiplier.saturating_mul(i64::from(baseline_cost))
        }
    };
    Ok(cost)
}
