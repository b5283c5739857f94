use std::time::Duration;

use crate::errors::{CalibrateError, CalibrateResult};

/// Arithmetic mean of a set of durations.
pub fn average(samples: &[Duration]) -> CalibrateResult<Duration> {
    if samples.is_empty() {
        return Err(CalibrateError::EmptySampleSet);
    }
    let total: u128 = samples.iter().map(Duration::as_nanos).sum();
    let mean = total / samples.len() as u128;
    Ok(Duration::from_nanos(u64::try_from(mean).unwrap_or(u64::MAX)))
}

#[inline]
pub fn to_millis(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_samples() {
        let samples = [
            Duration::from_millis(10),
            Duration::from_millis(20),
            Duration::from_millis(30),
        ];
        assert_eq!(average(&samples).unwrap(), Duration::from_millis(20));
    }

    #[test]
    fn single_sample_is_its_own_mean() {
        let samples = [Duration::from_micros(1234)];
        assert_eq!(average(&samples).unwrap(), Duration::from_micros(1234));
    }

    #[test]
    fn empty_set_is_a_domain_error() {
        let err = average(&[]).unwrap_err();
        assert!(matches!(err, CalibrateError::EmptySampleSet));
        assert!(err.is_domain_error());
    }

    #[test]
    fn millis_conversion() {
        assert!((to_millis(Duration::from_micros(62_400)) - 62.4).abs() < 1e-9);
        assert_eq!(to_millis(Duration::from_secs(2)), 2000.0);
        assert_eq!(to_millis(Duration::ZERO), 0.0);
    }
}
