use std::num::NonZeroUsize;

use crate::errors::{CalibrateError, CalibrateResult};

/// Number of timed trials averaged per measurement.
pub const DEFAULT_SAMPLES: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(n) => n,
    None => panic!("sample count must be non-zero"),
};
/// Length of the random password hashed in every trial.
pub const DEFAULT_PASSWORD_LEN: usize = 64;
/// Target duration, in seconds, when none is requested.
pub const DEFAULT_TIME_COST: f64 = 0.25;

/// Tuning knobs for a calibration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationConfig {
    pub samples: NonZeroUsize,
    pub password_len: usize,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            password_len: DEFAULT_PASSWORD_LEN,
        }
    }
}

impl CalibrationConfig {
    pub fn with_samples(mut self, samples: usize) -> CalibrateResult<Self> {
        self.samples = NonZeroUsize::new(samples).ok_or_else(|| {
            CalibrateError::InvalidArgument("sample count must be at least 1".to_string())
        })?;
        Ok(self)
    }

    pub fn validate(&self) -> CalibrateResult<()> {
        if self.password_len == 0 {
            return Err(CalibrateError::InvalidArgument(
                "password length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CalibrationConfig::default();
        assert_eq!(config.samples.get(), 10);
        assert_eq!(config.password_len, 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_samples_rejected() {
        let err = CalibrationConfig::default().with_samples(0).unwrap_err();
        assert!(matches!(err, CalibrateError::InvalidArgument(_)));
        let config = CalibrationConfig::default().with_samples(3).unwrap();
        assert_eq!(config.samples.get(), 3);
    }

    #[test]
    fn empty_password_rejected() {
        let config = CalibrationConfig {
            password_len: 0,
            ..CalibrationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CalibrateError::InvalidArgument(_))
        ));
    }
}
