use thiserror::Error;

/// Library generic result type.
pub type CalibrateResult<T> = Result<T, CalibrateError>;

/// Failures raised by a hash binding while it is being timed.
#[derive(Debug, Error)]
pub enum HashError {
    #[error("cost needs to be between {min} and {max}, got {cost}")]
    CostNotAllowed { cost: u32, min: u32, max: u32 },
    #[error("failed to derive key: {0}")]
    Derivation(&'static str),
    #[error("failed to encode hash output")]
    Encoding,
}

/// All the errors we can encounter while calibrating or benchmarking
#[derive(Debug, Error)]
pub enum CalibrateError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unknown algorithm '{0}' (expected one of: bcrypt, pbkdf2_256, pbkdf2_512)")]
    UnknownAlgorithm(String),
    #[error("cannot average an empty sample set")]
    EmptySampleSet,
    #[error("baseline measurement must be positive, got {baseline_ms} ms (clock too coarse?)")]
    NonPositiveBaseline { baseline_ms: f64 },
    #[error("target duration must be a positive finite number, got {target_ms} ms")]
    NonPositiveTarget { target_ms: f64 },
    #[error("{algorithm} failed at cost {cost}: {source}")]
    Hash {
        algorithm: &'static str,
        cost: u32,
        #[source]
        source: HashError,
    },
}

impl CalibrateError {
    /// True for failures where the scaling formula would be mathematically undefined.
    pub fn is_domain_error(&self) -> bool {
        matches!(
            self,
            CalibrateError::EmptySampleSet
                | CalibrateError::NonPositiveBaseline { .. }
                | CalibrateError::NonPositiveTarget { .. }
        )
    }
}
