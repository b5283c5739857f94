//! Timed invocations of a hash binding.

use std::hint::black_box;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::debug;

use crate::errors::HashError;
use crate::hash::HashBinding;

/// Source of monotonic timestamps for the sampler.
pub trait Clock {
    type Instant: Copy;

    fn now(&self) -> Self::Instant;

    fn elapsed_since(&self, start: Self::Instant) -> Duration;
}

/// Wall-clock adjustments never leak into measurements taken with [`Instant`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    type Instant = Instant;

    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }

    #[inline]
    fn elapsed_since(&self, start: Instant) -> Duration {
        start.elapsed()
    }
}

/// Durations of consecutive hash invocations, in invocation order. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    durations: Vec<Duration>,
}

impl SampleSet {
    pub fn durations(&self) -> &[Duration] {
        &self.durations
    }

    pub fn len(&self) -> usize {
        self.durations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }
}

/// Runs a hash binding repeatedly and records how long each call took.
#[derive(Debug, Clone)]
pub struct Sampler<C = MonotonicClock> {
    clock: C,
    password_len: usize,
}

impl<C: Clock> Sampler<C> {
    pub fn new(clock: C, password_len: usize) -> Self {
        Self {
            clock,
            password_len,
        }
    }

    /// Time `count` invocations of `binding` at `cost`.
    ///
    /// Each trial hashes a fresh random password; generating it happens
    /// outside the timed interval. The first failing invocation aborts the
    /// whole run and its error is returned as is.
    pub fn sample(
        &self,
        binding: &dyn HashBinding,
        cost: u32,
        count: NonZeroUsize,
    ) -> Result<SampleSet, HashError> {
        let mut durations = Vec::with_capacity(count.get());

        for trial in 0..count.get() {
            let password = random_password(self.password_len);

            let start = self.clock.now();
            let digest = binding.invoke(password.as_bytes(), cost)?;
            let elapsed = self.clock.elapsed_since(start);
            black_box(digest);

            debug!(trial, cost, elapsed_us = elapsed.as_micros() as u64, "hash trial");
            durations.push(elapsed);
        }

        Ok(SampleSet { durations })
    }
}

/// Random printable password of `len` alphanumeric characters.
fn random_password(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}


#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::testing::VirtualClock;
    use super::*;
    use crate::hash::Pbkdf2Sha256;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn returns_exactly_count_samples() {
        let sampler = Sampler::new(MonotonicClock, 64);
        for n in [1, 2, 7, 10] {
            let set = sampler.sample(&Pbkdf2Sha256, 1, nz(n)).unwrap();
            assert_eq!(set.len(), n);
            assert!(set.durations().iter().all(|d| *d >= Duration::ZERO));
        }
    }

    #[test]
    fn records_durations_in_invocation_order() {
        let clock = VirtualClock::default();
        let calls = Cell::new(0u64);
        let stub = |_: &[u8], _: u32| -> Result<String, HashError> {
            calls.set(calls.get() + 1);
            clock.advance(Duration::from_millis(calls.get()));
            Ok(String::new())
        };

        let set = Sampler::new(clock.clone(), 64)
            .sample(&stub, 10, nz(3))
            .unwrap();
        assert_eq!(
            set.durations(),
            &[
                Duration::from_millis(1),
                Duration::from_millis(2),
                Duration::from_millis(3)
            ]
        );
    }

    #[test]
    fn fresh_password_each_trial() {
        let seen = RefCell::new(Vec::new());
        let stub = |password: &[u8], _: u32| -> Result<String, HashError> {
            assert_eq!(password.len(), 64);
            assert!(password.iter().all(u8::is_ascii_alphanumeric));
            seen.borrow_mut().push(password.to_vec());
            Ok(String::new())
        };

        Sampler::new(MonotonicClock, 64)
            .sample(&stub, 1, nz(4))
            .unwrap();
        let seen = seen.into_inner();
        assert_eq!(seen.len(), 4);
        assert_ne!(seen[0], seen[1]);
    }

    #[test]
    fn binding_failure_stops_sampling() {
        let calls = Cell::new(0);
        let stub = |_: &[u8], cost: u32| -> Result<String, HashError> {
            calls.set(calls.get() + 1);
            Err(HashError::CostNotAllowed {
                cost,
                min: 4,
                max: 31,
            })
        };

        let err = Sampler::new(MonotonicClock, 64)
            .sample(&stub, 2, nz(10))
            .unwrap_err();
        assert!(matches!(err, HashError::CostNotAllowed { cost: 2, .. }));
        assert_eq!(calls.get(), 1);
    }
}
