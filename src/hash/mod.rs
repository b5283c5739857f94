//! Concrete password-hash bindings timed by the sampler.
//!
//! The calibration core only ever sees [`HashBinding`]; which hash families
//! exist is decided by the registry.

mod bcrypt;
mod eksblowfish;
mod pbkdf2_impl;

use rand::RngCore;

pub use self::bcrypt::{Bcrypt, BCRYPT_MAX_COST, BCRYPT_MIN_COST};
pub use self::pbkdf2_impl::{Pbkdf2Sha256, Pbkdf2Sha512};
use crate::errors::HashError;

/// A password-hashing function with a single tunable cost parameter.
pub trait HashBinding {
    /// Hash `password` at `cost` and return the encoded digest.
    fn invoke(&self, password: &[u8], cost: u32) -> Result<String, HashError>;
}

impl<F> HashBinding for F
where
    F: Fn(&[u8], u32) -> Result<String, HashError>,
{
    fn invoke(&self, password: &[u8], cost: u32) -> Result<String, HashError> {
        self(password, cost)
    }
}

pub(crate) fn random_salt<const N: usize>() -> [u8; N] {
    let mut salt = [0u8; N];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}
