use base64::alphabet::Alphabet;
use base64::engine::general_purpose::NO_PAD;
use base64::engine::GeneralPurpose;
use base64::Engine;
use hmac::Hmac;
use sha2::{Sha256, Sha512};

use super::{random_salt, HashBinding};
use crate::errors::HashError;

const PBKDF2_SALT_SIZE: usize = 16;

// passlib's "adapted base64": `.` replaces `+`, no padding
const AB64_ALPHABET: Alphabet =
    match Alphabet::new("ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789./") {
        Ok(alphabet) => alphabet,
        Err(_) => panic!("invalid ab64 alphabet"),
    };
const AB64: GeneralPurpose = GeneralPurpose::new(&AB64_ALPHABET, NO_PAD);

/// PBKDF2-HMAC-SHA256, 16-byte salt, 32-byte derived key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pbkdf2Sha256;

/// PBKDF2-HMAC-SHA512, 16-byte salt, 64-byte derived key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pbkdf2Sha512;

impl HashBinding for Pbkdf2Sha256 {
    fn invoke(&self, password: &[u8], cost: u32) -> Result<String, HashError> {
        let salt = random_salt::<PBKDF2_SALT_SIZE>();
        let dk = derive_sha256(password, &salt, cost)?;
        Ok(encode("pbkdf2-sha256", cost, &salt, &dk))
    }
}

impl HashBinding for Pbkdf2Sha512 {
    fn invoke(&self, password: &[u8], cost: u32) -> Result<String, HashError> {
        let salt = random_salt::<PBKDF2_SALT_SIZE>();
        let dk = derive_sha512(password, &salt, cost)?;
        Ok(encode("pbkdf2-sha512", cost, &salt, &dk))
    }
}

fn check_rounds(rounds: u32) -> Result<(), HashError> {
    if rounds == 0 {
        return Err(HashError::CostNotAllowed {
            cost: rounds,
            min: 1,
            max: u32::MAX,
        });
    }
    Ok(())
}

fn derive_sha256(password: &[u8], salt: &[u8], rounds: u32) -> Result<[u8; 32], HashError> {
    check_rounds(rounds)?;
    let mut dk = [0u8; 32];
    ::pbkdf2::pbkdf2::<Hmac<Sha256>>(password, salt, rounds, &mut dk)
        .map_err(|_| HashError::Derivation("invalid HMAC-SHA256 key length"))?;
    Ok(dk)
}

fn derive_sha512(password: &[u8], salt: &[u8], rounds: u32) -> Result<[u8; 64], HashError> {
    check_rounds(rounds)?;
    let mut dk = [0u8; 64];
    ::pbkdf2::pbkdf2::<Hmac<Sha512>>(password, salt, rounds, &mut dk)
        .map_err(|_| HashError::Derivation("invalid HMAC-SHA512 key length"))?;
    Ok(dk)
}

fn encode(ident: &str, rounds: u32, salt: &[u8], dk: &[u8]) -> String {
    format!(
        "${}${}${}${}",
        ident,
        rounds,
        AB64.encode(salt),
        AB64.encode(dk)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_matches_rfc7914_vector() {
        let dk = derive_sha256(b"passwd", b"salt", 1).unwrap();
        assert_eq!(
            dk,
            [
                0x55, 0xac, 0x04, 0x6e, 0x56, 0xe3, 0x08, 0x9f, 0xec, 0x16, 0x91, 0xc2, 0x25,
                0x44, 0xb6, 0x05, 0xf9, 0x41, 0x85, 0x21, 0x6d, 0xde, 0x04, 0x65, 0xe6, 0x8b,
                0x9d, 0x57, 0xc2, 0x0d, 0xac, 0xbc,
            ]
        );
    }

    #[test]
    fn modular_crypt_layout() {
        let hashed = Pbkdf2Sha256.invoke(b"hunter2", 1000).unwrap();
        let parts: Vec<&str> = hashed.trim_start_matches('$').split('$').collect();
        assert_eq!(parts[0], "pbkdf2-sha256");
        assert_eq!(parts[1], "1000");
        assert_eq!(parts[2].len(), 22);
        assert_eq!(parts[3].len(), 43);
        assert!(!hashed.contains('+'));

        let hashed = Pbkdf2Sha512.invoke(b"hunter2", 1000).unwrap();
        let parts: Vec<&str> = hashed.trim_start_matches('$').split('$').collect();
        assert_eq!(parts[0], "pbkdf2-sha512");
        assert_eq!(parts[3].len(), 86);
    }

    #[test]
    fn zero_rounds_is_rejected() {
        assert!(matches!(
            Pbkdf2Sha256.invoke(b"hunter2", 0),
            Err(HashError::CostNotAllowed { cost: 0, .. })
        ));
        assert!(matches!(
            Pbkdf2Sha512.invoke(b"hunter2", 0),
            Err(HashError::CostNotAllowed { cost: 0, .. })
        ));
    }

    #[test]
    fn salts_differ_between_calls() {
        let a = Pbkdf2Sha512.invoke(b"hunter2", 10).unwrap();
        let b = Pbkdf2Sha512.invoke(b"hunter2", 10).unwrap();
        assert_ne!(a, b);
    }
}
