use std::str;

use base64::engine::general_purpose::NO_PAD;
use base64::engine::GeneralPurpose;
use base64::{alphabet::BCRYPT, Engine};

use super::{eksblowfish, random_salt, HashBinding};
use crate::errors::HashError;

pub const BCRYPT_MIN_COST: u32 = 4;
pub const BCRYPT_MAX_COST: u32 = 31;
const BASE_64: GeneralPurpose = GeneralPurpose::new(&BCRYPT, NO_PAD);

/// bcrypt with a fresh random salt on every invocation, emitting `$2b$` hashes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bcrypt;

impl HashBinding for Bcrypt {
    fn invoke(&self, password: &[u8], cost: u32) -> Result<String, HashError> {
        let parts = hash_with_salt(password, cost, random_salt())?;
        Ok(parts.format_with_prefix("2b"))
    }
}

#[derive(Debug, PartialEq)]
struct HashParts {
    cost: u32,
    salt: [u8; 22],
    hash: [u8; 31],
}

impl HashParts {
    fn format_with_prefix(&self, prefix: &str) -> String {
        // Both buffers only ever hold bcrypt base64 characters.
        let salt = str::from_utf8(&self.salt).unwrap_or_default();
        let hash = str::from_utf8(&self.hash).unwrap_or_default();
        format!("${}${:02}${}{}", prefix, self.cost, salt, hash)
    }
}

/// Longest key eksblowfish accepts, terminator included.
const KEY_CAPACITY: usize = 72;
/// Digest bytes kept in the encoded hash; 23 bytes give the 31 characters of `$2b$`.
const DIGEST_LEN: usize = 23;

/// Fixed-size key buffer and the number of bytes of it fed to eksblowfish.
///
/// Input past `KEY_CAPACITY` bytes is ignored. Shorter input gets a zero
/// byte appended; input that fills the buffer has no room left for one.
fn eks_key(password: &[u8]) -> ([u8; KEY_CAPACITY], usize) {
    let mut key = [0; KEY_CAPACITY];
    let copied = password.len().min(KEY_CAPACITY);
    key[..copied].copy_from_slice(&password[..copied]);
    (key, (copied + 1).min(KEY_CAPACITY))
}

fn encode_into<const N: usize>(bytes: &[u8]) -> Result<[u8; N], HashError> {
    let mut buf = [0; N];
    BASE_64
        .encode_slice(bytes, &mut buf)
        .map_err(|_| HashError::Encoding)?;
    Ok(buf)
}

fn hash_with_salt(password: &[u8], cost: u32, salt: [u8; 16]) -> Result<HashParts, HashError> {
    if !(BCRYPT_MIN_COST..=BCRYPT_MAX_COST).contains(&cost) {
        return Err(HashError::CostNotAllowed {
            cost,
            min: BCRYPT_MIN_COST,
            max: BCRYPT_MAX_COST,
        });
    }

    let (key, key_len) = eks_key(password);
    let digest = eksblowfish::bcrypt(cost, salt, &key[..key_len]);

    Ok(HashParts {
        cost,
        salt: encode_into(&salt)?,
        hash: encode_into(&digest[..DIGEST_LEN])?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_with_fixed_salt() {
        let salt = [
            38, 113, 212, 141, 108, 213, 195, 166, 201, 38, 20, 13, 47, 40, 104, 18,
        ];
        let hashed = hash_with_salt(b"My S3cre7 P@55w0rd!", 5, salt)
            .unwrap()
            .format_with_prefix("2y");
        assert_eq!(
            "$2y$05$HlFShUxTu4ZHHfOLJwfmCeDj/kuKFKboanXtDJXxCC7aIPTUgxNDe",
            &hashed
        );
    }

    #[test]
    fn rejects_cost_out_of_range() {
        for cost in [0, 3, 32] {
            match Bcrypt.invoke(b"hunter2", cost) {
                Err(HashError::CostNotAllowed { cost: c, min, max }) => {
                    assert_eq!((c, min, max), (cost, 4, 31));
                }
                other => panic!("expected CostNotAllowed, got {:?}", other),
            }
        }
    }

    #[test]
    fn fresh_salt_per_invocation() {
        let a = Bcrypt.invoke(b"hunter2", 4).unwrap();
        let b = Bcrypt.invoke(b"hunter2", 4).unwrap();
        assert!(a.starts_with("$2b$04$"));
        assert_eq!(a.len(), 60);
        assert_ne!(a, b);
    }

    #[test]
    fn key_is_zero_terminated_below_capacity() {
        let (key, len) = eks_key(b"abc");
        assert_eq!(len, 4);
        assert_eq!(&key[..len], b"abc\0");

        let (_, len) = eks_key(&[b'x'; 71]);
        assert_eq!(len, 72);
        let (_, len) = eks_key(&[b'x'; 200]);
        assert_eq!(len, 72);
    }

    #[test]
    fn long_passwords_are_truncated() {
        let salt = [0x11; 16];
        let long = vec![b'x'; 100];
        let capped = vec![b'x'; 72];
        assert_eq!(
            hash_with_salt(&long, 4, salt).unwrap(),
            hash_with_salt(&capped, 4, salt).unwrap()
        );
    }
}
