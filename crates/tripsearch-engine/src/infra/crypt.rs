//! Hash primitive wrapper
//!
//! Tripcodes are the traditional DES-based `crypt(3)` of the password with a
//! 2-character salt. The primitive itself comes from `pwhash`; this module
//! only adapts the fixed-width buffers to it.

use crate::constants::RAW_HASH_LENGTH;
use crate::domain::password::{Password, Salt, is_salt_char};
use crate::domain::tripcode::RawHash;
use pwhash::unix_crypt;
use thiserror::Error;

/// Hash primitive failures
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HashError {
    #[error("salt {0:?} is outside the crypt salt alphabet")]
    InvalidSalt([u8; 2]),
    #[error("crypt primitive failed: {0}")]
    Primitive(String),
    #[error("crypt output has {found} characters, expected {expected}")]
    UnexpectedLength { expected: usize, found: usize },
}

/// (password, salt) -> 13-character hash
pub trait HashPrimitive: Sync {
    fn hash(&self, password: &Password, salt: &Salt) -> Result<RawHash, HashError>;
}

/// Traditional DES crypt
#[derive(Clone, Copy, Debug, Default)]
pub struct DesCrypt;

impl HashPrimitive for DesCrypt {
    // pwhash marks traditional DES crypt deprecated; tripcodes require it
    #[allow(deprecated)]
    #[inline]
    fn hash(&self, password: &Password, salt: &Salt) -> Result<RawHash, HashError> {
        let prefix = salt.crypt_prefix();
        if !prefix.iter().all(|&b| is_salt_char(b)) {
            return Err(HashError::InvalidSalt(prefix));
        }
        // Both bytes are ASCII after the check above
        let salt_str =
            std::str::from_utf8(&prefix).map_err(|_| HashError::InvalidSalt(prefix))?;

        let hashed = unix_crypt::hash_with(salt_str, password.as_bytes())
            .map_err(|e| HashError::Primitive(e.to_string()))?;

        let bytes: [u8; RAW_HASH_LENGTH] = hashed.as_bytes().try_into().map_err(|_| {
            HashError::UnexpectedLength {
                expected: RAW_HASH_LENGTH,
                found: hashed.len(),
            }
        })?;
        Ok(RawHash(bytes))
    }
}
