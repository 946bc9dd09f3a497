//! Tripcode extraction from the raw crypt output

use crate::constants::{HASH_OFFSET, RAW_HASH_LENGTH, TRIPCODE_LENGTH};
use crate::domain::password::Password;
use crate::domain::rate::CondensedRate;
use std::fmt;

/// 13-byte output of the hash primitive
///
/// Layout: 2 salt characters, then 11 hash characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawHash(pub [u8; RAW_HASH_LENGTH]);

/// Public 10-character tripcode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tripcode([u8; TRIPCODE_LENGTH]);

impl Tripcode {
    /// Take `raw[3..13]`
    #[inline]
    pub fn extract(raw: &RawHash) -> Self {
        let mut buf = [0u8; TRIPCODE_LENGTH];
        buf.copy_from_slice(&raw.0[HASH_OFFSET..HASH_OFFSET + TRIPCODE_LENGTH]);
        Self(buf)
    }

    pub fn from_bytes(bytes: [u8; TRIPCODE_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; TRIPCODE_LENGTH] {
        &self.0
    }
}

impl fmt::Display for Tripcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            fmt::Write::write_char(f, b as char)?;
        }
        Ok(())
    }
}

/// A matching (tripcode, password, rate) triple
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchResult {
    pub tripcode: Tripcode,
    pub password: Password,
    pub rate: CondensedRate,
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TRIP: '!{}' -> PASS: '{}' @ {}",
            self.tripcode, self.password, self.rate
        )
    }
}
