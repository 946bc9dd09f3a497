//! Candidate password and salt derivation
//!
//! Both are fixed-width byte arrays so the hot loop never allocates for them.

use crate::constants::{
    ALPHABET_SIZE, PASSWORD_ALPHABET, PASSWORD_LENGTH, SALT_LENGTH, SALT_SUFFIX,
};
use crate::domain::rng::Lcg;
use std::fmt;

/// 8-character candidate password drawn from [`PASSWORD_ALPHABET`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Password([u8; PASSWORD_LENGTH]);

impl Password {
    /// Draw a new password, advancing `rng` by exactly 8 steps
    #[inline]
    pub fn generate(rng: &mut Lcg) -> Self {
        let mut buf = [0u8; PASSWORD_LENGTH];
        for b in buf.iter_mut() {
            *b = PASSWORD_ALPHABET[rng.next_u15() as usize % ALPHABET_SIZE];
        }
        Self(buf)
    }

    /// Wrap raw bytes (used by tests and known-answer checks)
    pub fn from_bytes(bytes: [u8; PASSWORD_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PASSWORD_LENGTH] {
        &self.0
    }

    /// Derive the crypt salt for this password
    #[inline]
    pub fn salt(&self) -> Salt {
        Salt::derive(self)
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            fmt::Write::write_char(f, b as char)?;
        }
        Ok(())
    }
}

/// 4-character salt in the crypt salt alphabet (`./0-9A-Za-z`)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Salt([u8; SALT_LENGTH]);

impl Salt {
    /// Build the salt from password[1], password[2] and `"H."`, then sanitize
    pub fn derive(password: &Password) -> Self {
        let mut salt = Self::raw(password);
        salt.sanitize();
        salt
    }

    /// Salt before sanitization
    pub fn raw(password: &Password) -> Self {
        let p = password.as_bytes();
        Self([p[1], p[2], SALT_SUFFIX[0], SALT_SUFFIX[1]])
    }

    /// Clamp out-of-range bytes to `.`, then shift punctuation into letters
    pub fn sanitize(&mut self) {
        for b in self.0.iter_mut() {
            if !(b'.'..=b'z').contains(b) {
                *b = b'.';
            }
        }
        for b in self.0.iter_mut() {
            *b = match *b {
                b':'..=b'@' => *b + 7, // :;<=>?@ -> ABCDEFG
                b'['..=b'`' => *b + 6, // [\]^_` -> abcdef
                other => other,
            };
        }
    }

    pub fn as_bytes(&self) -> &[u8; SALT_LENGTH] {
        &self.0
    }

    /// The two characters actually consumed by DES crypt
    pub fn crypt_prefix(&self) -> [u8; 2] {
        [self.0[0], self.0[1]]
    }
}

/// Whether `b` belongs to the crypt salt alphabet
#[inline]
pub fn is_salt_char(b: u8) -> bool {
    matches!(b, b'.' | b'/' | b'0'..=b'9' | b'A'..=b'Z' | b'a'..=b'z')
}
