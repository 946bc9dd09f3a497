//! Search query validation and tripcode matching
//!
//! A query is validated once before the search starts and then shared
//! read-only by every worker.

use crate::constants::{QUERY_MAX_LENGTH, TENTH_CHAR_CANDIDATES};
use crate::domain::tripcode::Tripcode;
use thiserror::Error;

/// How the tripcode is compared against the query
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchMode {
    /// Every tripcode matches
    NoQuery,
    /// Exact byte substring
    CaseSensitive,
    /// Substring under ASCII case folding
    CaseInsensitive,
}

/// Query validation errors
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Give me a query string next time.")]
    MissingQuery,
    #[error("tripcodes can be no longer than 10 characters")]
    TooLong { length: usize },
    #[error("tripcodes can only have the range ./0-9A-Za-z in them")]
    InvalidCharacter { position: usize, byte: u8 },
    #[error(
        "the 10th character of a tripcode can only be one of these characters, you know! .26AEIMQUYcgkosw"
    )]
    InvalidTenthCharacter { found: u8 },
}

impl QueryError {
    /// Notes shown in the help screen (every error except the missing query)
    pub fn help_notes() -> [String; 3] {
        [
            Self::TooLong { length: 0 }.to_string(),
            Self::InvalidCharacter { position: 0, byte: 0 }.to_string(),
            Self::InvalidTenthCharacter { found: 0 }.to_string(),
        ]
    }
}

/// Validated query pattern with its match mode
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    pattern: Vec<u8>,
    mode: MatchMode,
}

impl Query {
    /// Query that matches everything
    pub fn no_query() -> Self {
        Self {
            pattern: Vec::new(),
            mode: MatchMode::NoQuery,
        }
    }

    /// Validate `pattern` and attach `mode`
    ///
    /// `None` is the missing-query case (`-i` without a following token).
    pub fn new(pattern: Option<&str>, mode: MatchMode) -> Result<Self, QueryError> {
        Self::from_bytes(pattern.map(str::as_bytes), mode)
    }

    /// Same as [`Query::new`] for patterns that need not be UTF-8
    ///
    /// Command-line arguments arrive as raw bytes; anything outside the
    /// tripcode alphabet is reported as an invalid character.
    pub fn from_bytes(pattern: Option<&[u8]>, mode: MatchMode) -> Result<Self, QueryError> {
        if mode == MatchMode::NoQuery {
            return Ok(Self::no_query());
        }

        let pattern = pattern.ok_or(QueryError::MissingQuery)?;
        validate_pattern_bytes(pattern)?;

        Ok(Self {
            pattern: pattern.to_vec(),
            mode,
        })
    }

    pub fn case_sensitive(pattern: &str) -> Result<Self, QueryError> {
        Self::new(Some(pattern), MatchMode::CaseSensitive)
    }

    pub fn case_insensitive(pattern: &str) -> Result<Self, QueryError> {
        Self::new(Some(pattern), MatchMode::CaseInsensitive)
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn pattern(&self) -> &[u8] {
        &self.pattern
    }

    /// Whether `trip` satisfies this query
    #[inline]
    pub fn matches(&self, trip: &Tripcode) -> bool {
        let haystack = trip.as_bytes();
        let needle = self.pattern.as_slice();

        match self.mode {
            MatchMode::NoQuery => true,
            _ if needle.is_empty() => true,
            _ if needle.len() > haystack.len() => false,
            MatchMode::CaseSensitive => haystack.windows(needle.len()).any(|w| w == needle),
            MatchMode::CaseInsensitive => haystack
                .windows(needle.len())
                .any(|w| w.eq_ignore_ascii_case(needle)),
        }
    }
}

/// Check length, character range and the 10th-character rule
pub fn validate_pattern(pattern: &str) -> Result<(), QueryError> {
    validate_pattern_bytes(pattern.as_bytes())
}

pub fn validate_pattern_bytes(bytes: &[u8]) -> Result<(), QueryError> {
    if bytes.len() > QUERY_MAX_LENGTH {
        return Err(QueryError::TooLong {
            length: bytes.len(),
        });
    }

    for (position, &byte) in bytes.iter().enumerate() {
        // '.'..='9' covers "./0123456789"
        let valid = matches!(byte, b'.'..=b'9' | b'A'..=b'Z' | b'a'..=b'z');
        if !valid {
            return Err(QueryError::InvalidCharacter { position, byte });
        }
    }

    if bytes.len() == QUERY_MAX_LENGTH {
        let last = bytes[QUERY_MAX_LENGTH - 1];
        if !TENTH_CHAR_CANDIDATES.contains(&last) {
            return Err(QueryError::InvalidTenthCharacter { found: last });
        }
    }

    Ok(())
}
