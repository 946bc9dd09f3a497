//! Tripcode search constants
//!
//! Note: these are fixed by the futaba tripcode format and the DES crypt primitive.

// =============================================================================
// Password generation
// =============================================================================

/// Password length fed to the hash primitive (DES crypt only reads 8 bytes)
pub const PASSWORD_LENGTH: usize = 8;

/// Password alphabet (printable ASCII without `#`, `\` and `~`)
///
/// `#` triggers secure tripcodes on most boards, `\` and `~` have no
/// single-byte Shift-JIS equivalent and get rewritten by the server.
///
/// The backtick is kept, giving 92 real characters. Older generators used a
/// 91-character table padded with a NUL and no backtick, so from index 62
/// (`` ` ``) onward the same draw maps to a different character here, and
/// the passwords they produce for a given seed are not reproduced.
pub const PASSWORD_ALPHABET: &[u8; ALPHABET_SIZE] =
    b" !\"$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[]^_`abcdefghijklmnopqrstuvwxyz{|}";

/// Number of characters in the password alphabet
pub const ALPHABET_SIZE: usize = 92;

// =============================================================================
// Salt and hash layout
// =============================================================================

/// Salt length (only the first 2 characters reach the primitive)
pub const SALT_LENGTH: usize = 4;

/// Fixed salt suffix appended after password[1..3]
pub const SALT_SUFFIX: [u8; 2] = *b"H.";

/// Length of the hash primitive output
pub const RAW_HASH_LENGTH: usize = 13;

/// Leading characters of the hash output that are not part of the tripcode
pub const HASH_OFFSET: usize = 3;

/// Tripcode length
pub const TRIPCODE_LENGTH: usize = 10;

// =============================================================================
// Query validation
// =============================================================================

/// Maximum query length (a query can never be longer than a tripcode)
pub const QUERY_MAX_LENGTH: usize = TRIPCODE_LENGTH;

/// Characters that can appear as the 10th character of a tripcode
pub const TENTH_CHAR_CANDIDATES: &[u8; 16] = b".26AEIMQUYcgkosw";

// =============================================================================
// RNG parameters
// =============================================================================

/// LCG multiplier
pub const LCG_MULTIPLIER: u32 = 214_013;

/// LCG increment
pub const LCG_INCREMENT: u32 = 2_531_011;

/// Mask applied to `state >> 16` (15-bit output)
pub const LCG_OUTPUT_MASK: u32 = 0x7FFF;

// =============================================================================
// Rate presentation
// =============================================================================

/// Unit step between magnitude prefixes
pub const RATE_UNIT: u64 = 1_000;

/// Magnitude prefixes, smallest first (k, m, g, t)
pub const RATE_PREFIXES: [char; 4] = ['k', 'm', 'g', 't'];
