//! Throughput presentation
//!
//! Condenses an attempts-per-second figure into a value with a magnitude
//! prefix (`k`, `m`, `g`, `t`).

use crate::constants::{RATE_PREFIXES, RATE_UNIT};
use std::fmt;

/// Rate scaled to its magnitude
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CondensedRate {
    /// Unscaled attempts per second
    pub raw: u64,
    /// `raw` divided by the power of 1000 matching `prefix`
    pub value: f64,
    /// `None` below 1000
    pub prefix: Option<char>,
}

/// Scale `rate` by the largest power of 1000 not exceeding it
pub fn condense_rate(rate: u64) -> CondensedRate {
    let mut divisor = 1u64;
    let mut prefix = None;

    for &p in RATE_PREFIXES.iter() {
        match divisor.checked_mul(RATE_UNIT) {
            Some(next) if rate >= next => {
                divisor = next;
                prefix = Some(p);
            }
            _ => break,
        }
    }

    CondensedRate {
        raw: rate,
        value: rate as f64 / divisor as f64,
        prefix,
    }
}

impl fmt::Display for CondensedRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.prefix {
            Some(p) => write!(f, "{:.2} {}Trip/s", self.value, p),
            None => write!(f, "{} Trip/s", self.raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condense_below_thousand() {
        let rate = condense_rate(999);
        assert_eq!(rate.prefix, None);
        assert_eq!(rate.value, 999.0);
        assert_eq!(rate.to_string(), "999 Trip/s");
    }

    #[test]
    fn test_condense_zero() {
        assert_eq!(condense_rate(0).to_string(), "0 Trip/s");
    }

    #[test]
    fn test_condense_kilo() {
        let rate = condense_rate(1000);
        assert_eq!(rate.prefix, Some('k'));
        assert_eq!(rate.to_string(), "1.00 kTrip/s");
        assert_eq!(condense_rate(353_100).to_string(), "353.10 kTrip/s");
    }

    #[test]
    fn test_condense_boundaries() {
        assert_eq!(condense_rate(999_999).prefix, Some('k'));
        assert_eq!(condense_rate(1_000_000).prefix, Some('m'));
        assert_eq!(condense_rate(1_000_000_000).prefix, Some('g'));
        assert_eq!(condense_rate(1_000_000_000_000).prefix, Some('t'));
        assert_eq!(condense_rate(u64::MAX).prefix, Some('t'));
    }

    #[test]
    fn test_condense_mega_value() {
        let rate = condense_rate(2_500_000);
        assert_eq!(rate.value, 2.5);
        assert_eq!(rate.to_string(), "2.50 mTrip/s");
    }
}
