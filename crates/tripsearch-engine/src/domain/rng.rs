//! Linear congruential generator and per-worker stream seeding
//!
//! The generator is the MSVC-style `rand()` LCG: 32-bit state, 15-bit output.
//! It is cheap enough to be drawn eight times per search iteration.

use crate::constants::{LCG_INCREMENT, LCG_MULTIPLIER, LCG_OUTPUT_MASK};

/// 15-bit LCG random number generator
///
/// Each worker owns exactly one instance; it is never shared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// Create a generator from a seed
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advance the state and return bits 16-30 (0..=32767)
    #[inline]
    pub fn next_u15(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        (self.state >> 16) & LCG_OUTPUT_MASK
    }

    /// Discard `n` outputs
    pub fn skip(&mut self, n: u32) {
        for _ in 0..n {
            self.next_u15();
        }
    }
}

/// Number of distinct 15-bit seeds
const SEED_SPACE: usize = LCG_OUTPUT_MASK as usize + 1;

/// Derive `count` worker seeds from one root seed
///
/// For every worker, the root generator is drawn until it yields a non-zero
/// value `v`, advanced `v` more steps, then drawn once more; that last output
/// becomes the worker's seed. The self-referential skip keeps adjacent
/// streams from being small offsets of each other.
///
/// A seed already handed out is rejected and the skip-and-draw step repeats,
/// so no two workers share a stream. Only past 32768 workers (every 15-bit
/// seed taken) are repeats accepted.
pub fn seed_streams(root_seed: u32, count: usize) -> Vec<u32> {
    let mut root = Lcg::new(root_seed);
    let mut seeds = Vec::with_capacity(count);

    for _ in 0..count {
        loop {
            let seed = next_stream_seed(&mut root);
            if seeds.len() >= SEED_SPACE || !seeds.contains(&seed) {
                seeds.push(seed);
                break;
            }
        }
    }

    seeds
}

fn next_stream_seed(root: &mut Lcg) -> u32 {
    let mut skip = 0;
    while skip == 0 {
        skip = root.next_u15();
    }
    root.skip(skip);
    root.next_u15()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lcg_known_sequence() {
        // MSVC rand() after srand(1)
        let mut rng = Lcg::new(1);
        let values: Vec<u32> = (0..5).map(|_| rng.next_u15()).collect();
        assert_eq!(values, vec![41, 18467, 6334, 26500, 19169]);
    }

    #[test]
    fn test_lcg_state_update() {
        let mut rng = Lcg::new(0);
        rng.next_u15();
        assert_eq!(rng.state(), LCG_INCREMENT);
    }

    #[test]
    fn test_lcg_deterministic() {
        let mut rng1 = Lcg::new(0xDEAD_BEEF);
        let mut rng2 = Lcg::new(0xDEAD_BEEF);

        for _ in 0..1000 {
            assert_eq!(rng1.next_u15(), rng2.next_u15());
        }
    }

    #[test]
    fn test_lcg_output_range() {
        let mut rng = Lcg::new(u32::MAX);
        for _ in 0..100_000 {
            assert!(rng.next_u15() <= 0x7FFF);
        }
    }

    #[test]
    fn test_lcg_skip_matches_draws() {
        let mut skipped = Lcg::new(42);
        let mut drawn = Lcg::new(42);

        skipped.skip(100);
        for _ in 0..100 {
            drawn.next_u15();
        }

        assert_eq!(skipped, drawn);
    }

    #[test]
    fn test_seed_streams_count() {
        assert!(seed_streams(12345, 0).is_empty());
        assert_eq!(seed_streams(12345, 1).len(), 1);
        assert_eq!(seed_streams(12345, 16).len(), 16);
    }

    #[test]
    fn test_seed_streams_reproducible() {
        assert_eq!(seed_streams(1_700_000_000, 8), seed_streams(1_700_000_000, 8));
    }

    #[test]
    fn test_seed_streams_prefix_stable() {
        // Adding workers must not change the seeds of existing ones
        let four = seed_streams(987_654, 4);
        let eight = seed_streams(987_654, 8);
        assert_eq!(four[..], eight[..4]);
    }

    #[test]
    fn test_seed_streams_distinct_for_many_workers() {
        for count in [64usize, 128] {
            for root in (1_700_000_000u32..).take(100) {
                let seeds = seed_streams(root, count);
                let unique: HashSet<u32> = seeds.iter().copied().collect();
                assert_eq!(
                    seeds.len(),
                    unique.len(),
                    "duplicate seed for root {} with {} workers",
                    root,
                    count
                );
            }
        }
    }

    #[test]
    fn test_seed_streams_not_consecutive_draws() {
        // Seeds must come from the skipped stream, not the first raw outputs
        let mut naive = Lcg::new(1);
        let naive_first = naive.next_u15();
        let seeds = seed_streams(1, 1);
        assert_ne!(seeds[0], naive_first);
    }
}
