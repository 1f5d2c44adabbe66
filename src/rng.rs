// SeededRng: reproducible tile permutations from an integer seed
//
// Seeds travel through shared URLs, so the generator is a pure function of
// the seed value. Same seed in, same board out, on every run.

use crate::types::Seed;

/// Sine-hash generator with linear seed stepping
///
/// `next(seed)` is the fractional part of `sin(seed) * 10000`; the successor
/// seed is `seed + 1`. There is no hidden state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededRng;

impl SeededRng {
    /// Value in `[0, 1)` for `seed`, and the seed to use for the next draw
    pub fn next(seed: Seed) -> (f64, Seed) {
        let x = (seed as f64).sin() * 10000.0;
        (x - x.floor(), seed.wrapping_add(1))
    }

    /// Permutation of `1..=n` drawn from a shrinking ordered pool
    ///
    /// Each draw picks `floor(rand * pool.len())` and removes that entry while
    /// keeping the remaining pool in order.
    pub fn permutation(seed: Seed, n: usize) -> Vec<usize> {
        let mut pool: Vec<usize> = (1..=n).collect();
        let mut values = Vec::with_capacity(n);
        let mut seed = seed;

        while !pool.is_empty() {
            let (rand, next_seed) = Self::next(seed);
            // rand < 1.0, the clamp only guards float rounding
            let index = ((rand * pool.len() as f64).floor() as usize).min(pool.len() - 1);
            values.push(pool.remove(index));
            seed = next_seed;
        }

        values
    }
}
