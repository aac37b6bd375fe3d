// src/core/static_random.rs

use num::BigInt;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Explicit random state for the randtest entry points.
///
/// The engine never touches an implicit global RNG; callers that want random
/// polynomials construct one of these (seeded for reproducible tests) and pass
/// it down.
pub struct StaticRandom {
    rng: ChaCha8Rng,
}

impl StaticRandom {
    pub fn new() -> Self {
        let mut seed = [0u8; 32];
        rand::rng().fill(&mut seed);
        StaticRandom { rng: ChaCha8Rng::from_seed(seed) }
    }

    pub fn from_seed(seed: u64) -> Self {
        StaticRandom { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn next(&mut self) -> u32 {
        self.rng.random()
    }

    pub fn next_range(&mut self, min_value: usize, max_value: usize) -> usize {
        self.rng.random_range(min_value..max_value)
    }

    pub fn next_i64(&mut self, min_value: i64, max_value: i64) -> i64 {
        self.rng.random_range(min_value..=max_value)
    }

    /// Uniform in [lower, upper]
    pub fn next_bigint(&mut self, lower: &BigInt, upper: &BigInt) -> BigInt {
        if lower > upper {
            panic!("Upper must be greater than or equal to lower");
        }

        let delta = upper - lower;
        let delta_bytes = delta.to_bytes_be().1;
        let mut buffer = vec![0u8; delta_bytes.len()];

        loop {
            self.rng.fill_bytes(&mut buffer);
            let result = BigInt::from_bytes_be(num::bigint::Sign::Plus, &buffer) + lower;

            if &result >= lower && &result <= upper {
                return result;
            }
        }
    }

    /// The underlying generator, for `Ring::random_elem`.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }
}

impl Default for StaticRandom {
    fn default() -> Self {
        StaticRandom::new()
    }
}
