// ============================================================
// SAMPLER
// ============================================================
// Bound the number of changes forwarded to enrichment

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform random subset of `k` items.
///
/// Inputs of length `<= k` come back untouched. Larger inputs are
/// Fisher-Yates shuffled and truncated to `k`.
pub fn sample<T, R: Rng + ?Sized>(mut items: Vec<T>, k: usize, rng: &mut R) -> Vec<T> {
    if items.len() <= k {
        return items;
    }

    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }

    items.truncate(k);
    items
}

/// Owns the RNG for one pipeline run
pub struct Sampler {
    rng: StdRng,
}

impl Sampler {
    /// Seeded samplers repeat the same choices for the same input
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn sample<T>(&mut self, items: Vec<T>, k: usize) -> Vec<T> {
        sample(items, k, &mut self.rng)
    }
}
