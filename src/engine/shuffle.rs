use rand::{rngs::StdRng, Rng, SeedableRng};
use sha2::{Digest, Sha256};

use crate::models::domain::{CanonicalSequence, Permutation};

/// Draws a uniformly random starting arrangement for `sequence`.
///
/// Fisher–Yates over the canonical indices: walk from the last index down to 1,
/// swapping each with a uniformly chosen index at or before it. Returns the
/// permutation and the values laid out in that order.
pub fn shuffle<R: Rng + ?Sized>(
    sequence: &CanonicalSequence,
    rng: &mut R,
) -> (Permutation, Vec<f64>) {
    let mut indices: Vec<usize> = (0..sequence.len()).collect();

    for i in (1..indices.len()).rev() {
        let j = rng.random_range(0..=i);
        indices.swap(i, j);
    }

    let permutation = Permutation::from_indices(indices);
    let arrangement = permutation.arrange(sequence.values());
    (permutation, arrangement)
}

/// A generator whose stream is fixed by the exercise identity and its values, so
/// the same exercise always starts from the same arrangement.
pub fn seeded_rng(exercise_id: &str, sequence: &CanonicalSequence) -> StdRng {
    StdRng::from_seed(seed_for(exercise_id, sequence))
}

fn seed_for(exercise_id: &str, sequence: &CanonicalSequence) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(exercise_id.as_bytes());
    for value in sequence.values() {
        hasher.update(value.to_bits().to_le_bytes());
    }

    let digest = hasher.finalize();
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&digest);
    seed
}
