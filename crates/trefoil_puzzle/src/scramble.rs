//! Random move sequences for scrambling.
//!
//! Every generator is a [`ChaCha8Rng`], so a seed always reproduces the same
//! scramble.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::Move;

/// Generates `len` moves using `random_move`, rejecting any move that turns the
/// same slice as the move before it.
///
/// `random_move` must be able to produce at least two distinct slices.
pub fn random_sequence(
    len: usize,
    rng: &mut ChaCha8Rng,
    mut random_move: impl FnMut(&mut ChaCha8Rng) -> Move,
) -> Vec<Move> {
    let mut ret: Vec<Move> = Vec::with_capacity(len);
    while ret.len() < len {
        let mv = random_move(rng);
        if ret.last().is_some_and(|last| last.same_slice(&mv)) {
            continue;
        }
        ret.push(mv);
    }
    ret
}

/// Returns a random element of a nonempty slice.
pub(crate) fn choose<T: Copy>(rng: &mut ChaCha8Rng, options: &[T]) -> T {
    options[rng.random_range(0..options.len())]
}

/// Returns the seed to use for a scramble and a generator seeded with it.
///
/// If `seed` is `None`, a fresh random seed is chosen so that the scramble can
/// still be reproduced later.
pub fn seeded_rng(seed: Option<u64>) -> (u64, ChaCha8Rng) {
    let seed = seed.unwrap_or_else(rand::random);
    (seed, ChaCha8Rng::seed_from_u64(seed))
}
