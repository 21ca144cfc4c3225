//! Random number generation for pixel sampling.
//!
//! Each sampler owns a ChaCha20 generator rather than sharing ambient
//! state, so independent samplers never contend and a fixed seed gives a
//! reproducible image.

use rand::{rng, Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Generator type owned by a [`crate::sampler::Sampler`].
pub type SampleRng = ChaCha20Rng;

/// Create a sampling generator.
///
/// With a seed the stream is deterministic; without one it is seeded from
/// the thread-local OS-backed generator.
pub fn new_rng(seed: Option<u64>) -> SampleRng {
    match seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_rng(&mut rng()),
    }
}

/// Sub-pixel jitter, each component uniform in `[0, 1)`.
pub fn jitter<R: Rng + ?Sized>(rng: &mut R) -> (f64, f64) {
    (rng.random(), rng.random())
}
