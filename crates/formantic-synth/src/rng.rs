//! Deterministic noise sources for track rendering.
//!
//! Every leaf track owns a seed derived from the synthesis seed and the
//! track's path in the vocal system, so rendering the same history twice
//! yields identical samples and no two channels share a noise stream.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The seed is duplicated into both halves of the 64-bit PCG state.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Derives an independent seed for a named component.
///
/// # Arguments
/// * `base_seed` - The synthesis seed
/// * `key` - Component path, e.g. `"Turbulence/S"`
///
/// # Returns
/// The first four bytes of `BLAKE3(base_seed_le || key)` as a little-endian u32
pub fn derive_component_seed(base_seed: u32, key: &str) -> u32 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&base_seed.to_le_bytes());
    hasher.update(key.as_bytes());
    let hash = hasher.finalize();

    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&hash.as_bytes()[..4]);
    u32::from_le_bytes(bytes)
}

/// Standard normal deviates drawn with the polar Box–Muller method.
///
/// Each accepted point yields two deviates; the second is cached for the
/// next call.
#[derive(Debug, Clone)]
pub struct Gaussian {
    rng: Pcg32,
    spare: Option<f64>,
}

impl Gaussian {
    /// Creates a generator seeded with `seed`.
    pub fn new(seed: u32) -> Self {
        Self {
            rng: create_rng(seed),
            spare: None,
        }
    }

    /// Returns the next N(0, 1) sample.
    pub fn next_normal(&mut self) -> f64 {
        if let Some(value) = self.spare.take() {
            return value;
        }
        loop {
            let x: f64 = 2.0 * self.rng.gen::<f64>() - 1.0;
            let y: f64 = 2.0 * self.rng.gen::<f64>() - 1.0;
            let r2 = x * x + y * y;
            if r2 < 1.0 && r2 != 0.0 {
                let multiplier = (-2.0 * r2.ln() / r2).sqrt();
                self.spare = Some(y * multiplier);
                return x * multiplier;
            }
        }
    }
}
