//! Random sources for groove generation.
//!
//! Every random draw made while rendering goes through [`RandomSource`], so
//! a seeded [`DeterministicRng`] reproduces a render exactly.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// A source of uniform floats in `[0.0, 1.0)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Wrapper around PCG32.
#[derive(Clone)]
pub struct DeterministicRng {
    inner: Pcg32,
}

impl DeterministicRng {
    /// Create a new RNG from a 32-bit seed.
    ///
    /// The seed is expanded to 64 bits by duplicating its bits.
    pub fn new(seed: u32) -> Self {
        let seed64 = (seed as u64) | ((seed as u64) << 32);
        Self {
            inner: Pcg32::seed_from_u64(seed64),
        }
    }

    /// Create an RNG seeded from system entropy, for non-reproducible renders.
    pub fn from_entropy() -> Self {
        Self {
            inner: Pcg32::from_entropy(),
        }
    }

    /// Derive a seed for one item of a batch using BLAKE3.
    pub fn derive_seed(base_seed: u32, index: u32) -> u32 {
        let mut input = Vec::with_capacity(8);
        input.extend_from_slice(&base_seed.to_le_bytes());
        input.extend_from_slice(&index.to_le_bytes());
        let hash = blake3::hash(&input);
        let bytes = hash.as_bytes();
        u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    /// Generate a random f64 in the range [0.0, 1.0).
    #[inline]
    pub fn gen_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }
}

impl RandomSource for DeterministicRng {
    fn next_f64(&mut self) -> f64 {
        self.gen_f64()
    }
}

/// Replays a fixed sequence of values, cycling when exhausted.
///
/// Useful for pinning individual draws in tests.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<f64>,
    pos: usize,
}

impl SequenceRng {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            pos: 0,
        }
    }
}

impl RandomSource for SequenceRng {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.pos % self.values.len()];
        self.pos += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
