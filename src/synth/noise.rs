use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::buffer::SignalBuffer;
use super::config::SynthConfig;

/// Uniform white noise in [-1, 1]. The generator is re-seeded from scratch
/// on every render, so the same seed always reproduces the same buffer and
/// no generator state leaks between calls.
#[derive(Debug, Clone, Copy)]
pub struct Noise {
    batch_size: usize,
    buffer_size: usize,
}

impl Noise {
    pub fn new(config: &SynthConfig) -> Self {
        Self {
            batch_size: config.batch_size,
            buffer_size: config.buffer_size(),
        }
    }

    pub fn render(&self, seed: u64) -> SignalBuffer {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut out = SignalBuffer::zeros(self.batch_size, self.buffer_size);
        for b in 0..self.batch_size {
            for sample in out.row_mut(b).iter_mut() {
                *sample = rng.random_range(-1.0..=1.0);
            }
        }
        out
    }
}
