/// A batch of equally sized sample rows, row-major. This is the only
/// container that moves between modules: audio signals nominally in [-1, 1],
/// control and envelope signals in [0, 1].
///
/// Buffers are created fresh by the module that produces them and handed to
/// the next stage by reference; nothing retains one past the render it
/// serves.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalBuffer {
    batch_size: usize,
    samples: usize,
    data: Vec<f32>,
}

impl SignalBuffer {
    pub fn zeros(batch_size: usize, samples: usize) -> Self {
        Self {
            batch_size,
            samples,
            data: vec![0.0; batch_size * samples],
        }
    }

    /// Build a buffer by evaluating `f(batch_index, sample_index)`.
    pub fn from_fn(
        batch_size: usize,
        samples: usize,
        mut f: impl FnMut(usize, usize) -> f32,
    ) -> Self {
        let mut data = Vec::with_capacity(batch_size * samples);
        for b in 0..batch_size {
            for i in 0..samples {
                data.push(f(b, i));
            }
        }
        Self {
            batch_size,
            samples,
            data,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn same_shape(&self, other: &Self) -> bool {
        self.batch_size == other.batch_size && self.samples == other.samples
    }

    pub fn row(&self, batch: usize) -> &[f32] {
        let start = batch * self.samples;
        &self.data[start..start + self.samples]
    }

    pub fn row_mut(&mut self, batch: usize) -> &mut [f32] {
        let start = batch * self.samples;
        &mut self.data[start..start + self.samples]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(self.samples)
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.data.iter().copied()
    }

    pub fn map_in_place(&mut self, mut f: impl FnMut(f32) -> f32) {
        for sample in self.data.iter_mut() {
            *sample = f(*sample);
        }
    }

    pub fn clamp_in_place(&mut self, min: f32, max: f32) {
        self.map_in_place(|s| s.clamp(min, max));
    }

    /// Index of the first non-finite sample, if any. Used by the renderer to
    /// abort instead of handing a poisoned buffer to the caller.
    pub fn first_non_finite(&self) -> Option<(usize, usize)> {
        self.data
            .iter()
            .position(|s| !s.is_finite())
            .map(|pos| (pos / self.samples, pos % self.samples))
    }

    /// Root-mean-square over the whole batch.
    pub fn rms(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        let sum_sq: f32 = self.data.iter().map(|s| s * s).sum();
        (sum_sq / self.data.len() as f32).sqrt()
    }
}
