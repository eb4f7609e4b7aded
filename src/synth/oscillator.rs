use super::buffer::SignalBuffer;
use super::config::SynthConfig;
use super::prelude::PI;

/// Per-sample pitch offset in semitones: the static tuning plus the external
/// modulation input scaled by mod depth. Modulation is semitone-equivalent,
/// applied before the frequency conversion.
fn semitone_offset(tuning: f32, mod_depth: f32, modulation: f32) -> f32 {
    tuning + mod_depth * modulation
}

/// Sine voltage-controlled oscillator. Stateless per render: phase starts at
/// zero at the top of every buffer, so identical inputs give identical
/// output.
#[derive(Debug, Clone, Copy)]
pub struct SineVco {
    sample_rate: f32,
    batch_size: usize,
    buffer_size: usize,
}

impl SineVco {
    pub fn new(config: &SynthConfig) -> Self {
        Self {
            sample_rate: config.sample_rate as f32,
            batch_size: config.batch_size,
            buffer_size: config.buffer_size(),
        }
    }

    /// `frequency`, `tuning` and `mod_depth` carry one value per batch item.
    /// `modulation`, when present, is an audio-rate buffer of the render
    /// shape; `None` means no pitch modulation.
    pub fn render(
        &self,
        frequency: &[f32],
        tuning: &[f32],
        mod_depth: &[f32],
        modulation: Option<&SignalBuffer>,
    ) -> SignalBuffer {
        debug_assert_eq!(frequency.len(), self.batch_size);
        let mut out = SignalBuffer::zeros(self.batch_size, self.buffer_size);
        for b in 0..self.batch_size {
            let mod_row = modulation.map(|m| m.row(b));
            let mut phase = 0.0f32;
            for (i, sample) in out.row_mut(b).iter_mut().enumerate() {
                *sample = phase.sin();
                let mod_value = mod_row.map_or(0.0, |row| row[i]);
                let semis = semitone_offset(tuning[b], mod_depth[b], mod_value);
                let inst_frequency = frequency[b] * (semis / 12.0).exp2();
                phase += 2.0 * PI * inst_frequency / self.sample_rate;
            }
        }
        out
    }
}

/// Oscillator that morphs continuously from square (`shape = 0`) to sawtooth
/// (`shape = 1`). Band-limited: the number of partials is capped by the
/// highest frequency the current parameters can reach, keeping aliasing at
/// an acceptable level.
#[derive(Debug, Clone, Copy)]
pub struct SquareSawVco {
    /// Morph position in [0, 1]. Clamped on render.
    pub shape: f32,
    sample_rate: f32,
    batch_size: usize,
    buffer_size: usize,
}

impl SquareSawVco {
    pub fn new(config: &SynthConfig, shape: f32) -> Self {
        Self {
            shape,
            sample_rate: config.sample_rate as f32,
            batch_size: config.batch_size,
            buffer_size: config.buffer_size(),
        }
    }

    /// Partials cap for the band-limited waveshape: `12000 / (f * log10 f)`
    /// evaluated at the highest reachable frequency.
    fn partials_constant(&self, frequency: f32, tuning: f32, mod_depth: f32) -> f32 {
        let max_frequency = (frequency * ((tuning + mod_depth) / 12.0).exp2()).max(2.0);
        12_000.0 / (max_frequency * max_frequency.log10())
    }

    pub fn render(
        &self,
        frequency: &[f32],
        tuning: &[f32],
        mod_depth: &[f32],
        modulation: Option<&SignalBuffer>,
    ) -> SignalBuffer {
        debug_assert_eq!(frequency.len(), self.batch_size);
        let shape = self.shape.clamp(0.0, 1.0);
        let mut out = SignalBuffer::zeros(self.batch_size, self.buffer_size);
        for b in 0..self.batch_size {
            let mod_row = modulation.map(|m| m.row(b));
            let partials = self.partials_constant(frequency[b], tuning[b], mod_depth[b]);
            let mut phase = 0.0f32;
            for (i, sample) in out.row_mut(b).iter_mut().enumerate() {
                let square = (PI * partials * phase.sin() / 2.0).tanh();
                *sample = (1.0 - shape / 2.0) * square * (1.0 + shape * phase.cos());
                let mod_value = mod_row.map_or(0.0, |row| row[i]);
                let semis = semitone_offset(tuning[b], mod_depth[b], mod_value);
                let inst_frequency = frequency[b] * (semis / 12.0).exp2();
                phase += 2.0 * PI * inst_frequency / self.sample_rate;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SynthConfig {
        SynthConfig::new(1, 44_100, 0.01).unwrap()
    }

    #[test]
    fn sine_starts_at_zero_phase() {
        let vco = SineVco::new(&config());
        let out = vco.render(&[440.0], &[0.0], &[0.0], None);
        assert_eq!(out.row(0)[0], 0.0);
        assert!(out.iter().all(|s| (-1.0..=1.0).contains(&s)));
    }

    #[test]
    fn square_saw_output_is_bounded_for_any_shape() {
        for shape in [0.0, 0.25, 0.5, 1.0] {
            let vco = SquareSawVco::new(&config(), shape);
            let out = vco.render(&[220.0], &[0.0], &[0.0], None);
            // Morph bound from the waveshape: |out| <= (1 - s/2)(1 + s) < 1.13
            assert!(out.iter().all(|s| s.abs() <= 1.5), "shape {shape}");
        }
    }

    #[test]
    fn tuning_shifts_pitch_up() {
        let vco = SineVco::new(&config());
        let base = vco.render(&[440.0], &[0.0], &[0.0], None);
        let octave = vco.render(&[440.0], &[12.0], &[0.0], None);
        let same = vco.render(&[880.0], &[0.0], &[0.0], None);
        assert_ne!(base, octave);
        assert_eq!(octave, same);
    }
}
