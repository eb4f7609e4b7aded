use super::buffer::SignalBuffer;
use super::config::SynthConfig;
use super::prelude::PI;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LfoShape {
    Sine,
    Triangle,
    Saw,
    ReverseSaw,
    Square,
}

/// Low-frequency oscillator rendered at control rate, bipolar [-1, 1].
/// Control buffers are shorter than audio buffers; the VCA's upsampler
/// stretches them to audio length before they meet an audio signal.
#[derive(Debug, Clone, Copy)]
pub struct Lfo {
    control_rate: f32,
    batch_size: usize,
    control_buffer_size: usize,
}

impl Lfo {
    pub fn new(config: &SynthConfig) -> Self {
        Self {
            control_rate: config.control_rate as f32,
            batch_size: config.batch_size,
            control_buffer_size: config.control_buffer_size(),
        }
    }

    /// One frequency per batch item, phase reset to zero at buffer start.
    pub fn render(&self, frequency_hz: &[f32], shape: LfoShape) -> SignalBuffer {
        debug_assert_eq!(frequency_hz.len(), self.batch_size);
        SignalBuffer::from_fn(self.batch_size, self.control_buffer_size, |b, i| {
            let cycles = frequency_hz[b] * i as f32 / self.control_rate;
            let fract = cycles - cycles.floor();
            match shape {
                LfoShape::Sine => (2.0 * PI * cycles).sin(),
                LfoShape::Triangle => 1.0 - 4.0 * (fract - 0.5).abs(),
                LfoShape::Saw => 2.0 * fract - 1.0,
                LfoShape::ReverseSaw => 1.0 - 2.0 * fract,
                LfoShape::Square => {
                    if fract < 0.5 {
                        1.0
                    } else {
                        -1.0
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_stay_bipolar() {
        let config = SynthConfig::new(2, 44_100, 1.0).unwrap();
        let lfo = Lfo::new(&config);
        for shape in [
            LfoShape::Sine,
            LfoShape::Triangle,
            LfoShape::Saw,
            LfoShape::ReverseSaw,
            LfoShape::Square,
        ] {
            let out = lfo.render(&[2.0, 5.0], shape);
            assert_eq!(out.samples(), config.control_buffer_size());
            assert!(out.iter().all(|s| (-1.0..=1.0).contains(&s)), "{shape:?}");
        }
    }

    #[test]
    fn triangle_peaks_mid_cycle() {
        let config = SynthConfig::with_control_rate(1, 44_100, 1.0, 100).unwrap();
        let lfo = Lfo::new(&config);
        let out = lfo.render(&[1.0], LfoShape::Triangle);
        // 1 Hz at 100 Hz control rate: trough at start, peak at sample 50.
        assert!((out.row(0)[0] - -1.0).abs() < 1e-6);
        assert!((out.row(0)[50] - 1.0).abs() < 1e-6);
    }
}
