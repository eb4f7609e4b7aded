use super::buffer::SignalBuffer;
use super::error::ConfigurationError;

/// Weighted sum of modulation sources, clamped to the [0, 1] control range.
/// The weight order is fixed at construction; callers must hand `mix` its
/// inputs in that same order. A count mismatch is a wiring error and is
/// reported, never silently truncated.
#[derive(Debug, Clone)]
pub struct ModulationMixer {
    weights: Vec<f32>,
}

impl ModulationMixer {
    pub fn new(weights: Vec<f32>) -> Result<Self, ConfigurationError> {
        if weights.is_empty() {
            return Err(ConfigurationError::NonPositive("mixer input count"));
        }
        for (index, &weight) in weights.iter().enumerate() {
            if weight < 0.0 {
                return Err(ConfigurationError::NegativeWeight { index, weight });
            }
        }
        Ok(Self { weights })
    }

    pub fn mix(&self, inputs: &[&SignalBuffer]) -> Result<SignalBuffer, ConfigurationError> {
        if inputs.len() != self.weights.len() {
            return Err(ConfigurationError::InputCountMismatch {
                expected: self.weights.len(),
                got: inputs.len(),
            });
        }
        let first = inputs[0];
        for input in &inputs[1..] {
            if !input.same_shape(first) {
                return Err(ConfigurationError::ShapeMismatch {
                    expected_batch: first.batch_size(),
                    expected_samples: first.samples(),
                    got_batch: input.batch_size(),
                    got_samples: input.samples(),
                });
            }
        }
        let mut out = SignalBuffer::zeros(first.batch_size(), first.samples());
        for (input, &weight) in inputs.iter().zip(&self.weights) {
            for b in 0..out.batch_size() {
                let in_row = input.row(b);
                for (sample, &x) in out.row_mut(b).iter_mut().zip(in_row) {
                    *sample += weight * x;
                }
            }
        }
        out.clamp_in_place(0.0, 1.0);
        Ok(out)
    }
}
