use super::buffer::SignalBuffer;
use super::error::ConfigurationError;

/// Voltage-controlled amplifier: elementwise product of an audio signal and
/// a gain curve. A control-rate gain curve (fewer samples per row) is
/// upsampled first; see [`upsample`] for the exact interpolation, which is
/// deterministic and part of the audible contract.
#[derive(Debug, Clone, Copy)]
pub struct Vca;

impl Vca {
    pub fn new() -> Self {
        Self
    }

    pub fn apply(
        &self,
        signal: &SignalBuffer,
        control: &SignalBuffer,
    ) -> Result<SignalBuffer, ConfigurationError> {
        if control.batch_size() != signal.batch_size() || control.samples() > signal.samples() {
            return Err(ConfigurationError::ShapeMismatch {
                expected_batch: signal.batch_size(),
                expected_samples: signal.samples(),
                got_batch: control.batch_size(),
                got_samples: control.samples(),
            });
        }
        let control = if control.samples() == signal.samples() {
            control.clone()
        } else {
            upsample(control, signal.samples())
        };
        let mut out = signal.clone();
        for b in 0..out.batch_size() {
            let gain_row = control.row(b);
            for (sample, &gain) in out.row_mut(b).iter_mut().zip(gain_row) {
                *sample *= gain;
            }
        }
        Ok(out)
    }
}

impl Default for Vca {
    fn default() -> Self {
        Self::new()
    }
}

/// Linear interpolation from `control.samples()` points up to `samples`
/// points per row. Endpoints map to endpoints: output index `i` reads
/// fractional source position `i * (m - 1) / (n - 1)` and lerps between its
/// two neighbors. A single-sample control row broadcasts as a constant.
pub fn upsample(control: &SignalBuffer, samples: usize) -> SignalBuffer {
    let m = control.samples();
    SignalBuffer::from_fn(control.batch_size(), samples, |b, i| {
        let row = control.row(b);
        if m == 1 || samples == 1 {
            return row[0];
        }
        let pos = i as f32 * (m - 1) as f32 / (samples - 1) as f32;
        let lo = pos.floor() as usize;
        let hi = (lo + 1).min(m - 1);
        let frac = pos - lo as f32;
        row[lo] * (1.0 - frac) + row[hi] * frac
    })
}
