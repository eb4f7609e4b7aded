use super::error::ConfigurationError;

/// Immutable per-engine configuration. Created once at engine start; every
/// module derives its buffer shapes from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthConfig {
    pub batch_size: usize,
    pub sample_rate: u32,
    pub buffer_seconds: f32,
    /// Rate for slowly varying control signals (LFOs). Control buffers are
    /// upsampled to audio rate before they touch an audio signal.
    pub control_rate: u32,
}

impl SynthConfig {
    /// Control rate defaults to 1/100th of the sample rate, matching the
    /// usual control-signal resolution for this buffer scale.
    pub fn new(
        batch_size: usize,
        sample_rate: u32,
        buffer_seconds: f32,
    ) -> Result<Self, ConfigurationError> {
        Self::with_control_rate(batch_size, sample_rate, buffer_seconds, (sample_rate / 100).max(1))
    }

    pub fn with_control_rate(
        batch_size: usize,
        sample_rate: u32,
        buffer_seconds: f32,
        control_rate: u32,
    ) -> Result<Self, ConfigurationError> {
        if batch_size == 0 {
            return Err(ConfigurationError::NonPositive("batch_size"));
        }
        if sample_rate == 0 {
            return Err(ConfigurationError::NonPositive("sample_rate"));
        }
        if control_rate == 0 {
            return Err(ConfigurationError::NonPositive("control_rate"));
        }
        if !(buffer_seconds > 0.0) {
            return Err(ConfigurationError::NonPositive("buffer_seconds"));
        }
        let config = Self {
            batch_size,
            sample_rate,
            buffer_seconds,
            control_rate,
        };
        if config.buffer_size() == 0 {
            return Err(ConfigurationError::NonPositive("buffer_size"));
        }
        Ok(config)
    }

    /// Samples per batch item in a rendered audio buffer.
    pub fn buffer_size(&self) -> usize {
        (self.sample_rate as f32 * self.buffer_seconds).round() as usize
    }

    /// Samples per batch item in a control-rate buffer. Always at least one.
    pub fn control_buffer_size(&self) -> usize {
        ((self.control_rate as f32 * self.buffer_seconds).round() as usize).max(1)
    }
}

impl Default for SynthConfig {
    /// One voice, four seconds at 44.1 kHz.
    fn default() -> Self {
        Self::new(1, 44_100, 4.0).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_size_rounds_from_seconds() {
        let config = SynthConfig::new(2, 44_100, 4.0).unwrap();
        assert_eq!(config.buffer_size(), 176_400);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(SynthConfig::new(0, 44_100, 1.0).is_err());
        assert!(SynthConfig::new(1, 0, 1.0).is_err());
        assert!(SynthConfig::new(1, 44_100, 0.0).is_err());
        assert!(SynthConfig::new(1, 44_100, -1.0).is_err());
    }
}
