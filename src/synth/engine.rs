use super::buffer::SignalBuffer;
use super::config::SynthConfig;
use super::error::{RenderError, ValidationError};
use super::parameters::{ParameterStore, PartialVoiceParameters, VoiceParameters};
use super::voice::{ParameterSnapshot, PitchMod, Voice};

/// The engine facade an external transport talks to. Owns one voice and its
/// parameter store; independent voices get independent engines with nothing
/// shared between them.
///
/// Both operations take `&self`, so one engine can sit behind an `Arc` and
/// serve updates and renders from different threads: the store is the only
/// shared mutable state, updates replace it atomically, and a render reads
/// one consistent snapshot at its start. Rendering itself is synchronous,
/// bounded CPU work with no I/O.
pub struct SynthEngine {
    config: SynthConfig,
    store: ParameterStore,
    voice: Voice,
}

impl SynthEngine {
    pub fn new(config: SynthConfig) -> Self {
        Self {
            config,
            store: ParameterStore::new(&config),
            voice: Voice::new(config),
        }
    }

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    /// Enable or disable vibrato on both oscillators.
    pub fn set_pitch_mod(&mut self, pitch_mod: Option<PitchMod>) {
        self.voice.set_pitch_mod(pitch_mod);
    }

    pub fn set_noise_seed(&mut self, seed: u64) {
        self.voice.set_noise_seed(seed);
    }

    /// Square-to-saw morph position of the second oscillator.
    pub fn set_shape(&mut self, shape: f32) {
        self.voice.set_shape(shape);
    }

    /// Merge a partial parameter update. Numeric out-of-range values are
    /// clamped and accepted; only structurally invalid input is rejected,
    /// and a rejected update leaves the store untouched.
    pub fn update_parameters(
        &self,
        partial: &PartialVoiceParameters,
    ) -> Result<VoiceParameters, ValidationError> {
        self.store.update(partial)
    }

    /// Render one buffer with the currently stored parameters. The snapshot
    /// reports exactly the values used, so the caller can tell what it got
    /// even if the store changed concurrently.
    pub fn render(&self) -> Result<(SignalBuffer, ParameterSnapshot), RenderError> {
        let params = self.store.snapshot();
        self.voice.render(&params)
    }
}
