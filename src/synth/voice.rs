use log::debug;
use serde::Serialize;

use super::amplifier::{upsample, Vca};
use super::buffer::SignalBuffer;
use super::config::SynthConfig;
use super::envelope::Adsr;
use super::error::{ConfigurationError, RenderError};
use super::keyboard::MonophonicKeyboard;
use super::lfo::{Lfo, LfoShape};
use super::modulation::ModulationMixer;
use super::noise::Noise;
use super::oscillator::{SineVco, SquareSawVco};
use super::parameters::{AdsrParams, VoiceParameters};

/// Fixed per-branch gains for the final sum: sine, square/saw, noise.
pub const BRANCH_GAINS: [f32; 3] = [1.0, 1.0, 0.25];

/// Default seed for the noise branch, kept stable so repeated renders with
/// unchanged parameters are bit-identical.
pub const DEFAULT_NOISE_SEED: u64 = 42;

/// Weighted sum of audio branches, hard-clipped to [-1, 1]. Weights are
/// fixed at construction, one per branch, in branch order.
#[derive(Debug, Clone)]
pub struct AudioMixer {
    curves: Vec<f32>,
}

impl AudioMixer {
    pub fn new(curves: Vec<f32>) -> Result<Self, ConfigurationError> {
        if curves.is_empty() {
            return Err(ConfigurationError::NonPositive("mixer input count"));
        }
        Ok(Self { curves })
    }

    pub fn mix(&self, inputs: &[&SignalBuffer]) -> Result<SignalBuffer, ConfigurationError> {
        if inputs.len() != self.curves.len() {
            return Err(ConfigurationError::InputCountMismatch {
                expected: self.curves.len(),
                got: inputs.len(),
            });
        }
        let first = inputs[0];
        let mut out = SignalBuffer::zeros(first.batch_size(), first.samples());
        for (input, &curve) in inputs.iter().zip(&self.curves) {
            if !input.same_shape(first) {
                return Err(ConfigurationError::ShapeMismatch {
                    expected_batch: first.batch_size(),
                    expected_samples: first.samples(),
                    got_batch: input.batch_size(),
                    got_samples: input.samples(),
                });
            }
            for b in 0..out.batch_size() {
                let in_row = input.row(b);
                for (sample, &x) in out.row_mut(b).iter_mut().zip(in_row) {
                    *sample += curve * x;
                }
            }
        }
        out.clamp_in_place(-1.0, 1.0);
        Ok(out)
    }
}

/// Optional vibrato: an LFO fed through the modulation mixer and upsampled
/// into the oscillators' pitch-modulation input. Depth in semitones comes
/// from the voice parameters' `mod_depth`.
#[derive(Debug, Clone, Copy)]
pub struct PitchMod {
    pub rate_hz: f32,
    pub shape: LfoShape,
}

/// The values a render actually ran with, captured post-clamping. The store
/// may change between a caller's update and its render; this snapshot is the
/// authoritative record of what was heard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSnapshot {
    pub midi_note: Vec<f32>,
    pub frequency_hz: Vec<f32>,
    pub note_duration: Vec<f32>,
    pub tuning: Vec<f32>,
    pub mod_depth: Vec<f32>,
    pub adsr: AdsrParams,
    pub noise_seed: u64,
}

/// One full signal chain: keyboard into oscillators and noise, shaped by the
/// ADSR envelope through the VCA, summed by the audio mixer. A voice owns
/// its modules and renders synchronously; it holds no state between renders.
pub struct Voice {
    config: SynthConfig,
    keyboard: MonophonicKeyboard,
    sine: SineVco,
    square_saw: SquareSawVco,
    noise: Noise,
    adsr: Adsr,
    lfo: Lfo,
    mod_mixer: ModulationMixer,
    vca: Vca,
    audio_mixer: AudioMixer,
    pitch_mod: Option<PitchMod>,
    noise_seed: u64,
}

impl Voice {
    pub fn new(config: SynthConfig) -> Self {
        Self {
            config,
            keyboard: MonophonicKeyboard::new(),
            sine: SineVco::new(&config),
            // Shape 1.0: pure sawtooth, the second oscillator's stock sound.
            square_saw: SquareSawVco::new(&config, 1.0),
            noise: Noise::new(&config),
            adsr: Adsr::new(&config),
            lfo: Lfo::new(&config),
            mod_mixer: ModulationMixer::new(vec![1.0])
                .unwrap_or_else(|_| unreachable!("one positive weight")),
            vca: Vca::new(),
            audio_mixer: AudioMixer::new(BRANCH_GAINS.to_vec())
                .unwrap_or_else(|_| unreachable!("three branch gains")),
            pitch_mod: None,
            noise_seed: DEFAULT_NOISE_SEED,
        }
    }

    pub fn set_pitch_mod(&mut self, pitch_mod: Option<PitchMod>) {
        self.pitch_mod = pitch_mod;
    }

    pub fn set_noise_seed(&mut self, seed: u64) {
        self.noise_seed = seed;
    }

    pub fn set_shape(&mut self, shape: f32) {
        self.square_saw.shape = shape.clamp(0.0, 1.0);
    }

    /// Render one buffer from a consistent parameter snapshot. Aborts with a
    /// `RenderError` instead of returning a buffer containing non-finite
    /// samples.
    pub fn render(
        &self,
        params: &VoiceParameters,
    ) -> Result<(SignalBuffer, ParameterSnapshot), RenderError> {
        let (frequency, duration) = self
            .keyboard
            .trigger(&params.midi_note, &params.note_duration);

        // Optional pitch modulation, rendered at control rate and stretched
        // to audio length before it reaches the oscillators.
        let modulation = match self.pitch_mod {
            Some(pitch_mod) => {
                let rates = vec![pitch_mod.rate_hz; self.config.batch_size];
                let lfo_out = self.lfo.render(&rates, pitch_mod.shape);
                let control = self.mod_mixer.mix(&[&lfo_out])?;
                Some(upsample(&control, self.config.buffer_size()))
            }
            None => None,
        };
        let modulation = modulation.as_ref();

        let sine_out = self
            .sine
            .render(&frequency, &params.tuning, &params.mod_depth, modulation);
        let square_saw_out =
            self.square_saw
                .render(&frequency, &params.tuning, &params.mod_depth, modulation);
        let noise_out = self.noise.render(self.noise_seed);

        let envelope = self.adsr.render(&params.adsr, &duration);
        let sine_shaped = self.vca.apply(&sine_out, &envelope)?;
        let square_saw_shaped = self.vca.apply(&square_saw_out, &envelope)?;
        let noise_shaped = self.vca.apply(&noise_out, &envelope)?;

        let audio = self
            .audio_mixer
            .mix(&[&sine_shaped, &square_saw_shaped, &noise_shaped])?;

        if let Some((batch, index)) = audio.first_non_finite() {
            return Err(RenderError::NonFiniteSample { batch, index });
        }

        debug!(
            "rendered {}x{} buffer, rms {:.4}",
            audio.batch_size(),
            audio.samples(),
            audio.rms()
        );
        let snapshot = ParameterSnapshot {
            midi_note: params.midi_note.clone(),
            frequency_hz: frequency,
            note_duration: params.note_duration.clone(),
            tuning: params.tuning.clone(),
            mod_depth: params.mod_depth.clone(),
            adsr: params.adsr,
            noise_seed: self.noise_seed,
        };
        Ok((audio, snapshot))
    }
}
