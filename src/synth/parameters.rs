use std::sync::Mutex;

use log::debug;
use serde::{Deserialize, Serialize};

use super::config::SynthConfig;
use super::error::ValidationError;
use super::prelude::MIN_SECONDS;

pub const DEFAULT_ATTACK: f32 = 0.1;
pub const DEFAULT_DECAY: f32 = 0.2;
pub const DEFAULT_SUSTAIN: f32 = 0.7;
pub const DEFAULT_RELEASE: f32 = 0.3;
pub const DEFAULT_MIDI_NOTE: f32 = 69.0;
pub const DEFAULT_DURATION: f32 = 1.0;
pub const DEFAULT_TUNING: f32 = 0.0;
pub const DEFAULT_MOD_DEPTH: f32 = 12.0;

/// A field that is either one value broadcast across the batch or one value
/// per batch item. Deserializes from a bare number or an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchInput {
    Scalar(f32),
    PerVoice(Vec<f32>),
}

impl BatchInput {
    /// Expand to exactly `batch_size` values. A vector of length one is
    /// treated as a broadcast; any other length mismatch is structural and
    /// rejected rather than clamped.
    fn resolve(
        &self,
        field: &'static str,
        batch_size: usize,
    ) -> Result<Vec<f32>, ValidationError> {
        let values = match self {
            BatchInput::Scalar(v) => vec![*v; batch_size],
            BatchInput::PerVoice(values) if values.len() == 1 => {
                vec![values[0]; batch_size]
            }
            BatchInput::PerVoice(values) => {
                if values.len() != batch_size {
                    return Err(ValidationError::BatchShape {
                        field,
                        expected: batch_size,
                        got: values.len(),
                    });
                }
                values.clone()
            }
        };
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ValidationError::NonFinite { field });
        }
        Ok(values)
    }
}

impl From<f32> for BatchInput {
    fn from(value: f32) -> Self {
        BatchInput::Scalar(value)
    }
}

/// ADSR envelope shape. Attack/decay/release are seconds, sustain is a
/// level; all four live in [0, 1] once stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdsrParams {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
}

impl Default for AdsrParams {
    fn default() -> Self {
        Self {
            attack: DEFAULT_ATTACK,
            decay: DEFAULT_DECAY,
            sustain: DEFAULT_SUSTAIN,
            release: DEFAULT_RELEASE,
        }
    }
}

/// One parameter-update request. Every field is optional: omitted fields
/// keep whatever the store last held. Deserializes from the caller's JSON
/// payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialVoiceParameters {
    pub midi_note: Option<BatchInput>,
    pub note_duration: Option<BatchInput>,
    pub tuning: Option<BatchInput>,
    pub mod_depth: Option<BatchInput>,
    pub attack: Option<f32>,
    pub decay: Option<f32>,
    pub sustain: Option<f32>,
    pub release: Option<f32>,
}

/// The fully resolved control values a render runs with. Per-batch fields
/// always hold exactly `batch_size` entries; every field is always defined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceParameters {
    pub midi_note: Vec<f32>,
    pub note_duration: Vec<f32>,
    pub tuning: Vec<f32>,
    pub mod_depth: Vec<f32>,
    pub adsr: AdsrParams,
}

impl VoiceParameters {
    pub fn defaults(batch_size: usize) -> Self {
        Self {
            midi_note: vec![DEFAULT_MIDI_NOTE; batch_size],
            note_duration: vec![DEFAULT_DURATION; batch_size],
            tuning: vec![DEFAULT_TUNING; batch_size],
            mod_depth: vec![DEFAULT_MOD_DEPTH; batch_size],
            adsr: AdsrParams::default(),
        }
    }

    /// Apply one partial update on top of these values, clamping each
    /// provided field to its domain. Structural errors leave `self` alone.
    fn apply(
        &self,
        partial: &PartialVoiceParameters,
        batch_size: usize,
    ) -> Result<Self, ValidationError> {
        let mut next = self.clone();
        if let Some(notes) = &partial.midi_note {
            next.midi_note = notes.resolve("midi_note", batch_size)?;
            for note in next.midi_note.iter_mut() {
                *note = note.round().clamp(0.0, 127.0);
            }
        }
        if let Some(durations) = &partial.note_duration {
            next.note_duration = durations.resolve("note_duration", batch_size)?;
            for duration in next.note_duration.iter_mut() {
                if *duration <= 0.0 {
                    *duration = MIN_SECONDS;
                }
            }
        }
        if let Some(tuning) = &partial.tuning {
            next.tuning = tuning.resolve("tuning", batch_size)?;
        }
        if let Some(depth) = &partial.mod_depth {
            next.mod_depth = depth.resolve("mod_depth", batch_size)?;
            for depth in next.mod_depth.iter_mut() {
                *depth = depth.max(0.0);
            }
        }
        next.adsr.attack = clamp_adsr("attack", partial.attack, next.adsr.attack)?;
        next.adsr.decay = clamp_adsr("decay", partial.decay, next.adsr.decay)?;
        next.adsr.sustain = clamp_adsr("sustain", partial.sustain, next.adsr.sustain)?;
        next.adsr.release = clamp_adsr("release", partial.release, next.adsr.release)?;
        Ok(next)
    }
}

fn clamp_adsr(
    field: &'static str,
    provided: Option<f32>,
    previous: f32,
) -> Result<f32, ValidationError> {
    match provided {
        None => Ok(previous),
        Some(value) if !value.is_finite() => Err(ValidationError::NonFinite { field }),
        Some(value) => Ok(value.clamp(0.0, 1.0)),
    }
}

/// The engine's single piece of shared mutable state: the current
/// `VoiceParameters`, replaced atomically on update and cloned atomically at
/// render start so a render never observes a half-applied update.
///
/// Out-of-range numeric values are clamped here, at the boundary, never
/// rejected; that clamp-don't-reject behavior is part of the public
/// contract. Only structurally invalid input (wrong per-voice vector length,
/// non-finite numbers) returns a `ValidationError`.
pub struct ParameterStore {
    batch_size: usize,
    current: Mutex<VoiceParameters>,
}

impl ParameterStore {
    /// A fresh store holds the documented defaults, so a render before any
    /// update is well defined.
    pub fn new(config: &SynthConfig) -> Self {
        Self {
            batch_size: config.batch_size,
            current: Mutex::new(VoiceParameters::defaults(config.batch_size)),
        }
    }

    /// Merge a partial update into the stored parameters and return the
    /// resulting full set. The swap happens under the lock in one step.
    pub fn update(
        &self,
        partial: &PartialVoiceParameters,
    ) -> Result<VoiceParameters, ValidationError> {
        let mut current = self.lock();
        let next = current.apply(partial, self.batch_size)?;
        *current = next.clone();
        debug!("parameters updated: {:?}", next.adsr);
        Ok(next)
    }

    /// The consistent parameter set a render should run with.
    pub fn snapshot(&self) -> VoiceParameters {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VoiceParameters> {
        // Stored values are always fully validated, so a poisoned lock still
        // guards consistent data.
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}
