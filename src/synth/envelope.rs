use super::buffer::SignalBuffer;
use super::config::SynthConfig;
use super::parameters::AdsrParams;

/// ADSR envelope generator. Produces a [0, 1] gain curve per batch item:
/// linear attack from 0 to 1 over `attack` seconds, linear decay from 1 to
/// the sustain level over `decay` seconds, constant sustain until the note
/// duration ends, then a linear release to 0 over `release` seconds.
///
/// When attack + decay exceeds the note duration the decay keeps its normal
/// slope and is cut short at note end, so the sustain phase has zero length
/// and the release ramps down from whatever level the decay reached. The
/// curve always hits 0 by the end of release; past the buffer it simply is
/// not computed.
#[derive(Debug, Clone, Copy)]
pub struct Adsr {
    sample_rate: f32,
    batch_size: usize,
    buffer_size: usize,
}

impl Adsr {
    pub fn new(config: &SynthConfig) -> Self {
        Self {
            sample_rate: config.sample_rate as f32,
            batch_size: config.batch_size,
            buffer_size: config.buffer_size(),
        }
    }

    pub fn render(&self, params: &AdsrParams, durations: &[f32]) -> SignalBuffer {
        debug_assert_eq!(durations.len(), self.batch_size);
        SignalBuffer::from_fn(self.batch_size, self.buffer_size, |b, i| {
            let t = i as f32 / self.sample_rate;
            level_at(params, durations[b], t)
        })
    }
}

/// Envelope level before the note ends (attack, decay, sustain).
fn held_level(params: &AdsrParams, t: f32) -> f32 {
    let AdsrParams {
        attack,
        decay,
        sustain,
        ..
    } = *params;
    if t < attack {
        t / attack
    } else if t < attack + decay {
        1.0 - (t - attack) / decay * (1.0 - sustain)
    } else {
        sustain
    }
}

fn level_at(params: &AdsrParams, duration: f32, t: f32) -> f32 {
    let level = if t < duration {
        held_level(params, t)
    } else {
        // Release: ramp from the level reached at note end down to 0.
        let elapsed = t - duration;
        if params.release <= 0.0 || elapsed >= params.release {
            0.0
        } else {
            held_level(params, duration) * (1.0 - elapsed / params.release)
        }
    };
    level.clamp(0.0, 1.0)
}
