use super::prelude::midi_to_hz;

/// Turns MIDI note numbers into oscillator frequencies and passes note
/// durations through. Pure: no state beyond the batch shape it was built
/// for.
#[derive(Debug, Clone, Copy)]
pub struct MonophonicKeyboard;

impl MonophonicKeyboard {
    pub fn new() -> Self {
        Self
    }

    /// Equal temperament: `freq = 440 * 2^((note - 69) / 12)`.
    pub fn trigger(&self, midi_note: &[f32], duration: &[f32]) -> (Vec<f32>, Vec<f32>) {
        let frequency = midi_note.iter().map(|&note| midi_to_hz(note)).collect();
        (frequency, duration.to_vec())
    }
}

impl Default for MonophonicKeyboard {
    fn default() -> Self {
        Self::new()
    }
}
