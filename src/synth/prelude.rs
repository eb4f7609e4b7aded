// Shared constants for the synth modules.

pub use core::f32::consts::PI;

/// Substituted for note durations and envelope segments that would
/// otherwise be zero or negative, so ramps never divide by zero.
pub const MIN_SECONDS: f32 = 1e-3;

/// Concert A, the equal-temperament reference pitch.
pub const A4_HZ: f32 = 440.0;

/// MIDI note number of concert A.
pub const A4_MIDI: f32 = 69.0;

/// Convert a MIDI note number (fractional notes allowed) to Hz.
pub fn midi_to_hz(note: f32) -> f32 {
    A4_HZ * ((note - A4_MIDI) / 12.0).exp2()
}
