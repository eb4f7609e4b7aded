use std::sync::Arc;

use batchsynth::synth::keyboard::MonophonicKeyboard;
use batchsynth::synth::lfo::LfoShape;
use batchsynth::synth::noise::Noise;
use batchsynth::synth::voice::PitchMod;
use batchsynth::{PartialVoiceParameters, SynthConfig, SynthEngine};

#[test]
fn keyboard_follows_equal_temperament() {
    let keyboard = MonophonicKeyboard::new();
    for note in 0..=127 {
        let (freq, _) = keyboard.trigger(&[note as f32], &[1.0]);
        let expected = 440.0 * ((note as f32 - 69.0) / 12.0).exp2();
        assert!(
            (freq[0] - expected).abs() <= expected * 1e-6,
            "note {note}: {} vs {expected}",
            freq[0]
        );
    }
    let (freq, _) = keyboard.trigger(&[69.0], &[1.0]);
    assert_eq!(freq[0], 440.0);
}

#[test]
fn noise_is_deterministic_per_seed() {
    let config = SynthConfig::new(2, 44_100, 0.5).unwrap();
    let noise = Noise::new(&config);
    assert_eq!(noise.render(42), noise.render(42));
    assert_ne!(noise.render(42), noise.render(43));
    assert!(noise.render(42).iter().all(|s| (-1.0..=1.0).contains(&s)));
}

#[test]
fn rendered_buffer_has_config_shape_and_bounded_samples() {
    let engine = SynthEngine::new(SynthConfig::new(2, 44_100, 4.0).unwrap());
    let (audio, _) = engine.render().unwrap();
    assert_eq!(audio.batch_size(), 2);
    assert_eq!(audio.samples(), 176_400);
    assert!(audio.iter().all(|s| (-1.0..=1.0).contains(&s)));
}

#[test]
fn default_render_is_audible_and_attacks_from_silence() {
    let engine = SynthEngine::new(SynthConfig::default());
    let (audio, snapshot) = engine.render().unwrap();
    assert!(audio.rms() > 0.0);
    assert!(audio.row(0)[0].abs() < 1e-3);
    assert_eq!(snapshot.midi_note, vec![69.0]);
    assert_eq!(snapshot.frequency_hz, vec![440.0]);
    assert_eq!(snapshot.adsr.attack, 0.1);
}

#[test]
fn envelope_silences_the_tail_after_release() {
    // 1 s note + 0.3 s release inside a 2 s buffer: the last half second
    // must be pure silence.
    let engine = SynthEngine::new(SynthConfig::new(1, 8_000, 2.0).unwrap());
    let (audio, _) = engine.render().unwrap();
    let row = audio.row(0);
    let tail_start = 12_000; // 1.5 s at 8 kHz
    assert!(row[tail_start..].iter().all(|&s| s == 0.0));
    assert!(row[..tail_start].iter().any(|&s| s != 0.0));
}

#[test]
fn snapshot_reports_clamped_values() {
    let engine = SynthEngine::new(SynthConfig::new(1, 8_000, 1.0).unwrap());
    engine
        .update_parameters(&PartialVoiceParameters {
            attack: Some(2.0),
            ..Default::default()
        })
        .unwrap();
    let (_, snapshot) = engine.render().unwrap();
    assert_eq!(snapshot.adsr.attack, 1.0);
}

#[test]
fn repeated_renders_with_unchanged_parameters_match() {
    let engine = SynthEngine::new(SynthConfig::new(1, 8_000, 1.0).unwrap());
    let (first, _) = engine.render().unwrap();
    let (second, _) = engine.render().unwrap();
    assert_eq!(first, second);
}

#[test]
fn pitch_modulation_changes_the_output() {
    let config = SynthConfig::new(1, 8_000, 1.0).unwrap();
    let plain = SynthEngine::new(config);
    let mut vibrato = SynthEngine::new(config);
    vibrato.set_pitch_mod(Some(PitchMod {
        rate_hz: 5.0,
        shape: LfoShape::Sine,
    }));
    let (dry, _) = plain.render().unwrap();
    let (wet, _) = vibrato.render().unwrap();
    assert_ne!(dry, wet);
}

#[test]
fn engine_serves_updates_and_renders_across_threads() {
    let engine = Arc::new(SynthEngine::new(SynthConfig::new(1, 8_000, 0.5).unwrap()));
    let writer = {
        let engine = Arc::clone(&engine);
        std::thread::spawn(move || {
            for i in 0..50 {
                engine
                    .update_parameters(&PartialVoiceParameters {
                        sustain: Some(i as f32 / 50.0),
                        ..Default::default()
                    })
                    .unwrap();
            }
        })
    };
    for _ in 0..10 {
        let (audio, snapshot) = engine.render().unwrap();
        // Whatever snapshot the render saw, it was a consistent one.
        assert!((0.0..=1.0).contains(&snapshot.adsr.sustain));
        assert!(audio.iter().all(|s| s.is_finite()));
    }
    writer.join().unwrap();
}
