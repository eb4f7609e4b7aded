use batchsynth::synth::error::ValidationError;
use batchsynth::synth::parameters::{BatchInput, ParameterStore};
use batchsynth::{PartialVoiceParameters, SynthConfig};

fn store(batch_size: usize) -> ParameterStore {
    ParameterStore::new(&SynthConfig::new(batch_size, 44_100, 1.0).unwrap())
}

#[test]
fn first_snapshot_holds_documented_defaults() {
    let params = store(1).snapshot();
    assert_eq!(params.adsr.attack, 0.1);
    assert_eq!(params.adsr.decay, 0.2);
    assert_eq!(params.adsr.sustain, 0.7);
    assert_eq!(params.adsr.release, 0.3);
    assert_eq!(params.midi_note, vec![69.0]);
    assert_eq!(params.note_duration, vec![1.0]);
    assert_eq!(params.tuning, vec![0.0]);
    assert_eq!(params.mod_depth, vec![12.0]);
}

#[test]
fn out_of_range_adsr_is_clamped_not_rejected() {
    let store = store(1);
    let stored = store
        .update(&PartialVoiceParameters {
            attack: Some(1.5),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(stored.adsr.attack, 1.0);

    let stored = store
        .update(&PartialVoiceParameters {
            attack: Some(-0.2),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(stored.adsr.attack, 0.0);
}

#[test]
fn partial_update_keeps_omitted_fields() {
    let store = store(1);
    store
        .update(&PartialVoiceParameters {
            sustain: Some(0.5),
            ..Default::default()
        })
        .unwrap();
    let stored = store
        .update(&PartialVoiceParameters {
            attack: Some(0.2),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(stored.adsr.sustain, 0.5);
    assert_eq!(stored.adsr.attack, 0.2);
    // Untouched fields still carry their defaults.
    assert_eq!(stored.adsr.release, 0.3);
}

#[test]
fn midi_note_and_duration_are_clamped_to_their_domains() {
    let store = store(1);
    let stored = store
        .update(&PartialVoiceParameters {
            midi_note: Some(BatchInput::Scalar(200.0)),
            note_duration: Some(BatchInput::Scalar(-3.0)),
            mod_depth: Some(BatchInput::Scalar(-1.0)),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(stored.midi_note, vec![127.0]);
    assert!(stored.note_duration[0] > 0.0);
    assert_eq!(stored.mod_depth, vec![0.0]);
}

#[test]
fn per_voice_vectors_broadcast_or_match_the_batch() {
    let store = store(3);
    let stored = store
        .update(&PartialVoiceParameters {
            midi_note: Some(BatchInput::PerVoice(vec![60.0, 64.0, 67.0])),
            tuning: Some(BatchInput::PerVoice(vec![0.5])),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(stored.midi_note, vec![60.0, 64.0, 67.0]);
    assert_eq!(stored.tuning, vec![0.5, 0.5, 0.5]);
}

#[test]
fn wrong_vector_length_is_rejected_and_store_is_untouched() {
    let store = store(2);
    let err = store
        .update(&PartialVoiceParameters {
            midi_note: Some(BatchInput::PerVoice(vec![60.0, 64.0, 67.0])),
            sustain: Some(0.1),
            ..Default::default()
        })
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::BatchShape {
            field: "midi_note",
            expected: 2,
            got: 3
        }
    );
    // The failed update must not have applied its valid half either.
    let params = store.snapshot();
    assert_eq!(params.adsr.sustain, 0.7);
    assert_eq!(params.midi_note, vec![69.0, 69.0]);
}

#[test]
fn non_finite_values_are_structural_errors() {
    let store = store(1);
    let err = store
        .update(&PartialVoiceParameters {
            attack: Some(f32::NAN),
            ..Default::default()
        })
        .unwrap_err();
    assert_eq!(err, ValidationError::NonFinite { field: "attack" });

    let err = store
        .update(&PartialVoiceParameters {
            tuning: Some(BatchInput::Scalar(f32::INFINITY)),
            ..Default::default()
        })
        .unwrap_err();
    assert_eq!(err, ValidationError::NonFinite { field: "tuning" });
}

#[test]
fn partial_parameters_deserialize_from_request_json() {
    let partial: PartialVoiceParameters =
        serde_json::from_str(r#"{"midi_note": 60, "attack": 0.05, "tuning": [0.0, 1.0]}"#)
            .unwrap();
    assert_eq!(partial.midi_note, Some(BatchInput::Scalar(60.0)));
    assert_eq!(partial.attack, Some(0.05));
    assert_eq!(partial.tuning, Some(BatchInput::PerVoice(vec![0.0, 1.0])));
    assert_eq!(partial.release, None);
}
