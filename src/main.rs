use std::error::Error;

use batchsynth::{PartialVoiceParameters, SynthConfig, SynthEngine};

/// Demo caller standing in for the external service layer: apply an optional
/// JSON parameter payload, render once, and persist each batch item as a
/// 16-bit WAV file.
///
/// Usage: `batchsynth ['{"midi_note": 60, "attack": 0.05}']`
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let engine = SynthEngine::new(SynthConfig::default());

    if let Some(payload) = std::env::args().nth(1) {
        let partial: PartialVoiceParameters = serde_json::from_str(&payload)?;
        engine.update_parameters(&partial)?;
    }

    let (audio, snapshot) = engine.render()?;
    println!("rendered with {}", serde_json::to_string(&snapshot)?);

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: engine.config().sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    for (b, row) in audio.rows().enumerate() {
        let path = format!("output_{}_{}.wav", snapshot.midi_note[b] as i32, b);
        let mut writer = hound::WavWriter::create(&path, spec)?;
        for &sample in row {
            writer.write_sample((sample * i16::MAX as f32) as i16)?;
        }
        writer.finalize()?;
        println!("wrote {path}");
    }
    Ok(())
}
