pub mod synth;

pub use synth::{
    AdsrParams, ParameterSnapshot, PartialVoiceParameters, SignalBuffer, SynthConfig, SynthEngine,
    VoiceParameters,
};
