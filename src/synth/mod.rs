pub mod amplifier;
pub mod buffer;
pub mod config;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod keyboard;
pub mod lfo;
pub mod modulation;
pub mod noise;
pub mod oscillator;
pub mod parameters;
pub mod prelude;
pub mod voice;

pub use buffer::SignalBuffer;
pub use config::SynthConfig;
pub use engine::SynthEngine;
pub use error::{ConfigurationError, RenderError, ValidationError};
pub use parameters::{AdsrParams, PartialVoiceParameters, VoiceParameters};
pub use voice::{ParameterSnapshot, Voice};
