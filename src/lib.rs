pub mod chord;
pub mod dsp;
pub mod error;
pub mod pitch;
pub mod settings;

pub use crate::chord::ChordType;
pub use crate::dsp::engine::{DynamicStreamer, StreamHandle};
pub use crate::dsp::oscillator::{Generator, Waveform};
pub use crate::dsp::sample_rate::SampleRate;
pub use crate::dsp::stream::{Frame, Streamer};
pub use crate::dsp::transition::TransitionType;
pub use crate::error::{ConfigError, SynthError};
pub use crate::pitch::Pitch;
pub use crate::settings::StreamerSettings;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
