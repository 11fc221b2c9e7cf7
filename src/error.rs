use thiserror::Error;

use crate::dsp::oscillator::Waveform;

/// Top-level error for constructing streamers and loading settings.
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Sample rate must be positive, got {0}")]
    InvalidSampleRate(u32),
    #[error("Unknown pitch '{0}'")]
    UnknownPitch(String),
    #[error("Invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
}

/// A rejected parameter change. The streamer keeps its previous state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("streamer generator is empty")]
    MissingGenerator,
    #[error("pan should be between -1 (left channel) and 1 (right channel), got {0}")]
    PanOutOfRange(f64),
    #[error("waveform '{0}' has no generator")]
    UnsupportedWaveform(Waveform),
    #[error("frequency {hertz}Hz cannot be generated at {sample_rate}Hz sample rate")]
    FrequencyOutOfRange { hertz: f64, sample_rate: u32 },
    #[error("tremolo period must be at least one sample long")]
    EmptyTremoloPeriod,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_wraps_into_synth_error() {
        let err: SynthError = ConfigError::PanOutOfRange(1.5).into();
        assert!(matches!(err, SynthError::Config(ConfigError::PanOutOfRange(p)) if p == 1.5));
        assert_eq!(
            err.to_string(),
            "Configuration error: pan should be between -1 (left channel) and 1 (right channel), got 1.5"
        );
    }

    #[test]
    fn frequency_error_names_both_rates() {
        let err = ConfigError::FrequencyOutOfRange {
            hertz: 30000.0,
            sample_rate: 48000,
        };
        assert_eq!(
            err.to_string(),
            "frequency 30000Hz cannot be generated at 48000Hz sample rate"
        );
    }
}
