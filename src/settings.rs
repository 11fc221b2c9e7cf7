//! Streamer settings: the user-facing parameter record.
//!
//! Settings are plain serializable values with times as
//! [`Duration`]s. They are converted to sample counts only when a signal
//! graph is built, so the same settings work at any sample rate.
//!
//! In JSON, durations are seconds and pitches are frequencies in Hz:
//!
//! ```json
//! {
//!   "pitch": 440.0,
//!   "waveform": "triangle",
//!   "tremolo": { "period": 0.25, "start_gain": 0.5, "end_gain": 1.0 },
//!   "chord": { "chord": "minor", "arpeggio_delay": 0.05 }
//! }
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::chord::ChordType;
use crate::dsp::composite::{ChordVoicing, GraphParams, Overtones};
use crate::dsp::envelope::Adsr;
use crate::dsp::oscillator::{Generator, Waveform};
use crate::dsp::sample_rate::SampleRate;
use crate::dsp::transition::TransitionType;
use crate::dsp::voice::{Tremolo, VoiceParams};
use crate::error::{ConfigError, SynthError};
use crate::pitch::Pitch;

/// Full parameter snapshot of a dynamic streamer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamerSettings {
    pub pitch: Pitch,
    /// -1 (left) to 1 (right).
    pub pan: f64,
    /// Linear gain, 1.0 is unity.
    pub gain: f64,
    pub waveform: Waveform,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tremolo: Option<TremoloSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub envelope: Option<EnvelopeSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chord: Option<ChordSettings>,
    pub overtones: OvertoneSettings,
}

impl Default for StreamerSettings {
    fn default() -> Self {
        StreamerSettings {
            pitch: Pitch::silence(),
            pan: 0.0,
            gain: 1.0,
            waveform: Waveform::Sine,
            tremolo: None,
            envelope: None,
            chord: None,
            overtones: OvertoneSettings::default(),
        }
    }
}

impl StreamerSettings {
    pub fn from_json(json: &str) -> Result<Self, SynthError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SynthError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Resolve these settings into sample-based graph parameters.
    pub(crate) fn graph_params(
        &self,
        sample_rate: SampleRate,
        generator: Option<Generator>,
    ) -> Result<GraphParams, ConfigError> {
        let tremolo = self
            .tremolo
            .map(|t| t.to_tremolo(sample_rate))
            .transpose()?;

        Ok(GraphParams {
            voice: VoiceParams {
                sample_rate,
                generator,
                pitch: self.pitch.clone(),
                pan: self.pan,
                gain: self.gain,
                tremolo,
                envelope: self.envelope.map(|e| e.to_adsr(sample_rate)),
            },
            chord: self.chord.map(|c| c.to_voicing(sample_rate)),
            overtones: Overtones {
                count: self.overtones.count,
                gain: self.overtones.gain,
            },
        })
    }
}

/// Periodic gain modulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TremoloSettings {
    /// Duration of one swing from start gain to end gain.
    #[serde(with = "seconds")]
    pub period: Duration,
    pub start_gain: f64,
    pub end_gain: f64,
    /// Restart each period from the start gain instead of swinging back.
    #[serde(default)]
    pub pulsing: bool,
}

impl TremoloSettings {
    pub(crate) fn to_tremolo(self, sample_rate: SampleRate) -> Result<Tremolo, ConfigError> {
        let length = sample_rate.n(self.period);
        if length == 0 {
            return Err(ConfigError::EmptyTremoloPeriod);
        }
        Ok(Tremolo {
            length,
            start_gain: self.start_gain,
            end_gain: self.end_gain,
            pulsing: self.pulsing,
        })
    }
}

/// Attack, decay, sustain and release.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeSettings {
    #[serde(with = "seconds")]
    pub attack: Duration,
    pub attack_curve: TransitionType,
    #[serde(with = "seconds")]
    pub decay: Duration,
    pub decay_curve: TransitionType,
    /// Held level after decay, conventionally in [0, 1].
    pub sustain: f64,
    #[serde(with = "seconds")]
    pub release: Duration,
    pub release_curve: TransitionType,
}

impl Default for EnvelopeSettings {
    fn default() -> Self {
        EnvelopeSettings {
            attack: Duration::ZERO,
            attack_curve: TransitionType::Linear,
            decay: Duration::ZERO,
            decay_curve: TransitionType::Linear,
            sustain: 1.0,
            release: Duration::ZERO,
            release_curve: TransitionType::Linear,
        }
    }
}

impl EnvelopeSettings {
    pub(crate) fn to_adsr(self, sample_rate: SampleRate) -> Adsr {
        Adsr {
            attack: sample_rate.n(self.attack),
            attack_curve: self.attack_curve,
            decay: sample_rate.n(self.decay),
            decay_curve: self.decay_curve,
            sustain: self.sustain,
            release: sample_rate.n(self.release),
            release_curve: self.release_curve,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChordSettings {
    pub chord: ChordType,
    /// Stagger between chord notes; zero strikes them together.
    #[serde(default, with = "seconds")]
    pub arpeggio_delay: Duration,
}

impl ChordSettings {
    pub(crate) fn to_voicing(self, sample_rate: SampleRate) -> ChordVoicing {
        ChordVoicing {
            chord: self.chord,
            arpeggio_delay: sample_rate.n(self.arpeggio_delay),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OvertoneSettings {
    /// Number of octaves stacked above the root.
    pub count: usize,
    /// Gain of each overtone relative to the root.
    pub gain: f64,
}

impl Default for OvertoneSettings {
    fn default() -> Self {
        OvertoneSettings { count: 0, gain: 1.0 }
    }
}

/// Durations as (fractional) seconds.
mod seconds {
    use std::time::Duration;

    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_document() {
        let s = StreamerSettings::from_json(
            r#"{
                "pitch": 440.0,
                "waveform": "triangle",
                "tremolo": { "period": 0.25, "start_gain": 0.5, "end_gain": 1.0 },
                "chord": { "chord": "minor", "arpeggio_delay": 0.05 }
            }"#,
        )
        .unwrap();
        assert_eq!(s.pitch.name(), "A4");
        assert_eq!(s.waveform, Waveform::Triangle);
        assert_eq!(s.gain, 1.0);
        assert_eq!(s.pan, 0.0);
        let tremolo = s.tremolo.unwrap();
        assert_eq!(tremolo.period, Duration::from_millis(250));
        assert!(!tremolo.pulsing);
        assert_eq!(s.chord.unwrap().chord, ChordType::Minor);
        assert_eq!(s.envelope, None);
        assert_eq!(s.overtones, OvertoneSettings::default());
    }

    #[test]
    fn envelope_fields_default_to_passthrough() {
        let s = StreamerSettings::from_json(r#"{ "envelope": { "attack": 0.1, "attack_curve": "exponential" } }"#)
            .unwrap();
        let env = s.envelope.unwrap();
        assert_eq!(env.attack, Duration::from_millis(100));
        assert_eq!(env.attack_curve, TransitionType::Exponential);
        assert_eq!(env.sustain, 1.0);
        assert_eq!(env.release, Duration::ZERO);
    }

    #[test]
    fn json_round_trip_preserves_settings() {
        let s = StreamerSettings {
            pitch: "E2".parse().unwrap(),
            pan: -0.5,
            gain: 0.8,
            waveform: Waveform::ReverseSawtooth,
            tremolo: None,
            envelope: Some(EnvelopeSettings {
                attack: Duration::from_millis(10),
                decay: Duration::from_millis(200),
                decay_curve: TransitionType::EqualPower,
                sustain: 0.6,
                release: Duration::from_millis(300),
                ..EnvelopeSettings::default()
            }),
            chord: Some(ChordSettings {
                chord: ChordType::MajorSeventh,
                arpeggio_delay: Duration::ZERO,
            }),
            overtones: OvertoneSettings { count: 2, gain: 0.3 },
        };
        let back = StreamerSettings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn rejects_negative_durations() {
        let err = StreamerSettings::from_json(r#"{ "tremolo": { "period": -1.0, "start_gain": 0, "end_gain": 1 } }"#)
            .unwrap_err();
        assert!(matches!(err, SynthError::Settings(_)));
    }

    #[test]
    fn resolves_to_sample_counts() {
        let sr = SampleRate::new(1000).unwrap();
        let s = StreamerSettings {
            tremolo: Some(TremoloSettings {
                period: Duration::from_millis(20),
                start_gain: 0.0,
                end_gain: 1.0,
                pulsing: true,
            }),
            envelope: Some(EnvelopeSettings {
                attack: Duration::from_millis(5),
                sustain: 0.5,
                ..EnvelopeSettings::default()
            }),
            chord: Some(ChordSettings {
                chord: ChordType::Major,
                arpeggio_delay: Duration::from_millis(30),
            }),
            ..StreamerSettings::default()
        };
        let p = s.graph_params(sr, None).unwrap();
        assert_eq!(p.voice.tremolo.unwrap().length, 20);
        assert_eq!(p.voice.envelope.unwrap().attack, 5);
        assert_eq!(p.chord.unwrap().arpeggio_delay, 30);
    }

    #[test]
    fn sub_sample_tremolo_is_rejected() {
        let sr = SampleRate::new(1000).unwrap();
        let s = StreamerSettings {
            tremolo: Some(TremoloSettings {
                period: Duration::from_micros(100),
                start_gain: 0.0,
                end_gain: 1.0,
                pulsing: false,
            }),
            ..StreamerSettings::default()
        };
        assert_eq!(s.graph_params(sr, None).unwrap_err(), ConfigError::EmptyTremoloPeriod);
    }
}
