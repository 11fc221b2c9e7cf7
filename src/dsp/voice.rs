//! Voice: one oscillator run through pan, gain, tremolo and envelope.

use std::fmt;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::pitch::Pitch;

use super::envelope::{attack_decay_sustain, Adsr, LevelProbe};
use super::oscillator::Generator;
use super::sample_rate::SampleRate;
use super::stages::{Gain, Pan};
use super::stream::BoxedStreamer;
use super::tremolo::tremolo;

/// Tremolo timing in samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tremolo {
    /// Samples per swing.
    pub length: usize,
    pub start_gain: f64,
    pub end_gain: f64,
    pub pulsing: bool,
}

/// Everything needed to build a single voice pipeline.
#[derive(Clone)]
pub struct VoiceParams {
    pub sample_rate: SampleRate,
    pub generator: Option<Generator>,
    pub pitch: Pitch,
    pub pan: f64,
    /// Linear gain, 1.0 is unity.
    pub gain: f64,
    pub tremolo: Option<Tremolo>,
    pub envelope: Option<Adsr>,
}

impl PartialEq for VoiceParams {
    fn eq(&self, other: &Self) -> bool {
        let same_generator = match (&self.generator, &other.generator) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_generator
            && self.sample_rate == other.sample_rate
            && self.pitch == other.pitch
            && self.pan == other.pan
            && self.gain == other.gain
            && self.tremolo == other.tremolo
            && self.envelope == other.envelope
    }
}

impl fmt::Debug for VoiceParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoiceParams")
            .field("sample_rate", &self.sample_rate)
            .field("generator", &self.generator.as_ref().map(|_| "<generator>"))
            .field("pitch", &self.pitch)
            .field("pan", &self.pan)
            .field("gain", &self.gain)
            .field("tremolo", &self.tremolo)
            .field("envelope", &self.envelope)
            .finish()
    }
}

/// Build the pipeline for one voice:
/// oscillator → pan → gain → tremolo → attack/decay/sustain.
///
/// Stages that would have no effect are left out. `probe` receives the
/// envelope level when an envelope is present.
pub fn build_voice(params: &VoiceParams, probe: Option<&LevelProbe>) -> Result<BoxedStreamer, ConfigError> {
    let generator = params.generator.as_ref().ok_or(ConfigError::MissingGenerator)?;
    if !(-1.0..=1.0).contains(&params.pan) {
        return Err(ConfigError::PanOutOfRange(params.pan));
    }

    let mut streamer = generator(params.sample_rate, params.pitch.hertz())?;

    if params.pan != 0.0 {
        streamer = Box::new(Pan::new(streamer, params.pan));
    }

    if params.gain != 1.0 {
        streamer = Box::new(Gain::new(streamer, params.gain));
    }

    if let Some(t) = params.tremolo {
        streamer = Box::new(tremolo(streamer, t.length, t.start_gain, t.end_gain, t.pulsing));
    }

    if let Some(adsr) = &params.envelope {
        streamer = attack_decay_sustain(streamer, adsr, probe);
    }

    Ok(streamer)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::dsp::stream::testing::Constant;

    /// A generator that ignores frequency and emits constant DC.
    pub fn dc(value: f64) -> Generator {
        Arc::new(move |_: SampleRate, _: f64| -> Result<BoxedStreamer, ConfigError> {
            Ok(Box::new(Constant(value)))
        })
    }

    pub fn params(generator: Generator) -> VoiceParams {
        VoiceParams {
            sample_rate: SampleRate::new(1000).unwrap(),
            generator: Some(generator),
            pitch: "A4".parse().unwrap(),
            pan: 0.0,
            gain: 1.0,
            tremolo: None,
            envelope: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::dsp::oscillator::Waveform;
    use crate::dsp::stream::testing::{left, pull};
    use crate::dsp::transition::TransitionType;

    #[test]
    fn bare_voice_is_raw_generator() {
        let mut v = build_voice(&params(dc(0.5)), None).unwrap();
        assert_eq!(pull(&mut v, 4), vec![[0.5, 0.5]; 4]);
    }

    #[test]
    fn pan_and_gain_apply() {
        let mut p = params(dc(1.0));
        p.pan = 0.5;
        p.gain = 0.5;
        let mut v = build_voice(&p, None).unwrap();
        assert_eq!(pull(&mut v, 2), vec![[0.25, 0.5]; 2]);
    }

    #[test]
    fn rejects_pan_out_of_range() {
        let mut p = params(dc(1.0));
        p.pan = 1.5;
        assert!(matches!(build_voice(&p, None), Err(ConfigError::PanOutOfRange(x)) if x == 1.5));
        p.pan = -1.0;
        assert!(build_voice(&p, None).is_ok());
    }

    #[test]
    fn requires_generator() {
        let mut p = params(dc(1.0));
        p.generator = None;
        assert!(matches!(build_voice(&p, None), Err(ConfigError::MissingGenerator)));
    }

    #[test]
    fn generator_errors_propagate() {
        let mut p = params(Waveform::Sine.generator().unwrap());
        p.pitch = Pitch::from_hertz(600.0);
        assert!(matches!(
            build_voice(&p, None),
            Err(ConfigError::FrequencyOutOfRange { sample_rate: 1000, .. })
        ));
    }

    #[test]
    fn tremolo_then_envelope() {
        let mut p = params(dc(1.0));
        p.tremolo = Some(Tremolo {
            length: 2,
            start_gain: 0.0,
            end_gain: 1.0,
            pulsing: false,
        });
        p.envelope = Some(Adsr {
            attack: 0,
            attack_curve: TransitionType::Linear,
            decay: 0,
            decay_curve: TransitionType::Linear,
            sustain: 0.5,
            release: 0,
            release_curve: TransitionType::Linear,
        });
        let probe = LevelProbe::new(0.0);
        let mut v = build_voice(&p, Some(&probe)).unwrap();
        assert_eq!(left(&pull(&mut v, 4)), vec![0.0, 0.25, 0.5, 0.25]);
        assert_eq!(probe.get(), 0.5);
    }

    #[test]
    fn equality_tracks_generator_identity() {
        let g = dc(1.0);
        assert_eq!(params(g.clone()), params(g));
        assert_ne!(params(dc(1.0)), params(dc(1.0)));
    }
}
