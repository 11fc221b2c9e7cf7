//! Anti-aliased oscillators using PolyBLEP, and the waveform registry.

use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

use super::sample_rate::SampleRate;
use super::stream::{BoxedStreamer, Frame, Streamer};

/// Builds an endless sample source for a sample rate and frequency in Hz.
pub type Generator = Arc<dyn Fn(SampleRate, f64) -> Result<BoxedStreamer, ConfigError> + Send + Sync>;

/// Supported waveform shapes.
///
/// `Unknown` marks a streamer driven by a custom [`Generator`]; it has no
/// generator of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    #[default]
    Sine,
    Triangle,
    Square,
    Sawtooth,
    ReverseSawtooth,
    Unknown,
}

impl Waveform {
    /// Every waveform that has a generator.
    pub fn all() -> [Waveform; 5] {
        [
            Waveform::Sine,
            Waveform::Triangle,
            Waveform::Square,
            Waveform::Sawtooth,
            Waveform::ReverseSawtooth,
        ]
    }

    /// The generator producing this waveform.
    pub fn generator(self) -> Result<Generator, ConfigError> {
        if self == Waveform::Unknown {
            return Err(ConfigError::UnsupportedWaveform(self));
        }
        let waveform = self;
        Ok(Arc::new(
            move |sample_rate: SampleRate, hertz: f64| -> Result<BoxedStreamer, ConfigError> {
                Ok(Box::new(Oscillator::new(waveform, sample_rate, hertz)?))
            },
        ))
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Waveform::Sine => "sine",
            Waveform::Triangle => "triangle",
            Waveform::Square => "square",
            Waveform::Sawtooth => "sawtooth",
            Waveform::ReverseSawtooth => "reversed sawtooth",
            Waveform::Unknown => "unknown",
        })
    }
}

/// A band-limited oscillator with anti-aliasing (PolyBLEP).
///
/// Writes the same sample to both channels. A 0 Hz oscillator is silent.
#[derive(Debug, Clone)]
pub struct Oscillator {
    waveform: Waveform,
    frequency: f64,
    phase: f64,
    /// Phase increment per sample.
    inc: f64,
}

impl Oscillator {
    /// Fails for `Unknown`, for negative frequencies and for frequencies at
    /// or above the Nyquist limit of `sample_rate`.
    pub fn new(waveform: Waveform, sample_rate: SampleRate, frequency: f64) -> Result<Self, ConfigError> {
        if waveform == Waveform::Unknown {
            return Err(ConfigError::UnsupportedWaveform(waveform));
        }
        if !(0.0..sample_rate.nyquist()).contains(&frequency) {
            return Err(ConfigError::FrequencyOutOfRange {
                hertz: frequency,
                sample_rate: sample_rate.hz(),
            });
        }
        Ok(Oscillator {
            waveform,
            frequency,
            phase: 0.0,
            inc: frequency / sample_rate.as_f64(),
        })
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Generate the next sample.
    pub fn next_sample(&mut self) -> f64 {
        if self.frequency == 0.0 {
            return 0.0;
        }

        let sample = match self.waveform {
            Waveform::Sine => self.sine(),
            Waveform::Triangle => self.triangle(),
            Waveform::Square => self.square(),
            Waveform::Sawtooth => self.sawtooth(),
            Waveform::ReverseSawtooth => -self.sawtooth(),
            Waveform::Unknown => 0.0,
        };

        self.phase += self.inc;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }

        sample
    }

    fn sine(&self) -> f64 {
        (2.0 * PI * self.phase).sin()
    }

    /// Rises from -1 to +1, then drops. PolyBLEP smooths the drop.
    fn sawtooth(&self) -> f64 {
        let naive = 2.0 * self.phase - 1.0;
        naive - poly_blep(self.phase, self.inc)
    }

    fn square(&self) -> f64 {
        let mut value = if self.phase < 0.5 { 1.0 } else { -1.0 };
        value += poly_blep(self.phase, self.inc);
        value -= poly_blep((self.phase + 0.5) % 1.0, self.inc);
        value
    }

    /// Piecewise linear: -1→+1 over the first half cycle, +1→-1 over the second.
    fn triangle(&self) -> f64 {
        if self.phase < 0.5 {
            4.0 * self.phase - 1.0
        } else {
            3.0 - 4.0 * self.phase
        }
    }
}

impl Streamer for Oscillator {
    fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool) {
        for frame in frames.iter_mut() {
            let s = self.next_sample();
            *frame = [s, s];
        }
        (frames.len(), true)
    }
}

/// PolyBLEP (Polynomial Band-Limited Step) anti-aliasing correction.
///
/// `t` is the phase [0, 1), `dt` is the phase increment per sample.
fn poly_blep(t: f64, dt: f64) -> f64 {
    if t < dt {
        let t = t / dt;
        2.0 * t - t * t - 1.0
    } else if t > 1.0 - dt {
        let t = (t - 1.0) / dt;
        t * t + 2.0 * t + 1.0
    } else {
        0.0
    }
}
