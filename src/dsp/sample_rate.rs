//! Sample rate and duration conversion.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SynthError;

/// Samples per second. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct SampleRate(u32);

impl SampleRate {
    pub fn new(hz: u32) -> Result<Self, SynthError> {
        if hz == 0 {
            return Err(SynthError::InvalidSampleRate(hz));
        }
        Ok(SampleRate(hz))
    }

    pub fn hz(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }

    /// Number of samples spanning `duration`, to the nearest sample.
    pub fn n(self, duration: Duration) -> usize {
        (duration.as_secs_f64() * self.as_f64()).round() as usize
    }

    /// Duration of `samples` samples.
    pub fn d(self, samples: usize) -> Duration {
        Duration::from_secs_f64(samples as f64 / self.as_f64())
    }

    /// Highest frequency this rate can represent without aliasing.
    pub fn nyquist(self) -> f64 {
        self.as_f64() / 2.0
    }
}

impl TryFrom<u32> for SampleRate {
    type Error = SynthError;

    fn try_from(hz: u32) -> Result<Self, Self::Error> {
        SampleRate::new(hz)
    }
}

impl From<SampleRate> for u32 {
    fn from(rate: SampleRate) -> Self {
        rate.0
    }
}

impl fmt::Display for SampleRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Hz", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero() {
        assert!(matches!(SampleRate::new(0), Err(SynthError::InvalidSampleRate(0))));
    }

    #[test]
    fn converts_durations() {
        let sr = SampleRate::new(48000).unwrap();
        assert_eq!(sr.n(Duration::from_millis(250)), 12000);
        assert_eq!(sr.n(Duration::ZERO), 0);
        // 0.29 * 100 is just under 29 in floating point.
        assert_eq!(SampleRate::new(100).unwrap().n(Duration::from_millis(290)), 29);
        assert_eq!(sr.d(24000), Duration::from_millis(500));
        assert_eq!(sr.nyquist(), 24000.0);
    }
}
