//! Static pan and gain stages.

use super::stream::{Frame, Streamer};

/// Balances a stereo source between channels.
///
/// `pan` runs from -1 (left only) to 1 (right only). Panning left
/// attenuates the right channel by `1 + pan`; panning right attenuates the
/// left channel by `1 - pan`.
pub struct Pan<S> {
    source: S,
    pan: f64,
}

impl<S: Streamer> Pan<S> {
    pub fn new(source: S, pan: f64) -> Self {
        Pan { source, pan }
    }
}

impl<S: Streamer> Streamer for Pan<S> {
    fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool) {
        let (n, ok) = self.source.stream(frames);
        if self.pan < 0.0 {
            frames[..n].iter_mut().for_each(|f| f[1] *= 1.0 + self.pan);
        } else if self.pan > 0.0 {
            frames[..n].iter_mut().for_each(|f| f[0] *= 1.0 - self.pan);
        }
        (n, ok)
    }
}

/// Linear amplification: every sample is multiplied by `gain`, so 1.0 is unity.
pub struct Gain<S> {
    source: S,
    gain: f64,
}

impl<S: Streamer> Gain<S> {
    pub fn new(source: S, gain: f64) -> Self {
        Gain { source, gain }
    }
}

impl<S: Streamer> Streamer for Gain<S> {
    fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool) {
        let (n, ok) = self.source.stream(frames);
        for f in &mut frames[..n] {
            f[0] *= self.gain;
            f[1] *= self.gain;
        }
        (n, ok)
    }
}
