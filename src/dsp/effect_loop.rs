//! Endlessly repeating effect driven by sample position.

use super::stream::{Frame, Streamer};
use super::transition::{EffectFn, TransitionFn};

/// Applies an effect whose progress cycles every `length` samples.
///
/// Progress at absolute position `p` is `(p mod length) / length`, shaped
/// by the transition before the effect sees it. The loop never ends; the
/// only way to restart it is to build a new one.
pub struct EffectLoop<S> {
    source: S,
    position: usize,
    length: usize,
    transition: TransitionFn,
    effect: EffectFn,
}

impl<S: Streamer> EffectLoop<S> {
    /// A zero `length` is treated as one sample.
    pub fn new<T, E>(source: S, length: usize, transition: T, effect: E) -> Self
    where
        T: Fn(f64) -> f64 + Send + Sync + 'static,
        E: Fn(f64, f64, f64) -> (f64, f64) + Send + Sync + 'static,
    {
        EffectLoop {
            source,
            position: 0,
            length: length.max(1),
            transition: Box::new(transition),
            effect: Box::new(effect),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Shaped progress at an absolute sample position.
    pub fn progress_at(&self, position: usize) -> f64 {
        let raw = (position % self.length) as f64 / self.length as f64;
        (self.transition)(raw)
    }
}

impl<S: Streamer> Streamer for EffectLoop<S> {
    fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool) {
        let (n, ok) = self.source.stream(frames);
        for frame in &mut frames[..n] {
            let progress = self.progress_at(self.position);
            let (l, r) = (self.effect)(frame[0], frame[1], progress);
            *frame = [l, r];
            self.position = (self.position + 1) % self.length;
        }
        (n, ok)
    }
}
