//! Sequential timed effects, the engine behind envelopes.

use super::stream::{Frame, Streamer};
use super::transition::{EffectFn, TransitionFn};

struct Stage {
    length: usize,
    transition: TransitionFn,
    effect: EffectFn,
}

/// Runs a sequence of timed effect stages over a source.
///
/// Each stage lasts `length` samples, with progress climbing from
/// `1/length` to 1. When the last stage completes, a looping chain starts
/// over at the first stage; a non-looping chain freezes on the last stage
/// at progress 1 forever. Zero-length stages are skipped.
pub struct EffectChain<S> {
    source: S,
    stages: Vec<Stage>,
    index: usize,
    elapsed: usize,
    finalized: bool,
    looping: bool,
}

impl<S: Streamer> EffectChain<S> {
    pub fn builder(source: S) -> EffectChainBuilder<S> {
        EffectChainBuilder {
            source,
            stages: Vec::new(),
            looping: false,
        }
    }

    /// Index of the stage currently applied.
    pub fn stage_index(&self) -> usize {
        self.index
    }

    /// True once a non-looping chain has run through all its stages.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Advance one sample and return the shaped progress for it.
    fn next_progress(&mut self) -> f64 {
        if !self.finalized {
            self.elapsed += 1;
            let mut advanced = 0;
            while self.elapsed > self.stages[self.index].length {
                // An all-zero looping chain would spin forever.
                if advanced > self.stages.len() || !self.advance() {
                    self.finalized = true;
                    break;
                }
                self.elapsed = 1;
                advanced += 1;
            }
        }

        let stage = &self.stages[self.index];
        let raw = if self.finalized {
            1.0
        } else {
            self.elapsed as f64 / stage.length as f64
        };
        (stage.transition)(raw)
    }

    fn advance(&mut self) -> bool {
        if self.index + 1 < self.stages.len() {
            self.index += 1;
            true
        } else if self.looping {
            self.index = 0;
            true
        } else {
            false
        }
    }
}

impl<S: Streamer> Streamer for EffectChain<S> {
    fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool) {
        let (n, ok) = self.source.stream(frames);
        if self.stages.is_empty() {
            return (n, ok);
        }
        for frame in &mut frames[..n] {
            let progress = self.next_progress();
            let (l, r) = (self.stages[self.index].effect)(frame[0], frame[1], progress);
            *frame = [l, r];
        }
        (n, ok)
    }
}

pub struct EffectChainBuilder<S> {
    source: S,
    stages: Vec<Stage>,
    looping: bool,
}

impl<S: Streamer> EffectChainBuilder<S> {
    pub fn append<T, E>(mut self, length: usize, transition: T, effect: E) -> Self
    where
        T: Fn(f64) -> f64 + Send + Sync + 'static,
        E: Fn(f64, f64, f64) -> (f64, f64) + Send + Sync + 'static,
    {
        self.stages.push(Stage {
            length,
            transition: Box::new(transition),
            effect: Box::new(effect),
        });
        self
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn build(self) -> EffectChain<S> {
        EffectChain {
            source: self.source,
            stages: self.stages,
            index: 0,
            elapsed: 0,
            finalized: false,
            looping: self.looping,
        }
    }
}
