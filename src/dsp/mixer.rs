//! Mixer: sums multiple streamers, optionally entering at a sample offset.

use super::stream::{BoxedStreamer, Frame, Streamer};

struct Track {
    streamer: BoxedStreamer,
    /// Mixer position at which this track becomes audible.
    start_at: usize,
}

/// A summing mixer.
///
/// Tracks are pulled in lockstep and added without normalization. A track
/// that comes up short or fails is dropped. The mixer itself never ends:
/// with no tracks it plays silence.
#[derive(Default)]
pub struct Mixer {
    tracks: Vec<Track>,
    position: usize,
    scratch: Vec<Frame>,
}

impl Mixer {
    pub fn new() -> Self {
        Mixer::default()
    }

    /// Add a track that plays from the next pulled sample.
    pub fn add(&mut self, streamer: BoxedStreamer) {
        self.add_delayed(streamer, 0);
    }

    /// Add a track that stays silent for `delay` samples of mixer output.
    pub fn add_delayed(&mut self, streamer: BoxedStreamer, delay: usize) {
        self.tracks.push(Track {
            streamer,
            start_at: self.position + delay,
        });
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl Streamer for Mixer {
    fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool) {
        frames.fill([0.0, 0.0]);
        let block_end = self.position + frames.len();
        if self.scratch.len() < frames.len() {
            self.scratch.resize(frames.len(), [0.0, 0.0]);
        }

        let position = self.position;
        let scratch = &mut self.scratch;
        self.tracks.retain_mut(|track| {
            if track.start_at >= block_end {
                return true;
            }
            let offset = track.start_at.saturating_sub(position);
            let wanted = frames.len() - offset;
            let (n, ok) = track.streamer.stream(&mut scratch[..wanted]);
            for (out, s) in frames[offset..offset + n].iter_mut().zip(&scratch[..n]) {
                out[0] += s[0];
                out[1] += s[1];
            }
            ok && n == wanted
        });

        self.position = block_end;
        (frames.len(), true)
    }
}
