//! The pull interface between signal stages and the audio output.

/// A stereo sample pair, `[left, right]`.
pub type Frame = [f64; 2];

/// A source of stereo frames pulled block by block.
///
/// `stream` fills a prefix of `frames` and returns how many frames it wrote
/// and whether the source is still live. Sources in this crate are
/// conceptually infinite; `false` only signals a fatal upstream failure.
pub trait Streamer: Send {
    fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool);
}

pub type BoxedStreamer = Box<dyn Streamer>;

impl<S: Streamer + ?Sized> Streamer for Box<S> {
    fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool) {
        (**self).stream(frames)
    }
}

/// An endless run of true zeros.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silence;

impl Streamer for Silence {
    fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool) {
        frames.fill([0.0, 0.0]);
        (frames.len(), true)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// A DC source, handy for observing gain stages exactly.
    #[derive(Debug, Clone, Copy)]
    pub struct Constant(pub f64);

    impl Streamer for Constant {
        fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool) {
            frames.fill([self.0, self.0]);
            (frames.len(), true)
        }
    }

    /// Yields `len` frames of `value`, then nothing.
    #[derive(Debug, Clone, Copy)]
    pub struct Finite {
        pub value: f64,
        pub len: usize,
    }

    impl Streamer for Finite {
        fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool) {
            let n = frames.len().min(self.len);
            frames[..n].fill([self.value, self.value]);
            self.len -= n;
            (n, true)
        }
    }

    /// Pull `n` frames from `s` in one block.
    pub fn pull(s: &mut impl Streamer, n: usize) -> Vec<Frame> {
        let mut buf = vec![[f64::NAN, f64::NAN]; n];
        let (filled, ok) = s.stream(&mut buf);
        assert!(ok, "stream reported failure");
        buf.truncate(filled);
        buf
    }

    /// Left channel of `frames`.
    pub fn left(frames: &[Frame]) -> Vec<f64> {
        frames.iter().map(|f| f[0]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn silence_overwrites_everything() {
        let out = pull(&mut Silence, 64);
        assert_eq!(out.len(), 64);
        assert!(out.iter().all(|f| *f == [0.0, 0.0]));
    }

    #[test]
    fn boxed_streamer_delegates() {
        let mut boxed: BoxedStreamer = Box::new(Constant(0.25));
        assert_eq!(pull(&mut boxed, 3), vec![[0.25, 0.25]; 3]);
    }
}
