//! Tremolo: a periodic gain swing built on [`EffectLoop`].

use super::effect_loop::EffectLoop;
use super::stream::Streamer;
use super::transition::{equal_power, gain_transition, linear, ping_pong};

/// Swing the gain of `source` between `start_gain` and `end_gain`.
///
/// A smooth tremolo rises and falls symmetrically, taking `length` samples
/// each way. A pulsing tremolo jumps back to `start_gain` every `length`
/// samples and follows the equal-power curve in between.
pub fn tremolo<S: Streamer>(
    source: S,
    length: usize,
    start_gain: f64,
    end_gain: f64,
    pulsing: bool,
) -> EffectLoop<S> {
    let effect = gain_transition(start_gain, end_gain);
    if pulsing {
        EffectLoop::new(source, length, equal_power, effect)
    } else {
        EffectLoop::new(source, length * 2, ping_pong(linear), effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::stream::testing::{left, pull, Constant};

    #[test]
    fn smooth_tremolo_is_symmetric() {
        let mut t = tremolo(Constant(1.0), 4, 0.0, 1.0, false);
        let out = left(&pull(&mut t, 9));
        assert_eq!(out, vec![0.0, 0.25, 0.5, 0.75, 1.0, 0.75, 0.5, 0.25, 0.0]);
    }

    #[test]
    fn pulsing_tremolo_restarts_each_period() {
        let mut t = tremolo(Constant(1.0), 4, 0.5, 1.0, true);
        assert_eq!(t.length(), 4);
        let out = left(&pull(&mut t, 8));
        assert_eq!(out[0], 0.5);
        assert_eq!(out[4], 0.5);
        assert!(out[1] < out[2] && out[2] < out[3], "rises within a period: {out:?}");
        assert_eq!(&out[..4], &out[4..]);
    }
}
