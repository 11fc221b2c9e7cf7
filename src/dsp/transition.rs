//! Transition curves and per-sample effects.
//!
//! A transition maps linear progress in [0, 1] to a shaped value. An effect
//! takes a stereo sample plus shaped progress and returns the processed
//! sample. Effect loops and chains combine the two.

use std::f64::consts::FRAC_PI_2;
use std::fmt;

use serde::{Deserialize, Serialize};

pub type TransitionFn = Box<dyn Fn(f64) -> f64 + Send + Sync>;

/// `(left, right, progress) -> (left, right)`
pub type EffectFn = Box<dyn Fn(f64, f64, f64) -> (f64, f64) + Send + Sync>;

/// Selectable curve shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionType {
    #[default]
    Linear,
    EqualPower,
    Exponential,
}

impl TransitionType {
    pub fn all() -> [TransitionType; 3] {
        [
            TransitionType::Linear,
            TransitionType::EqualPower,
            TransitionType::Exponential,
        ]
    }

    pub fn apply(self, progress: f64) -> f64 {
        match self {
            TransitionType::Linear => linear(progress),
            TransitionType::EqualPower => equal_power(progress),
            TransitionType::Exponential => exponential(progress),
        }
    }

    pub fn boxed(self) -> TransitionFn {
        Box::new(move |p| self.apply(p))
    }
}

impl fmt::Display for TransitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransitionType::Linear => "linear",
            TransitionType::EqualPower => "equal power",
            TransitionType::Exponential => "exponential",
        })
    }
}

pub fn linear(progress: f64) -> f64 {
    progress
}

/// Quarter-sine curve. Two sources crossfaded with this curve and its
/// mirror keep constant perceived loudness.
pub fn equal_power(progress: f64) -> f64 {
    (progress * FRAC_PI_2).sin()
}

pub fn exponential(progress: f64) -> f64 {
    progress * progress
}

/// Runs `f` from 0 up to 1 over the first half of the progress range, then
/// back down to 0 over the second half.
pub fn ping_pong<F>(f: F) -> impl Fn(f64) -> f64 + Send + Sync
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    move |progress| {
        if progress <= 0.5 {
            f(progress * 2.0)
        } else {
            f((1.0 - progress) * 2.0)
        }
    }
}

/// Scales both channels by a gain moving from `start` to `end` with progress.
pub fn gain_transition(start: f64, end: f64) -> impl Fn(f64, f64, f64) -> (f64, f64) + Send + Sync {
    move |l, r, progress| {
        let gain = start + (end - start) * progress;
        (l * gain, r * gain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curves_share_endpoints() {
        for t in TransitionType::all() {
            assert!(t.apply(0.0).abs() < 1e-12, "{t} must start at 0");
            assert!((t.apply(1.0) - 1.0).abs() < 1e-12, "{t} must end at 1");
        }
    }

    #[test]
    fn curve_midpoints() {
        assert_eq!(linear(0.5), 0.5);
        assert_eq!(exponential(0.5), 0.25);
        assert!((equal_power(0.5) - 0.5_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn ping_pong_rises_then_falls() {
        let tri = ping_pong(linear);
        assert_eq!(tri(0.0), 0.0);
        assert_eq!(tri(0.25), 0.5);
        assert_eq!(tri(0.5), 1.0);
        assert_eq!(tri(0.75), 0.5);
        assert_eq!(tri(1.0), 0.0);
    }

    #[test]
    fn ping_pong_keeps_curve_shape() {
        let sq = ping_pong(exponential);
        assert_eq!(sq(0.25), 0.25);
        assert_eq!(sq(0.75), 0.25);
    }

    #[test]
    fn gain_transition_interpolates() {
        let fx = gain_transition(1.0, 0.5);
        assert_eq!(fx(2.0, -2.0, 0.0), (2.0, -2.0));
        assert_eq!(fx(2.0, -2.0, 1.0), (1.0, -1.0));
        assert_eq!(fx(1.0, 1.0, 0.5), (0.75, 0.75));
    }

    #[test]
    fn boxed_matches_apply() {
        let f = TransitionType::Exponential.boxed();
        assert_eq!(f(0.3), TransitionType::Exponential.apply(0.3));
    }
}
