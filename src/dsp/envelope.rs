//! ADSR envelope built from effect chains.
//!
//! Attack and decay form one non-looping chain that ends holding the
//! sustain level. Release is a separate chain substituted when the note is
//! let go, starting from whatever level the envelope had reached.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use super::effect_chain::EffectChain;
use super::stream::{BoxedStreamer, Silence, Streamer};
use super::transition::TransitionType;

/// Envelope timing in samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adsr {
    pub attack: usize,
    pub attack_curve: TransitionType,
    pub decay: usize,
    pub decay_curve: TransitionType,
    /// Level held after decay, normally in [0, 1].
    pub sustain: f64,
    pub release: usize,
    pub release_curve: TransitionType,
}

impl Adsr {
    /// An envelope that leaves the signal untouched until release.
    pub fn is_passthrough(&self) -> bool {
        self.attack == 0 && self.decay == 0 && self.sustain == 1.0
    }

    /// Gain in effect before the first sample is pulled.
    pub fn initial_level(&self) -> f64 {
        if self.is_passthrough() {
            1.0
        } else if self.attack > 0 {
            0.0
        } else if self.decay > 0 {
            1.0
        } else {
            self.sustain
        }
    }
}

/// Shared readout of an envelope's level, plus the released flag that
/// freezes the attack and decay stages.
///
/// The held level is written by the audio thread on every sample. After
/// release, the effective level is the held level scaled by the release
/// fade.
#[derive(Debug, Clone)]
pub struct LevelProbe {
    held: Arc<AtomicU64>,
    fade: Arc<AtomicU64>,
    released: Arc<AtomicBool>,
}

impl LevelProbe {
    pub fn new(level: f64) -> Self {
        LevelProbe {
            held: Arc::new(AtomicU64::new(level.to_bits())),
            fade: Arc::new(AtomicU64::new(1.0_f64.to_bits())),
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A probe with its own level that shares this probe's released flag.
    pub fn follower(&self) -> Self {
        LevelProbe {
            held: Arc::new(AtomicU64::new(self.held().to_bits())),
            fade: Arc::new(AtomicU64::new(1.0_f64.to_bits())),
            released: Arc::clone(&self.released),
        }
    }

    /// Gain currently applied by the envelope, release fade included.
    pub fn get(&self) -> f64 {
        self.held() * f64::from_bits(self.fade.load(Ordering::Relaxed))
    }

    fn held(&self) -> f64 {
        f64::from_bits(self.held.load(Ordering::Relaxed))
    }

    fn set(&self, level: f64) {
        self.held.store(level.to_bits(), Ordering::Relaxed);
    }

    fn set_fade(&self, fade: f64) {
        self.fade.store(fade.to_bits(), Ordering::Relaxed);
    }

    /// From now on, attack and decay stages reporting to this probe (or its
    /// followers) hold the gain they last applied.
    pub fn mark_released(&self) {
        self.released.store(true, Ordering::Release);
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::Acquire)
    }
}

/// Gain ramp from `start` to `end`, reporting each applied gain to `probe`.
/// Once the probe is released it freezes at the last gain it applied.
fn held_ramp(start: f64, end: f64, probe: Option<LevelProbe>) -> impl Fn(f64, f64, f64) -> (f64, f64) + Send + Sync {
    move |l, r, progress| {
        let gain = match &probe {
            Some(probe) if probe.is_released() => probe.held(),
            Some(probe) => {
                let gain = start + (end - start) * progress;
                probe.set(gain);
                gain
            }
            None => start + (end - start) * progress,
        };
        (l * gain, r * gain)
    }
}

/// Shape `source` with the attack and decay stages, then hold at sustain.
///
/// A passthrough envelope returns the source unwrapped. Once `probe` is
/// released the stages stop moving and hold their current gain.
pub fn attack_decay_sustain<S: Streamer + 'static>(
    source: S,
    adsr: &Adsr,
    probe: Option<&LevelProbe>,
) -> BoxedStreamer {
    if let Some(probe) = probe {
        probe.set(adsr.initial_level());
    }
    if adsr.is_passthrough() {
        return Box::new(source);
    }

    Box::new(
        EffectChain::builder(source)
            .append(adsr.attack, adsr.attack_curve.boxed(), held_ramp(0.0, 1.0, probe.cloned()))
            .append(
                adsr.decay,
                adsr.decay_curve.boxed(),
                held_ramp(1.0, adsr.sustain, probe.cloned()),
            )
            .looping(false)
            .build(),
    )
}

/// Fade `source` to silence over `length` samples.
///
/// The fade is relative: every envelope under `probe` is released and holds
/// the level it reached, and the fade scales that down from 1 to 0. A
/// zero-length release cuts straight to silence.
pub fn release<S: Streamer + 'static>(
    source: S,
    length: usize,
    curve: TransitionType,
    probe: Option<&LevelProbe>,
) -> BoxedStreamer {
    if let Some(probe) = probe {
        probe.mark_released();
    }
    if length == 0 {
        if let Some(probe) = probe {
            probe.set_fade(0.0);
        }
        return Box::new(Silence);
    }

    let probe = probe.cloned();
    Box::new(
        EffectChain::builder(source)
            .append(length, curve.boxed(), move |l, r, progress| {
                let fade = 1.0 - progress;
                if let Some(probe) = &probe {
                    probe.set_fade(fade);
                }
                (l * fade, r * fade)
            })
            .looping(false)
            .build(),
    )
}
