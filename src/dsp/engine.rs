//! Dynamic streamer: a live, reconfigurable signal graph.
//!
//! The control side owns a [`DynamicStreamer`] and changes its parameters;
//! the audio side pulls frames through a [`StreamHandle`]. Every accepted
//! change builds a complete new graph off the audio path and publishes it
//! with a single atomic swap, so the puller sees either the old graph or
//! the new one, never a half-built mix. A rejected change leaves both the
//! parameters and the playing graph untouched.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, TryLockError};
use std::time::Duration;

use arc_swap::ArcSwap;
use tracing::{debug, warn};

use crate::chord::ChordType;
use crate::error::{ConfigError, SynthError};
use crate::pitch::Pitch;
use crate::settings::{
    ChordSettings, EnvelopeSettings, OvertoneSettings, StreamerSettings, TremoloSettings,
};

use super::composite::build_graph;
use super::envelope::{release, LevelProbe};
use super::oscillator::{Generator, Waveform};
use super::sample_rate::SampleRate;
use super::stream::{BoxedStreamer, Frame, Silence, Streamer};
use super::transition::TransitionType;

/// One published graph. The lock is only ever contended when two pullers
/// race for the same graph.
struct GraphCell(Mutex<BoxedStreamer>);

impl GraphCell {
    fn new(graph: BoxedStreamer) -> Self {
        GraphCell(Mutex::new(graph))
    }

    fn stream(&self, frames: &mut [Frame]) -> (usize, bool) {
        match self.0.try_lock() {
            Ok(mut graph) => graph.stream(frames),
            Err(TryLockError::WouldBlock) => Silence.stream(frames),
            Err(TryLockError::Poisoned(_)) => {
                warn!("signal graph lock poisoned, stopping stream");
                (0, false)
            }
        }
    }
}

/// A previously published graph kept playing underneath a release fade.
struct Retired(Arc<GraphCell>);

impl Streamer for Retired {
    fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool) {
        self.0.stream(frames)
    }
}

/// State visible to both the control and the audio side.
struct Shared {
    graph: ArcSwap<GraphCell>,
    silenced: AtomicBool,
}

impl Shared {
    fn stream(&self, frames: &mut [Frame]) -> (usize, bool) {
        if self.silenced.load(Ordering::Acquire) {
            return Silence.stream(frames);
        }
        self.graph.load().stream(frames)
    }

    fn publish(&self, graph: BoxedStreamer) {
        self.graph.store(Arc::new(GraphCell::new(graph)));
    }
}

/// Audio-side view of a [`DynamicStreamer`].
///
/// Cheap to clone and safe to move to the audio thread. Pulling never
/// waits on the control side.
#[derive(Clone)]
pub struct StreamHandle {
    shared: Arc<Shared>,
}

impl Streamer for StreamHandle {
    fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool) {
        self.shared.stream(frames)
    }
}

/// A note source whose pitch, timbre and envelope can change while it plays.
pub struct DynamicStreamer {
    sample_rate: SampleRate,
    generator: Generator,
    settings: StreamerSettings,
    released: bool,
    /// Envelope level of the graph currently playing.
    probe: LevelProbe,
    shared: Arc<Shared>,
}

impl DynamicStreamer {
    /// Create a streamer playing `waveform`.
    pub fn new(
        sample_rate: SampleRate,
        pitch: Pitch,
        pan: f64,
        gain: f64,
        waveform: Waveform,
    ) -> Result<Self, SynthError> {
        let generator = waveform.generator()?;
        Self::with_source(sample_rate, pitch, pan, gain, waveform, generator)
    }

    /// Create a streamer driven by a custom generator.
    pub fn with_generator(
        sample_rate: SampleRate,
        pitch: Pitch,
        pan: f64,
        gain: f64,
        generator: Generator,
    ) -> Result<Self, SynthError> {
        Self::with_source(sample_rate, pitch, pan, gain, Waveform::Unknown, generator)
    }

    /// Create a streamer from a full settings record.
    pub fn from_settings(sample_rate: SampleRate, settings: StreamerSettings) -> Result<Self, SynthError> {
        let generator = settings.waveform.generator()?;
        Self::build(sample_rate, generator, settings)
    }

    fn with_source(
        sample_rate: SampleRate,
        pitch: Pitch,
        pan: f64,
        gain: f64,
        waveform: Waveform,
        generator: Generator,
    ) -> Result<Self, SynthError> {
        let settings = StreamerSettings {
            pitch,
            pan,
            gain,
            waveform,
            ..StreamerSettings::default()
        };
        Self::build(sample_rate, generator, settings)
    }

    fn build(sample_rate: SampleRate, generator: Generator, settings: StreamerSettings) -> Result<Self, SynthError> {
        let probe = LevelProbe::new(1.0);
        let params = settings.graph_params(sample_rate, Some(generator.clone()))?;
        let graph = build_graph(&params, Some(&probe))?;
        debug!(pitch = %settings.pitch, waveform = %settings.waveform, "streamer created");

        Ok(DynamicStreamer {
            sample_rate,
            generator,
            settings,
            released: false,
            probe,
            shared: Arc::new(Shared {
                graph: ArcSwap::from_pointee(GraphCell::new(graph)),
                silenced: AtomicBool::new(false),
            }),
        })
    }

    /// A handle for pulling audio, typically from another thread.
    pub fn handle(&self) -> StreamHandle {
        StreamHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    // ---- mute ----

    pub fn is_silenced(&self) -> bool {
        self.shared.silenced.load(Ordering::Acquire)
    }

    /// Output zeros from the next pulled block on; the graph is kept.
    pub fn silence(&self) {
        self.shared.silenced.store(true, Ordering::Release);
    }

    pub fn unsilence(&self) {
        self.shared.silenced.store(false, Ordering::Release);
    }

    pub fn toggle_silence(&self) {
        self.shared.silenced.fetch_xor(true, Ordering::AcqRel);
    }

    // ---- parameters ----

    pub fn pan(&self) -> f64 {
        self.settings.pan
    }

    pub fn set_pan(&mut self, pan: f64) -> Result<(), ConfigError> {
        self.reconfigure(|s| s.pan = pan)
    }

    pub fn gain(&self) -> f64 {
        self.settings.gain
    }

    pub fn set_gain(&mut self, gain: f64) -> Result<(), ConfigError> {
        self.reconfigure(|s| s.gain = gain)
    }

    pub fn pitch(&self) -> &Pitch {
        &self.settings.pitch
    }

    pub fn set_pitch(&mut self, pitch: Pitch) -> Result<(), ConfigError> {
        self.reconfigure(|s| s.pitch = pitch)
    }

    /// Set the pitch by frequency, snapping to a named pitch when it matches one.
    pub fn set_frequency(&mut self, hertz: f64) -> Result<(), ConfigError> {
        self.set_pitch(Pitch::from_hertz(hertz))
    }

    pub fn waveform(&self) -> Waveform {
        self.settings.waveform
    }

    pub fn set_waveform(&mut self, waveform: Waveform) -> Result<(), ConfigError> {
        if waveform == self.settings.waveform {
            return Ok(());
        }
        let generator = waveform.generator()?;
        self.set_source(waveform, generator)
    }

    /// Replace the sample source with a custom generator. The waveform
    /// reads as [`Waveform::Unknown`] afterwards.
    pub fn set_generator(&mut self, generator: Generator) -> Result<(), ConfigError> {
        self.set_source(Waveform::Unknown, generator)
    }

    pub fn tremolo(&self) -> Option<TremoloSettings> {
        self.settings.tremolo
    }

    /// Modulate gain between `start_gain` and `end_gain` every `period`.
    pub fn set_tremolo(
        &mut self,
        period: Duration,
        start_gain: f64,
        end_gain: f64,
        pulsing: bool,
    ) -> Result<(), ConfigError> {
        let tremolo = TremoloSettings {
            period,
            start_gain,
            end_gain,
            pulsing,
        };
        self.reconfigure(|s| s.tremolo = Some(tremolo))
    }

    pub fn set_tremolo_off(&mut self) -> Result<(), ConfigError> {
        self.reconfigure(|s| s.tremolo = None)
    }

    pub fn envelope(&self) -> Option<EnvelopeSettings> {
        self.settings.envelope
    }

    pub fn set_envelope(&mut self, envelope: EnvelopeSettings) -> Result<(), ConfigError> {
        self.reconfigure(|s| s.envelope = Some(envelope))
    }

    pub fn set_envelope_off(&mut self) -> Result<(), ConfigError> {
        self.reconfigure(|s| s.envelope = None)
    }

    pub fn chord(&self) -> Option<ChordSettings> {
        self.settings.chord
    }

    pub fn set_chord(&mut self, chord: ChordType, arpeggio_delay: Duration) -> Result<(), ConfigError> {
        let chord = ChordSettings { chord, arpeggio_delay };
        self.reconfigure(|s| s.chord = Some(chord))
    }

    pub fn set_chord_off(&mut self) -> Result<(), ConfigError> {
        self.reconfigure(|s| s.chord = None)
    }

    pub fn overtones(&self) -> OvertoneSettings {
        self.settings.overtones
    }

    /// Stack `count` octaves above the root, each at `gain` relative to it.
    pub fn set_overtones(&mut self, count: usize, gain: f64) -> Result<(), ConfigError> {
        self.reconfigure(|s| s.overtones = OvertoneSettings { count, gain })
    }

    /// Snapshot of every parameter.
    pub fn settings(&self) -> &StreamerSettings {
        &self.settings
    }

    /// Replace every parameter at once, with a single rebuild.
    ///
    /// An [`Unknown`](Waveform::Unknown) waveform keeps the current custom
    /// generator.
    pub fn apply_settings(&mut self, settings: StreamerSettings) -> Result<(), ConfigError> {
        if settings == self.settings {
            return Ok(());
        }
        let generator = if settings.waveform == self.settings.waveform {
            self.generator.clone()
        } else {
            settings.waveform.generator()?
        };
        self.install(generator, settings)
    }

    // ---- note lifecycle ----

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Gain the envelope applied most recently, 1.0 without an envelope.
    pub fn envelope_level(&self) -> f64 {
        self.probe.get()
    }

    /// Restart the note from the beginning of its envelope and unmute.
    pub fn trigger_attack(&mut self) {
        self.released = false;
        if let Err(err) = self.install(self.generator.clone(), self.settings.clone()) {
            warn!(%err, "attack rebuild failed, keeping current graph");
        }
        self.unsilence();
        debug!(pitch = %self.settings.pitch, "attack");
    }

    /// Fade the playing graph out over the envelope's release time. Every
    /// voice holds the envelope level it has reached, on the audio thread,
    /// and fades from there; a chord note that has not entered yet stays
    /// silent.
    ///
    /// Releasing an already released note does nothing.
    pub fn trigger_release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        let (length, curve) = match self.settings.envelope {
            Some(env) => (self.sample_rate.n(env.release), env.release_curve),
            None => (0, TransitionType::Linear),
        };

        let current = self.shared.graph.load_full();
        let graph = release(Retired(current), length, curve, Some(&self.probe));
        self.shared.publish(graph);
        debug!(pitch = %self.settings.pitch, length, "release");
    }

    // ---- rebuilding ----

    /// Apply `change` to a copy of the settings and rebuild from it.
    /// Nothing is committed unless the rebuild succeeds.
    fn reconfigure(&mut self, change: impl FnOnce(&mut StreamerSettings)) -> Result<(), ConfigError> {
        let mut candidate = self.settings.clone();
        change(&mut candidate);
        if candidate == self.settings {
            return Ok(());
        }
        self.install(self.generator.clone(), candidate)
    }

    fn set_source(&mut self, waveform: Waveform, generator: Generator) -> Result<(), ConfigError> {
        let settings = StreamerSettings {
            waveform,
            ..self.settings.clone()
        };
        self.install(generator, settings)
    }

    fn install(&mut self, generator: Generator, settings: StreamerSettings) -> Result<(), ConfigError> {
        let probe = LevelProbe::new(1.0);
        let params = settings.graph_params(self.sample_rate, Some(generator.clone()))?;
        let graph = build_graph(&params, Some(&probe))?;

        self.generator = generator;
        self.settings = settings;
        self.probe = probe;
        // A released note stays quiet until the next attack.
        if self.released {
            self.silence();
        }
        self.shared.publish(graph);
        debug!(
            pitch = %self.settings.pitch,
            waveform = %self.settings.waveform,
            released = self.released,
            "signal graph rebuilt"
        );
        Ok(())
    }
}

impl Streamer for DynamicStreamer {
    fn stream(&mut self, frames: &mut [Frame]) -> (usize, bool) {
        self.shared.stream(frames)
    }
}
