//! Composite voicing: chords and overtones layered over the root voice.
//!
//! Every extra voice is an independent pipeline built from a copy of the
//! root parameters with a shifted pitch, summed in a [`Mixer`]. A voice
//! that cannot be built (typically above Nyquist) is left out rather than
//! failing the whole stack.

use tracing::debug;

use crate::chord::ChordType;
use crate::error::ConfigError;

use super::envelope::LevelProbe;
use super::mixer::Mixer;
use super::stream::BoxedStreamer;
use super::voice::{build_voice, VoiceParams};

/// Chord voicing in samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChordVoicing {
    pub chord: ChordType,
    /// Stagger between successive chord notes; 0 plays them together.
    pub arpeggio_delay: usize,
}

impl ChordVoicing {
    /// Entry delay of the note at `index`. The stagger stops growing after
    /// the third note, so larger chords land their remaining notes together.
    pub fn entry_delay(&self, index: usize) -> usize {
        index.min(2) * self.arpeggio_delay
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overtones {
    pub count: usize,
    /// Gain multiplier applied to every overtone relative to the root.
    pub gain: f64,
}

impl Default for Overtones {
    fn default() -> Self {
        Overtones { count: 0, gain: 1.0 }
    }
}

/// The complete parameter record a signal graph is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphParams {
    pub voice: VoiceParams,
    pub chord: Option<ChordVoicing>,
    pub overtones: Overtones,
}

/// Build a whole signal graph from a parameter snapshot.
///
/// The root voice must build; chord notes and overtones are best effort.
/// The returned graph holds no reference to `params`. `probe` reads the
/// root envelope; the other voices follow its released flag.
pub fn build_graph(params: &GraphParams, probe: Option<&LevelProbe>) -> Result<BoxedStreamer, ConfigError> {
    let mut graph = build_voice(&params.voice, probe)?;

    if let Some(voicing) = &params.chord {
        graph = chord_mixer(graph, &params.voice, voicing, probe);
    }

    if params.overtones.count > 0 {
        graph = overtone_mixer(graph, &params.voice, &params.overtones, probe);
    }

    Ok(graph)
}

fn chord_mixer(
    root: BoxedStreamer,
    voice: &VoiceParams,
    voicing: &ChordVoicing,
    probe: Option<&LevelProbe>,
) -> BoxedStreamer {
    let mut mixer = Mixer::new();
    let mut root = Some(root);

    for (i, &semitones) in voicing.chord.semitones().iter().enumerate() {
        if semitones == 0 {
            if let Some(root) = root.take() {
                mixer.add(root);
            }
            continue;
        }

        let mut note = voice.clone();
        note.pitch = voice.pitch.shift_semitones(semitones);
        match build_voice(&note, probe.map(LevelProbe::follower).as_ref()) {
            Ok(streamer) => mixer.add_delayed(streamer, voicing.entry_delay(i)),
            Err(err) => debug!(chord = %voicing.chord, semitones, %err, "skipping chord note"),
        }
    }

    Box::new(mixer)
}

fn overtone_mixer(
    root: BoxedStreamer,
    voice: &VoiceParams,
    overtones: &Overtones,
    probe: Option<&LevelProbe>,
) -> BoxedStreamer {
    let mut mixer = Mixer::new();
    mixer.add(root);

    for octave in 1..=overtones.count {
        let mut partial = voice.clone();
        partial.pitch = voice.pitch.shift_octaves(octave as i32);
        partial.gain *= overtones.gain;
        match build_voice(&partial, probe.map(LevelProbe::follower).as_ref()) {
            Ok(streamer) => mixer.add(streamer),
            Err(err) => debug!(octave, hertz = partial.pitch.hertz(), %err, "skipping overtone"),
        }
    }

    Box::new(mixer)
}
