//! Pitch values with semitone and octave arithmetic.
//!
//! Well-known pitches come from a fixed table so that shifting a table
//! pitch lands on another exact table entry. Arbitrary frequencies fall
//! back to the equal-temperament formula.

mod table;

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::SynthError;

use table::KNOWN_PITCHES;

/// Table index keyed by the exact bit pattern of each frequency.
static KNOWN_INDEX: Lazy<HashMap<u64, usize>> = Lazy::new(|| {
    KNOWN_PITCHES
        .iter()
        .enumerate()
        .map(|(i, p)| (p.hertz.to_bits(), i))
        .collect()
});

/// A pitch: display name, frequency in Hz, and MIDI note number when it has one.
///
/// A frequency of 0 Hz is silence. Pitches are immutable; the shift
/// operations return new values. Serialized as the bare frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Pitch {
    name: Cow<'static, str>,
    hertz: f64,
    midi_id: Option<u8>,
}

impl Pitch {
    pub(crate) const fn known(name: &'static str, hertz: f64, midi_id: Option<u8>) -> Self {
        Pitch {
            name: Cow::Borrowed(name),
            hertz,
            midi_id,
        }
    }

    /// The 0 Hz pitch.
    pub const fn silence() -> Self {
        Pitch::known("Silence", 0.0, None)
    }

    /// Build a pitch from a raw frequency.
    ///
    /// Returns the table entry when `hertz` matches one exactly, otherwise an
    /// anonymous pitch named after its frequency.
    pub fn from_hertz(hertz: f64) -> Self {
        if hertz == 0.0 {
            return Pitch::silence();
        }
        if let Some(&i) = KNOWN_INDEX.get(&hertz.to_bits()) {
            return KNOWN_PITCHES[i].clone();
        }
        Pitch {
            name: Cow::Owned(format!("{hertz}Hz")),
            hertz,
            midi_id: None,
        }
    }

    /// The table pitch for a MIDI note number (0..=127).
    pub fn from_midi(midi_id: u8) -> Option<Self> {
        if midi_id > 127 {
            return None;
        }
        KNOWN_PITCHES.get(midi_id as usize).cloned()
    }

    /// Every table pitch in ascending order.
    pub fn known_pitches() -> &'static [Pitch] {
        &KNOWN_PITCHES
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hertz(&self) -> f64 {
        self.hertz
    }

    pub fn midi_id(&self) -> Option<u8> {
        self.midi_id
    }

    pub fn is_silence(&self) -> bool {
        self.hertz == 0.0
    }

    /// Position in the known-pitch table, if this is a table pitch.
    pub fn table_index(&self) -> Option<usize> {
        KNOWN_INDEX.get(&self.hertz.to_bits()).copied()
    }

    /// Shift by `semitones` (negative shifts down).
    ///
    /// Table pitches move by table index while the result stays in range.
    /// Everything else is scaled by `2^(semitones/12)` and snapped back to
    /// the table only on an exact frequency match.
    pub fn shift_semitones(&self, semitones: i32) -> Pitch {
        if let Some(i) = self.table_index() {
            let shifted = i as i64 + semitones as i64;
            if shifted >= 0 && (shifted as usize) < KNOWN_PITCHES.len() {
                return KNOWN_PITCHES[shifted as usize].clone();
            }
        }
        Pitch::from_hertz(self.hertz * 2.0_f64.powf(semitones as f64 / 12.0))
    }

    pub fn shift_octaves(&self, octaves: i32) -> Pitch {
        self.shift_semitones(octaves.saturating_mul(12))
    }

    /// The inclusive run of table pitches between `from` and `to`.
    ///
    /// Descends when `from` is above `to`. Empty when either end is not a
    /// table pitch.
    pub fn range(from: &Pitch, to: &Pitch) -> Vec<Pitch> {
        let (Some(from), Some(to)) = (from.table_index(), to.table_index()) else {
            return Vec::new();
        };
        if from <= to {
            KNOWN_PITCHES[from..=to].to_vec()
        } else {
            KNOWN_PITCHES[to..=from].iter().rev().cloned().collect()
        }
    }
}

impl Default for Pitch {
    fn default() -> Self {
        Pitch::silence()
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<f64> for Pitch {
    fn from(hertz: f64) -> Self {
        Pitch::from_hertz(hertz)
    }
}

impl From<Pitch> for f64 {
    fn from(pitch: Pitch) -> Self {
        pitch.hertz
    }
}

/// Parses note names such as `C4`, `F#3`, `Bb5` or `C-1`.
impl FromStr for Pitch {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || SynthError::UnknownPitch(s.to_string());
        let mut chars = s.chars();
        let base: i64 = match chars.next().ok_or_else(unknown)? {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return Err(unknown()),
        };

        let mut accidental: i64 = 0;
        let mut peek = chars.clone();
        match peek.next() {
            Some('#' | '♯') => {
                accidental = 1;
                chars = peek;
            }
            Some('b' | '♭') => {
                accidental = -1;
                chars = peek;
            }
            _ => {}
        }
        let octave: i64 = chars.as_str().parse().map_err(|_| unknown())?;

        let index = (octave + 1) * 12 + base + accidental;
        if index < 0 || index as usize >= KNOWN_PITCHES.len() {
            return Err(unknown());
        }
        Ok(KNOWN_PITCHES[index as usize].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a4() -> Pitch {
        "A4".parse().unwrap()
    }

    #[test]
    fn table_covers_twelve_octaves() {
        let pitches = Pitch::known_pitches();
        assert_eq!(pitches.len(), 144);
        assert_eq!(pitches[0].name(), "C-1");
        assert_eq!(pitches[143].name(), "B10");
        assert!(
            pitches.windows(2).all(|w| w[0].hertz() < w[1].hertz()),
            "table must be strictly ascending"
        );
    }

    #[test]
    fn midi_ids_match_table_index() {
        for (i, p) in Pitch::known_pitches().iter().enumerate() {
            if i < 128 {
                assert_eq!(p.midi_id(), Some(i as u8), "midi id of {p}");
            } else {
                assert_eq!(p.midi_id(), None, "{p} is outside the MIDI range");
            }
        }
    }

    #[test]
    fn parses_note_names() {
        assert_eq!(a4().hertz(), 440.0);
        assert_eq!("C4".parse::<Pitch>().unwrap().midi_id(), Some(60));
        assert_eq!("C-1".parse::<Pitch>().unwrap().hertz(), 8.175799);
        let sharp: Pitch = "F#4".parse().unwrap();
        let flat: Pitch = "Gb4".parse().unwrap();
        assert_eq!(sharp, flat);
        assert_eq!(sharp.name(), "F♯/G♭4");
        assert!("H4".parse::<Pitch>().is_err());
        assert!("C11".parse::<Pitch>().is_err());
        assert!("Cb-1".parse::<Pitch>().is_err());
        assert!("".parse::<Pitch>().is_err());
    }

    #[test]
    fn zero_shift_is_identity_for_table_pitches() {
        for p in Pitch::known_pitches() {
            assert_eq!(&p.shift_semitones(0), p);
        }
    }

    #[test]
    fn twelve_semitones_is_one_octave() {
        for p in Pitch::known_pitches() {
            assert_eq!(p.shift_semitones(12), p.shift_octaves(1), "from {p}");
        }
        let odd = Pitch::from_hertz(300.0);
        assert_eq!(odd.shift_semitones(12), odd.shift_octaves(1));
    }

    #[test]
    fn table_shift_uses_index_arithmetic() {
        let a5 = a4().shift_octaves(1);
        assert_eq!(a5.name(), "A5");
        assert_eq!(a5.hertz(), 880.0);
        assert_eq!(a4().shift_semitones(3).name(), "C5");
        assert_eq!(a4().shift_semitones(-9).name(), "C4");
    }

    #[test]
    fn shift_past_table_end_uses_formula() {
        let b10 = Pitch::known_pitches()[143].clone();
        let above = b10.shift_semitones(1);
        assert_eq!(above.midi_id(), None);
        assert!((above.hertz() - 31608.53 * 2.0_f64.powf(1.0 / 12.0)).abs() < 1e-6);
        assert!(above.table_index().is_none());
        assert_eq!(above.name(), format!("{}Hz", above.hertz()));
    }

    #[test]
    fn huge_octave_shift_saturates() {
        let up = a4().shift_octaves(i32::MAX);
        assert_eq!(up.hertz(), f64::INFINITY);
        let down = a4().shift_octaves(i32::MIN);
        assert_eq!(down.hertz(), 0.0);
    }

    #[test]
    fn flat_first_names_for_black_keys() {
        let names: Vec<_> = Pitch::known_pitches()[60..72].iter().map(|p| p.name().to_string()).collect();
        assert_eq!(
            names,
            ["C4", "C♯/D♭4", "D4", "E♭/D♯4", "E4", "F4", "F♯/G♭4", "G4", "A♭/G♯4", "A4", "B♭/A♯4", "B4"]
        );
    }

    #[test]
    fn arbitrary_shift_round_trips() {
        let p = Pitch::from_hertz(300.0);
        for n in [-7, -1, 1, 5, 19] {
            let back = p.shift_semitones(n).shift_semitones(-n);
            assert!((back.hertz() - 300.0).abs() < 1e-9, "shift by {n} drifted to {}", back.hertz());
        }
    }

    #[test]
    fn from_hertz_snaps_to_table() {
        let p = Pitch::from_hertz(440.0);
        assert_eq!(p.name(), "A4");
        assert_eq!(p.midi_id(), Some(69));
        let near = Pitch::from_hertz(440.0000001);
        assert_eq!(near.midi_id(), None, "no tolerance on table lookup");
    }

    #[test]
    fn silence_stays_silent() {
        let s = Pitch::silence();
        assert!(s.is_silence());
        assert!(s.shift_octaves(3).is_silence());
        assert_eq!(Pitch::from_hertz(0.0), s);
    }

    #[test]
    fn range_ascending_and_descending() {
        let c4: Pitch = "C4".parse().unwrap();
        let e4: Pitch = "E4".parse().unwrap();
        let up: Vec<_> = Pitch::range(&c4, &e4).iter().map(|p| p.name().to_string()).collect();
        assert_eq!(up, ["C4", "C♯/D♭4", "D4", "E♭/D♯4", "E4"]);
        let down = Pitch::range(&e4, &c4);
        assert_eq!(down.first(), Some(&e4));
        assert_eq!(down.last(), Some(&c4));
        assert_eq!(Pitch::range(&c4, &c4), vec![c4.clone()]);
    }

    #[test]
    fn range_needs_table_endpoints() {
        let c4: Pitch = "C4".parse().unwrap();
        assert!(Pitch::range(&c4, &Pitch::from_hertz(300.0)).is_empty());
        assert!(Pitch::range(&Pitch::silence(), &c4).is_empty());
    }

    #[test]
    fn serializes_as_frequency() {
        let json = serde_json::to_string(&a4()).unwrap();
        assert_eq!(json, "440.0");
        let back: Pitch = serde_json::from_str("261.6256").unwrap();
        assert_eq!(back.name(), "C4");
    }
}
