//! Chord catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A chord shape, described by semitone offsets from its root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordType {
    Major,
    Minor,
    /// Also known as sus or sus4.
    Fourth,
    Sixth,
    /// Dominant seventh.
    Seventh,
    MajorSeventh,
    MinorSeventh,
    Augmented,
    Diminished,
}

impl ChordType {
    /// All chord types in catalog order.
    pub fn all() -> [ChordType; 9] {
        [
            ChordType::Major,
            ChordType::Minor,
            ChordType::Fourth,
            ChordType::Sixth,
            ChordType::Seventh,
            ChordType::MajorSeventh,
            ChordType::MinorSeventh,
            ChordType::Augmented,
            ChordType::Diminished,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            ChordType::Major => "Major",
            ChordType::Minor => "Minor",
            ChordType::Fourth => "Fourth",
            ChordType::Sixth => "Sixth",
            ChordType::Seventh => "Seventh",
            ChordType::MajorSeventh => "Major Seventh",
            ChordType::MinorSeventh => "Minor Seventh",
            ChordType::Augmented => "Augmented",
            ChordType::Diminished => "Diminished",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ChordType::Major => "M",
            ChordType::Minor => "m",
            ChordType::Fourth => "4",
            ChordType::Sixth => "6",
            ChordType::Seventh => "7",
            ChordType::MajorSeventh => "maj7",
            ChordType::MinorSeventh => "m7",
            ChordType::Augmented => "aug",
            ChordType::Diminished => "dim",
        }
    }

    /// Semitone offsets from the root, root first.
    pub fn semitones(self) -> &'static [i32] {
        match self {
            ChordType::Major => &[0, 4, 7],
            ChordType::Minor => &[0, 3, 7],
            ChordType::Fourth => &[0, 5, 7],
            ChordType::Sixth => &[0, 4, 7, 9],
            ChordType::Seventh => &[0, 4, 7, 10],
            ChordType::MajorSeventh => &[0, 4, 7, 11],
            ChordType::MinorSeventh => &[0, 3, 7, 10],
            ChordType::Augmented => &[0, 4, 8],
            ChordType::Diminished => &[0, 3, 6],
        }
    }
}

impl fmt::Display for ChordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
