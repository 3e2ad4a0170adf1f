//! Natural note names and the identity of a written note within a measure.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// One of the seven natural letters.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum NoteName {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteName {
    /// All note names in alphabetical order starting from C.
    pub const ALL: [NoteName; 7] = [
        NoteName::C,
        NoteName::D,
        NoteName::E,
        NoteName::F,
        NoteName::G,
        NoteName::A,
        NoteName::B,
    ];

    /// The order in which letters appear in a written key signature, i.e. the chain of fifths.
    pub const KEY_SIGNATURE_ORDER: [NoteName; 7] = [
        NoteName::F,
        NoteName::C,
        NoteName::G,
        NoteName::D,
        NoteName::A,
        NoteName::E,
        NoteName::B,
    ];

    /// Distance in 31-EDO steps from C.
    ///
    /// ```
    /// # use edo31::note::NoteName;
    /// assert_eq!(NoteName::C.base_step(), 0);
    /// assert_eq!(NoteName::F.base_step(), 13);
    /// assert_eq!(NoteName::B.base_step(), 28);
    /// ```
    pub fn base_step(self) -> u16 {
        match self {
            NoteName::C => 0,
            NoteName::D => 5,
            NoteName::E => 10,
            NoteName::F => 13,
            NoteName::G => 18,
            NoteName::A => 23,
            NoteName::B => 28,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            NoteName::C => 'C',
            NoteName::D => 'D',
            NoteName::E => 'E',
            NoteName::F => 'F',
            NoteName::G => 'G',
            NoteName::A => 'A',
            NoteName::B => 'B',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        Some(match c.to_ascii_uppercase() {
            'C' => NoteName::C,
            'D' => NoteName::D,
            'E' => NoteName::E,
            'F' => NoteName::F,
            'G' => NoteName::G,
            'A' => NoteName::A,
            'B' => NoteName::B,
            _ => return None,
        })
    }
}

impl Display for NoteName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for NoteName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next().and_then(NoteName::from_char), chars.next()) {
            (Some(note_name), None) => Ok(note_name),
            _ => Err(format!("Invalid note name: {s}")),
        }
    }
}

/// Identifies a written note within a measure: its letter plus the octave it is written in.
///
/// Accidentals apply to a single [`NoteIdentity`] until the end of the measure.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NoteIdentity {
    pub note_name: NoteName,
    pub octave: i32,
}

impl NoteIdentity {
    pub fn new(note_name: NoteName, octave: i32) -> Self {
        Self { note_name, octave }
    }
}

impl Display for NoteIdentity {
    /// ```
    /// # use edo31::note::{NoteIdentity, NoteName};
    /// assert_eq!(NoteIdentity::new(NoteName::F, 4).to_string(), "F4");
    /// assert_eq!(NoteIdentity::new(NoteName::B, -1).to_string(), "B-1");
    /// ```
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.note_name, self.octave)
    }
}
