//! Accidentals supported in 31-EDO notation and their sizes in EDO steps.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A symbol altering a natural note by a fixed number of 31-EDO steps.
///
/// Several accidentals share the same offset, e.g. [`Accidental::Flat`] and [`Accidental::NaturalFlat`].
/// They sound the same but are written differently, which is why they are distinct variants.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Accidental {
    /// No sign is written.
    None,
    Flat,
    /// An explicit natural sign cancelling a previous alteration.
    Natural,
    Sharp,
    Sharp2,
    Flat2,
    Sharp3,
    Flat3,
    NaturalFlat,
    NaturalSharp,
    ArrowDown,
    MirroredFlat,
    MirroredFlat2,
    SharpSlash,
    LowerOneSeptimalComma,
    SharpSlash4,
    Sagittal11MDD,
    Sagittal11MDU,
    SagittalFlat,
    SagittalSharp,
}

/// The direction in which an [`Accidental`] moves a note.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    Flat,
    Neutral,
    Sharp,
}

impl Accidental {
    pub const ALL: [Accidental; 20] = [
        Accidental::None,
        Accidental::Flat,
        Accidental::Natural,
        Accidental::Sharp,
        Accidental::Sharp2,
        Accidental::Flat2,
        Accidental::Sharp3,
        Accidental::Flat3,
        Accidental::NaturalFlat,
        Accidental::NaturalSharp,
        Accidental::ArrowDown,
        Accidental::MirroredFlat,
        Accidental::MirroredFlat2,
        Accidental::SharpSlash,
        Accidental::LowerOneSeptimalComma,
        Accidental::SharpSlash4,
        Accidental::Sagittal11MDD,
        Accidental::Sagittal11MDU,
        Accidental::SagittalFlat,
        Accidental::SagittalSharp,
    ];

    /// Accidentals used for enharmonic respelling, from the lowest to the highest offset.
    ///
    /// The position within this list is the tie-breaker between spellings of equal magnitude.
    pub const ENHARMONIC: [Accidental; 11] = [
        Accidental::Flat3,
        Accidental::Flat2,
        Accidental::MirroredFlat2,
        Accidental::Flat,
        Accidental::MirroredFlat,
        Accidental::None,
        Accidental::SharpSlash,
        Accidental::Sharp,
        Accidental::SharpSlash4,
        Accidental::Sharp2,
        Accidental::Sharp3,
    ];

    /// Signed alteration in 31-EDO steps.
    ///
    /// ```
    /// # use edo31::accidental::Accidental;
    /// assert_eq!(Accidental::Sharp.offset(), 2);
    /// assert_eq!(Accidental::MirroredFlat2.offset(), -3);
    /// assert_eq!(Accidental::NaturalFlat.offset(), Accidental::Flat.offset());
    /// ```
    pub fn offset(self) -> i16 {
        match self {
            Accidental::None | Accidental::Natural => 0,
            Accidental::Flat
            | Accidental::NaturalFlat
            | Accidental::SagittalFlat => -2,
            Accidental::Sharp
            | Accidental::NaturalSharp
            | Accidental::SagittalSharp => 2,
            Accidental::Sharp2 => 4,
            Accidental::Flat2 => -4,
            Accidental::Sharp3 => 6,
            Accidental::Flat3 => -6,
            Accidental::ArrowDown
            | Accidental::MirroredFlat
            | Accidental::LowerOneSeptimalComma
            | Accidental::Sagittal11MDD => -1,
            Accidental::MirroredFlat2 => -3,
            Accidental::SharpSlash | Accidental::Sagittal11MDU => 1,
            Accidental::SharpSlash4 => 3,
        }
    }

    pub fn direction(self) -> Direction {
        match self.offset() {
            offset if offset > 0 => Direction::Sharp,
            offset if offset < 0 => Direction::Flat,
            _ => Direction::Neutral,
        }
    }

    /// Position within [`Accidental::ENHARMONIC`], if this accidental is used for respelling.
    pub fn simplicity_rank(self) -> Option<usize> {
        Self::ENHARMONIC
            .iter()
            .position(|&accidental| accidental == self)
    }

    /// The identifier used in settings files and log messages, e.g. `SHARP_SLASH`.
    pub fn name(self) -> &'static str {
        match self {
            Accidental::None => "NONE",
            Accidental::Flat => "FLAT",
            Accidental::Natural => "NATURAL",
            Accidental::Sharp => "SHARP",
            Accidental::Sharp2 => "SHARP2",
            Accidental::Flat2 => "FLAT2",
            Accidental::Sharp3 => "SHARP3",
            Accidental::Flat3 => "FLAT3",
            Accidental::NaturalFlat => "NATURAL_FLAT",
            Accidental::NaturalSharp => "NATURAL_SHARP",
            Accidental::ArrowDown => "ARROW_DOWN",
            Accidental::MirroredFlat => "MIRRORED_FLAT",
            Accidental::MirroredFlat2 => "MIRRORED_FLAT2",
            Accidental::SharpSlash => "SHARP_SLASH",
            Accidental::LowerOneSeptimalComma => "LOWER_ONE_SEPTIMAL_COMMA",
            Accidental::SharpSlash4 => "SHARP_SLASH4",
            Accidental::Sagittal11MDD => "SAGITTAL_11MDD",
            Accidental::Sagittal11MDU => "SAGITTAL_11MDU",
            Accidental::SagittalFlat => "SAGITTAL_FLAT",
            Accidental::SagittalSharp => "SAGITTAL_SHARP",
        }
    }

    /// Plain-text rendering used when no custom glyph is configured.
    pub fn default_glyph(self) -> &'static str {
        match self {
            Accidental::None => "",
            Accidental::Flat => "b",
            Accidental::Natural => "h",
            Accidental::Sharp => "#",
            Accidental::Sharp2 => "x",
            Accidental::Flat2 => "bb",
            Accidental::Sharp3 => "#x",
            Accidental::Flat3 => "bbb",
            Accidental::NaturalFlat => "hb",
            Accidental::NaturalSharp => "h#",
            Accidental::ArrowDown => "v",
            Accidental::MirroredFlat => "d",
            Accidental::MirroredFlat2 => "db",
            Accidental::SharpSlash => "t",
            Accidental::LowerOneSeptimalComma => "L",
            Accidental::SharpSlash4 => "t#",
            Accidental::Sagittal11MDD => "\\!/",
            Accidental::Sagittal11MDU => "/|\\",
            Accidental::SagittalFlat => "\\!!/",
            Accidental::SagittalSharp => "/||\\",
        }
    }
}

impl Display for Accidental {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Accidental {
    type Err = String;

    /// ```
    /// # use edo31::accidental::Accidental;
    /// assert_eq!("SHARP_SLASH4".parse(), Ok(Accidental::SharpSlash4));
    /// assert!("SHARP_SLASH5".parse::<Accidental>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|accidental| accidental.name() == s)
            .ok_or_else(|| format!("Unknown accidental: {s}"))
    }
}
